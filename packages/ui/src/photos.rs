//! Family photo gallery: grid, upload dialog and delete confirmation.

use api::{FileUpload, Id, Photo, PhotoUpload};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaTrash, FaUpload};
use dioxus_free_icons::Icon;

use crate::auth::use_auth;
use crate::browser::read_first_file;
use crate::components::{Alert, Button, ButtonVariant, Field, Label, ModalOverlay, Spinner, TextAreaField};
use crate::confirm::{ConfirmDialog, PendingDelete};
use crate::form::{recheck, submit, FormStatus};
use crate::validation::{check_photo, validate_form, FieldErrors, PhotoForm};

/// Alt text for a photo: its title, or a generic label.
pub fn photo_caption(photo: &Photo) -> String {
    photo
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Family photo")
        .to_string()
}

#[component]
pub fn PhotoGrid(photos: Vec<Photo>, on_delete: EventHandler<Photo>) -> Element {
    if photos.is_empty() {
        return rsx! {
            p { class: "p-8 text-center text-sm text-neutral-500", "No photos yet" }
        };
    }

    rsx! {
        ul {
            class: "grid grid-cols-[repeat(auto-fill,minmax(160px,1fr))] gap-3 p-0 list-none",
            for photo in photos {
                li {
                    key: "{photo.id}",
                    class: "flex flex-col gap-1",
                    a {
                        href: "{photo.url}",
                        target: "_blank",
                        img { class: "w-full aspect-square object-cover rounded-md", src: "{photo.preview_url()}", alt: "{photo_caption(&photo)}", loading: "lazy" }
                    }
                    div {
                        class: "flex items-center gap-2",
                        span { class: "flex-1 truncate text-sm", "{photo_caption(&photo)}" }
                        if let Some(name) = photo.uploaded_by.as_ref().and_then(|u| u.name()) {
                            span { class: "text-sm text-neutral-500", "by {name}" }
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            title: "Delete",
                            onclick: {
                                let photo = photo.clone();
                                move |_| on_delete.call(photo.clone())
                            },
                            Icon { width: 14, height: 14, icon: FaTrash }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn PhotoUploadDialog(family_id: Id, on_uploaded: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut form = use_signal(PhotoForm::default);
    let mut file = use_signal(|| None::<FileUpload>);
    let mut status = use_signal(FormStatus::default);

    let choose = move |evt: FormEvent| async move {
        let picked = read_first_file(&evt).await;
        status.write().fields.remove("photo");
        if let Err(message) = check_photo(picked.as_ref()) {
            status.write().fields.insert("photo", message);
        }
        file.set(picked);
    };

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let family_id = family_id.clone();
        let mut auth = auth;
        spawn(async move {
            let current = form();
            let chosen = file();
            let mut validation = validate_form(&current);
            if let Err(message) = check_photo(chosen.as_ref()) {
                let mut fields = validation.err().unwrap_or_else(FieldErrors::new);
                fields.insert("photo", message);
                validation = Err(fields);
            }
            let client = auth.client();
            let outcome = submit(&mut status, validation, || async {
                // validated above
                let Some(file) = chosen else {
                    return Ok(());
                };
                let upload = PhotoUpload {
                    file,
                    title: current.title.trim().to_string(),
                    description: current.description.trim().to_string(),
                };
                client.upload_photo(&family_id, upload).await
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if result.is_ok() {
                    on_uploaded.call(());
                }
            }
        });
    };

    let st = status();
    let chosen_name = file.read().as_ref().map(|f| f.file_name.clone());
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            form {
                class: "p-6",
                onsubmit: save,
                h2 { class: "m-0 mb-4 text-lg font-semibold", "Upload a photo" }
                if let Some(err) = st.error.clone() {
                    Alert { message: err }
                }
                div {
                    class: "flex flex-col gap-1 mb-4",
                    Label { html_for: "photo-file", "Photo" }
                    input {
                        id: "photo-file",
                        class: "input",
                        r#type: "file",
                        accept: "image/jpeg,image/png",
                        onchange: choose,
                    }
                    if let Some(name) = chosen_name {
                        span { class: "text-sm text-neutral-500", "{name}" }
                    }
                    if let Some(err) = st.field("photo") {
                        p { class: "field-error", "{err}" }
                    }
                }
                Field {
                    id: "photo-title",
                    label: "Title",
                    value: form.read().title.clone(),
                    error: st.field("title"),
                    oninput: move |v: String| {
                        form.write().title = v;
                        recheck(&mut status, &*form.peek(), "title");
                    },
                }
                TextAreaField {
                    id: "photo-description",
                    label: "Description",
                    value: form.read().description.clone(),
                    oninput: move |v: String| form.write().description = v,
                }
                div {
                    class: "flex justify-end gap-2",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        r#type: "submit",
                        disabled: st.loading,
                        if st.loading { "Uploading..." } else { "Upload" }
                    }
                }
            }
        }
    }
}

/// Photos of one family with upload and delete.
#[component]
pub fn PhotoGallery(family_id: Id) -> Element {
    let auth = use_auth();
    let mut uploading = use_signal(|| false);
    let mut pending = use_signal(PendingDelete::<Photo>::default);
    let mut delete_error = use_signal(|| None::<String>);

    let mut photos = use_resource(use_reactive!(|family_id| {
        let mut auth = auth;
        async move {
            let result = auth.client().list_photos(&family_id).await;
            auth.observe(&result);
            result
        }
    }));

    let confirm_delete = move |_| {
        let Some(photo) = pending.write().confirm() else {
            return;
        };
        let mut auth = auth;
        spawn(async move {
            delete_error.set(None);
            let result = auth.client().delete_photo(&photo.id).await;
            auth.observe(&result);
            match result {
                Ok(()) => photos.restart(),
                Err(e) => delete_error.set(Some(e.message())),
            }
        });
    };

    let body = match &*photos.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { Alert { message: e.message() } },
        Some(Ok(list)) => rsx! {
            PhotoGrid {
                photos: list.clone(),
                on_delete: move |photo| pending.write().request(photo),
            }
        },
    };

    rsx! {
        section {
            class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md",
            div {
                class: "flex items-center justify-between mb-4",
                h2 { "Photos" }
                Button {
                    onclick: move |_| uploading.set(true),
                    Icon { width: 14, height: 14, icon: FaUpload }
                    " Upload"
                }
            }
            if let Some(err) = delete_error() {
                Alert { message: err }
            }
            {body}
        }

        if uploading() {
            PhotoUploadDialog {
                family_id: family_id.clone(),
                on_uploaded: move |_| {
                    uploading.set(false);
                    photos.restart();
                },
                on_cancel: move |_| uploading.set(false),
            }
        }

        if let Some(photo) = pending.read().target().cloned() {
            ConfirmDialog {
                title: "Delete photo",
                message: format!("Delete \"{}\"? This cannot be undone.", photo_caption(&photo)),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending.write().cancel(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_caption_falls_back() {
        let photo: Photo = serde_json::from_value(json!({"_id":"p1","url":"/a.jpg","title":"  "})).unwrap();
        assert_eq!(photo_caption(&photo), "Family photo");
    }

    #[test]
    fn test_grid_prefers_thumbnails() {
        #[component]
        fn Harness(photos: Vec<Photo>) -> Element {
            rsx! { PhotoGrid { photos, on_delete: |_| {} } }
        }
        let photos: Vec<Photo> = serde_json::from_value(json!([
            {"_id":"p1","url":"/full.jpg","thumbnailUrl":"/thumb.jpg","title":"Beach",
             "uploadedBy":{"_id":"u1","firstName":"Anne","lastName":"Martin"}},
            {"_id":"p2","url":"/second.png"}
        ]))
        .unwrap();
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { photos });
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("/thumb.jpg"));
        assert!(html.contains("/second.png"));
        assert!(html.contains("by Anne Martin"));

        let mut empty = VirtualDom::new_with_props(Harness, HarnessProps { photos: vec![] });
        empty.rebuild_in_place();
        assert!(dioxus_ssr::render(&empty).contains("No photos yet"));
    }
}
