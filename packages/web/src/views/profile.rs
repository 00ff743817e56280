//! Profile editing, optional password change and profile picture upload.

use dioxus::prelude::*;
use ui::browser::read_first_file;
use ui::components::{Alert, AlertKind, Button, Field, Label};
use ui::form::{recheck, submit, FormStatus};
use ui::use_auth;
use ui::validation::{check_profile_picture, validate_form, ProfileForm};

use crate::Route;

const LANGUAGES: [(&str, &str); 2] = [("fr", "Français"), ("en", "English")];

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let mut form = use_signal(move || auth.user().map(|u| ProfileForm::from_user(&u)).unwrap_or_default());
    let mut status = use_signal(FormStatus::default);
    let mut picture_status = use_signal(FormStatus::default);
    let mut picture = use_signal(move || auth.user().and_then(|u| u.profile_picture));

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let mut auth = auth;
        spawn(async move {
            let current = form();
            let mut update = current.to_update();
            update.profile_picture = picture();
            let before = auth.user();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                client.update_profile(&update, before.as_ref()).await
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if let Ok(saved) = result {
                    if let Some(user) = saved {
                        auth.set_user(user);
                    }
                    let mut cleared = current;
                    cleared.current_password.clear();
                    cleared.new_password.clear();
                    cleared.confirm_password.clear();
                    form.set(cleared);
                    status.write().succeed("Profile updated");
                }
            }
        });
    };

    let upload = move |evt: FormEvent| {
        let mut auth = auth;
        async move {
            let Some(file) = read_first_file(&evt).await else {
                return;
            };
            if let Err(message) = check_profile_picture(&file) {
                picture_status.write().fail(message);
                return;
            }
            let before = auth.user();
            let client = auth.client();
            let outcome = submit(&mut picture_status, Ok(()), || async {
                client.change_profile_picture(file, before.as_ref()).await
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if let Ok((url, saved)) = result {
                    picture.set(Some(url));
                    if let Some(user) = saved {
                        auth.set_user(user);
                    }
                    picture_status.write().succeed("Picture updated");
                }
            }
        }
    };

    let st = status();
    let pst = picture_status();
    let email = auth.user().map(|u| u.email).unwrap_or_default();
    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            h1 { "Your profile" }
            Link { to: Route::TwoFactor {}, "Two-factor authentication" }
        }

        section {
            class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md",
            h2 { "Profile picture" }
            if let Some(err) = pst.error.clone() {
                Alert { message: err }
            }
            if let Some(message) = pst.success.clone() {
                Alert { kind: AlertKind::Success, message }
            }
            if let Some(url) = picture() {
                img { class: "w-24 h-24 rounded-full object-cover", src: "{url}", alt: "Profile picture" }
            }
            div {
                class: "flex flex-col gap-1 mb-4",
                Label { html_for: "profile-picture", "Choose an image (5 MB max)" }
                input {
                    id: "profile-picture",
                    class: "input",
                    r#type: "file",
                    accept: "image/*",
                    disabled: pst.loading,
                    onchange: upload,
                }
            }
        }

        form {
            class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md",
            onsubmit: save,
            if let Some(err) = st.error.clone() {
                Alert { message: err }
            }
            if let Some(message) = st.success.clone() {
                Alert { kind: AlertKind::Success, message }
            }
            p { class: "text-sm text-neutral-500", "Signed in as {email}" }
            Field {
                id: "profile-first-name",
                label: "First name",
                value: form.read().first_name.clone(),
                error: st.field("first_name"),
                oninput: move |v: String| {
                    form.write().first_name = v;
                    recheck(&mut status, &*form.peek(), "first_name");
                },
            }
            Field {
                id: "profile-last-name",
                label: "Last name",
                value: form.read().last_name.clone(),
                error: st.field("last_name"),
                oninput: move |v: String| {
                    form.write().last_name = v;
                    recheck(&mut status, &*form.peek(), "last_name");
                },
            }
            div {
                class: "flex flex-col gap-1 mb-4",
                Label { html_for: "profile-language", "Preferred language" }
                select {
                    id: "profile-language",
                    class: "input",
                    value: form.read().preferred_language.clone(),
                    onchange: move |evt| form.write().preferred_language = evt.value(),
                    for (code, name) in LANGUAGES {
                        option { value: code, "{name}" }
                    }
                }
            }
            Field {
                id: "profile-phone",
                label: "Phone number",
                r#type: "tel",
                autocomplete: "tel",
                value: form.read().phone_number.clone(),
                oninput: move |v: String| form.write().phone_number = v,
            }

            h3 { "Change password" }
            p { class: "text-sm text-neutral-500", "Leave blank to keep your current password." }
            Field {
                id: "profile-current-password",
                label: "Current password",
                r#type: "password",
                autocomplete: "current-password",
                value: form.read().current_password.clone(),
                error: st.field("current_password"),
                oninput: move |v: String| {
                    form.write().current_password = v;
                    recheck(&mut status, &*form.peek(), "current_password");
                },
            }
            Field {
                id: "profile-new-password",
                label: "New password",
                r#type: "password",
                autocomplete: "new-password",
                value: form.read().new_password.clone(),
                error: st.field("new_password"),
                oninput: move |v: String| {
                    form.write().new_password = v;
                    recheck(&mut status, &*form.peek(), "new_password");
                },
            }
            Field {
                id: "profile-confirm-password",
                label: "Confirm new password",
                r#type: "password",
                autocomplete: "new-password",
                value: form.read().confirm_password.clone(),
                error: st.field("confirm_password"),
                oninput: move |v: String| {
                    form.write().confirm_password = v;
                    recheck(&mut status, &*form.peek(), "confirm_password");
                },
            }
            Button {
                r#type: "submit",
                disabled: st.loading,
                if st.loading { "Saving..." } else { "Save changes" }
            }
        }
    }
}
