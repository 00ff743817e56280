//! Family photo routes. Uploads are multipart with `photo`, `title` and
//! `description` fields.

use crate::client::{segment, ApiClient, Body, Method, Part, Transport};
use crate::error::ApiError;
use crate::models::{Envelope, FileUpload, Id, Photo, PhotoUpload, PhotosData};

impl FileUpload {
    pub(crate) fn into_part(self, field: &str) -> Part {
        Part::File {
            name: field.to_string(),
            file_name: self.file_name,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_photos(&self, family: &Id) -> Result<Vec<Photo>, ApiError> {
        let family = segment(family.as_str(), "Failed to load photos")?;
        let envelope: Envelope<PhotosData> = self
            .call(
                Method::Get,
                format!("/photos/{family}"),
                Body::Empty,
                "Failed to load photos",
            )
            .await?;
        Ok(envelope.data.photos)
    }

    pub async fn upload_photo(&self, family: &Id, upload: PhotoUpload) -> Result<(), ApiError> {
        let family = segment(family.as_str(), "Failed to upload photo")?;
        tracing::debug!(%family, file = %upload.file.file_name, size = upload.file.size(), "uploading photo");
        let parts = vec![
            upload.file.into_part("photo"),
            Part::Text {
                name: "title".into(),
                value: upload.title,
            },
            Part::Text {
                name: "description".into(),
                value: upload.description,
            },
        ];
        self.submit(
            Method::Post,
            format!("/photos/{family}/upload"),
            Body::Multipart(parts),
            "Failed to upload photo",
        )
        .await
    }

    pub async fn delete_photo(&self, photo: &Id) -> Result<(), ApiError> {
        let photo = segment(photo.as_str(), "Failed to delete photo")?;
        self.submit(
            Method::Delete,
            format!("/photos/{photo}"),
            Body::Empty,
            "Failed to delete photo",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{Body, FileUpload, Id, Method, Part, PhotoUpload};
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_is_multipart() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(Method::Post, "/photos/f1/upload", 201, &json!({"status":"success"}));
        api.upload_photo(
            &Id::from("f1"),
            PhotoUpload {
                file: FileUpload {
                    file_name: "beach.jpg".into(),
                    content_type: "image/jpeg".into(),
                    bytes: vec![0xff, 0xd8, 0xff],
                },
                title: "Beach".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

        let Body::Multipart(parts) = &mock.requests()[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], Part::File { name, file_name, .. } if name == "photo" && file_name == "beach.jpg"));
        assert!(matches!(&parts[1], Part::Text { name, value } if name == "title" && value == "Beach"));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Get,
            "/photos/f1",
            200,
            &json!({"data":{"photos":[{"_id":"p1","url":"/u/p1.jpg"}]}}),
        );
        mock.respond(Method::Delete, "/photos/p1", 200, &json!({}));
        let photos = api.list_photos(&Id::from("f1")).await.unwrap();
        api.delete_photo(&photos[0].id).await.unwrap();
        assert_eq!(mock.requests_with(Method::Delete)[0].path, "/photos/p1");
    }
}
