//! The signed-in user's own profile.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::{Envelope, FileUpload, ProfileUpdate, UploadedPicture, User, UserData};

/// `PUT /user/profile` has answered both wrapped and bare over time.
#[derive(Deserialize)]
#[serde(untagged)]
enum UpdatedUser {
    Wrapped(Envelope<UserData>),
    Bare(User),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PictureUpdate<'a> {
    profile_picture: &'a str,
}

impl<T: Transport> ApiClient<T> {
    /// Save the profile and return the user record the cache should now hold.
    ///
    /// When the response carries no user, `current` is patched with the
    /// submitted fields instead.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        current: Option<&User>,
    ) -> Result<Option<User>, ApiError> {
        self.put_profile(Body::json(update)?, current, |user| update.apply_to(user))
            .await
    }

    /// Upload a new picture and record it on the profile straight away.
    ///
    /// Returns the picture URL and the user record the cache now holds.
    pub async fn change_profile_picture(
        &self,
        file: FileUpload,
        current: Option<&User>,
    ) -> Result<(String, Option<User>), ApiError> {
        let url = self.upload_profile_picture(file).await?;
        let body = Body::json(&PictureUpdate {
            profile_picture: &url,
        })?;
        let user = self
            .put_profile(body, current, |user| {
                user.profile_picture = Some(url.clone());
            })
            .await?;
        Ok((url, user))
    }

    async fn put_profile(
        &self,
        body: Body,
        current: Option<&User>,
        patch: impl FnOnce(&mut User),
    ) -> Result<Option<User>, ApiError> {
        let response = self
            .execute(
                Method::Put,
                "/user/profile".into(),
                body,
                "Failed to update profile",
            )
            .await?;
        let user = match response.json::<UpdatedUser>() {
            Ok(UpdatedUser::Wrapped(envelope)) => Some(envelope.data.user),
            Ok(UpdatedUser::Bare(user)) => Some(user),
            Err(_) => current.cloned().map(|mut user| {
                patch(&mut user);
                user
            }),
        };
        if let Some(user) = &user {
            if let Err(e) = self.credentials().save_user(user) {
                tracing::warn!(error = %e, "could not cache updated user");
            }
        }
        Ok(user)
    }

    /// Upload a new picture and return its URL.
    pub async fn upload_profile_picture(&self, file: FileUpload) -> Result<String, ApiError> {
        let uploaded: UploadedPicture = self
            .call(
                Method::Post,
                "/user/profile-picture".into(),
                Body::Multipart(vec![file.into_part("profilePicture")]),
                "Failed to upload profile picture",
            )
            .await?;
        Ok(uploaded.url)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{FileUpload, Method, ProfileUpdate, User};
    use serde_json::json;

    fn cached() -> User {
        serde_json::from_value(json!({"_id":"u1","email":"m@d.fr","firstName":"Marie"})).unwrap()
    }

    #[tokio::test]
    async fn test_update_profile_patches_cache_without_user_in_response() {
        let (api, mock, creds) = client(Some("tok"));
        mock.respond(Method::Put, "/user/profile", 200, &json!({"status":"success"}));
        let update = ProfileUpdate {
            first_name: "Marie".into(),
            last_name: "Curie".into(),
            preferred_language: "en".into(),
            ..Default::default()
        };
        let user = api.update_profile(&update, Some(&cached())).await.unwrap().unwrap();
        assert_eq!(user.display_name(), "Marie Curie");
        assert_eq!(creds.user::<User>().unwrap().language(), "en");
    }

    #[tokio::test]
    async fn test_update_profile_prefers_server_user() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Put,
            "/user/profile",
            200,
            &json!({"data":{"user":{"_id":"u1","email":"m@d.fr","firstName":"Server"}}}),
        );
        let user = api
            .update_profile(&ProfileUpdate::from_user(&cached()), Some(&cached()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Server"));
    }

    #[tokio::test]
    async fn test_picture_upload_field_name() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(Method::Post, "/user/profile-picture", 200, &json!({"url":"/u/p.png"}));
        let url = api
            .upload_profile_picture(FileUpload {
                file_name: "me.png".into(),
                content_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();
        assert_eq!(url, "/u/p.png");
        let crate::Body::Multipart(parts) = &mock.requests()[0].body else {
            panic!("expected multipart body");
        };
        assert!(matches!(&parts[0], crate::Part::File { name, .. } if name == "profilePicture"));
    }

    #[tokio::test]
    async fn test_changed_picture_is_saved_to_profile() {
        let (api, mock, creds) = client(Some("tok"));
        mock.respond(Method::Post, "/user/profile-picture", 200, &json!({"url":"/u/new.png"}));
        mock.respond(Method::Put, "/user/profile", 200, &json!({"status":"success"}));
        let file = FileUpload {
            file_name: "me.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        let (url, user) = api.change_profile_picture(file, Some(&cached())).await.unwrap();
        assert_eq!(url, "/u/new.png");
        assert_eq!(user.unwrap().profile_picture.as_deref(), Some("/u/new.png"));

        let sent = mock.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[1].method, Method::Put);
        assert_eq!(sent[1].body, crate::Body::Json(json!({"profilePicture":"/u/new.png"})));
        let cached: User = creds.user().unwrap();
        assert_eq!(cached.profile_picture.as_deref(), Some("/u/new.png"));
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_profile_alone() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Post,
            "/user/profile-picture",
            413,
            &json!({"message":"File too large"}),
        );
        let file = FileUpload {
            file_name: "me.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; 8],
        };
        let err = api.change_profile_picture(file, Some(&cached())).await.unwrap_err();
        assert_eq!(err.to_string(), "File too large");
        assert!(mock.requests_with(Method::Put).is_empty());
    }
}
