//! User permission management.

use crate::client::{segment, ApiClient, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::{Id, ManagedUser, Permissions};

impl<T: Transport> ApiClient<T> {
    /// `GET /users` answers with a bare array.
    pub async fn list_users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        let users: Option<Vec<ManagedUser>> = self
            .call(Method::Get, "/users".into(), Body::Empty, "Failed to load users")
            .await?;
        Ok(users.unwrap_or_default())
    }

    pub async fn update_permissions(
        &self,
        user: &Id,
        permissions: &Permissions,
    ) -> Result<(), ApiError> {
        let user = segment(user.as_str(), "Failed to update permissions")?;
        self.submit(
            Method::Put,
            format!("/users/{user}/permissions"),
            Body::json(permissions)?,
            "Failed to update permissions",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{Body, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_permissions_body() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Get,
            "/users",
            200,
            &json!([{"_id":"u2","email":"p@d.fr","permissions":{"canViewHistory":true}}]),
        );
        mock.respond(Method::Put, "/users/u2/permissions", 200, &json!({}));

        let users = api.list_users().await.unwrap();
        let mut permissions = users[0].permissions;
        permissions.toggle(0);
        api.update_permissions(&users[0].id, &permissions).await.unwrap();

        let Body::Json(sent) = &mock.requests_with(Method::Put)[0].body else {
            panic!("expected json body");
        };
        assert_eq!(sent["canManageProfiles"], true);
        assert_eq!(sent["canViewHistory"], true);
        assert_eq!(sent["isAdmin"], false);
    }
}
