//! Invitations: generating a link or code for a family, previewing a code,
//! and joining.

use serde::Serialize;

use crate::client::{segment, ApiClient, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::{Envelope, Id, InviteCode, InviteLink, InvitePreview, JoinRequest};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForFamily<'a> {
    family_id: &'a Id,
}

impl<T: Transport> ApiClient<T> {
    pub async fn invite_link(&self, family: &Id) -> Result<String, ApiError> {
        let envelope: Envelope<InviteLink> = self
            .call(
                Method::Post,
                "/invites/invite-link".into(),
                Body::json(&ForFamily { family_id: family })?,
                "Failed to generate invite link",
            )
            .await?;
        Ok(envelope.data.invite_link)
    }

    pub async fn invite_code(&self, family: &Id) -> Result<String, ApiError> {
        let envelope: Envelope<InviteCode> = self
            .call(
                Method::Post,
                "/invites/invite-code".into(),
                Body::json(&ForFamily { family_id: family })?,
                "Failed to generate invite code",
            )
            .await?;
        Ok(envelope.data.invite_code)
    }

    /// Look up the family behind an invite code before joining.
    pub async fn invite_preview(&self, code: &str) -> Result<InvitePreview, ApiError> {
        let code = segment(code.trim(), "Invalid invite code")?;
        let preview: Option<InvitePreview> = self
            .call(
                Method::Get,
                format!("/invites/by-code/{code}"),
                Body::Empty,
                "Invalid invite code",
            )
            .await?;
        Ok(preview.unwrap_or_default())
    }

    pub async fn join_family(&self, request: &JoinRequest) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/invites/join".into(),
            Body::json(request)?,
            "Failed to join family",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{ApiError, Body, Id, JoinRequest, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_invite_link_sends_family_id() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Post,
            "/invites/invite-link",
            200,
            &json!({"status":"success","data":{"inviteLink":"http://app/join?token=abc"}}),
        );
        let link = api.invite_link(&Id::from("f9")).await.unwrap();
        assert_eq!(link, "http://app/join?token=abc");
        let Body::Json(sent) = &mock.requests()[0].body else {
            panic!("expected json body");
        };
        assert_eq!(sent, &json!({"familyId":"f9"}));
    }

    #[tokio::test]
    async fn test_join_with_code_only() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(Method::Post, "/invites/join", 200, &json!({"status":"success"}));
        let mut request = JoinRequest::with_code("XK42QZ");
        request.relationship = Some("cousin".into());
        api.join_family(&request).await.unwrap();
        let Body::Json(sent) = &mock.requests()[0].body else {
            panic!("expected json body");
        };
        assert_eq!(sent, &json!({"code":"XK42QZ","relationship":"cousin"}));
    }

    #[tokio::test]
    async fn test_unknown_code_preview() {
        let (api, _mock, _) = client(Some("tok"));
        let err = api.invite_preview("nope").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_preview_code_stays_in_one_segment() {
        let (api, mock, _) = client(Some("tok"));
        let _ = api.invite_preview(" AB/../../families?x=1 ").await;
        assert_eq!(
            mock.requests()[0].path,
            "/invites/by-code/AB%2F..%2F..%2Ffamilies%3Fx=1"
        );
    }

    #[tokio::test]
    async fn test_dot_code_is_not_sent() {
        let (api, mock, _) = client(Some("tok"));
        let err = api.invite_preview("..").await.unwrap_err();
        assert_eq!(err, ApiError::Invalid("Invalid invite code".into()));
        assert_eq!(mock.request_count(), 0);
    }
}
