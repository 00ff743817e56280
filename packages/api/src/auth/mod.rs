//! Account routes (`/auth/*`) and the client-side [`session`] state machine.
//!
//! The 2FA routes answer with bare JSON instead of the usual envelope.

pub mod session;

use serde::Serialize;

use crate::client::{ApiClient, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::{
    AuthPayload, Credentials, Envelope, PasswordReset, Registration, TwoFactorSetup,
    TwoFactorStatus,
};

/// Shown when a login attempt gets no usable answer.
pub const LOGIN_FALLBACK: &str = "Unable to reach the server";

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct CodeBody<'a> {
    code: &'a str,
}

impl<T: Transport> ApiClient<T> {
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let envelope: Envelope<AuthPayload> = self
            .call(
                Method::Post,
                "/auth/login".into(),
                Body::json(credentials)?,
                LOGIN_FALLBACK,
            )
            .await?;
        Ok(envelope.data)
    }

    /// Create an account. The payload has no token when the server wants the
    /// email verified first.
    pub async fn register(&self, registration: &Registration) -> Result<AuthPayload, ApiError> {
        let envelope: Envelope<Option<AuthPayload>> = self
            .call(
                Method::Post,
                "/auth/register".into(),
                Body::json(registration)?,
                "Registration failed",
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/auth/verify-email".into(),
            Body::json(&TokenBody { token })?,
            "Email verification failed",
        )
        .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/auth/forgot-password".into(),
            Body::json(&EmailBody { email })?,
            "Failed to send the reset email",
        )
        .await
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/auth/reset-password".into(),
            Body::json(reset)?,
            "Failed to reset password",
        )
        .await
    }

    pub async fn two_factor_status(&self) -> Result<TwoFactorStatus, ApiError> {
        let status: Option<TwoFactorStatus> = self
            .call(
                Method::Get,
                "/auth/2fa-status".into(),
                Body::Empty,
                "Failed to load two-factor status",
            )
            .await?;
        Ok(status.unwrap_or_default())
    }

    pub async fn enable_two_factor(&self) -> Result<TwoFactorSetup, ApiError> {
        self.call(
            Method::Post,
            "/auth/enable-2fa".into(),
            Body::Empty,
            "Failed to enable two-factor authentication",
        )
        .await
    }

    pub async fn verify_two_factor(&self, code: &str) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/auth/verify-2fa".into(),
            Body::json(&CodeBody { code: code.trim() })?,
            "Invalid verification code",
        )
        .await
    }

    pub async fn disable_two_factor(&self) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/auth/disable-2fa".into(),
            Body::Empty,
            "Failed to disable two-factor authentication",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{ApiError, Body, Credentials, Method, Registration};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_unwraps_token_and_user() {
        let (api, mock, _) = client(None);
        mock.respond(
            Method::Post,
            "/auth/login",
            200,
            &json!({"status":"success","data":{"token":"t1","user":{"_id":"u1","email":"a@b.c"}}}),
        );
        let payload = api
            .login(&Credentials {
                email: "a@b.c".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(payload.token.as_deref(), Some("t1"));
        assert_eq!(payload.user.unwrap().email, "a@b.c");
        assert!(mock.requests()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_login_unreachable_server() {
        let (api, mock, _) = client(None);
        mock.fail(Method::Post, "/auth/login", "dns error");
        let err = api
            .login(&Credentials {
                email: "a@b.c".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unable to reach the server");
    }

    #[tokio::test]
    async fn test_register_without_data() {
        let (api, mock, _) = client(None);
        mock.respond(
            Method::Post,
            "/auth/register",
            201,
            &json!({"status":"success","message":"Check your inbox"}),
        );
        let payload = api
            .register(&Registration {
                first_name: "A".into(),
                last_name: "B".into(),
                email: "a@b.c".into(),
                password: "longenough".into(),
            })
            .await
            .unwrap();
        assert!(payload.token.is_none());
    }

    #[tokio::test]
    async fn test_two_factor_flow() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(Method::Get, "/auth/2fa-status", 200, &json!({"enabled":false}));
        mock.respond(
            Method::Post,
            "/auth/enable-2fa",
            200,
            &json!({"qrCode":"data:image/png;base64,AAAA"}),
        );
        mock.respond(Method::Post, "/auth/verify-2fa", 400, &json!({"message":"Code expired"}));

        assert!(!api.two_factor_status().await.unwrap().enabled);
        let setup = api.enable_two_factor().await.unwrap();
        assert!(setup.qr_code.starts_with("data:image/png"));
        let err = api.verify_two_factor(" 123456 ").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Code expired".into()
            }
        );
        let Body::Json(sent) = &mock.requests_with(Method::Post)[1].body else {
            panic!("expected json body");
        };
        assert_eq!(sent, &json!({"code":"123456"}));
    }
}
