use serde::Deserialize;

/// Body of `GET /auth/2fa-status`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct TwoFactorStatus {
    #[serde(default)]
    pub enabled: bool,
}

/// Body of `POST /auth/enable-2fa`: a QR code (data URL) for the
/// authenticator app, and sometimes the raw secret for manual entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorSetup {
    pub qr_code: String,
    #[serde(default)]
    pub secret: Option<String>,
}
