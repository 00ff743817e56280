//! # User model and authentication payloads
//!
//! ## [`User`]
//!
//! The client's cached copy of the signed-in account. The server owns the record;
//! the client keeps it in the `user` storage key so the navbar can greet the user
//! without a round-trip. Only `id` is guaranteed: the rest may be missing from
//! older responses, hence the `#[serde(default)]`s.
//! [`User::display_name`] returns "First Last" or falls back to the email address.
//!
//! ## Request bodies
//!
//! | Struct | Route |
//! |--------|-------|
//! | [`Credentials`] | `POST /auth/login` |
//! | [`Registration`] | `POST /auth/register` |
//! | [`PasswordReset`] | `POST /auth/reset-password` |
//! | [`ProfileUpdate`] | `PUT /user/profile` |
//!
//! [`UploadedPicture`] is the body of a profile picture upload.
//!
//! [`AuthPayload`] is the `data` of a login or registration response.

use serde::{Deserialize, Serialize};

use super::Id;

/// User information cached on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: Id,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, alias = "profilePictureUrl", alias = "avatarUrl")]
    pub profile_picture: Option<String>,
}

impl User {
    /// Get display name, falling back to email if no name is set.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.email.clone()
        } else {
            full
        }
    }

    /// Preferred UI language, defaulting to French like the server does.
    pub fn language(&self) -> &str {
        self.preferred_language.as_deref().unwrap_or("fr")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

/// Profile fields sent on save. The password pair is only sent when changing it.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub preferred_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl ProfileUpdate {
    /// Pre-fill from the cached user, leaving the password fields empty.
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            preferred_language: user.language().to_string(),
            phone_number: user.phone_number.clone(),
            ..Self::default()
        }
    }

    /// Apply the non-secret fields to a cached user record.
    pub fn apply_to(&self, user: &mut User) {
        user.first_name = Some(self.first_name.clone());
        user.last_name = Some(self.last_name.clone());
        user.preferred_language = Some(self.preferred_language.clone());
        if self.phone_number.is_some() {
            user.phone_number = self.phone_number.clone();
        }
        if self.profile_picture.is_some() {
            user.profile_picture = self.profile_picture.clone();
        }
    }
}

/// Body of `POST /user/profile-picture`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadedPicture {
    pub url: String,
}

/// `data` of a login/registration response. Registration may omit the token
/// when the account still needs email verification.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_mongo_style_record() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","email":"marie@example.org","firstName":"Marie","lastName":"Dupont","profilePictureUrl":"/p.png"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.display_name(), "Marie Dupont");
        assert_eq!(user.profile_picture.as_deref(), Some("/p.png"));
        assert_eq!(user.language(), "fr");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(r#"{"id":3,"email":"x@y.z","firstName":"  "}"#).unwrap();
        assert_eq!(user.display_name(), "x@y.z");
    }

    #[test]
    fn test_profile_update_omits_password_when_unchanged() {
        let update = ProfileUpdate {
            first_name: "Jean".into(),
            last_name: "Dupont".into(),
            preferred_language: "en".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["firstName"], "Jean");
        assert!(json.get("newPassword").is_none());
        assert!(json.get("phoneNumber").is_none());
    }
}
