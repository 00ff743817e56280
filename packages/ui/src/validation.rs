//! # Form validation
//!
//! Every form is a plain struct deriving [`Validate`]. Field rules live in the
//! derive attributes; rules that depend on several fields (the optional
//! password change on the profile, the invite code that a link token makes
//! optional) live in [`FormRules::cross_check`].
//!
//! [`validate_form`] runs both and flattens the result into [`FieldErrors`]:
//! one message per field, keyed by the field name, ready to render under the
//! matching input.

use std::collections::BTreeMap;

use api::{ChildInput, FamilyInput, FileUpload, ProfileUpdate, Registration};
use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_PASSWORD_LEN: u64 = 8;

/// First message per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Keeps an existing message for the field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Replace the message for one field with the outcome of a fresh check.
    pub fn refresh(&mut self, field: &str, message: Option<String>) {
        match message {
            Some(message) => {
                self.0.insert(field.to_string(), message);
            }
            None => self.remove(field),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            // "required" wins over format errors reported for the same empty value.
            let chosen = list
                .iter()
                .find(|e| e.code == "required")
                .or_else(|| list.first());
            if let Some(error) = chosen {
                out.insert(field, describe(field, error));
            }
        }
        out
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("Invalid {}", field.replace('_', " ")),
    }
}

/// Rules spanning several fields.
pub trait FormRules: Validate {
    fn cross_check(&self, _errors: &mut FieldErrors) {}
}

pub fn validate_form<F: FormRules>(form: &F) -> Result<(), FieldErrors> {
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };
    form.cross_check(&mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Re-check a single field, e.g. while the user types.
pub fn validate_field<F: FormRules>(form: &F, field: &str) -> Option<String> {
    validate_form(form)
        .err()
        .and_then(|errors| errors.get(field).map(str::to_string))
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut e = ValidationError::new(code);
    e.message = Some(message.into());
    e
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", "This field is required"))
    } else {
        Ok(())
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `YYYY-MM-DD`, not after today.
pub fn parse_past_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| error("date_format", "Use the YYYY-MM-DD format"))?;
    if date > today() {
        return Err(error("date_future", "The date cannot be in the future"));
    }
    Ok(date)
}

fn optional_past_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    parse_past_date(value).map(|_| ())
}

fn required_past_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Birth date is required"));
    }
    parse_past_date(value).map(|_| ())
}

fn six_digits(value: &str) -> Result<(), ValidationError> {
    let code = value.trim();
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("code", "Enter the 6-digit code from your app"))
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct LoginForm {
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(custom(function = "required", message = "Password is required"))]
    pub password: String,
}

impl FormRules for LoginForm {}

impl LoginForm {
    pub fn credentials(&self) -> api::Credentials {
        api::Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = "required", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "required", message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl FormRules for RegisterForm {}

impl RegisterForm {
    pub fn registration(&self) -> Registration {
        Registration {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct ForgotPasswordForm {
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
}

impl FormRules for ForgotPasswordForm {}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct ResetPasswordForm {
    #[validate(custom(
        function = "required",
        message = "This reset link is invalid or incomplete"
    ))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl FormRules for ResetPasswordForm {}

impl ResetPasswordForm {
    pub fn reset(&self) -> api::PasswordReset {
        api::PasswordReset {
            token: self.token.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct FamilyForm {
    #[validate(
        custom(function = "required", message = "Family name is required"),
        length(max = 100, message = "Family name must be at most 100 characters")
    )]
    pub name: String,
    pub description: String,
    pub patriarch_name: String,
    pub matriarch_name: String,
    pub location: String,
    #[validate(custom = "optional_past_date")]
    pub founding_date: String,
}

impl FormRules for FamilyForm {}

impl FamilyForm {
    pub fn from_input(input: FamilyInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            patriarch_name: input.patriarch_name,
            matriarch_name: input.matriarch_name,
            location: input.location,
            founding_date: input.founding_date.unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> FamilyInput {
        FamilyInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            patriarch_name: self.patriarch_name.trim().to_string(),
            matriarch_name: self.matriarch_name.trim().to_string(),
            location: self.location.trim().to_string(),
            founding_date: trimmed(&self.founding_date),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct ChildForm {
    #[validate(
        custom(function = "required", message = "First name is required"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "required", message = "Last name is required"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,
    #[validate(custom = "required_past_date")]
    pub birth_date: String,
    pub gender: String,
    pub notes: String,
}

impl FormRules for ChildForm {}

impl ChildForm {
    pub fn from_input(input: ChildInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            birth_date: input.birth_date,
            gender: input.gender.unwrap_or_default(),
            notes: input.notes.unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> ChildInput {
        ChildInput {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            birth_date: self.birth_date.trim().to_string(),
            gender: trimmed(&self.gender),
            notes: trimmed(&self.notes),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct ProfileForm {
    #[validate(custom(function = "required", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "required", message = "Last name is required"))]
    pub last_name: String,
    pub preferred_language: String,
    pub phone_number: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn from_user(user: &api::User) -> Self {
        let update = ProfileUpdate::from_user(user);
        Self {
            first_name: update.first_name,
            last_name: update.last_name,
            preferred_language: update.preferred_language,
            phone_number: update.phone_number.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn changes_password(&self) -> bool {
        !self.new_password.is_empty() || !self.confirm_password.is_empty()
    }

    pub fn to_update(&self) -> ProfileUpdate {
        let changing = self.changes_password();
        ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            preferred_language: trimmed(&self.preferred_language).unwrap_or_else(|| "fr".into()),
            phone_number: trimmed(&self.phone_number),
            current_password: changing.then(|| self.current_password.clone()),
            new_password: changing.then(|| self.new_password.clone()),
            profile_picture: None,
        }
    }
}

impl FormRules for ProfileForm {
    fn cross_check(&self, errors: &mut FieldErrors) {
        if !self.changes_password() {
            return;
        }
        if self.current_password.is_empty() {
            errors.insert("current_password", "Current password is required");
        }
        if (self.new_password.chars().count() as u64) < MIN_PASSWORD_LEN {
            errors.insert("new_password", "Password must be at least 8 characters");
        }
        if self.new_password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match");
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct JoinForm {
    pub code: String,
    pub relationship: String,
    pub additional_info: String,
    /// Token from an invite link; makes the code optional.
    pub token: String,
}

impl FormRules for JoinForm {
    fn cross_check(&self, errors: &mut FieldErrors) {
        if self.token.trim().is_empty() && self.code.trim().is_empty() {
            errors.insert("code", "Invite code is required");
        }
    }
}

impl JoinForm {
    pub fn request(&self) -> api::JoinRequest {
        let mut request = match trimmed(&self.token) {
            Some(token) => api::JoinRequest::with_token(token),
            None => api::JoinRequest::with_code(self.code.trim()),
        };
        request.relationship = trimmed(&self.relationship);
        request.additional_info = trimmed(&self.additional_info);
        request
    }
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct TwoFactorForm {
    #[validate(custom = "six_digits")]
    pub code: String,
}

impl FormRules for TwoFactorForm {}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct PhotoForm {
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: String,
    pub description: String,
}

impl FormRules for PhotoForm {}

/// A photo must be JPEG or PNG and at most 10 MB.
pub fn check_photo(file: Option<&FileUpload>) -> Result<(), String> {
    let file = file.ok_or_else(|| "Choose a photo to upload".to_string())?;
    let kind = file.content_type.to_ascii_lowercase();
    if !matches!(kind.as_str(), "image/jpeg" | "image/jpg" | "image/png") {
        return Err("Only JPEG and PNG images are accepted".into());
    }
    if file.size() > MAX_PHOTO_BYTES {
        return Err("The photo must be 10 MB or smaller".into());
    }
    Ok(())
}

/// A profile picture may be any image type up to 5 MB.
pub fn check_profile_picture(file: &FileUpload) -> Result<(), String> {
    if !file.content_type.to_ascii_lowercase().starts_with("image/") {
        return Err("Choose an image file".into());
    }
    if file.size() > MAX_PICTURE_BYTES {
        return Err("The picture must be 5 MB or smaller".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: &str, size: usize) -> FileUpload {
        FileUpload {
            file_name: "f".into(),
            content_type: content_type.into(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn test_empty_login_reports_each_field() {
        let errors = validate_form(&LoginForm::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let form = LoginForm {
            email: "not-an-email".into(),
            password: "x".into(),
        };
        assert_eq!(
            validate_field(&form, "email").as_deref(),
            Some("Enter a valid email address")
        );
        assert_eq!(validate_field(&form, "password"), None);
    }

    #[test]
    fn test_register_password_rules() {
        let mut form = RegisterForm {
            first_name: "Marie".into(),
            last_name: "Dupont".into(),
            email: "marie@example.org".into(),
            password: "short".into(),
            confirm_password: "other".into(),
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));

        form.password = "long enough".into();
        form.confirm_password = "long enough".into();
        assert!(validate_form(&form).is_ok());
        assert_eq!(form.registration().email, "marie@example.org");
    }

    #[test]
    fn test_family_name_and_founding_date() {
        let mut form = FamilyForm {
            name: "  ".into(),
            founding_date: "01/02/1950".into(),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.get("name"), Some("Family name is required"));
        assert_eq!(errors.get("founding_date"), Some("Use the YYYY-MM-DD format"));

        form.name = "x".repeat(101);
        form.founding_date = "2999-01-01".into();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Family name must be at most 100 characters")
        );
        assert_eq!(
            errors.get("founding_date"),
            Some("The date cannot be in the future")
        );

        form.name = "Dupont".into();
        form.founding_date = String::new();
        assert!(validate_form(&form).is_ok());
        assert_eq!(form.to_input().founding_date, None);
    }

    #[test]
    fn test_child_requires_birth_date() {
        let form = ChildForm {
            first_name: "Léa".into(),
            last_name: "Dupont".into(),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("birth_date"), Some("Birth date is required"));

        let ok = ChildForm {
            birth_date: "2015-04-02".into(),
            gender: " ".into(),
            ..form
        };
        assert!(validate_form(&ok).is_ok());
        assert_eq!(ok.to_input().gender, None);
    }

    #[test]
    fn test_profile_password_change_is_optional() {
        let mut form = ProfileForm {
            first_name: "Jean".into(),
            last_name: "Dupont".into(),
            ..Default::default()
        };
        assert!(validate_form(&form).is_ok());
        assert_eq!(form.to_update().new_password, None);
        assert_eq!(form.to_update().preferred_language, "fr");

        form.new_password = "newpassword".into();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.get("current_password"),
            Some("Current password is required")
        );
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));

        form.current_password = "old".into();
        form.confirm_password = "newpassword".into();
        assert!(validate_form(&form).is_ok());
        assert_eq!(form.to_update().new_password.as_deref(), Some("newpassword"));
    }

    #[test]
    fn test_join_code_optional_with_token() {
        let form = JoinForm::default();
        assert_eq!(
            validate_form(&form).unwrap_err().get("code"),
            Some("Invite code is required")
        );
        let with_token = JoinForm {
            token: "abc".into(),
            ..Default::default()
        };
        assert!(validate_form(&with_token).is_ok());
        assert_eq!(with_token.request().token.as_deref(), Some("abc"));
        assert_eq!(with_token.request().code, None);
    }

    #[test]
    fn test_two_factor_code() {
        for bad in ["", "12345", "12345a", "1234567"] {
            let form = TwoFactorForm { code: bad.into() };
            assert!(validate_form(&form).is_err(), "{bad:?} accepted");
        }
        assert!(validate_form(&TwoFactorForm { code: " 123456 ".into() }).is_ok());
    }

    #[test]
    fn test_upload_limits() {
        assert!(check_photo(None).is_err());
        assert!(check_photo(Some(&upload("image/png", 10))).is_ok());
        assert!(check_photo(Some(&upload("image/gif", 10))).is_err());
        assert!(check_photo(Some(&upload("image/jpeg", MAX_PHOTO_BYTES + 1))).is_err());

        assert!(check_profile_picture(&upload("image/webp", 10)).is_ok());
        assert!(check_profile_picture(&upload("application/pdf", 10)).is_err());
        assert!(check_profile_picture(&upload("image/png", MAX_PICTURE_BYTES + 1)).is_err());
    }

    #[test]
    fn test_refresh_single_field() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "first");
        errors.insert("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
        errors.refresh("email", None);
        assert!(errors.is_empty());
    }
}
