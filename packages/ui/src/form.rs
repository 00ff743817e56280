//! # Form submission state
//!
//! Every form runs the same sequence: validate, clear the banner, set
//! loading, call the service, record the outcome, clear loading. A failed
//! validation stops before the service is called.

use std::future::Future;

use api::ApiError;
use dioxus::prelude::*;

use crate::validation::{validate_field, FieldErrors, FormRules};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub fields: FieldErrors,
}

impl FormStatus {
    /// Record the validation outcome. Returns whether to proceed with the call.
    pub fn begin(&mut self, validation: Result<(), FieldErrors>) -> bool {
        match validation {
            Ok(()) => {
                self.fields = FieldErrors::new();
                self.error = None;
                self.success = None;
                self.loading = true;
                true
            }
            Err(fields) => {
                self.fields = fields;
                false
            }
        }
    }

    pub fn finish<T>(&mut self, result: &Result<T, ApiError>) {
        self.loading = false;
        if let Err(e) = result {
            self.error = Some(e.message());
        }
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(str::to_string)
    }
}

/// Something holding a [`FormStatus`]: a plain value in tests, a signal in components.
pub trait StatusCell {
    fn update(&mut self, f: impl FnOnce(&mut FormStatus));
}

impl StatusCell for FormStatus {
    fn update(&mut self, f: impl FnOnce(&mut FormStatus)) {
        f(self)
    }
}

impl StatusCell for Signal<FormStatus> {
    fn update(&mut self, f: impl FnOnce(&mut FormStatus)) {
        f(&mut self.write())
    }
}

/// Re-validate `field` after an edit, but only once it has shown an error.
pub fn recheck<F: FormRules>(status: &mut Signal<FormStatus>, form: &F, field: &str) {
    if status.peek().fields.get(field).is_some() {
        status.write().fields.refresh(field, validate_field(form, field));
    }
}

/// Run one submission. `None` means validation failed and `call` was never made.
pub async fn submit<S, T, Fut>(
    status: &mut S,
    validation: Result<(), FieldErrors>,
    call: impl FnOnce() -> Fut,
) -> Option<Result<T, ApiError>>
where
    S: StatusCell,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut proceed = false;
    status.update(|s| proceed = s.begin(validation));
    if !proceed {
        return None;
    }
    let result = call().await;
    status.update(|s| s.finish(&result));
    Some(result)
}
