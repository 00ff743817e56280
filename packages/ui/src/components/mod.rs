//! Small building blocks shared by every page.

mod alert;
mod button;
mod field;
mod input;
mod modal_overlay;

pub use alert::{Alert, AlertKind, Spinner};
pub use button::{Button, ButtonVariant};
pub use field::{Field, TextAreaField};
pub use input::{Input, Label, TextArea};
pub use modal_overlay::ModalOverlay;
