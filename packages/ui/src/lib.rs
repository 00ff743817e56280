//! Shared UI for the family profile app: the auth context, forms and
//! validation, and the widgets the pages in the `web` crate are built from.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");
pub const COMPONENTS_CSS: Asset = asset!("/assets/components.css");

mod auth;
pub use auth::{
    build_client, guard, use_auth, use_flash, AuthContext, AuthProvider, Client, Gate, LogoutButton,
};

pub mod browser;
pub mod confirm;
pub mod form;
pub mod validation;

mod navbar;
pub use navbar::Navbar;

mod families;
pub use families::{children_label, FamilyFormDialog, FamilyList, InviteDialog};

mod children;
pub use children::{ChildFormDialog, ChildList, ChildOwner, ChildrenPanel};

mod photos;
pub use photos::{photo_caption, PhotoGallery, PhotoGrid, PhotoUploadDialog};
