mod layout;
pub use layout::{AppShell, NotFound, Protected};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod password;
pub use password::{ForgotPassword, ResetPassword};

mod verify_email;
pub use verify_email::VerifyEmail;

mod families;
pub use families::{FamilyDetails, FamilyGroups};

mod my_children;
pub use my_children::MyChildren;

mod join_family;
pub use join_family::JoinFamily;

mod two_factor;
pub use two_factor::TwoFactor;

mod profile;
pub use profile::Profile;

mod permissions;
pub use permissions::Permissions;
