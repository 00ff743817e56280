//! Data models exchanged with the REST API.

mod child;
mod envelope;
mod family;
mod id;
mod invite;
mod permissions;
mod photo;
mod security;
mod user;

pub use child::{Child, ChildInput};
pub use envelope::Envelope;
pub(crate) use envelope::{ChildData, ChildrenData, FamiliesData, FamilyData, PhotosData, UserData};
pub use family::{Family, FamilyInput};
pub use id::Id;
pub use invite::{InviteCode, InviteLink, InvitePreview, JoinRequest};
pub use permissions::{ManagedUser, Permissions};
pub use photo::{FileUpload, Photo, PhotoUpload, Uploader};
pub use security::{TwoFactorSetup, TwoFactorStatus};
pub use user::{
    AuthPayload, Credentials, PasswordReset, ProfileUpdate, Registration, UploadedPicture, User,
};
