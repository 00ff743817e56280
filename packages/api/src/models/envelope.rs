use serde::Deserialize;

use super::{Child, Family, Photo, User};

/// The `{ status, data, message }` wrapper most routes respond with.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FamiliesData {
    #[serde(default)]
    pub families: Vec<Family>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FamilyData {
    pub family: Family,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChildrenData {
    #[serde(default)]
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChildData {
    pub child: Child,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotosData {
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub user: User,
}
