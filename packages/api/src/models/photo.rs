use serde::{Deserialize, Serialize};

use super::Id;

/// Who uploaded a photo: either a bare user id or an embedded summary,
/// depending on whether the server populated the reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Uploader {
    Reference(Id),
    Profile {
        #[serde(alias = "_id")]
        id: Id,
        #[serde(default, rename = "firstName")]
        first_name: Option<String>,
        #[serde(default, rename = "lastName")]
        last_name: Option<String>,
    },
}

impl Uploader {
    pub fn id(&self) -> &Id {
        match self {
            Uploader::Reference(id) => id,
            Uploader::Profile { id, .. } => id,
        }
    }

    pub fn name(&self) -> Option<String> {
        match self {
            Uploader::Reference(_) => None,
            Uploader::Profile {
                first_name,
                last_name,
                ..
            } => {
                let name = format!(
                    "{} {}",
                    first_name.as_deref().unwrap_or_default(),
                    last_name.as_deref().unwrap_or_default()
                );
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(alias = "_id")]
    pub id: Id,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<Uploader>,
}

impl Photo {
    /// Thumbnail when available, full image otherwise.
    pub fn preview_url(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.url)
    }
}

/// A file picked in the browser, read into memory.
#[derive(Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Body of `POST /photos/:familyId/upload`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file: FileUpload,
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploader_reference_or_profile() {
        let bare: Photo = serde_json::from_str(r#"{"id":1,"url":"/a.jpg","uploadedBy":"u9"}"#).unwrap();
        assert_eq!(bare.uploaded_by.as_ref().map(|u| u.id().as_str()), Some("u9"));
        assert_eq!(bare.preview_url(), "/a.jpg");

        let full: Photo = serde_json::from_str(
            r#"{"_id":"p2","url":"/b.jpg","thumbnailUrl":"/b_t.jpg",
                "uploadedBy":{"_id":"u1","firstName":"Jean","lastName":"Dupont"}}"#,
        )
        .unwrap();
        assert_eq!(full.preview_url(), "/b_t.jpg");
        assert_eq!(
            full.uploaded_by.and_then(|u| u.name()).as_deref(),
            Some("Jean Dupont")
        );
    }
}
