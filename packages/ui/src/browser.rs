//! Thin wrappers over browser facilities: chosen files and the clipboard.

use api::FileUpload;
use dioxus::prelude::*;

/// Content type from the file extension, for browsers that report none.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read the first file of a file input's change event into memory.
pub async fn read_first_file(evt: &FormEvent) -> Option<FileUpload> {
    let file = evt.files().into_iter().next()?;
    let file_name = file.name();
    let content_type = file
        .content_type()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| guess_content_type(&file_name).to_string());
    match file.read_bytes().await {
        Ok(bytes) => Some(FileUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }),
        Err(e) => {
            tracing::warn!(file = %file_name, error = %e, "could not read selected file");
            None
        }
    }
}

/// Copy text to the clipboard and wait for the browser to accept it.
///
/// Returns false when the write is rejected or no clipboard is exposed
/// (non-secure origins, native builds).
pub async fn copy_to_clipboard(text: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let Some(window) = web_sys::window() else {
            return false;
        };
        let navigator = window.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &"clipboard".into())
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .map(|value| value.unchecked_into::<web_sys::Clipboard>());
        let Some(clipboard) = clipboard else {
            tracing::debug!("clipboard API not exposed on this origin");
            return false;
        };
        match JsFuture::from(clipboard.write_text(text)).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = ?e, "clipboard write rejected");
                false
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(len = text.len(), "no clipboard outside the browser");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("IMG_001.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("scan.png"), "image/png");
        assert_eq!(guess_content_type("README"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_copy_reports_missing_clipboard() {
        assert!(!copy_to_clipboard("XK42QZ").await);
    }
}
