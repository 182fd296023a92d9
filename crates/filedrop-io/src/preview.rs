//! Blob URL previews for picked files.
//!
//! Images are previewed from an object URL over the file's own bytes,
//! so the browser decodes them and nothing is re-encoded until the
//! editor finishes.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

use filedrop_core::{SourceFile, file_extension};

use crate::file::PickedFile;

/// Errors that can occur while creating or reading a preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// Reading the picked file failed.
    #[error("failed to read file: {0}")]
    Read(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Best-effort image MIME type from a file name.
///
/// Used when the browser reports no type; `<img>` needs `image/svg+xml`
/// to render SVG from a Blob.
#[must_use]
pub fn guess_image_mime(name: &str) -> &'static str {
    let ext = file_extension(name).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("tif" | "tiff") => "image/tiff",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Wrap `bytes` in a Blob of type `mime_type` and return an object URL.
///
/// The returned URL must be revoked via [`revoke_blob_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
pub fn bytes_to_blob_url(bytes: &[u8], mime_type: &str) -> Result<String, PreviewError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Read a picked file and return a Blob URL previewing it.
///
/// # Errors
///
/// Returns [`PreviewError::Read`] if the file cannot be read.
/// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
#[allow(clippy::future_not_send)] // WASM is single-threaded; FileData is !Send
pub async fn file_preview_url(file: &PickedFile) -> Result<String, PreviewError> {
    let bytes = file
        .data()
        .read_bytes()
        .await
        .map_err(|e| PreviewError::Read(e.to_string()))?;
    let mime_type = file
        .content_type()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| guess_image_mime(file.name()));
    bytes_to_blob_url(&bytes, mime_type)
}

/// Fetch the bytes behind a preview URL.
///
/// # Errors
///
/// Returns [`PreviewError::JsError`] if there is no window or the fetch
/// or body read fails.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, PreviewError> {
    let window =
        web_sys::window().ok_or_else(|| PreviewError::JsError("no global window".into()))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(PreviewError::JsError(format!(
            "fetching preview failed with status {}",
            response.status()
        )));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Revoke a Blob URL previously created by [`bytes_to_blob_url`].
///
/// Non-blob sources are left alone. Best-effort: failures are ignored
/// since the URL may already have been revoked.
pub fn revoke_blob_url(url: &str) {
    if url.starts_with("blob:") {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}
