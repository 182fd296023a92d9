//! File type sniffing by extension.

/// Extensions treated as images when no custom list is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "tif", "tiff", "ico", "avif",
];

/// Extract the extension of a file name, without the dot.
///
/// Returns `None` when there is no dot, when the dot is the last
/// character, or when the only dot starts the name (`.png` is a hidden
/// file called "png", not a PNG).
#[must_use]
pub fn file_extension(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Check whether `name` has one of the given image extensions.
///
/// Comparison is ASCII case-insensitive. Names without an extension are
/// never images.
#[must_use]
pub fn is_image_name<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    file_extension(name).is_some_and(|ext| {
        extensions
            .iter()
            .any(|known| known.as_ref().eq_ignore_ascii_case(ext))
    })
}
