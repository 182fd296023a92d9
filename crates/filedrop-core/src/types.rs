//! Shared types for the file input widget.

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_IMAGE_EXTENSIONS;

/// A file handed to the widget by a drop or the native picker.
///
/// The widget never reads file contents itself; it only needs enough
/// metadata to classify the file and describe it.
pub trait SourceFile {
    /// File name including extension (e.g. `"holiday.jpeg"`).
    fn name(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> u64;

    /// MIME type reported by the browser, if any.
    fn content_type(&self) -> Option<&str> {
        None
    }
}

/// Result produced by the image editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedImage {
    /// File name for the edited image.
    pub name: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// Encoded image data.
    pub bytes: Vec<u8>,
    /// Display source (usually a Blob URL) showing the edited image.
    pub source: String,
}

impl SourceFile for EditedImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn content_type(&self) -> Option<&str> {
        Some(&self.mime_type)
    }
}

/// The caller-visible value of the widget once a file is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed<F> {
    /// A file committed as-is (any non-image file).
    File(F),
    /// The result of finishing the image editor.
    Edited(EditedImage),
}

impl<F: SourceFile> Committed<F> {
    /// Name of the committed file.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => file.name(),
            Self::Edited(edited) => &edited.name,
        }
    }

    /// Size of the committed file in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        match self {
            Self::File(file) => file.size(),
            Self::Edited(edited) => edited.size(),
        }
    }

    /// MIME type of the committed file, if known.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::File(file) => file.content_type(),
            Self::Edited(edited) => edited.content_type(),
        }
    }
}

/// Observable state of the widget.
///
/// Built on demand by [`FileInputController::state`] and handed to the
/// drag enter/leave callbacks.
///
/// [`FileInputController::state`]: crate::FileInputController::state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState<F> {
    /// Document-level drag enters without a matching leave.
    pub entered_in_document: u32,
    /// Drop-region drag enters without a matching leave.
    pub is_over: u32,
    /// The committed final value.
    pub value: Option<Committed<F>>,
    /// The provisional image awaiting edit.
    pub temp_value: Option<F>,
    /// Current preview source.
    pub image: Option<String>,
    /// Whether an edit has been finalized for the current image.
    pub has_been_edited: bool,
}

impl<F> Default for WidgetState<F> {
    fn default() -> Self {
        Self {
            entered_in_document: 0,
            is_over: 0,
            value: None,
            temp_value: None,
            image: None,
            has_been_edited: false,
        }
    }
}

/// Configuration for a file input widget.
///
/// Missing fields fall back to [`Default`], so a host can deserialize a
/// partial JSON object such as `{"label": "Avatar"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInputConfig {
    /// Label text rendered above the drop area.
    pub label: String,

    /// Whether to render metadata for the committed file.
    pub display_metadata: bool,

    /// Whether to render a thumbnail for the current image.
    pub display_image_thumbnail: bool,

    /// Lowercase extensions (without the dot) treated as images.
    pub image_extensions: Vec<String>,
}

impl Default for FileInputConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            display_metadata: true,
            display_image_thumbnail: true,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
        }
    }
}

impl FileInputConfig {
    /// Create a configuration with the given label and default options.
    #[must_use]
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_zeroed() {
        let state = WidgetState::<EditedImage>::default();
        assert_eq!(state.entered_in_document, 0);
        assert_eq!(state.is_over, 0);
        assert!(state.value.is_none());
        assert!(state.temp_value.is_none());
        assert!(state.image.is_none());
        assert!(!state.has_been_edited);
    }

    #[test]
    fn config_defaults_show_everything() {
        let config = FileInputConfig::default();
        assert!(config.display_metadata);
        assert!(config.display_image_thumbnail);
        assert!(config.image_extensions.iter().any(|e| e == "jpeg"));
    }

    #[test]
    fn config_deserializes_partial_json() {
        let config: FileInputConfig =
            serde_json::from_str(r#"{"label": "Avatar", "display_metadata": false}"#).unwrap();
        assert_eq!(config.label, "Avatar");
        assert!(!config.display_metadata);
        assert!(config.display_image_thumbnail);
        assert_eq!(config.image_extensions, FileInputConfig::default().image_extensions);
    }

    #[test]
    fn edited_image_reports_its_own_size_and_type() {
        let edited = EditedImage {
            name: "photo.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0; 42],
            source: "blob:edited".into(),
        };
        let committed = Committed::<EditedImage>::Edited(edited);
        assert_eq!(committed.name(), "photo.png");
        assert_eq!(committed.size(), 42);
        assert_eq!(committed.content_type(), Some("image/png"));
    }
}
