//! Choose which views the widget renders.
//!
//! Pure derivation from the widget state and configuration. The label
//! and the hidden native input are always rendered, so they do not
//! appear here.

use crate::types::{FileInputConfig, WidgetState};

/// Which implementation renders a pluggable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// The built-in view.
    Default,
    /// The caller-supplied override.
    Custom,
}

impl Renderer {
    const fn pick(has_override: bool) -> Self {
        if has_override {
            Self::Custom
        } else {
            Self::Default
        }
    }
}

/// Which pluggable views the caller replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// A custom metadata view was supplied.
    pub metadata: bool,
    /// A custom image thumbnail view was supplied.
    pub thumbnail: bool,
}

/// Visual state of the drop area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropAreaStatus {
    /// No drag in progress.
    #[default]
    Idle,
    /// Something is being dragged over the document, not over the area.
    DocumentDrag,
    /// Something is being dragged over the area.
    Over,
}

impl DropAreaStatus {
    /// CSS modifier suffix for this status, if any.
    #[must_use]
    pub const fn modifier(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::DocumentDrag => Some("document-drag"),
            Self::Over => Some("over"),
        }
    }
}

/// The set of views to render for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Metadata view for the committed value.
    pub metadata: Option<Renderer>,
    /// Thumbnail view for the current image.
    pub thumbnail: Option<Renderer>,
    /// Preview source to hand to the image editor.
    pub editor: Option<String>,
    /// Drop area styling.
    pub drop_area: DropAreaStatus,
}

/// Derive the views to render.
///
/// The editor is shown while an image is held provisionally with its
/// preview ready, and replaces the plain thumbnail meanwhile.
#[must_use]
pub fn present<F>(
    state: &WidgetState<F>,
    config: &FileInputConfig,
    overrides: Overrides,
) -> Presentation {
    let editor = match (&state.temp_value, &state.image) {
        (Some(_), Some(image)) => Some(image.clone()),
        _ => None,
    };

    let metadata = (state.value.is_some() && config.display_metadata)
        .then(|| Renderer::pick(overrides.metadata));

    let thumbnail = (state.image.is_some() && editor.is_none() && config.display_image_thumbnail)
        .then(|| Renderer::pick(overrides.thumbnail));

    let drop_area = if state.is_over > 0 {
        DropAreaStatus::Over
    } else if state.entered_in_document > 0 {
        DropAreaStatus::DocumentDrag
    } else {
        DropAreaStatus::Idle
    };

    Presentation {
        metadata,
        thumbnail,
        editor,
        drop_area,
    }
}
