//! Dioxus UI components for filedrop.
//!
//! Provides the [`FileInput`] widget and the views it composes: the drop
//! area, default metadata and thumbnail renderers, and the image editor.

mod drop_area;
mod file_input;
mod image_editor;
mod metadata;
mod thumbnail;

pub use drop_area::DropArea;
pub use file_input::FileInput;
pub use image_editor::ImageEditor;
pub use metadata::{FileInputMetadata, FileInputMetadataProps};
pub use thumbnail::{ImageThumbnail, ImageThumbnailProps};

/// Default styles for the BEM classes used by the components.
pub const STYLESHEET: &str = include_str!("../../assets/filedrop.css");
