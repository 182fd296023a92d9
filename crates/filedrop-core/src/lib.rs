//! filedrop-core: Pure state machine for the file input widget (sans-IO).
//!
//! Tracks drag enter/leave episodes with reentrant counters, classifies
//! incoming files, holds images as provisional values until the image
//! editor finishes, and derives which views the widget should render.
//!
//! This crate has **no browser dependencies** -- every transition takes
//! plain values and returns an optional [`Notice`] for the caller to
//! dispatch. All DOM interaction lives in `filedrop-io`.

pub mod classify;
pub mod controller;
pub mod drag;
pub mod edit;
pub mod metadata;
pub mod present;
pub mod types;

pub use classify::{DEFAULT_IMAGE_EXTENSIONS, file_extension, is_image_name};
pub use controller::{FileInputController, Ingest, Notice, PreviewTicket, Selection, Thumbnailer};
pub use drag::DragCounters;
pub use edit::{EditError, EditOps, png_file_name};
pub use metadata::{FileMetadata, FormattedSize, format_size};
pub use present::{DropAreaStatus, Overrides, Presentation, Renderer, present};
pub use types::{Committed, EditedImage, FileInputConfig, SourceFile, WidgetState};
