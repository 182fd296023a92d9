//! filedrop-io: Browser I/O and Dioxus component library.
//!
//! Wraps the `filedrop-core` state machine in a [`FileInput`] component:
//! listens for drag events on the document and the drop area, reads
//! picked files into Blob URL previews, hosts the image editor and
//! renders metadata and thumbnails.

pub mod components;
pub mod dialog;
pub mod document_drag;
pub mod file;
pub mod preview;

pub use components::{
    DropArea, FileInput, FileInputMetadata, FileInputMetadataProps, ImageEditor, ImageThumbnail,
    ImageThumbnailProps,
};
pub use file::PickedFile;
