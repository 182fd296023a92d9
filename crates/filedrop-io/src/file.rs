//! Files handed over by the browser.

use dioxus::html::FileData;
use filedrop_core::SourceFile;

/// A file from a drop or the native picker.
///
/// Caches the metadata the state machine needs so classification and
/// rendering never go back to the browser.
#[derive(Clone)]
pub struct PickedFile {
    data: FileData,
    name: String,
    size: u64,
    content_type: Option<String>,
}

impl PickedFile {
    /// Wrap a browser file.
    #[must_use]
    pub fn new(data: FileData) -> Self {
        let name = data.name();
        let size = data.size();
        let content_type = data.content_type();
        Self {
            data,
            name,
            size,
            content_type,
        }
    }

    /// The underlying browser file, for reading its contents.
    #[must_use]
    pub const fn data(&self) -> &FileData {
        &self.data
    }
}

impl SourceFile for PickedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl PartialEq for PickedFile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.size == other.size && self.content_type == other.content_type
    }
}

impl std::fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Wrap every file of a drop or picker event.
pub fn picked_files(files: Vec<FileData>) -> impl Iterator<Item = PickedFile> {
    files.into_iter().map(PickedFile::new)
}
