//! Display metadata for a committed file.

use std::fmt;

use crate::classify::file_extension;
use crate::types::{Committed, SourceFile};

/// Descriptive fields shown by the metadata view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Full file name (`"report.final.pdf"`).
    pub name: String,
    /// Name without the final extension (`"report.final"`).
    pub filename: String,
    /// Final extension without the dot, lowercased, if any.
    pub extension: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, if known.
    pub mime_type: Option<String>,
}

impl FileMetadata {
    /// Describe any file-like value.
    #[must_use]
    pub fn of<F: SourceFile + ?Sized>(file: &F) -> Self {
        Self::from_parts(file.name(), file.size(), file.content_type())
    }

    /// Describe a committed value.
    #[must_use]
    pub fn of_committed<F: SourceFile>(value: &Committed<F>) -> Self {
        Self::from_parts(value.name(), value.size(), value.content_type())
    }

    fn from_parts(name: &str, size: u64, mime_type: Option<&str>) -> Self {
        let extension = file_extension(name);
        let filename = extension.map_or(name, |ext| &name[..name.len() - ext.len() - 1]);
        Self {
            name: name.to_owned(),
            filename: filename.to_owned(),
            extension: extension.map(str::to_ascii_lowercase),
            size,
            mime_type: mime_type.map(str::to_owned),
        }
    }

    /// Human-readable size, see [`format_size`].
    #[must_use]
    pub fn display_size(&self) -> FormattedSize {
        format_size(self.size)
    }
}

/// A byte count rendered with a binary unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattedSize(u64);

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

impl fmt::Display for FormattedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1024 {
            return write!(f, "{} B", self.0);
        }
        #[expect(clippy::cast_precision_loss)]
        let mut value = self.0 as f64 / 1024.0;
        let mut unit = UNITS[0];
        for &next in &UNITS[1..] {
            if value < 1024.0 {
                break;
            }
            value /= 1024.0;
            unit = next;
        }
        write!(f, "{value:.1} {unit}")
    }
}

/// Format a byte count as `512 B`, `1.0 KB`, `2.4 MB`, ...
///
/// Uses 1024-based units with one decimal above bytes.
#[must_use]
pub const fn format_size(bytes: u64) -> FormattedSize {
    FormattedSize(bytes)
}
