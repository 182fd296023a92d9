//! Image edit operations offered by the built-in image editor.
//!
//! The editor previews [`EditOps`] live with a CSS transform and only
//! decodes and re-encodes the image when the user confirms.

use std::io::Cursor;

use crate::classify::file_extension;

/// Errors that can occur while applying edits to an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The source bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The edited image could not be encoded as PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Orientation edits: flips followed by clockwise quarter turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOps {
    /// Clockwise quarter turns, always in `0..4`.
    quarter_turns: u8,
    /// Mirror left/right.
    pub flip_horizontal: bool,
    /// Mirror top/bottom.
    pub flip_vertical: bool,
}

impl EditOps {
    /// Rotate a further 90 degrees clockwise.
    pub const fn rotate_clockwise(&mut self) {
        self.quarter_turns = (self.quarter_turns + 1) % 4;
    }

    /// Rotate a further 90 degrees counter-clockwise.
    pub const fn rotate_counter_clockwise(&mut self) {
        self.quarter_turns = (self.quarter_turns + 3) % 4;
    }

    /// Toggle the horizontal mirror.
    pub const fn toggle_flip_horizontal(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    /// Toggle the vertical mirror.
    pub const fn toggle_flip_vertical(&mut self) {
        self.flip_vertical = !self.flip_vertical;
    }

    /// Clockwise rotation in degrees (0, 90, 180 or 270).
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.quarter_turns as u16 * 90
    }

    /// `true` when applying these ops would leave the image unchanged.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.quarter_turns == 0 && !self.flip_horizontal && !self.flip_vertical
    }

    /// CSS `transform` value previewing these ops.
    ///
    /// CSS applies the right-most function first, so the scale (flips)
    /// precedes the rotation, as in [`apply`](Self::apply).
    #[must_use]
    pub fn css_transform(self) -> String {
        let sx = if self.flip_horizontal { -1 } else { 1 };
        let sy = if self.flip_vertical { -1 } else { 1 };
        format!("rotate({}deg) scale({sx}, {sy})", self.degrees())
    }

    /// Dimensions of the result for a `width` x `height` source.
    #[must_use]
    pub const fn output_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.quarter_turns % 2 == 1 {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Decode `bytes`, apply the ops and re-encode as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Decode`] if `bytes` is not a supported image.
    /// Returns [`EditError::Encode`] if PNG encoding fails.
    pub fn apply(self, bytes: &[u8]) -> Result<Vec<u8>, EditError> {
        let mut img =
            image::load_from_memory(bytes).map_err(|e| EditError::Decode(e.to_string()))?;

        if self.flip_horizontal {
            img = img.fliph();
        }
        if self.flip_vertical {
            img = img.flipv();
        }
        img = match self.quarter_turns {
            1 => img.rotate90(),
            2 => img.rotate180(),
            3 => img.rotate270(),
            _ => img,
        };

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| EditError::Encode(e.to_string()))?;
        Ok(png)
    }
}

/// File name for an edited image re-encoded as PNG.
///
/// `"holiday.JPG"` becomes `"holiday.png"`; names without an extension
/// get `.png` appended.
#[must_use]
pub fn png_file_name(original: &str) -> String {
    let stem = file_extension(original).map_or(original, |ext| {
        &original[..original.len() - ext.len() - 1]
    });
    format!("{stem}.png")
}
