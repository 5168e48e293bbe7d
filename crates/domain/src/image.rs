//! Image: a camera frame handed to the image classifier.

use crate::error::{CatpointError, ValidationError};

/// Bytes per pixel in the RGBA buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA camera frame.
///
/// The pixel buffer always holds exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a pixel buffer after checking it matches the dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyImage`] for a zero dimension,
    /// [`ValidationError::ImageTooLarge`] when the byte length overflows
    /// `usize`, and [`ValidationError::PixelBufferMismatch`] when the buffer
    /// length is off.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CatpointError> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(ValidationError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A fully transparent frame of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyImage`] for a zero dimension and
    /// [`ValidationError::ImageTooLarge`] when the byte length overflows.
    pub fn blank(width: u32, height: u32) -> Result<Self, CatpointError> {
        let len = byte_len(width, height)?;
        Self::new(width, height, vec![0; len])
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Length in bytes of an RGBA buffer for the given dimensions.
fn byte_len(width: u32, height: u32) -> Result<usize, ValidationError> {
    if width == 0 || height == 0 {
        return Err(ValidationError::EmptyImage);
    }
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or(ValidationError::ImageTooLarge { width, height })
}
