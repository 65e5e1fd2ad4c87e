#![forbid(unsafe_code)]

//! Provides a heap-allocated image type.

use alloc::vec::Vec;

use crate::{BufferFault, EncodeError};

/// A direct-color image, stored row-major with the origin at the top left.
///
/// Unlike a `Vec<Vec<P>>` the rows of a bitmap can't be ragged, so encoding a
/// bitmap can only fail on the overall dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bitmap<P> {
  width: u32,
  height: u32,
  pixels: Vec<P>,
}
impl<P> Bitmap<P> {
  /// Wraps a pixel vec as an image of the given size.
  ///
  /// ## Failure
  /// * `pixels.len()` must equal `width * height`, otherwise you get a
  ///   [`BufferFault::RaggedRow`] for the first row that would be short.
  pub fn try_from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, EncodeError> {
    let expected = (width as usize).checked_mul(height as usize).ok_or(EncodeError::CheckedMath)?;
    if pixels.len() != expected {
      let w = width as usize;
      let row = if w == 0 { 0 } else { pixels.len() / w };
      let found = if w == 0 { pixels.len() } else { pixels.len() % w };
      return Err(BufferFault::RaggedRow { row, expected: w, found }.into());
    }
    Ok(Self { width, height, pixels })
  }

  /// Makes an image where every pixel is a clone of `fill`.
  pub fn new_filled(width: u32, height: u32, fill: P) -> Result<Self, EncodeError>
  where
    P: Clone,
  {
    let len = (width as usize).checked_mul(height as usize).ok_or(EncodeError::CheckedMath)?;
    let mut pixels = Vec::new();
    pixels.try_reserve(len)?;
    pixels.resize(len, fill);
    Ok(Self { width, height, pixels })
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Iterates the rows of the image, top to bottom.
  ///
  /// A zero width image has no rows, whatever its height.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[P]> {
    // `chunks_exact` panics on a chunk size of 0
    self.pixels.chunks_exact(self.width.max(1) as usize).take(self.height as usize)
  }
}
