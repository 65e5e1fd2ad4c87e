//! Module for pixel formats.
//!
//! The encoder only stores 8-bit truecolor data, so there's just the one
//! format here. It's `Pod`, which means that a whole row of pixels can be
//! viewed as bytes (in `r, g, b` order) without copying anything.

use bytemuck::{Pod, Zeroable};

/// An 8-bit per channel RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGB888 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}
unsafe impl Zeroable for RGB888 {}
unsafe impl Pod for RGB888 {}

impl RGB888 {
  /// Makes a pixel from its three channels.
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }
}
impl From<[u8; 3]> for RGB888 {
  #[inline]
  #[must_use]
  fn from([r, g, b]: [u8; 3]) -> Self {
    Self { r, g, b }
  }
}
impl From<(u8, u8, u8)> for RGB888 {
  #[inline]
  #[must_use]
  fn from((r, g, b): (u8, u8, u8)) -> Self {
    Self { r, g, b }
  }
}
impl From<RGB888> for [u8; 3] {
  #[inline]
  #[must_use]
  fn from(RGB888 { r, g, b }: RGB888) -> Self {
    [r, g, b]
  }
}

/// Views a slice of pixels as the bytes they're made of.
#[inline]
#[must_use]
pub fn rgb888_bytes(pixels: &[RGB888]) -> &[u8] {
  bytemuck::cast_slice(pixels)
}

#[test]
fn test_rgb888_bytes_order() {
  let pixels = [RGB888::new(1, 2, 3), RGB888::from([4, 5, 6]), RGB888::from((7, 8, 9))];
  assert_eq!(rgb888_bytes(&pixels), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
  assert_eq!(core::mem::size_of::<RGB888>(), 3);
  assert_eq!(<[u8; 3]>::from(pixels[1]), [4, 5, 6]);
}
