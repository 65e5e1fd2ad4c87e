use core::{fmt, num::TryFromIntError};

#[cfg(feature = "alloc")]
use alloc::string::String;

/// What was wrong with a pixel buffer that was given to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BufferFault {
  /// There were no rows at all.
  Empty,

  /// The rows had no pixels in them.
  ZeroWidth,

  /// A row didn't have the same number of pixels as the first row.
  RaggedRow {
    /// Index of the first bad row, counting from the top.
    row: usize,
    /// Width of the first row.
    expected: usize,
    /// Width of the bad row.
    found: usize,
  },

  /// The width or height is more than PNG allows (`2^31 - 1`).
  DimensionsTooLarge,
}
impl fmt::Display for BufferFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => f.write_str("the buffer has no rows"),
      Self::ZeroWidth => f.write_str("the rows have no pixels"),
      Self::RaggedRow { row, expected, found } => {
        write!(f, "row {row} has {found} pixels, expected {expected}")
      }
      Self::DimensionsTooLarge => f.write_str("width or height exceeds 2^31-1"),
    }
  }
}

/// An error reported by a [`Compressor`](crate::png::Compressor).
///
/// The message is whatever the compressor said, the encoder doesn't try to
/// interpret it.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompressionError {
  message: String,
}
#[cfg(feature = "alloc")]
impl CompressionError {
  /// Makes an error with the given message.
  #[inline]
  #[must_use]
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }

  /// The compressor's own description of what went wrong.
  #[inline]
  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }
}
#[cfg(feature = "alloc")]
impl fmt::Display for CompressionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

/// An error from the `chunkpng` crate.
///
/// Any error means that the whole encode was abandoned. You never get part of
/// a PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
  /// The pixel buffer can't be stored as an image.
  InvalidPixelBuffer(BufferFault),

  /// A chunk payload doesn't fit in the 32-bit length field.
  PayloadTooLarge {
    /// The payload length that was attempted.
    len: usize,
  },

  /// The compressor failed. The encode is not retried.
  #[cfg(feature = "alloc")]
  CompressionFailed(CompressionError),

  /// The output sink rejected the write.
  #[cfg(feature = "std")]
  Io {
    /// What sort of failure it was.
    kind: std::io::ErrorKind,
    /// The sink's own description, such as the OS error text.
    message: String,
  },

  /// The allocator couldn't give us enough space.
  #[cfg(feature = "alloc")]
  Alloc,

  /// A checked math operation failed.
  CheckedMath,
}
impl fmt::Display for EncodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidPixelBuffer(fault) => write!(f, "invalid pixel buffer: {fault}"),
      Self::PayloadTooLarge { len } => {
        write!(f, "chunk payload of {len} bytes doesn't fit a 32-bit length")
      }
      #[cfg(feature = "alloc")]
      Self::CompressionFailed(e) => write!(f, "compression failed: {e}"),
      #[cfg(feature = "std")]
      Self::Io { kind, message } => write!(f, "write failed ({kind}): {message}"),
      #[cfg(feature = "alloc")]
      Self::Alloc => f.write_str("allocation failed"),
      Self::CheckedMath => f.write_str("size computation overflowed"),
    }
  }
}
impl From<BufferFault> for EncodeError {
  #[inline]
  fn from(fault: BufferFault) -> Self {
    Self::InvalidPixelBuffer(fault)
  }
}
#[cfg(feature = "alloc")]
impl From<CompressionError> for EncodeError {
  #[inline]
  fn from(e: CompressionError) -> Self {
    Self::CompressionFailed(e)
  }
}
#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for EncodeError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<TryFromIntError> for EncodeError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}
#[cfg(feature = "std")]
impl From<std::io::Error> for EncodeError {
  #[inline]
  fn from(e: std::io::Error) -> Self {
    Self::Io { kind: e.kind(), message: alloc::string::ToString::to_string(&e) }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for CompressionError {}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::CompressionFailed(e) => Some(e),
      _ => None,
    }
  }
}
