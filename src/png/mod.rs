#![forbid(unsafe_code)]

//! Module for writing PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## What Gets Written
//!
//! A PNG is an 8 byte signature followed by a series of "chunks". Each chunk
//! is a big-endian `u32` length, a 4 byte type tag, the payload, and then a
//! CRC-32 of the tag and payload. This module only ever writes the critical
//! chunks needed for a truecolor image:
//! * **Header** (`IHDR`) - The width and height, plus the fixed pixel format:
//!   8 bits per channel, RGB, not interlaced.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream, the encoder just
//!   splits it up when it's longer than the configured limit.
//! * **End** (`IEND`) - The last chunk, it's always empty.
//!
//! ## Encoding Stages
//!
//! Each stage is a plain function that can be used (and tested) on its own:
//!
//! 1) [`prepare_scanlines`] checks that the rows form a rectangle and turns
//!    them into "filtered" lines. Every line uses filter type 0, so this is
//!    just a `0` byte in front of each row's pixel bytes.
//! 2) A [`Compressor`] turns the filtered lines into a zlib stream. With the
//!    `miniz_oxide` feature you get [`ZlibCompressor`], or you can bring your
//!    own.
//! 3) [`write_chunk`] frames each payload, computing the length and CRC.
//! 4) [`PngEncoder::encode`] runs the other stages in order and builds the
//!    full PNG in memory. If any stage fails you get an error and no bytes.
//!
//! With the `std` feature the encoder can also write the result out, see
//! [`PngEncoder::encode_to_writer`] and [`PngEncoder::save`].

#[cfg(feature = "miniz_oxide")]
use alloc::format;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use core::fmt::{Debug, Write};

#[cfg(feature = "alloc")]
use log::{debug, trace};

#[cfg(feature = "alloc")]
use crate::{rgb888_bytes, BufferFault, CompressionError, EncodeError, RGB888};

mod crc32;
pub use crc32::*;

#[cfg(feature = "alloc")]
mod chunk;
#[cfg(feature = "alloc")]
pub use chunk::*;

#[cfg(feature = "alloc")]
mod ihdr;
#[cfg(feature = "alloc")]
pub use ihdr::*;

#[cfg(feature = "alloc")]
mod scanline;
#[cfg(feature = "alloc")]
pub use scanline::*;

#[cfg(feature = "alloc")]
mod compress;
#[cfg(feature = "alloc")]
pub use compress::*;

#[cfg(feature = "alloc")]
mod encoder;
#[cfg(feature = "alloc")]
pub use encoder::*;


/// The 8 bytes that every PNG starts with.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the initial 8 bytes are the PNG signature.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}
