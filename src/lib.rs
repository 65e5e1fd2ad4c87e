#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for writing 8-bit truecolor PNG data.
//!
//! The encoder only produces the subset of PNG that's actually needed to store
//! plain `RGB888` pixels: the signature, an `IHDR`, one or more `IDAT` chunks,
//! and an `IEND`. There's no palette support, no interlacing, and no ancillary
//! chunks. Every scanline uses filter type 0 ("None"), so the same pixels with
//! the same compressor always give the exact same bytes.
//!
//! ```no_run
//! # #[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
//! # fn demo() -> Result<(), chunkpng::EncodeError> {
//! use chunkpng::{png::encode_png, RGB888};
//! let rows = vec![vec![RGB888::new(255, 0, 0), RGB888::new(0, 255, 0)]];
//! let png_bytes: Vec<u8> = encode_png(&rows)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod pixel_formats;
pub use pixel_formats::*;

mod error;
pub use error::*;

#[cfg(feature = "alloc")]
pub mod image;

pub mod png;
