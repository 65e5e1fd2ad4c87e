use super::*;

/// PNG caps both image dimensions at `2^31 - 1`.
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// The filter type byte that goes in front of every scanline.
///
/// 0 is "None": the pixel bytes are stored as-is. Other filter types usually
/// compress better, but always using "None" keeps the output identical for
/// identical input, whatever the compressor.
pub const FILTER_NONE: u8 = 0;

/// Checks that the rows form a rectangle that PNG can store.
///
/// Returns the header for the image on success.
///
/// ## Failure
/// * [`BufferFault::Empty`] with no rows.
/// * [`BufferFault::ZeroWidth`] if the first row is empty.
/// * [`BufferFault::RaggedRow`] for the first row that's not the same length
///   as the first row.
/// * [`BufferFault::DimensionsTooLarge`] if either dimension is over
///   [`MAX_DIMENSION`].
pub fn validate_rows<R: AsRef<[RGB888]>>(rows: &[R]) -> Result<IHDR, BufferFault> {
  let first = rows.first().ok_or(BufferFault::Empty)?;
  let width = first.as_ref().len();
  if width == 0 {
    return Err(BufferFault::ZeroWidth);
  }
  if let Some(row) = rows.iter().position(|r| r.as_ref().len() != width) {
    return Err(BufferFault::RaggedRow { row, expected: width, found: rows[row].as_ref().len() });
  }
  let width = u32::try_from(width).map_err(|_| BufferFault::DimensionsTooLarge)?;
  let height = u32::try_from(rows.len()).map_err(|_| BufferFault::DimensionsTooLarge)?;
  if width > MAX_DIMENSION || height > MAX_DIMENSION {
    return Err(BufferFault::DimensionsTooLarge);
  }
  Ok(IHDR { width, height })
}

/// Turns rows of pixels into the uncompressed PNG image data.
///
/// Each row becomes a [`FILTER_NONE`] byte followed by the row's `r, g, b`
/// bytes. Rows go top to bottom, pixels go left to right. Nothing is
/// converted, the channel values come out exactly as they went in.
///
/// The output is always `height * (1 + width * 3)` bytes.
pub fn prepare_scanlines<R: AsRef<[RGB888]>>(rows: &[R]) -> Result<(IHDR, Vec<u8>), EncodeError> {
  let ihdr = validate_rows(rows)?;
  let len = ihdr.scanline_stream_len()?;
  let mut out: Vec<u8> = Vec::new();
  out.try_reserve_exact(len)?;
  for row in rows {
    out.push(FILTER_NONE);
    out.extend_from_slice(rgb888_bytes(row.as_ref()));
  }
  debug_assert_eq!(out.len(), len);
  Ok((ihdr, out))
}
