//! The CRC-32 used by PNG chunks (the same one as zlib, gzip, and ethernet).
//!
//! Reflected polynomial `0xEDB8_8320`, starting value `0xFFFF_FFFF`, and the
//! final value is XOR'd with `0xFFFF_FFFF`.

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

/// A running CRC-32 computation.
///
/// Use this when the checksummed bytes aren't all in one slice, such as a
/// chunk's type tag followed by its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc32(u32);
impl Default for Crc32 {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self::new()
  }
}
impl Crc32 {
  /// A fresh computation, no bytes seen yet.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }

  /// Feeds more bytes into the computation.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    let mut crc = self.0;
    for &byte in bytes {
      let i = (crc ^ u32::from(byte)) as u8 as usize;
      crc = CRC_TABLE[i] ^ (crc >> 8);
    }
    self.0 = crc;
  }

  /// The CRC of all bytes fed in so far.
  #[inline]
  #[must_use]
  pub const fn finish(&self) -> u32 {
    self.0 ^ u32::MAX
  }
}

/// The CRC-32 of a single byte slice.
#[inline]
#[must_use]
pub fn png_crc(bytes: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(bytes);
  crc.finish()
}

#[test]
fn test_png_crc_known_vectors() {
  assert_eq!(png_crc(b""), 0);
  assert_eq!(png_crc(b"123456789"), 0xCBF4_3926);
  assert_eq!(png_crc(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
  // every PNG ends with these bytes
  assert_eq!(png_crc(b"IEND"), 0xAE42_6082);
}

#[test]
fn test_crc32_incremental_matches_oneshot() {
  let data = b"IHDR\x00\x00\x00\x02\x00\x00\x00\x02\x08\x02\x00\x00\x00";
  for split in 0..=data.len() {
    let (a, b) = data.split_at(split);
    let mut crc = Crc32::default();
    crc.update(a);
    crc.update(b);
    assert_eq!(crc.finish(), png_crc(data), "split at {split}");
  }
}
