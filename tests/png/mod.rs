use chunkpng::{
  png::{
    encode_png, png_crc, save_png, EncoderConfig, PngEncoder, ZlibCompressor, IHDR, PNG_SIGNATURE,
  },
  BufferFault, EncodeError, RGB888,
};

/// An unparsed chunk.
#[derive(Debug, Clone, Copy)]
struct RawChunk<'b> {
  ty: [u8; 4],
  data: &'b [u8],
  declared_crc: u32,
}

/// Walks the chunks of PNG bytes, stops at the first truncated chunk.
struct RawChunkIter<'b>(&'b [u8]);
impl<'b> RawChunkIter<'b> {
  fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = RawChunk<'b>;
  fn next(&mut self) -> Option<Self::Item> {
    let (len_bytes, rest) = self.0.split_first_chunk::<4>()?;
    let len = u32::from_be_bytes(*len_bytes) as usize;
    let (ty, rest) = rest.split_first_chunk::<4>()?;
    if rest.len() < len {
      return None;
    }
    let (data, rest) = rest.split_at(len);
    let (crc_bytes, rest) = rest.split_first_chunk::<4>()?;
    self.0 = rest;
    Some(RawChunk { ty: *ty, data, declared_crc: u32::from_be_bytes(*crc_bytes) })
  }
}

/// A strict reader for exactly the PNG subset that the encoder writes.
///
/// Returns the rows of pixels.
fn decode_truecolor(png: &[u8]) -> Vec<Vec<RGB888>> {
  assert_eq!(&png[..8], &PNG_SIGNATURE, "bad signature");
  let chunks: Vec<RawChunk<'_>> = RawChunkIter::new(png).collect();
  let consumed: usize = 8 + chunks.iter().map(|c| 12 + c.data.len()).sum::<usize>();
  assert_eq!(consumed, png.len(), "trailing or truncated bytes");
  for c in &chunks {
    let mut covered = c.ty.to_vec();
    covered.extend_from_slice(c.data);
    assert_eq!(png_crc(&covered), c.declared_crc, "crc mismatch in {:?}", c);
  }

  let (first, rest) = chunks.split_first().unwrap();
  let (last, middle) = rest.split_last().unwrap();
  assert_eq!(&first.ty, b"IHDR");
  assert_eq!(&last.ty, b"IEND");
  assert!(last.data.is_empty());
  assert!(!middle.is_empty());
  assert!(middle.iter().all(|c| &c.ty == b"IDAT"));

  let ihdr = first.data;
  assert_eq!(ihdr.len(), 13);
  let width = u32::from_be_bytes(ihdr[0..4].try_into().unwrap()) as usize;
  let height = u32::from_be_bytes(ihdr[4..8].try_into().unwrap()) as usize;
  assert_eq!(&ihdr[8..], &[8, 2, 0, 0, 0]);

  let zlib: Vec<u8> = middle.iter().flat_map(|c| c.data.iter().copied()).collect();
  let filtered = miniz_oxide::inflate::decompress_to_vec_zlib(&zlib).unwrap();
  assert_eq!(filtered.len(), height * (1 + width * 3));
  filtered
    .chunks_exact(1 + width * 3)
    .map(|line| {
      assert_eq!(line[0], 0, "unexpected filter type");
      line[1..].chunks_exact(3).map(|p| RGB888::new(p[0], p[1], p[2])).collect()
    })
    .collect()
}

fn rand_rows(width: usize, height: usize) -> Vec<Vec<RGB888>> {
  let bytes = super::rand_bytes(width * height * 3);
  bytes
    .chunks_exact(width * 3)
    .map(|row| row.chunks_exact(3).map(|p| RGB888::new(p[0], p[1], p[2])).collect())
    .collect()
}

#[test]
fn test_scenario_a_round_trip() {
  let rows = vec![
    vec![RGB888::new(255, 0, 0), RGB888::new(0, 255, 0)],
    vec![RGB888::new(0, 0, 255), RGB888::new(255, 255, 255)],
  ];
  let png = encode_png(&rows).unwrap();
  let ihdr_payload = &png[16..29];
  assert_eq!(ihdr_payload, IHDR { width: 2, height: 2 }.to_bytes());
  assert_eq!(decode_truecolor(&png), rows);
}

#[test]
fn test_random_buffers_round_trip() {
  for (w, h) in [(1, 1), (17, 3), (3, 17), (64, 48), (255, 2)] {
    let rows = rand_rows(w, h);
    let png = encode_png(&rows).unwrap();
    assert_eq!(decode_truecolor(&png), rows, "w:{w} h:{h}");
  }
}

#[test]
fn test_forced_idat_split_round_trips() {
  // random pixels barely compress, so this is plenty of IDAT chunks
  let rows = rand_rows(100, 100);
  for max in [1, 7, 4096] {
    let enc = PngEncoder::from_config(EncoderConfig::default().with_max_idat_len(max));
    let png = enc.encode(&rows).unwrap();
    let idat_count = RawChunkIter::new(&png).filter(|c| &c.ty == b"IDAT").count();
    assert!(idat_count > 1, "max:{max}");
    assert_eq!(decode_truecolor(&png), rows, "max:{max}");
  }
}

#[test]
fn test_compression_levels_round_trip() {
  let rows = rand_rows(20, 20);
  for level in [0, 1, 6, 9, ZlibCompressor::MAX_LEVEL] {
    let enc = PngEncoder::with_compressor(EncoderConfig::default(), ZlibCompressor::new(level));
    assert_eq!(decode_truecolor(&enc.encode(&rows).unwrap()), rows, "level:{level}");
  }
}

#[test]
fn test_encoder_shared_across_threads() {
  let enc = PngEncoder::default();
  let rows = rand_rows(30, 30);
  let expected = enc.encode(&rows).unwrap();
  std::thread::scope(|s| {
    let handles: Vec<_> = (0..4).map(|_| s.spawn(|| enc.encode(&rows).unwrap())).collect();
    for h in handles {
      assert_eq!(h.join().unwrap(), expected);
    }
  });
}

#[test]
fn test_short_row_and_no_rows_rejected() {
  let mut rows = rand_rows(5, 4);
  rows[3].truncate(4);
  assert_eq!(
    encode_png(&rows),
    Err(EncodeError::InvalidPixelBuffer(BufferFault::RaggedRow { row: 3, expected: 5, found: 4 }))
  );
  let no_rows: Vec<Vec<RGB888>> = vec![];
  assert_eq!(encode_png(&no_rows), Err(EncodeError::InvalidPixelBuffer(BufferFault::Empty)));
}

#[test]
fn test_save_png_commits_whole_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("out.png");
  let rows = rand_rows(9, 9);
  save_png(&path, &rows).unwrap();
  let bytes = std::fs::read(&path).unwrap();
  assert_eq!(bytes, encode_png(&rows).unwrap());
  assert_eq!(decode_truecolor(&bytes), rows);
  // only the finished file is left behind
  assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_failed_save_leaves_old_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("keep.png");
  std::fs::write(&path, b"old").unwrap();
  let ragged = vec![vec![RGB888::default(); 2], vec![RGB888::default(); 1]];
  assert!(matches!(save_png(&path, &ragged), Err(EncodeError::InvalidPixelBuffer(_))));
  assert_eq!(std::fs::read(&path).unwrap(), b"old");

  let missing_dir = dir.path().join("nope").join("x.png");
  match save_png(&missing_dir, &rand_rows(2, 2)) {
    Err(EncodeError::Io { kind, message }) => {
      assert_eq!(kind, std::io::ErrorKind::NotFound);
      assert!(!message.is_empty());
    }
    other => panic!("expected an io error, got {other:?}"),
  }
  assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_concurrent_saves_to_one_path() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("shared.png");
  let enc = PngEncoder::from_config(EncoderConfig::default().with_compression_level(0));
  let images = [rand_rows(120, 120), rand_rows(60, 60), rand_rows(90, 30), rand_rows(7, 7)];
  std::thread::scope(|s| {
    for rows in &images {
      let (enc, path, images) = (&enc, &path, &images);
      s.spawn(move || {
        for _ in 0..50 {
          enc.save(rows, path).unwrap();
          // whatever is at the path is always one complete image
          let on_disk = decode_truecolor(&std::fs::read(path).unwrap());
          assert!(images.contains(&on_disk));
        }
      });
    }
  });
  let last = decode_truecolor(&std::fs::read(&path).unwrap());
  assert!(images.contains(&last));
  // no temporary files left over
  assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_writer_failure_is_io_error() {
  struct Broken;
  impl std::io::Write for Broken {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
      Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
    }
    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }
  let rows = rand_rows(3, 3);
  let enc = PngEncoder::default();
  assert_eq!(
    enc.encode_to_writer(&rows, Broken),
    Err(EncodeError::Io { kind: std::io::ErrorKind::BrokenPipe, message: "gone".to_string() })
  );

  let mut sink = Vec::new();
  enc.encode_to_writer(&rows, &mut sink).unwrap();
  assert_eq!(decode_truecolor(&sink), rows);
}

#[test]
fn test_RawChunkIter_no_panics() {
  // even totally random data should never panic the test reader
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in RawChunkIter::new(&v) {
      //
    }
  }
}
