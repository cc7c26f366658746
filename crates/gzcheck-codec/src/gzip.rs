use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::error::{CodecError, Result};

/// Compress `src` into a single gzip member at `dst`, truncating `dst`.
///
/// The encoder is finished (trailer written) before the file handle drops.
/// On error `dst` may hold partial output. Returns the number of
/// uncompressed bytes read from `src`.
pub fn compress(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let input = File::open(src).map_err(|source| CodecError::Open {
        path: src.to_path_buf(),
        source,
    })?;
    let output = File::create(dst).map_err(|source| CodecError::Create {
        path: dst.to_path_buf(),
        source,
    })?;

    let encode_err = |source: io::Error| CodecError::Encode {
        path: src.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(input);
    let mut encoder = GzEncoder::new(output, Compression::default());
    let bytes = io::copy(&mut reader, &mut encoder).map_err(encode_err)?;
    let output = encoder.finish().map_err(encode_err)?;
    drop(output);

    debug!(src = %src.display(), dst = %dst.display(), bytes, "compressed");
    Ok(bytes)
}

/// Decompress the first gzip member of `src` into `dst`, truncating `dst`.
///
/// Fails if `src` is not a gzip stream, is corrupt, or is truncated.
/// Returns the number of decompressed bytes written.
pub fn decompress(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let input = File::open(src).map_err(|source| CodecError::Open {
        path: src.to_path_buf(),
        source,
    })?;
    let mut decoder = GzDecoder::new(input);

    let output = File::create(dst).map_err(|source| CodecError::Create {
        path: dst.to_path_buf(),
        source,
    })?;

    let decode_err = |source: io::Error| CodecError::Decode {
        path: src.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(output);
    let bytes = io::copy(&mut decoder, &mut writer).map_err(decode_err)?;
    writer.flush().map_err(decode_err)?;

    debug!(src = %src.display(), dst = %dst.display(), bytes, "decompressed");
    Ok(bytes)
}
