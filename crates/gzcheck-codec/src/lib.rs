//! File-to-file gzip codec.
//!
//! Both directions stream through fixed-size buffers, so inputs larger than
//! memory are fine. Output is a single RFC 1952 member at the default
//! compression level.

pub use error::{CodecError, Result};
pub use gzip::{compress, decompress};

mod error;
mod gzip;
