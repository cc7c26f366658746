//! Content verification primitives for compressed artifacts.
//!
//! Streams files through SHA-256 without buffering them, and compares an
//! original against a candidate copy by digest.
//!
//! # Example
//!
//! ```
//! use gzcheck_verify::{Sha256Hasher, VerifiedReader};
//!
//! let data = b"hello world";
//! let mut reader = VerifiedReader::new(&data[..], Sha256Hasher::new());
//! std::io::copy(&mut reader, &mut std::io::sink()).unwrap();
//!
//! assert_eq!(
//!     reader.finalize_hex(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

pub use self::error::{Result, VerificationError};
pub use self::file::{Comparison, compare, digest_file, digest_file_with, verify};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod error;
mod file;
mod hasher;
mod reader;
