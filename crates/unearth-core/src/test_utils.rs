//! Test utilities for building fixture archives.
//!
//! Reusable helpers for creating in-memory archives, shared by unit and
//! integration tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Creates an in-memory ZIP archive from (path, content) entries.
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (path, data) in entries {
        writer.start_file(path, options).unwrap();
        writer.write_all(data).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Creates an in-memory AES-encrypted ZIP archive from (path, content)
/// entries, all protected by `password`.
#[must_use]
pub fn create_encrypted_test_zip(entries: Vec<(&str, &[u8])>, password: &str) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .with_aes_encryption(zip::AesMode::Aes256, password)
        .unix_permissions(0o644);

    for (path, data) in entries {
        writer.start_file(path, options).unwrap();
        writer.write_all(data).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Creates an in-memory TAR archive from (path, content) entries with mode
/// 0o644.
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, data).unwrap();
    }
    builder.into_inner().unwrap()
}

/// Gzip-compresses a byte buffer.
#[must_use]
pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder =
        flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_zip() {
        let data = create_test_zip(vec![("file.txt", b"hello")]);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_create_encrypted_test_zip() {
        let data = create_encrypted_test_zip(vec![("file.txt", b"hello")], "pw");
        assert!(!data.is_empty());
    }

    #[test]
    fn test_create_test_tar() {
        let data = create_test_tar(vec![("file.txt", b"hello")]);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_gzip_bytes_roundtrip() {
        use std::io::Read;

        let compressed = gzip_bytes(b"payload");
        let mut decoder = flate2::read::GzDecoder::new(compressed.as_slice());
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "payload");
    }
}
