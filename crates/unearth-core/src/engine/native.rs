//! In-process library fallback engine.
//!
//! Covers the suffix set with pure-Rust decoders: `zip` (with decryption),
//! `tar` layered over `flate2`/`bzip2`/`xz2`, bare compressed streams, and
//! `sevenz-rust2` for 7z. RAR has no library backend and classifies as
//! unsupported, leaving it to the external engine.

use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use crate::error::FailureKind;
use crate::formats::ArchiveFormat;
use crate::formats::detect_format;

use super::Engine;
use super::EngineFailure;
use super::EngineStats;
use super::classify_diagnostic;
use super::measure_tree;

/// Broad library-backed engine used when the external tool cannot run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    /// Creates the engine. Stateless; one value serves a whole run.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Engine for NativeEngine {
    fn name(&self) -> &'static str {
        "native"
    }

    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        password: Option<&str>,
    ) -> std::result::Result<EngineStats, EngineFailure> {
        let Some(format) = detect_format(archive) else {
            return Err(EngineFailure::new(
                FailureKind::UnsupportedFormat,
                format!("unrecognized archive suffix: {}", archive.display()),
            ));
        };

        fs::create_dir_all(dest)
            .map_err(|e| EngineFailure::new(FailureKind::Other, e.to_string()))?;

        match format {
            ArchiveFormat::Zip => extract_zip(archive, dest, password)?,
            ArchiveFormat::SevenZ => extract_sevenz(archive, dest, password)?,
            ArchiveFormat::Tar
            | ArchiveFormat::TarGz
            | ArchiveFormat::TarBz2
            | ArchiveFormat::TarXz => extract_tar(format, archive, dest)?,
            ArchiveFormat::Gz | ArchiveFormat::Bz2 | ArchiveFormat::Xz => {
                extract_stream(format, archive, dest)?;
            }
            ArchiveFormat::Rar => {
                return Err(EngineFailure::new(
                    FailureKind::UnsupportedFormat,
                    "no library backend for rar archives",
                ));
            }
        }

        Ok(measure_tree(dest))
    }
}

fn open(archive: &Path) -> std::result::Result<File, EngineFailure> {
    File::open(archive).map_err(|e| {
        EngineFailure::new(
            FailureKind::Other,
            format!("cannot open {}: {e}", archive.display()),
        )
    })
}

/// Maps decoder I/O errors: truncated or garbled streams are corrupt
/// archives, everything else is environmental.
fn decode_failure(err: &io::Error) -> EngineFailure {
    let kind = match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
            FailureKind::CorruptArchive
        }
        _ => FailureKind::Other,
    };
    EngineFailure::new(kind, err.to_string())
}

fn zip_failure(err: &zip::result::ZipError) -> EngineFailure {
    use zip::result::ZipError;

    let kind = match err {
        ZipError::InvalidPassword => FailureKind::WrongPassword,
        ZipError::UnsupportedArchive(msg) => {
            if msg.to_ascii_lowercase().contains("password") {
                FailureKind::WrongPassword
            } else {
                FailureKind::UnsupportedFormat
            }
        }
        ZipError::InvalidArchive(_) => FailureKind::CorruptArchive,
        ZipError::Io(_) => FailureKind::Other,
        _ => classify_diagnostic(&err.to_string()),
    };
    EngineFailure::new(kind, err.to_string())
}

fn extract_zip(
    archive: &Path,
    dest: &Path,
    password: Option<&str>,
) -> std::result::Result<(), EngineFailure> {
    let file = open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| zip_failure(&e))?;

    for index in 0..zip.len() {
        let mut entry = match password {
            Some(secret) => zip
                .by_index_decrypt(index, secret.as_bytes())
                .map_err(|e| zip_failure(&e))?,
            None => zip.by_index(index).map_err(|e| zip_failure(&e))?,
        };

        // Entries whose names would escape the destination are dropped.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| decode_failure(&e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| decode_failure(&e))?;
        }
        let mut out = File::create(&target).map_err(|e| decode_failure(&e))?;
        io::copy(&mut entry, &mut out).map_err(|e| decode_failure(&e))?;
    }

    Ok(())
}

fn extract_sevenz(
    archive: &Path,
    dest: &Path,
    password: Option<&str>,
) -> std::result::Result<(), EngineFailure> {
    let outcome = match password {
        Some(secret) => sevenz_rust2::decompress_file_with_password(
            archive,
            dest,
            sevenz_rust2::Password::from(secret),
        ),
        None => sevenz_rust2::decompress_file(archive, dest),
    };

    outcome.map_err(|err| {
        let text = err.to_string();
        EngineFailure::new(classify_diagnostic(&text), text)
    })
}

fn extract_tar(
    format: ArchiveFormat,
    archive: &Path,
    dest: &Path,
) -> std::result::Result<(), EngineFailure> {
    let file = open(archive)?;
    let reader: Box<dyn Read> = match format {
        ArchiveFormat::Tar => Box::new(file),
        ArchiveFormat::TarGz => Box::new(GzDecoder::new(file)),
        ArchiveFormat::TarBz2 => Box::new(BzDecoder::new(file)),
        ArchiveFormat::TarXz => Box::new(XzDecoder::new(file)),
        _ => unreachable!("not a tar variant"),
    };

    tar::Archive::new(reader)
        .unpack(dest)
        .map_err(|e| decode_failure(&e))
}

/// Decodes a bare compressed stream into a single file named after the
/// archive minus its suffix.
fn extract_stream(
    format: ArchiveFormat,
    archive: &Path,
    dest: &Path,
) -> std::result::Result<(), EngineFailure> {
    let file = open(archive)?;
    let mut reader: Box<dyn Read> = match format {
        ArchiveFormat::Gz => Box::new(GzDecoder::new(file)),
        ArchiveFormat::Bz2 => Box::new(BzDecoder::new(file)),
        ArchiveFormat::Xz => Box::new(XzDecoder::new(file)),
        _ => unreachable!("not a bare stream"),
    };

    let name = archive
        .file_stem()
        .map_or_else(|| "decompressed".to_string(), |s| s.to_string_lossy().into_owned());
    let mut out = File::create(dest.join(name)).map_err(|e| decode_failure(&e))?;
    io::copy(&mut reader, &mut out).map_err(|e| decode_failure(&e))?;
    Ok(())
}
