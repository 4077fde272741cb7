//! Archive format detection by file name.

use std::path::Path;

/// Recognized archive formats, including compound tar variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// ZIP archive.
    Zip,
    /// RAR archive (external engine only).
    Rar,
    /// 7z archive.
    SevenZ,
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// XZ-compressed tar archive.
    TarXz,
    /// Bare gzip stream (single file).
    Gz,
    /// Bare bzip2 stream (single file).
    Bz2,
    /// Bare XZ stream (single file).
    Xz,
}

impl ArchiveFormat {
    /// Short lowercase name for display.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZ => "7z",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::TarXz => "tar.xz",
            Self::Gz => "gz",
            Self::Bz2 => "bz2",
            Self::Xz => "xz",
        }
    }
}

/// Detects the archive format from a file name.
///
/// Returns `None` when the extension is not a recognized archive suffix.
/// Compound suffixes (`.tar.gz`, `.tar.bz2`, `.tar.xz` and their short forms)
/// are distinguished from bare compressed streams by sniffing the `.tar`
/// inner stem.
#[must_use]
pub fn detect_format(path: &Path) -> Option<ArchiveFormat> {
    let extension = path.extension().and_then(|e| e.to_str())?;
    let ext_lower = extension.to_ascii_lowercase();

    let tar_stem = path
        .file_stem()
        .is_some_and(|s| s.to_string_lossy().to_ascii_lowercase().ends_with(".tar"));

    match ext_lower.as_str() {
        "zip" => Some(ArchiveFormat::Zip),
        "rar" => Some(ArchiveFormat::Rar),
        "7z" => Some(ArchiveFormat::SevenZ),
        "tar" => Some(ArchiveFormat::Tar),
        "tgz" => Some(ArchiveFormat::TarGz),
        "tbz" | "tbz2" => Some(ArchiveFormat::TarBz2),
        "txz" => Some(ArchiveFormat::TarXz),
        "gz" => Some(if tar_stem {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Gz
        }),
        "bz2" => Some(if tar_stem {
            ArchiveFormat::TarBz2
        } else {
            ArchiveFormat::Bz2
        }),
        "xz" => Some(if tar_stem {
            ArchiveFormat::TarXz
        } else {
            ArchiveFormat::Xz
        }),
        _ => None,
    }
}

/// Returns the archive file name with its archive suffix removed.
///
/// Compound suffixes are stripped entirely: `project.tar.gz` becomes
/// `project`, not `project.tar`. Falls back to `"archive"` when nothing
/// usable remains.
#[must_use]
pub fn archive_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());

    let stem = if stem.to_ascii_lowercase().ends_with(".tar") {
        stem[..stem.len() - 4].to_string()
    } else {
        stem
    };

    if stem.is_empty() {
        "archive".to_string()
    } else {
        stem
    }
}
