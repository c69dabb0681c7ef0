use thiserror::Error;

use super::entity::StagedFile;

/// Hard cap on a single staged file.
pub const MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// MIME types the analysis endpoint accepts.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/avi",
    "video/mov",
    "audio/mp3",
    "audio/wav",
    "audio/flac",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
    "application/zip",
    "application/x-rar-compressed",
];

/// Extension fallback for files whose MIME type is missing or unhelpful.
const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "mp4", "avi", "mov", "mp3", "wav", "flac", "pdf",
    "doc", "docx", "xls", "xlsx", "txt", "csv", "zip", "rar", "7z",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    #[error("{name}: file exceeds the 100 MB size limit")]
    TooLarge { name: String },

    #[error("{name}: unsupported file type")]
    UnsupportedType { name: String },

    #[error("{name}: file is already staged")]
    Duplicate { name: String },

    #[error("no files staged for analysis")]
    NothingStaged,
}

fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

fn size_allowed(size: u64) -> bool {
    size <= MAX_FILE_SIZE_BYTES
}

fn type_allowed(file: &StagedFile) -> bool {
    if let Some(ref mime) = file.mime
        && ALLOWED_MIME_TYPES.contains(&mime.as_str())
    {
        return true;
    }
    extension(&file.name)
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Validate one candidate against the staging constraints and the files
/// already staged. Duplicate means same name and same size.
pub fn validate(candidate: &StagedFile, staged: &[StagedFile]) -> Result<(), StagingError> {
    if !size_allowed(candidate.size_bytes()) {
        return Err(StagingError::TooLarge {
            name: candidate.name.clone(),
        });
    }
    if !type_allowed(candidate) {
        return Err(StagingError::UnsupportedType {
            name: candidate.name.clone(),
        });
    }
    if staged
        .iter()
        .any(|f| f.name == candidate.name && f.size_bytes() == candidate.size_bytes())
    {
        return Err(StagingError::Duplicate {
            name: candidate.name.clone(),
        });
    }
    Ok(())
}

/// Guess a MIME type from the file name, for files read off disk.
pub fn infer_mime(name: &str) -> Option<&'static str> {
    let ext = extension(name)?;
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/mov",
        "mp3" => "audio/mp3",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        _ => return None,
    };
    Some(mime)
}

/// Coarse category used to pick a file icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Pdf,
    Word,
    Excel,
    Archive,
    Text,
    Other,
}

pub fn categorize(file: &StagedFile) -> FileCategory {
    let mime = file.mime.as_deref().unwrap_or("").to_lowercase();
    let name = file.name.to_lowercase();

    if mime.starts_with("image/") {
        FileCategory::Image
    } else if mime.starts_with("video/") {
        FileCategory::Video
    } else if mime.starts_with("audio/") {
        FileCategory::Audio
    } else if mime.contains("pdf") {
        FileCategory::Pdf
    } else if mime.contains("word") || name.ends_with(".doc") || name.ends_with(".docx") {
        FileCategory::Word
    } else if mime.contains("excel") || name.ends_with(".xls") || name.ends_with(".xlsx") {
        FileCategory::Excel
    } else if mime.contains("zip") || mime.contains("rar") || name.ends_with(".7z") {
        FileCategory::Archive
    } else if name.ends_with(".csv") || name.ends_with(".txt") {
        FileCategory::Text
    } else {
        FileCategory::Other
    }
}

/// Human-readable size: binary units, up to two decimals, trailing zeros
/// trimmed.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / f64::powi(1024.0, exponent as i32);
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{text} {}", UNITS[exponent as usize])
}
