//! Input validation module

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' is too long (max {max} characters)")]
    TooLong { field: String, max: usize },

    #[error("At least one file is required")]
    NoFiles,

    #[error("Invalid file type: {mime_type}")]
    InvalidFileType { mime_type: String },

    #[error("File too large (max {max_mb} MB)")]
    FileTooLarge { max_mb: usize },
}

/// The only MIME types the portal accepts for upload.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Validate a submission form before any file I/O happens: a failed check
/// must never leave partial state behind.
pub fn validate_submission(
    topic: &str,
    department: Option<&str>,
    file_count: usize,
) -> Result<(), ValidationError> {
    if topic.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "topic".to_string(),
        });
    }
    if topic.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "topic".to_string(),
            max: 255,
        });
    }

    match department {
        Some(d) if !d.trim().is_empty() => {}
        _ => {
            return Err(ValidationError::Required {
                field: "department".to_string(),
            })
        }
    }

    if file_count == 0 {
        return Err(ValidationError::NoFiles);
    }

    Ok(())
}

/// Validate one uploaded file against the MIME whitelist and the size cap.
pub fn validate_file_upload(
    mime_type: &str,
    file_size: usize,
    max_size_bytes: usize,
) -> Result<(), ValidationError> {
    if file_size > max_size_bytes {
        return Err(ValidationError::FileTooLarge {
            max_mb: max_size_bytes / (1024 * 1024),
        });
    }

    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(ValidationError::InvalidFileType {
            mime_type: mime_type.to_string(),
        });
    }

    Ok(())
}

/// Reduce a client-supplied filename to a safe basename for storage.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // No leading dots: prevents hidden files and ..-style names.
    let sanitized = sanitized.trim_start_matches('.').trim_matches('_');

    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_requires_topic() {
        assert_eq!(
            validate_submission("  ", Some("commercial"), 1),
            Err(ValidationError::Required {
                field: "topic".into()
            })
        );
    }

    #[test]
    fn submission_requires_department() {
        assert_eq!(
            validate_submission("Berth request", None, 1),
            Err(ValidationError::Required {
                field: "department".into()
            })
        );
        assert_eq!(
            validate_submission("Berth request", Some(""), 1),
            Err(ValidationError::Required {
                field: "department".into()
            })
        );
    }

    #[test]
    fn submission_requires_a_file() {
        assert_eq!(
            validate_submission("Berth request", Some("commercial"), 0),
            Err(ValidationError::NoFiles)
        );
    }

    #[test]
    fn valid_submission_passes() {
        assert!(validate_submission("Berth request", Some("commercial"), 2).is_ok());
    }

    #[test]
    fn file_upload_accepts_whitelisted_mime_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_file_upload(mime, 1024, 50 * 1024 * 1024).is_ok());
        }
    }

    #[test]
    fn file_upload_rejects_other_mime_types() {
        assert!(matches!(
            validate_file_upload("application/zip", 1024, 50 * 1024 * 1024),
            Err(ValidationError::InvalidFileType { .. })
        ));
        assert!(matches!(
            validate_file_upload("text/html", 1024, 50 * 1024 * 1024),
            Err(ValidationError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn file_upload_rejects_oversized_files() {
        assert_eq!(
            validate_file_upload("application/pdf", 100 * 1024 * 1024, 50 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { max_mb: 50 })
        );
    }

    #[test]
    fn filenames_are_reduced_to_safe_basenames() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("week 12 (final).xlsx"), "week_12__final_.xlsx");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("///"), "upload");
    }
}
