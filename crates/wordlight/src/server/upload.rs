use axum::body::Bytes;
use axum::extract::Multipart;

use crate::prelude::*;
use crate::workspace::sanitize_file_name;

pub const PDF_FIELD: &str = "pdf_file";
pub const WORDS_FIELD: &str = "highlight_file";

pub const MISSING_FILES: &str = "Both PDF and text files are required.";
pub const NO_SELECTED_FILE: &str = "No selected file.";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// The file fields of a POST, held in memory until validation passes.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub pdf_file: Option<UploadedFile>,
    pub highlight_file: Option<UploadedFile>,
}

/// A form with both files present and named.
#[derive(Debug)]
pub struct ValidUpload {
    pub pdf_file: UploadedFile,
    pub highlight_file: UploadedFile,
}

impl UploadForm {
    /// Collect the file fields of a multipart body. Fields without a file name
    /// part are not files and are ignored, like unknown fields.
    pub async fn read(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let Some(file_name) = field.file_name().map(str::to_string) else {
                continue;
            };

            let slot = match name.as_str() {
                PDF_FIELD => &mut form.pdf_file,
                WORDS_FIELD => &mut form.highlight_file,
                _ => continue,
            };

            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::BadRequest(e.to_string()))?;
            *slot = Some(UploadedFile { file_name, bytes });
        }

        Ok(form)
    }

    /// Check both files are present and carry a usable name; the error is the
    /// message shown on the form. File names come back sanitized.
    pub fn validate(self) -> Result<ValidUpload, &'static str> {
        let (Some(pdf_file), Some(highlight_file)) = (self.pdf_file, self.highlight_file) else {
            return Err(MISSING_FILES);
        };

        let (Some(pdf_name), Some(words_name)) = (
            sanitize_file_name(&pdf_file.file_name),
            sanitize_file_name(&highlight_file.file_name),
        ) else {
            return Err(NO_SELECTED_FILE);
        };

        Ok(ValidUpload {
            pdf_file: UploadedFile {
                file_name: pdf_name,
                bytes: pdf_file.bytes,
            },
            highlight_file: UploadedFile {
                file_name: words_name,
                bytes: highlight_file.bytes,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.to_string(),
            bytes: Bytes::from_static(b"x"),
        })
    }

    #[test]
    fn test_validate_missing_pdf() {
        let form = UploadForm {
            pdf_file: None,
            highlight_file: file("words.txt"),
        };
        assert_eq!(form.validate().unwrap_err(), MISSING_FILES);
    }

    #[test]
    fn test_validate_missing_words() {
        let form = UploadForm {
            pdf_file: file("a.pdf"),
            highlight_file: None,
        };
        assert_eq!(form.validate().unwrap_err(), MISSING_FILES);
    }

    #[test]
    fn test_validate_empty_file_name() {
        let form = UploadForm {
            pdf_file: file(""),
            highlight_file: file("words.txt"),
        };
        assert_eq!(form.validate().unwrap_err(), NO_SELECTED_FILE);
    }

    #[test]
    fn test_validate_sanitizes_names() {
        let form = UploadForm {
            pdf_file: file("../../a.pdf"),
            highlight_file: file("C:\\Users\\me\\words.txt"),
        };
        let valid = form.validate().unwrap();

        assert_eq!(valid.pdf_file.file_name, "a.pdf");
        assert_eq!(valid.highlight_file.file_name, "words.txt");
    }
}
