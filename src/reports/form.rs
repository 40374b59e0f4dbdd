use axum::extract::Multipart;

use crate::api::models::{NewReport, Upload};
use crate::error::{AppError, AppResult};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const UNSUPPORTED_FILE_MESSAGE: &str = "Please attach an image or video file.";

/// The report submission form as posted (multipart).
#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub file: Option<Upload>,
}

impl ReportForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ReportForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed form: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                // "summary" is the field name older form markup used for the title
                "title" | "summary" => form.title = read_text(field).await?,
                "description" => form.description = read_text(field).await?,
                "location" => form.location = read_text(field).await?,
                "image" | "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field
                        .content_type()
                        .map(str::to_string)
                        .unwrap_or_else(|| {
                            mime_guess::from_path(&file_name)
                                .first_or_octet_stream()
                                .to_string()
                        });
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Upload failed: {}", e)))?;
                    // An untouched file input still posts an empty part
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.file = Some(Upload {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                other => tracing::debug!("Ignoring unknown report form field {:?}", other),
            }
        }

        Ok(form)
    }

    pub fn file_name(&self) -> &str {
        self.file.as_ref().map(|f| f.file_name.as_str()).unwrap_or("")
    }

    /// Check the form and turn it into a backend submission. The form itself
    /// is left untouched so it can be re-rendered on failure.
    pub fn validate(&self) -> Result<NewReport, &'static str> {
        let title = self.title.trim();
        let description = self.description.trim();
        let location = self.location.trim();
        if title.is_empty() || description.is_empty() || location.is_empty() {
            return Err(MISSING_FIELDS_MESSAGE);
        }

        if let Some(file) = &self.file {
            let media = file.content_type.starts_with("image/")
                || file.content_type.starts_with("video/");
            if !media {
                return Err(UNSUPPORTED_FILE_MESSAGE);
            }
        }

        Ok(NewReport {
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            image: self.file.clone(),
        })
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form: {}", e)))
}
