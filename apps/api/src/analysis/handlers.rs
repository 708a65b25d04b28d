//! Axum route handler for the Analysis API.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};

use crate::analysis::pipeline::{AnalysisReport, AnalysisRequest, ResumeUpload};
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// Form fields collected from the multipart body, before validation.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resume: Option<ResumeUpload>,
    pub job_description: Option<String>,
}

impl AnalysisForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalysisForm::default();
        while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                // A `resume` part without a filename is a plain text field, not an upload.
                RESUME_FIELD if field.file_name().is_some() => {
                    form.resume = Some(read_upload(field).await?)
                }
                JOB_DESCRIPTION_FIELD => {
                    form.job_description = Some(field.text().await.map_err(invalid_body)?)
                }
                // Unknown fields are ignored.
                _ => {}
            }
        }
        Ok(form)
    }

    /// Checks presence of both inputs. Runs before anything touches disk or the LLM.
    pub fn validate(self) -> Result<AnalysisRequest, AppError> {
        let resume = self
            .resume
            .ok_or_else(|| AppError::Validation("Resume PDF is required".to_string()))?;

        let job_description = self
            .job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

        Ok(AnalysisRequest {
            resume,
            job_description,
        })
    }
}

async fn read_upload(field: Field<'_>) -> Result<ResumeUpload, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let bytes = field.bytes().await.map_err(invalid_body)?;
    Ok(ResumeUpload { file_name, bytes })
}

fn invalid_body(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
}

/// POST /analyze
///
/// Multipart fields: `resume` (PDF file) and `job_description` (text).
/// Returns the resume summary, JD summary and ATS match report together.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let request = AnalysisForm::from_multipart(multipart).await?.validate()?;
    let report = state.pipeline.run(request).await?;
    Ok(Json(report))
}
