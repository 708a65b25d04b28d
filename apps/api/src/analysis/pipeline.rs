//! Analysis pipeline: persist → extract → summarize resume → summarize JD → ATS match.
//!
//! Steps run strictly in order. The first failure aborts the rest, and the caller gets either
//! all three texts or an error, never a subset. The scratch upload is removed on every path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::prompts::{ats_match_prompt, jd_parse_prompt, resume_parse_prompt};
use crate::analysis::scratch::ScratchUpload;
use crate::errors::AppError;
use crate::llm_client::ContentGenerator;
use crate::pdf::{extract_text, PdfReader};

/// The uploaded resume as received from the client.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    /// Client-supplied name. Logged only; never used as a path.
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// A request that has passed presence validation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: ResumeUpload,
    pub job_description: String,
}

/// The three LLM outputs, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub parsed_resume: String,
    pub parsed_job_description: String,
    pub ats_result: String,
}

pub struct AnalysisPipeline {
    llm: Arc<dyn ContentGenerator>,
    pdf: Arc<dyn PdfReader>,
    model: String,
    upload_dir: PathBuf,
}

impl AnalysisPipeline {
    pub fn new(
        llm: Arc<dyn ContentGenerator>,
        pdf: Arc<dyn PdfReader>,
        model: String,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            llm,
            pdf,
            model,
            upload_dir,
        }
    }

    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("analysis", %request_id);

        async move {
            info!(
                file_name = request.resume.file_name.as_deref().unwrap_or("<none>"),
                bytes = request.resume.bytes.len(),
                jd_chars = request.job_description.len(),
                "Starting analysis"
            );

            let scratch =
                ScratchUpload::persist(&self.upload_dir, request_id, request.resume.bytes).await?;
            let result = self.analyze(scratch.path(), &request.job_description).await;
            scratch.remove();

            if result.is_ok() {
                info!("Analysis complete");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn analyze(
        &self,
        pdf_path: &Path,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        let resume_text = extract_text(self.pdf.clone(), pdf_path.to_path_buf()).await;
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation("Could not extract text from PDF".to_string()));
        }

        let parsed_resume = self
            .generate("resume", &resume_parse_prompt(&resume_text))
            .await?;
        let parsed_job_description = self
            .generate("job_description", &jd_parse_prompt(job_description))
            .await?;
        let ats_result = self
            .generate(
                "ats_match",
                &ats_match_prompt(&parsed_resume, &parsed_job_description),
            )
            .await?;

        Ok(AnalysisReport {
            parsed_resume,
            parsed_job_description,
            ats_result,
        })
    }

    async fn generate(&self, step: &str, prompt: &str) -> Result<String, AppError> {
        info!(step, model = %self.model, "Calling LLM");
        let text = self.llm.generate_content(&self.model, prompt).await?;
        info!(step, chars = text.len(), "LLM step finished");
        Ok(text)
    }
}
