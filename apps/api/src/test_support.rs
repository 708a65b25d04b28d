//! Shared fakes for the LLM and PDF collaborators.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::analysis::pipeline::AnalysisPipeline;
use crate::config::Config;
use crate::llm_client::{ContentGenerator, LlmError};
use crate::pdf::{PageText, PdfError, PdfReader};
use crate::state::AppState;

pub const TEST_MODEL: &str = "gemini-test";

/// Records every call and replies from a scripted queue. An exhausted queue is an error.
#[derive(Default)]
pub struct RecordingGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingGenerator {
    pub fn replying(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::default(),
        })
    }

    /// `(model, prompt)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, prompt)| prompt).collect()
    }
}

#[async_trait]
impl ContentGenerator for RecordingGenerator {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Returns fixed pages and remembers which paths it was asked to read and whether they
/// existed at that moment.
pub struct StubPdfReader {
    pages: Vec<PageText>,
    reads: AtomicUsize,
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl StubPdfReader {
    pub fn with_pages(pages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .iter()
                .map(|p| PageText::from(p.to_string()))
                .collect(),
            reads: AtomicUsize::new(0),
            seen: Mutex::default(),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

impl PdfReader for StubPdfReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<PageText>, PdfError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        Ok(self.pages.clone())
    }
}

pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        gemini_api_key: "test-key".to_string(),
        gemini_model: TEST_MODEL.to_string(),
        gemini_base_url: "http://127.0.0.1:1".to_string(),
        port: 0,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        llm_timeout_secs: 5,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(
    upload_dir: &Path,
    llm: Arc<dyn ContentGenerator>,
    pdf: Arc<dyn PdfReader>,
) -> AppState {
    let config = test_config(upload_dir);
    let pipeline = AnalysisPipeline::new(
        llm,
        pdf,
        config.gemini_model.clone(),
        config.upload_dir.clone(),
    );
    AppState {
        pipeline: Arc::new(pipeline),
        config,
    }
}

/// Number of entries left in the upload directory.
pub fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
