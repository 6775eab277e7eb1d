//! Scripted upstream fakes shared by the builder, tool and transport tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::error::UpstreamError;
use super::model::ImageData;
use super::upstream::{ImageModel, LanguageModel};

/// Ordered record of upstream calls across both fakes.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Language model that replays queued replies, then falls back to a default.
pub struct FakeLanguageModel {
    log: CallLog,
    replies: Mutex<VecDeque<Result<String, UpstreamError>>>,
    fallback: Result<String, UpstreamError>,
}

impl FakeLanguageModel {
    pub fn replying(log: CallLog, text: &str) -> Self {
        Self {
            log,
            replies: Mutex::new(VecDeque::new()),
            fallback: Ok(text.to_string()),
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            log,
            replies: Mutex::new(VecDeque::new()),
            fallback: Err(UpstreamError::status("Anthropic", 529, "overloaded")),
        }
    }

    /// Queue a reply consumed before the fallback.
    pub fn then(self, reply: Result<String, UpstreamError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|entry| entry.strip_prefix("llm:").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl LanguageModel for FakeLanguageModel {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, UpstreamError> {
        self.log.lock().unwrap().push(format!("llm:{}", prompt));
        let queued = self.replies.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Image model returning numbered URLs, optionally failing on one call.
pub struct FakeImageModel {
    log: CallLog,
    fail_on_call: Option<usize>,
}

impl FakeImageModel {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_on_call: None,
        }
    }

    /// Fail the n-th call (1-based).
    pub fn failing_on(log: CallLog, call: usize) -> Self {
        Self {
            log,
            fail_on_call: Some(call),
        }
    }
}

#[async_trait]
impl ImageModel for FakeImageModel {
    async fn generate(&self, prompt: &str) -> Result<ImageData, UpstreamError> {
        let call = {
            let mut log = self.log.lock().unwrap();
            log.push(format!("image:{}", prompt));
            log.iter().filter(|e| e.starts_with("image:")).count()
        };

        if self.fail_on_call == Some(call) {
            return Err(UpstreamError::status("OpenAI", 400, "content policy violation"));
        }
        Ok(ImageData::Url(format!("https://img.test/{}.png", call)))
    }
}

/// Count log entries for one upstream (`"llm"` or `"image"`).
pub fn count_calls(log: &CallLog, kind: &str) -> usize {
    let prefix = format!("{}:", kind);
    log.lock()
        .unwrap()
        .iter()
        .filter(|e| e.starts_with(&prefix))
        .count()
}

/// Serve `app` on an ephemeral loopback port and return its base URL.
#[cfg(feature = "http")]
pub async fn spawn_stub(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
