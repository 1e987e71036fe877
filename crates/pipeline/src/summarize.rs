use std::fmt;

use async_trait::async_trait;
use meetspace_config::LlmSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PipelineError;

/// Which of the two generation calls a prompt (or failure) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Narrative,
    ActionItems,
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryKind::Narrative => write!(f, "summary"),
            SummaryKind::ActionItems => write!(f, "tasks"),
        }
    }
}

const SUMMARY_PROMPT_EN: &str = "You are a meeting assistant. Write a concise narrative summary \
of the meeting transcript provided by the user: the main topics discussed, decisions taken and \
their context. Write plain prose, no headings.";

const SUMMARY_PROMPT_AR: &str = "أنت مساعد اجتماعات. اكتب ملخصًا سرديًا موجزًا لنص الاجتماع الذي \
يقدمه المستخدم: المواضيع الرئيسية التي نوقشت والقرارات المتخذة وسياقها. اكتب نثرًا واضحًا دون عناوين.";

const TASKS_PROMPT_EN: &str = "You are a meeting assistant. Extract the action items from the \
meeting transcript provided by the user. Output one item per line, each line starting with '- '. \
When an owner is mentioned append '(@owner)', and when a deadline is mentioned append \
'[deadline]'. Output nothing but the list.";

const TASKS_PROMPT_AR: &str = "أنت مساعد اجتماعات. استخرج بنود العمل من نص الاجتماع الذي يقدمه \
المستخدم. اكتب بندًا واحدًا في كل سطر يبدأ بـ '- '، وأضف '(@owner)' عند ذكر مسؤول و'[deadline]' \
عند ذكر موعد نهائي. لا تكتب شيئًا غير القائمة.";

/// Fixed system prompt for a generation call: two kinds, two language
/// variants, selected by the language detector's verdict.
pub fn system_prompt(kind: SummaryKind, arabic: bool) -> &'static str {
    match (kind, arabic) {
        (SummaryKind::Narrative, false) => SUMMARY_PROMPT_EN,
        (SummaryKind::Narrative, true) => SUMMARY_PROMPT_AR,
        (SummaryKind::ActionItems, false) => TASKS_PROMPT_EN,
        (SummaryKind::ActionItems, true) => TASKS_PROMPT_AR,
    }
}

/// Seam for the two generation calls.
#[async_trait]
pub trait Summarizer: Send + Sync + 'static {
    async fn generate(
        &self,
        kind: SummaryKind,
        arabic: bool,
        transcript: &str,
    ) -> Result<String, PipelineError>;
}

/// Client for a chat-completion LLM API. Each call is stateless; the
/// orchestrator is responsible for running the two kinds concurrently.
#[derive(Debug, Clone)]
pub struct SummarizerClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl SummarizerClient {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: settings.api_key.clone(),
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn failed(kind: SummaryKind, message: impl Into<String>) -> PipelineError {
        PipelineError::SummarizationFailed {
            kind,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Summarizer for SummarizerClient {
    async fn generate(
        &self,
        kind: SummaryKind,
        arabic: bool,
        transcript: &str,
    ) -> Result<String, PipelineError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Self::failed(kind, "LLM API key not configured"))?;

        let request = ChatRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(kind, arabic).to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: transcript.to_string(),
                },
            ],
        };

        debug!(%kind, arabic, chars = transcript.len(), "Requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::failed(kind, format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::failed(kind, format!("service returned {status}: {body}")));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Self::failed(kind, format!("invalid completion response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Self::failed(kind, "completion had no content"))
    }
}

/// One parsed entry of the action-item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub text: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
}

/// Parses generated action-item text into discrete items.
///
/// Convention: one item per line, starting with a bullet marker (`-`, `*`,
/// `•`) or `N.`/`N)` numbering; `(@owner)` and `[deadline]` annotations are
/// extracted when present. Lines without a marker are ignored.
pub fn parse_action_items(raw: &str) -> Vec<ActionItem> {
    raw.lines()
        .filter_map(|line| {
            let body = strip_bullet(line)?;
            let mut text = body.to_string();
            let owner = take_annotation(&mut text, "(@", ')');
            let deadline = take_annotation(&mut text, "[", ']');

            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() && owner.is_none() && deadline.is_none() {
                return None;
            }

            Some(ActionItem {
                text,
                owner,
                deadline,
            })
        })
        .collect()
}

fn strip_bullet(line: &str) -> Option<&str> {
    let line = line.trim_start();
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest);
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some(rest);
        }
    }

    None
}

fn take_annotation(text: &mut String, open: &str, close: char) -> Option<String> {
    let start = text.find(open)?;
    let end = start + text[start..].find(close)?;
    let inner = text[start + open.len()..end].trim().to_string();
    text.replace_range(start..=end, "");

    if inner.is_empty() { None } else { Some(inner) }
}
