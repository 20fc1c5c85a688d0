//! Completion batch API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Messages
// =============================================================================

/// Chat message within a batched completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// =============================================================================
// Batch submission
// =============================================================================

/// One completion request inside a batch.
///
/// `custom_id` is the caller's correlation key: the service echoes it back on
/// the matching result so callers can route outputs without positional
/// assumptions.
#[derive(Debug, Clone, Serialize)]
pub struct BatchCompletionRequest {
    pub custom_id: String,
    pub body: CompletionBody,
}

/// The completion payload for a single batch entry.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionBody {
    /// Model to use (e.g. "gpt-4o-mini")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in the completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Structured response format with JSON schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl CompletionBody {
    /// Create a body constrained to a JSON schema response.
    pub fn structured(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
        schema_name: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::system(system), Message::user(user)],
            temperature: Some(0.7),
            max_tokens: None,
            response_format: Some(ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: schema_name.into(),
                    strict: true,
                    schema,
                },
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: serde_json::Value,
}

/// Wire envelope for batch submission.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitBatchRequest<'a> {
    pub requests: &'a [BatchCompletionRequest],
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitBatchResponse {
    pub id: String,
}

// =============================================================================
// Batch lifecycle
// =============================================================================

/// Status of an in-flight batch on the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Validating,
    InProgress,
    Completed,
    Failed,
    Expired,
    Cancelled,
}

impl BatchStatus {
    /// Whether the batch has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchStatus::Completed
                | BatchStatus::Failed
                | BatchStatus::Expired
                | BatchStatus::Cancelled
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchStatusResponse {
    pub status: BatchStatus,
}

// =============================================================================
// Results
// =============================================================================

/// One completed entry from a finished batch, keyed by the submitted
/// `custom_id`. `content` is the raw model output (JSON text when the request
/// carried a schema-constrained response format); `error` is set instead when
/// that single entry failed.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResultItem {
    pub custom_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchResultsResponse {
    pub results: Vec<BatchResultItem>,
}
