//! Contract with the upstream schema generator (an AI service).
//!
//! The service turns a natural-language prompt into a [`SchemaDefinition`],
//! or refines an existing one. Only the request/response shapes and the
//! async trait live here; transports implement [`SchemaGenerator`].

use crate::error::{ForgeError, ForgeResult};
use crate::ir::{Dialect, SchemaDefinition};
use serde::{Deserialize, Serialize};

/// Generate a schema from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub dialect: Dialect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Refine an existing schema with an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementRequest {
    pub schema: SchemaDefinition,
    pub instruction: String,
}

/// Response shape shared by generation and refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            prompt: prompt.into(),
            dialect,
            context: None,
        }
    }

    pub fn context(mut self, text: impl Into<String>) -> Self {
        self.context = Some(text.into());
        self
    }
}

impl GenerationResponse {
    pub fn ok(schema: SchemaDefinition) -> Self {
        Self {
            success: true,
            schema: Some(schema),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            schema: None,
            error: Some(message.into()),
        }
    }

    /// Collapse the response into the schema or one human-readable error.
    pub fn into_schema(self) -> ForgeResult<SchemaDefinition> {
        match (self.success, self.schema) {
            (true, Some(schema)) => Ok(schema),
            (true, None) => Err(ForgeError::Generation(
                "response reported success but carried no schema".to_string(),
            )),
            (false, _) => Err(ForgeError::Generation(
                self.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "generator returned an unsuccessful response".to_string()),
            )),
        }
    }
}

/// An upstream producer of schema IR.
///
/// Transport failures (network, malformed body) are reported as `Err`;
/// service-level failures come back as a non-success response.
#[allow(async_fn_in_trait)]
pub trait SchemaGenerator {
    async fn generate(&self, request: &GenerationRequest) -> ForgeResult<GenerationResponse>;

    async fn refine(&self, request: &RefinementRequest) -> ForgeResult<GenerationResponse>;
}
