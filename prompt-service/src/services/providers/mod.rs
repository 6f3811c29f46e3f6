//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the generation
//! provider, allowing the handlers to run against Gemini or a mock.

pub mod gemini;
pub mod mock;

use crate::models::GenerationResult;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(anyhow::Error::new(err))
    }
}

/// Conversation role, normalized from client wire roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Map a client-supplied role string to a provider role.
    /// Anything that is not an assistant/model turn counts as user input.
    pub fn from_wire(role: &str) -> Self {
        match role {
            "assistant" | "model" => Role::Model,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One part of a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPart {
    Text(String),
    /// Raw image bytes; base64 encoding happens at the wire layer.
    InlineImage {
        mime_type: String,
        data: Vec<u8>,
    },
}

/// A single conversation turn, oldest first in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<TurnPart>,
}

/// Fully-shaped request handed to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub turns: Vec<Turn>,
}

impl GenerationRequest {
    /// A single user turn with one text part and no system instruction.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            turns: vec![Turn {
                role: Role::User,
                parts: vec![TurnPart::Text(prompt.into())],
            }],
        }
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Perform one generation call and return the raw response envelope.
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResult, ProviderError>;
}
