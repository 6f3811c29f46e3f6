use crate::dtos::{ChatRequest, ChatResponse, GenerateTextRequest, GenerateTextResponse};
use crate::prompts;
use crate::services::providers::{GenerationRequest, Role, Turn, TurnPart};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use service_core::error::AppError;

/// POST /generate-text: single-turn text generation with the default model.
pub async fn generate_text(
    State(state): State<AppState>,
    Json(body): Json<GenerateTextRequest>,
) -> Result<Json<GenerateTextResponse>, AppError> {
    let prompt = require_prompt(body.prompt.as_deref())?;

    let request =
        GenerationRequest::single_turn(state.config.models.default_model.as_str(), prompt);
    let result = state.text_provider.generate(request).await?;

    Ok(Json(GenerateTextResponse {
        result: result.extract_text(),
    }))
}

/// POST /chat: multi-turn conversation with a fixed system instruction.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let messages = body
        .messages
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("messages is required")))?;

    let turns = messages
        .iter()
        .map(|message| Turn {
            role: Role::from_wire(&message.role),
            parts: vec![TurnPart::Text(message.content.clone())],
        })
        .collect();

    let model = state.config.resolve_model(body.model.as_deref()).to_string();

    tracing::info!(
        model = %model,
        message_count = messages.len(),
        "Forwarding chat conversation"
    );

    let request = GenerationRequest {
        model,
        system_instruction: Some(prompts::CHAT_SYSTEM.to_string()),
        turns,
    };
    let result = state.text_provider.generate(request).await?;

    Ok(Json(ChatResponse {
        reply: result.extract_text(),
    }))
}

/// POST /generate-text-from-image: multipart prompt + image file.
pub async fn generate_text_from_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateTextResponse>, AppError> {
    let mut prompt: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("prompt") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read prompt field: {}", e))
                })?;
                prompt = Some(text);
            }
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!("Failed to read image bytes: {}", e))
                    })?
                    .to_vec();
                image = Some((mime_type, data));
            }
            _ => {}
        }
    }

    let prompt = require_prompt(prompt.as_deref())?;
    let (mime_type, data) = image
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("an image upload is required")))?;

    tracing::info!(
        mime_type = %mime_type,
        image_bytes = data.len(),
        "Forwarding image-grounded prompt"
    );

    let request = GenerationRequest {
        model: state.config.models.default_model.clone(),
        system_instruction: None,
        turns: vec![Turn {
            role: Role::User,
            parts: vec![
                TurnPart::Text(prompt.to_string()),
                TurnPart::InlineImage { mime_type, data },
            ],
        }],
    };
    let result = state.text_provider.generate(request).await?;

    Ok(Json(GenerateTextResponse {
        result: result.extract_text(),
    }))
}

fn require_prompt(prompt: Option<&str>) -> Result<&str, AppError> {
    prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("prompt is required")))
}
