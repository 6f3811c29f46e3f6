//! Tests for the image-grounded generation endpoint.

mod common;

use common::TestApp;
use prompt_service::services::providers::mock::MockTextProvider;
use prompt_service::services::providers::{Role, TurnPart};
use reqwest::multipart;
use serde_json::json;

fn image_part(bytes: Vec<u8>) -> multipart::Part {
    multipart::Part::bytes(bytes)
        .file_name("photo.png")
        .mime_str("image/png")
        .expect("valid mime type")
}

#[tokio::test]
async fn prompt_and_image_return_extracted_text() {
    let app = TestApp::spawn_with(MockTextProvider::from_json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "a cat on a mat" }] }
        }]
    })))
    .await;
    let client = reqwest::Client::new();

    let image_bytes = vec![0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a];
    let form = multipart::Form::new()
        .text("prompt", "what is in this picture?")
        .part("image", image_part(image_bytes.clone()));

    let response = client
        .post(format!("{}/generate-text-from-image", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["result"], "a cat on a mat");

    let request = app.provider.last_request().expect("provider not called");
    assert_eq!(request.turns.len(), 1);
    assert_eq!(request.turns[0].role, Role::User);
    assert_eq!(
        request.turns[0].parts,
        vec![
            TurnPart::Text("what is in this picture?".to_string()),
            TurnPart::InlineImage {
                mime_type: "image/png".to_string(),
                data: image_bytes,
            },
        ]
    );
}

#[tokio::test]
async fn missing_image_returns_400_even_with_prompt() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().text("prompt", "describe the picture");

    let response = client
        .post(format!("{}/generate-text-from-image", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"]
        .as_str()
        .expect("message should be a string")
        .contains("image"));
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn missing_prompt_returns_400_even_with_image() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().part("image", image_part(vec![1, 2, 3]));

    let response = client
        .post(format!("{}/generate-text-from-image", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"]
        .as_str()
        .expect("message should be a string")
        .contains("prompt"));
    assert_eq!(app.provider.calls(), 0);
}
