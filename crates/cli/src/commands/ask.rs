//! `ninety ask` — One-shot coaching from the terminal.
//!
//! Builds the same pipeline the gateway uses and runs a single request
//! through it, bypassing HTTP. Useful for smoke-testing persona and
//! context assembly without a running server.

use ninety_coach::CoachPipeline;
use ninety_config::AppConfig;
use ninety_core::envelope::ReplyMode;
use ninety_core::provider::CompletionProvider;
use ninety_core::request::CoachRequest;
use ninety_providers::OpenAiProvider;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(
    prompt: String,
    profile_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Reuse the boundary validator so `ask` and the gateway agree on what a
    // valid request is.
    let mut body = serde_json::Map::new();
    body.insert("prompt".into(), serde_json::Value::String(prompt));
    if let Some(path) = profile_path {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read profile file {}: {e}", path.display()))?;
        let profile: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| format!("Profile file is not valid JSON: {e}"))?;
        body.insert("profile".into(), profile);
    }
    let raw = serde_json::to_vec(&serde_json::Value::Object(body))?;
    let request = CoachRequest::parse(&raw).map_err(|e| e.to_string())?;

    let provider: Option<Arc<dyn CompletionProvider>> = config
        .api_key
        .as_ref()
        .map(|key| Arc::new(OpenAiProvider::openai(key.clone())) as Arc<dyn CompletionProvider>);

    let pipeline = CoachPipeline::new(
        provider,
        &config.model,
        config.temperature,
        config.max_tokens,
    );

    let reply = pipeline.respond(&request).await;

    match reply.mode {
        ReplyMode::Stub => println!("(stub mode — no API key configured)\n"),
        ReplyMode::Openai => {}
        ReplyMode::Error => {
            return Err(reply.error.unwrap_or_else(|| "coaching failed".into()).into());
        }
    }

    if let Some(text) = reply.reply {
        println!("{text}");
    }

    Ok(())
}
