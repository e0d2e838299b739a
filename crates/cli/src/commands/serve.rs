//! `ninety serve` — Start the HTTP coaching gateway.

use ninety_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Ninety Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    if config.has_api_key() {
        println!("   Mode: live ({})", config.model);
    } else {
        println!("   Mode: degraded (stub replies) — no API key configured");
    }

    ninety_gateway::start(config).await?;

    Ok(())
}
