//! `ninety doctor` — Diagnose system health.

use ninety_config::AppConfig;
use ninety_core::provider::CompletionProvider;
use ninety_providers::OpenAiProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ninety Doctor — System Diagnostics");
    println!("==================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                Some(config)
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
                None
            }
        }
    } else {
        println!("  ⚠️  No config file — run `ninety onboard` (env vars still apply)");
        AppConfig::load().ok()
    };

    // Check API key and provider reachability
    match config.as_ref().and_then(|c| c.api_key.clone()) {
        Some(key) => {
            println!("  ✅ API key configured");

            let provider = OpenAiProvider::openai(key);
            match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider reachable"),
                Ok(false) => {
                    println!("  ⚠️  Provider responded but rejected the key");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider unreachable: {e}");
                    issues += 1;
                }
            }
        }
        None => {
            println!("  ⚠️  No API key — service will run in degraded stub mode");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
