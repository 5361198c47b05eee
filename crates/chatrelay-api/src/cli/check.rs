//! Upstream connectivity check.

use anyhow::Result;
use console::style;
use secrecy::SecretString;

use chatrelay_infra::llm::openai_compat::config::OpenAiCompatConfig;
use chatrelay_infra::llm::{OpenAiCompatibleProvider, test_provider_connection};
use chatrelay_types::config::RelayConfig;

/// Send a short "Hello" completion to the configured upstream and report the result.
pub async fn check(config: &RelayConfig, api_key: SecretString, json: bool) -> Result<()> {
    let provider =
        OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_upstream(&config.upstream, api_key))?;
    let model = &config.upstream.model;

    let started = std::time::Instant::now();
    let result = test_provider_connection(&provider, model).await;
    let elapsed_ms = started.elapsed().as_millis();

    match result {
        Ok(response) => {
            if json {
                let out = serde_json::json!({
                    "ok": true,
                    "base_url": config.upstream.base_url,
                    "model": response.model,
                    "reply": response.content,
                    "latency_ms": elapsed_ms,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!();
                println!(
                    "  {} Upstream reachable ({}ms)",
                    style("✓").green().bold(),
                    elapsed_ms
                );
                println!("  {:<10} {}", style("Endpoint").dim(), config.upstream.base_url);
                println!("  {:<10} {}", style("Model").dim(), response.model);
                println!("  {:<10} {}", style("Reply").dim(), response.content.trim());
                println!();
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let out = serde_json::json!({
                    "ok": false,
                    "base_url": config.upstream.base_url,
                    "model": model,
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            anyhow::bail!("upstream check failed: {e}")
        }
    }
}
