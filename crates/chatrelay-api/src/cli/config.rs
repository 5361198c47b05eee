//! Print the effective configuration.

use anyhow::Result;

use chatrelay_types::config::RelayConfig;

/// Render the effective configuration as TOML, with the API key status as a
/// trailing comment. The key value itself is never printed.
pub fn render_toml(config: &RelayConfig, api_key_present: bool) -> Result<String> {
    let mut out = toml::to_string_pretty(config)?;
    out.push_str(&format!(
        "\n# {}: {}\n",
        config.upstream.api_key_env,
        key_status(api_key_present)
    ));
    Ok(out)
}

/// Print the effective configuration to stdout.
pub fn show_config(config: &RelayConfig, api_key_present: bool, json: bool) -> Result<()> {
    if json {
        let mut value = serde_json::to_value(config)?;
        value["upstream"]["api_key"] = serde_json::Value::String(key_status(api_key_present).into());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_toml(config, api_key_present)?);
    }
    Ok(())
}

fn key_status(present: bool) -> &'static str {
    if present { "set (redacted)" } else { "not set" }
}
