use mb_config::BridgeConfig;
use serde::Serialize;

/// Configuration summary safe to print: no keys.
#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    teamwork_configured: bool,
    teamwork_base_url: &'a str,
    process_street_configured: bool,
    process_street_base_url: &'a str,
    listen: &'a str,
    path: &'a str,
    timeout_secs: u64,
}

fn report(config: &BridgeConfig) -> ConfigReport<'_> {
    ConfigReport {
        teamwork_configured: config.teamwork.is_configured(),
        teamwork_base_url: config.teamwork.api_base(),
        process_street_configured: config.process_street.is_configured(),
        process_street_base_url: config.process_street.api_base(),
        listen: &config.server.listen,
        path: &config.server.path,
        timeout_secs: config.http.timeout_secs,
    }
}

pub fn handle(config: &BridgeConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&report(config))?);
    config.validate()?;
    Ok(())
}
