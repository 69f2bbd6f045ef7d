//! sim_cli
//!
//! 요청/설정 파일 로딩과 실행 helpers. The binary in `main.rs` is a thin clap
//! layer over these functions.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use sim_core::api::json_api::simulate_request;
use sim_core::{simulate_batch, BatchSummary, EngineConfig, MatchRequest};

/// Read a JSON match request.
pub fn load_request(path: &Path) -> Result<MatchRequest> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading request {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing request {}", path.display()))
}

/// Read an engine config. `.json` files are parsed as JSON, anything else as
/// YAML.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => EngineConfig::from_json_str(&text),
        _ => EngineConfig::from_yaml_str(&text),
    };
    config.with_context(|| format!("parsing config {}", path.display()))
}

/// Simulate one request and render the response as JSON.
pub fn run_simulate(request: &MatchRequest, pretty: bool) -> Result<String> {
    let response = simulate_request(request).context("simulation request rejected")?;
    let json = if pretty { serde_json::to_string_pretty(&response)? } else { serde_json::to_string(&response)? };
    Ok(json)
}

/// `count` matches on seeds `request.seed ..`, with `config` overriding the
/// request's own settings.
pub fn run_batch(request: &MatchRequest, count: u64, config: Option<EngineConfig>) -> Result<BatchSummary> {
    request.check_version().context("batch rejected")?;
    let config = config.unwrap_or_else(|| request.engine_config());
    let seeds: Vec<u64> = (0..count).map(|i| request.seed.wrapping_add(i)).collect();
    simulate_batch(&request.setup(), &config, &seeds, request.knockout).context("batch rejected")
}

/// Named preset rendered as YAML.
pub fn preset_yaml(name: &str) -> Result<String> {
    let config = EngineConfig::preset(name).ok_or_else(|| anyhow!("unknown preset '{}'", name))?;
    Ok(config.to_yaml_string()?)
}
