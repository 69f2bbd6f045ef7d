use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{EngineConfig, MatchEngine, Side};
use crate::error::{Result, SimError};
use crate::models::{MatchEvent, MatchResult, MatchSetup, MatchStatistics, ShootoutSummary, TeamSheet};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Play extra time and a shootout when level after 90 minutes
    #[serde(default)]
    pub knockout: bool,
    /// Engine settings; `None` uses the realistic preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EngineConfig>,
    pub home_team: TeamSheet,
    pub away_team: TeamSheet,
}

impl MatchRequest {
    pub fn new(seed: u64, home_team: TeamSheet, away_team: TeamSheet) -> Self {
        Self { schema_version: SCHEMA_VERSION, seed, knockout: false, config: None, home_team, away_team }
    }

    pub fn setup(&self) -> MatchSetup {
        MatchSetup::new(self.home_team.clone(), self.away_team.clone())
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.config.clone().unwrap_or_default()
    }

    /// Reject requests written for another schema version.
    pub fn check_version(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(SimError::InvalidRequest(format!(
                "Unsupported schema version: {}",
                self.schema_version
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: String,
    pub away_team: String,
    pub score_home: u8,
    pub score_away: u8,
    pub extra_time_played: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutSummary>,
    pub events: Vec<MatchEvent>,
    pub statistics: MatchStatistics,
}

impl MatchResponse {
    pub fn from_result(seed: u64, result: MatchResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            home_team: result.home_team,
            away_team: result.away_team,
            score_home: result.score_home,
            score_away: result.score_away,
            extra_time_played: result.extra_time_played,
            winner: result.winner,
            shootout: result.shootout,
            events: result.events,
            statistics: result.statistics,
        }
    }
}

/// Run one request end to end.
pub fn simulate_request(request: &MatchRequest) -> Result<MatchResponse> {
    request.check_version()?;
    let setup = request.setup();
    setup.validate()?;

    let engine = MatchEngine::new(setup, request.engine_config(), request.seed)?;
    let result = engine.play(request.knockout);
    debug!(seed = request.seed, events = result.events.len(), "request simulated");
    Ok(MatchResponse::from_result(request.seed, result))
}

/// JSON in, JSON out.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_request(&request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::*;
    use crate::models::EventType;

    fn request_json(seed: u64, knockout: bool) -> String {
        let mut request = MatchRequest::new(seed, uniform_sheet(1, "Home", 12), uniform_sheet(2, "Away", 12));
        request.knockout = knockout;
        serde_json::to_string(&request).unwrap()
    }

    #[test]
    fn test_roundtrip_through_json() {
        let out = simulate_match_json(&request_json(7, false)).unwrap();
        let response: MatchResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.schema_version, SCHEMA_VERSION);
        assert_eq!(response.home_team, "Home");
        assert_eq!(response.events.first().map(|e| e.event_type), Some(EventType::KickOff));
        let goals = response.events.iter().filter(|e| e.is_goal()).count();
        assert_eq!(goals, (response.score_home + response.score_away) as usize);
    }

    #[test]
    fn test_same_request_same_response() {
        let a = simulate_match_json(&request_json(99, true)).unwrap();
        let b = simulate_match_json(&request_json(99, true)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_knockout_response_has_winner() {
        for seed in 0..30 {
            let out = simulate_match_json(&request_json(seed, true)).unwrap();
            let response: MatchResponse = serde_json::from_str(&out).unwrap();
            assert!(response.winner.is_some());
        }
    }

    #[test]
    fn test_wire_tags() {
        let out = simulate_match_json(&request_json(3, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["events"][0]["type"], "kickoff");
        assert!(value["statistics"]["attack_types"].is_object());
    }

    #[test]
    fn test_rejects_unknown_schema_version() {
        let mut value: serde_json::Value = serde_json::from_str(&request_json(1, false)).unwrap();
        value["schema_version"] = serde_json::json!(2);
        let err = simulate_match_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, SimError::InvalidRequest(_)));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(simulate_match_json("{"), Err(SimError::Serialization(_))));

        let mut request = MatchRequest::new(1, uniform_sheet(1, "Home", 12), uniform_sheet(2, "Away", 12));
        request.home_team.lineup.retain(|e| !e.position.is_goalkeeper());
        let err = simulate_match_json(&serde_json::to_string(&request).unwrap()).unwrap_err();
        assert!(matches!(err, SimError::MissingGoalkeeper { .. }));
    }

    #[test]
    fn test_config_from_request() {
        let mut request = MatchRequest::new(5, uniform_sheet(1, "Home", 12), uniform_sheet(2, "Away", 12));
        request.config = Some(EngineConfig { emit_snapshot_events: false, ..EngineConfig::default() });
        let response = simulate_request(&request).unwrap();
        assert!(response.events.iter().all(|e| e.event_type != EventType::Snapshot));
    }
}
