//! # sim_core - Minute-by-minute football match simulation
//!
//! Two team sheets in, an ordered event timeline, a final score and match
//! statistics out. Key moments are resolved through logistic duels over
//! cached lane × phase strengths, with fouls, set pieces, injuries,
//! scheduled tactical instructions, extra time and a penalty shootout.
//!
//! ## Features
//! - Deterministic: same seed and input give the same event stream
//! - Per-simulation attribute cache (safe to run matches in parallel)
//! - JSON API and a rayon batch runner

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_batch, simulate_match_json, BatchSummary, MatchRequest, MatchResponse};
pub use engine::{EngineConfig, MatchEngine};
pub use error::{Result, SimError};
