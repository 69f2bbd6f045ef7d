pub mod batch;
pub mod json_api;

pub use batch::{simulate_batch, BatchSummary};
pub use json_api::{simulate_match_json, MatchRequest, MatchResponse, SCHEMA_VERSION};
