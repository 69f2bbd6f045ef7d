use crate::models::PlayerId;

/// Errors raised while building or driving a simulation.
///
/// The simulation loop itself never fails; everything here is rejected at
/// construction time or at the JSON boundary.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Team '{team}' has an empty lineup")]
    EmptyRoster { team: String },

    #[error("Team '{team}' has no goalkeeper in its lineup")]
    MissingGoalkeeper { team: String },

    #[error("Team '{team}' lists {count} goalkeepers, expected exactly one")]
    MultipleGoalkeepers { team: String, count: usize },

    #[error("Team '{team}' lists player {player_id} more than once")]
    DuplicatePlayer { team: String, player_id: PlayerId },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
