use nt_core::EntityId;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("character not found in simulation: {0}")]
    EntityNotFound(EntityId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("system error: {0}")]
    SystemError(String),
}
