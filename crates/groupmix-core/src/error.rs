use thiserror::Error;

/// Reasons a generation run is refused before any partitioning happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No people available to generate groups")]
    EmptyRoster,

    #[error("Leaders required but no leaders available")]
    NoLeaders,

    #[error("Groups must have at least 2 people (got {0})")]
    GroupTooSmall(u32),
}
