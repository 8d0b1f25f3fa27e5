//! Core library for groupmix.
//!
//! Splits a roster of people into small groups under configurable
//! constraints: target group size, gender separation, mandatory leaders and
//! family/network grouping or diversification.
//!
//! - [`generator`]: the group-generation algorithm
//! - [`planner`]: owns roster, settings and published groups
//! - [`store`]: JSON persistence for roster, settings and results
//! - [`export`]: plain-text rendering of generated groups

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod models;
pub mod planner;
pub mod rng;
pub mod store;

pub use config::Config;
pub use error::ValidationError;
pub use export::format_groups_as_text;
pub use generator::{generate_groups, validate};
pub use models::{Gender, Group, GroupSettings, Person};
pub use planner::GroupPlanner;
pub use rng::RandomSource;
pub use store::Store;
