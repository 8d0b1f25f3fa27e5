//! Data models for roster entries, settings and generated groups.
//!
//! - `Person`, `Gender`: roster entries
//! - `GroupSettings`: generation constraints
//! - `Group`: one generated group

pub mod group;
pub mod person;
pub mod settings;

pub use group::Group;
pub use person::{Gender, Person};
pub use settings::GroupSettings;
