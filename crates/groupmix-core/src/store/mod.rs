//! Local JSON storage for the roster, settings and last generated groups.
//!
//! Files live in one data directory:
//! - `people.json`: the roster, as a plain array
//! - `settings.json`: group settings
//! - `groups.json`: last result plus the time it was saved; only reused
//!   while younger than 15 minutes

pub mod manager;

pub use manager::{Store, StoredData};
