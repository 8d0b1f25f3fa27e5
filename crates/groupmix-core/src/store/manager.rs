use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Group, GroupSettings, Person};

/// Stored groups are reused for 15 minutes after they were saved.
/// Older results likely belong to an earlier session and are dropped.
const RESULT_FRESH_MINUTES: i64 = 15;

const PEOPLE_FILE: &str = "people";
const SETTINGS_FILE: &str = "settings";
const GROUPS_FILE: &str = "groups";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredData<T> {
    pub data: T,
    pub saved_at: DateTime<Utc>,
}

impl<T> StoredData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            saved_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.saved_at
    }

    pub fn age_minutes(&self) -> i64 {
        self.age().num_minutes()
    }

    pub fn is_fresh(&self) -> bool {
        // Clock skew (saved "in the future") counts as fresh
        self.age() < Duration::minutes(RESULT_FRESH_MINUTES)
    }
}

pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read data file: {}", name))?;

        let value: T = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse data file: {}", name))?;

        Ok(Some(value))
    }

    fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.file_path(name);
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write data file: {}", name))?;
        debug!(file = name, "Saved data file");
        Ok(())
    }

    // ===== Roster =====

    /// Stored roster; an absent file is an empty roster
    pub fn load_people(&self) -> Result<Vec<Person>> {
        Ok(self.load(PEOPLE_FILE)?.unwrap_or_default())
    }

    pub fn save_people(&self, people: &[Person]) -> Result<()> {
        self.save(PEOPLE_FILE, people)
    }

    // ===== Settings =====

    /// Stored settings. Fails when any field is missing or mistyped, so a
    /// partially valid value is never applied.
    pub fn load_settings(&self) -> Result<Option<GroupSettings>> {
        self.load(SETTINGS_FILE)
    }

    pub fn save_settings(&self, settings: &GroupSettings) -> Result<()> {
        self.save(SETTINGS_FILE, settings)
    }

    // ===== Groups =====

    pub fn load_groups(&self) -> Result<Option<StoredData<Vec<Group>>>> {
        self.load(GROUPS_FILE)
    }

    /// Last saved groups if they are still fresh
    pub fn load_fresh_groups(&self) -> Result<Option<Vec<Group>>> {
        Ok(self.load_groups()?.and_then(|stored| {
            if stored.is_fresh() {
                Some(stored.data)
            } else {
                debug!(age_minutes = stored.age_minutes(), "Discarding stale groups");
                None
            }
        }))
    }

    pub fn save_groups(&self, groups: &[Group]) -> Result<()> {
        self.save(GROUPS_FILE, &StoredData::new(groups))
    }
}

// ============================================================================
// Tests
// ============================================================================
