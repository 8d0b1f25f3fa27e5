//! Roster, settings and published groups, owned in one place.
//!
//! `GroupPlanner` is the only entry point that mutates state: every roster
//! update clears the published groups (they would reference a roster that
//! no longer matches), and every change is written through to the attached
//! [`Store`], if any. Regeneration toggles a busy flag that presentation
//! layers can watch.

use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::export::format_groups_as_text;
use crate::generator::{generate_groups, validate};
use crate::models::{Group, GroupSettings, Person};
use crate::rng::RandomSource;
use crate::store::Store;

/// How long the busy flag stays up after a non-empty result is published,
/// so a UI has time to show the regenerating state.
pub const MIN_BUSY_DWELL: Duration = Duration::from_millis(400);

pub struct GroupPlanner<R: RandomSource = StdRng> {
    people: Vec<Person>,
    settings: GroupSettings,
    groups: Vec<Group>,
    busy: watch::Sender<bool>,
    store: Option<Store>,
    rng: R,
}

impl<R: RandomSource> GroupPlanner<R> {
    /// In-memory planner with an empty roster and default settings
    pub fn new(rng: R) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            people: Vec::new(),
            settings: GroupSettings::default(),
            groups: Vec::new(),
            busy,
            store: None,
            rng,
        }
    }

    /// Planner hydrated from `store`.
    ///
    /// Unreadable data falls back to an empty roster, default settings and
    /// no groups. Stored groups are kept only while fresh. Hydration is
    /// the initial load, so it does not clear the stored groups.
    pub fn open(store: Store, rng: R) -> Self {
        let people = store.load_people().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load roster, starting empty");
            Vec::new()
        });

        let settings = match store.load_settings() {
            Ok(Some(settings)) => settings,
            Ok(None) => GroupSettings::default(),
            Err(e) => {
                warn!(error = %e, "Invalid stored settings, using defaults");
                GroupSettings::default()
            }
        };

        let groups = store.load_fresh_groups().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load stored groups");
            None
        });

        debug!(
            people = people.len(),
            groups = groups.as_ref().map_or(0, Vec::len),
            "Loaded planner state"
        );

        let mut planner = Self::new(rng);
        planner.people = people;
        planner.settings = settings;
        planner.groups = groups.unwrap_or_default();
        planner.store = Some(store);
        planner
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn settings(&self) -> &GroupSettings {
        &self.settings
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Receiver for busy flag transitions
    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    // ===== Roster =====

    /// Replace the whole roster
    pub fn set_roster(&mut self, people: Vec<Person>) {
        self.people = people;
        self.roster_changed();
    }

    /// Add a person, replacing any existing entry with the same id
    pub fn add_person(&mut self, person: Person) {
        match self.people.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => *existing = person,
            None => self.people.push(person),
        }
        self.roster_changed();
    }

    /// Returns false when no person has `id`
    pub fn remove_person(&mut self, id: &str) -> bool {
        let before = self.people.len();
        self.people.retain(|p| p.id != id);
        if self.people.len() == before {
            return false;
        }
        self.roster_changed();
        true
    }

    /// Mark a person as missing (excluded from runs) or present again.
    /// Returns false when no person has `id`.
    pub fn set_missing(&mut self, id: &str, missing: bool) -> bool {
        let Some(person) = self.people.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        person.is_missing = missing;
        self.roster_changed();
        true
    }

    fn roster_changed(&mut self) {
        self.persist("roster", |store, planner| store.save_people(&planner.people));
        if !self.groups.is_empty() {
            debug!("Roster changed, clearing groups");
            self.publish(Vec::new());
        }
    }

    // ===== Settings =====

    pub fn update_settings(&mut self, settings: GroupSettings) {
        self.settings = settings;
        self.persist("settings", |store, planner| store.save_settings(&planner.settings));
    }

    // ===== Generation =====

    /// Rebuild the groups from the current roster and settings.
    ///
    /// On a validation failure the published groups are cleared and the
    /// reason is returned; nothing is partitioned.
    pub fn regenerate(&mut self) -> Result<&[Group], ValidationError> {
        self.run_generation()?;
        self.busy.send_replace(false);
        Ok(&self.groups)
    }

    /// Like [`regenerate`](Self::regenerate), but keeps the busy flag up
    /// for [`MIN_BUSY_DWELL`] after a non-empty result is published.
    pub async fn regenerate_with_dwell(&mut self) -> Result<&[Group], ValidationError> {
        self.run_generation()?;
        if !self.groups.is_empty() {
            tokio::time::sleep(MIN_BUSY_DWELL).await;
        }
        self.busy.send_replace(false);
        Ok(&self.groups)
    }

    /// Validate, generate and publish; leaves the busy flag up on success
    fn run_generation(&mut self) -> Result<(), ValidationError> {
        self.busy.send_replace(true);
        self.publish(Vec::new());

        if let Err(err) = validate(&self.people, &self.settings) {
            warn!(error = %err, "Skipping group generation");
            self.busy.send_replace(false);
            return Err(err);
        }

        let groups = generate_groups(&self.people, &self.settings, &mut self.rng);
        let eligible = self.people.iter().filter(|p| p.is_eligible()).count();
        let placed: usize = groups.iter().map(Group::len).sum();
        if placed < eligible {
            warn!(unplaced = eligible - placed, "Some people could not be placed");
        }
        info!(groups = groups.len(), placed, "Generated groups");
        self.publish(groups);
        Ok(())
    }

    fn publish(&mut self, groups: Vec<Group>) {
        self.groups = groups;
        self.persist("groups", |store, planner| store.save_groups(&planner.groups));
    }

    /// Text export of the published groups
    pub fn export_text(&self) -> String {
        format_groups_as_text(&self.groups, self.settings.require_leader)
    }

    fn persist(&self, what: &str, save: impl FnOnce(&Store, &Self) -> anyhow::Result<()>) {
        if let Some(ref store) = self.store {
            if let Err(e) = save(store, self) {
                warn!(data = what, error = %e, "Failed to persist");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
