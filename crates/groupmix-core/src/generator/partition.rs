use tracing::debug;

use crate::models::{Group, GroupSettings, Person};
use crate::rng::{shuffle, RandomSource};

use super::filler::fill_round_robin;
use super::selector::{select_candidate, SelectOptions};

/// Phases a bucket goes through while its groups are built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Create `len / target` groups, each led by a leader when required
    Seeding,
    /// Round-robin the pool into the seeded groups up to the target size
    Filling,
    /// Place leftovers into existing groups, smallest first, past the target
    Redistributing,
    /// Open new groups for whoever could not be placed
    Overflowing,
    Done,
}

/// Builds the groups for one bucket of people.
pub struct Partitioner<'a, R: RandomSource + ?Sized> {
    settings: &'a GroupSettings,
    diversify_family: bool,
    rng: &'a mut R,
    pool: Vec<Person>,
    groups: Vec<Group>,
    phase: Phase,
}

impl<'a, R: RandomSource + ?Sized> Partitioner<'a, R> {
    pub fn new(
        people: Vec<Person>,
        settings: &'a GroupSettings,
        diversify_family: bool,
        rng: &'a mut R,
    ) -> Self {
        Self {
            settings,
            diversify_family,
            rng,
            pool: people,
            groups: Vec::new(),
            phase: Phase::Seeding,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// People not placed in any group so far
    pub fn leftovers(&self) -> &[Person] {
        &self.pool
    }

    /// Run every phase; returns the bucket's groups. Ids are drawn from
    /// `next_id`, which is shared by all buckets of a run.
    pub fn run(mut self, next_id: &mut u32) -> Vec<Group> {
        while self.phase != Phase::Done {
            self.step(next_id);
        }
        if !self.pool.is_empty() {
            debug!(unplaced = self.pool.len(), "Leaving people without a group");
        }
        self.groups
    }

    /// Advance the state machine by one unit of work
    pub fn step(&mut self, next_id: &mut u32) {
        self.phase = match self.phase {
            Phase::Seeding => self.seed(next_id),
            Phase::Filling => {
                fill_round_robin(
                    &mut self.pool,
                    &mut self.groups,
                    self.settings,
                    self.diversify_family,
                    &mut *self.rng,
                );
                Phase::Redistributing
            }
            Phase::Redistributing => {
                if !self.pool.is_empty() && self.redistribute_one() {
                    Phase::Redistributing
                } else {
                    Phase::Overflowing
                }
            }
            Phase::Overflowing => {
                if self.can_open_group() && self.open_overflow_group(next_id) {
                    Phase::Overflowing
                } else {
                    Phase::Done
                }
            }
            Phase::Done => Phase::Done,
        };
    }

    fn seed(&mut self, next_id: &mut u32) -> Phase {
        if self.pool.is_empty() {
            return Phase::Done;
        }
        shuffle(&mut *self.rng, &mut self.pool);

        let mut group_count = self.pool.len() / self.settings.target_size().max(1);
        if self.settings.require_leader {
            let leaders = self.pool.iter().filter(|p| p.is_leader).count();
            group_count = group_count.min(leaders);
        }

        for _ in 0..group_count {
            let mut group = Group::new(take_id(next_id));
            if self.settings.require_leader {
                let leaders: Vec<usize> = self
                    .pool
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.is_leader)
                    .map(|(i, _)| i)
                    .collect();
                let pick = leaders[self.rng.pick_index(leaders.len())];
                group.members.push(self.pool.remove(pick));
            }
            self.groups.push(group);
        }

        Phase::Filling
    }

    /// Place one leftover person into the smallest group that accepts them
    fn redistribute_one(&mut self) -> bool {
        let mut order: Vec<usize> = (0..self.groups.len()).collect();
        order.sort_by_key(|&gi| self.groups[gi].len());

        for pi in 0..self.pool.len() {
            for &gi in &order {
                let group = &self.groups[gi];
                let options = SelectOptions {
                    diversify_family: self.diversify_family,
                    prefer_non_leader: self.settings.require_leader && group.has_leader(),
                    target_gender: None,
                };
                let trial = std::slice::from_ref(&self.pool[pi]);
                if select_candidate(trial, group, options, &mut *self.rng).is_some() {
                    let person = self.pool.remove(pi);
                    self.groups[gi].members.push(person);
                    return true;
                }
            }
        }
        false
    }

    fn can_open_group(&self) -> bool {
        !self.pool.is_empty()
            && (!self.settings.require_leader || self.pool.iter().any(|p| p.is_leader))
    }

    /// Open a new group, led by the first leftover leader when required, and
    /// fill it. Returns false when the group could not take anybody.
    fn open_overflow_group(&mut self, next_id: &mut u32) -> bool {
        let mut group = Group::new(*next_id);
        if self.settings.require_leader {
            if let Some(li) = self.pool.iter().position(|p| p.is_leader) {
                group.members.push(self.pool.remove(li));
            }
        }

        let mut fresh = [group];
        fill_round_robin(
            &mut self.pool,
            &mut fresh,
            self.settings,
            self.diversify_family,
            &mut *self.rng,
        );
        let [group] = fresh;

        if group.is_empty() {
            return false;
        }
        take_id(next_id);
        self.groups.push(group);
        true
    }
}

fn take_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id += 1;
    id
}
