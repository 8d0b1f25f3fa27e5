//! Group generation.
//!
//! A run shuffles the eligible roster once, splits it into buckets (one per
//! family/network when grouping by network), optionally splits each bucket
//! by gender, and hands every subset to a [`Partitioner`]. The partitioner
//! seeds groups, fills them round-robin, redistributes leftovers into the
//! smallest groups and opens overflow groups as a last resort.
//!
//! The result is best-effort: people that no constraint-respecting group
//! can take are left out rather than forced in.

pub mod bucket;
pub mod filler;
pub mod partition;
pub mod selector;

use tracing::debug;

use crate::error::ValidationError;
use crate::models::settings::MIN_GROUP_SIZE;
use crate::models::{Gender, Group, GroupSettings, Person};
use crate::rng::{shuffle, RandomSource};

pub use bucket::split_buckets;
pub use filler::fill_round_robin;
pub use partition::{Partitioner, Phase};
pub use selector::{select_candidate, SelectOptions};

/// Check that a run over `people` with `settings` can start
pub fn validate(people: &[Person], settings: &GroupSettings) -> Result<(), ValidationError> {
    let mut eligible = people.iter().filter(|p| p.is_eligible()).peekable();
    if eligible.peek().is_none() {
        return Err(ValidationError::EmptyRoster);
    }
    if settings.require_leader && !eligible.any(|p| p.is_leader) {
        return Err(ValidationError::NoLeaders);
    }
    if settings.people_per_group < MIN_GROUP_SIZE {
        return Err(ValidationError::GroupTooSmall(settings.people_per_group));
    }
    Ok(())
}

/// Split the eligible part of `people` into groups.
///
/// Group ids start at 1 and increase in creation order. Returns no groups
/// when nobody is eligible or the target size is below the minimum.
pub fn generate_groups<R: RandomSource + ?Sized>(
    people: &[Person],
    settings: &GroupSettings,
    rng: &mut R,
) -> Vec<Group> {
    let mut candidates: Vec<Person> = people
        .iter()
        .filter(|p| p.is_eligible())
        .cloned()
        .collect();
    if candidates.is_empty() || settings.people_per_group < MIN_GROUP_SIZE {
        return Vec::new();
    }
    shuffle(&mut *rng, &mut candidates);

    let diversify_family = settings.diversify_family();
    let buckets = split_buckets(candidates, settings.group_by_network);
    let bucket_count = buckets.len();

    let mut next_id = 1;
    let mut groups = Vec::new();
    for bucket in buckets {
        let subsets = if settings.separate_genders {
            let (male, female): (Vec<Person>, Vec<Person>) =
                bucket.into_iter().partition(|p| p.gender == Gender::Male);
            vec![male, female]
        } else {
            vec![bucket]
        };

        for subset in subsets {
            let partitioner = Partitioner::new(subset, settings, diversify_family, &mut *rng);
            groups.extend(partitioner.run(&mut next_id));
        }
    }

    let placed: usize = groups.iter().map(Group::len).sum();
    debug!(
        buckets = bucket_count,
        groups = groups.len(),
        placed,
        "Generated groups"
    );
    groups
}
