use std::collections::HashSet;

use crate::models::{Gender, Group, Person};
use crate::rng::RandomSource;

/// Preferences applied when choosing the next member for a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Reject candidates whose family is already represented in the group
    pub diversify_family: bool,
    /// Prefer people who are not leaders
    pub prefer_non_leader: bool,
    /// Prefer people of this gender
    pub target_gender: Option<Gender>,
}

/// Pick the index in `pool` of the next person to admit into `group`.
///
/// Gender and leadership are soft: a filter that would leave nobody is
/// skipped. Family diversification is hard: when no candidate from a new
/// family is left and the group already holds a family-tagged member,
/// nobody is picked.
pub fn select_candidate<R: RandomSource + ?Sized>(
    pool: &[Person],
    group: &Group,
    options: SelectOptions,
    rng: &mut R,
) -> Option<usize> {
    let mut indices: Vec<usize> = (0..pool.len()).collect();

    if let Some(gender) = options.target_gender {
        narrow_soft(&mut indices, |i| pool[i].gender == gender);
    }

    if options.prefer_non_leader {
        narrow_soft(&mut indices, |i| !pool[i].is_leader);
    }

    if options.diversify_family {
        let families: HashSet<u32> = group
            .members
            .iter()
            .filter_map(|m| m.family_number)
            .collect();
        let diverse: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| pool[i].family_number.map_or(true, |f| !families.contains(&f)))
            .collect();
        if !diverse.is_empty() {
            indices = diverse;
        } else if !families.is_empty() {
            return None;
        }
    }

    if indices.is_empty() {
        None
    } else {
        Some(indices[rng.pick_index(indices.len())])
    }
}

fn narrow_soft(indices: &mut Vec<usize>, keep: impl Fn(usize) -> bool) {
    let narrowed: Vec<usize> = indices.iter().copied().filter(|&i| keep(i)).collect();
    if !narrowed.is_empty() {
        *indices = narrowed;
    }
}
