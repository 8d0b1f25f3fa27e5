use crate::models::{Gender, Group, GroupSettings, Person};
use crate::rng::RandomSource;

use super::selector::{select_candidate, SelectOptions};

/// Fill `groups` from `pool` one member per group per pass.
///
/// Only groups below the target size take part. Stops when the pool runs
/// dry, every group is full, or a whole pass admits nobody.
pub fn fill_round_robin<R: RandomSource + ?Sized>(
    pool: &mut Vec<Person>,
    groups: &mut [Group],
    settings: &GroupSettings,
    diversify_family: bool,
    rng: &mut R,
) {
    let target = settings.target_size();

    while !pool.is_empty() {
        let open: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.len() < target)
            .map(|(i, _)| i)
            .collect();
        if open.is_empty() {
            break;
        }

        let mut placed_any = false;
        for gi in open {
            if pool.is_empty() {
                break;
            }
            let group = &mut groups[gi];
            let target_gender = if settings.separate_genders {
                None
            } else {
                balancing_gender(group, pool)
            };
            let options = SelectOptions {
                diversify_family,
                prefer_non_leader: settings.require_leader && group.has_leader(),
                target_gender,
            };
            if let Some(idx) = select_candidate(pool, group, options, &mut *rng) {
                group.members.push(pool.remove(idx));
                placed_any = true;
            }
        }

        if !placed_any {
            break;
        }
    }
}

/// Gender the group should take next.
///
/// The gender under-represented in the group wins; when the group is
/// balanced, the gender scarcer in the pool goes first so it is spread
/// across groups instead of piling up at the end.
pub fn balancing_gender(group: &Group, pool: &[Person]) -> Option<Gender> {
    let avail_male = pool.iter().filter(|p| p.gender == Gender::Male).count();
    let avail_female = pool.len() - avail_male;

    match (avail_male > 0, avail_female > 0) {
        (true, true) => {
            let males = group.count_gender(Gender::Male);
            let females = group.count_gender(Gender::Female);
            Some(if males < females {
                Gender::Male
            } else if females < males {
                Gender::Female
            } else if avail_male <= avail_female {
                Gender::Male
            } else {
                Gender::Female
            })
        }
        (true, false) => Some(Gender::Male),
        (false, true) => Some(Gender::Female),
        (false, false) => None,
    }
}
