use serde::{Deserialize, Serialize};

use super::{Gender, Person};

/// One generated group. Member order is assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Group {
    pub id: u32,
    pub members: Vec<Person>,
}

impl Group {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn has_leader(&self) -> bool {
        self.members.iter().any(|m| m.is_leader)
    }

    pub fn leader_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_leader).count()
    }

    pub fn count_gender(&self, gender: Gender) -> usize {
        self.members.iter().filter(|m| m.gender == gender).count()
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.members.iter().any(|m| m.id == person_id)
    }
}
