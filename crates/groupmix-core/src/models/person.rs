use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::Male),
            "F" | "FEMALE" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}', expected M or F", other)),
        }
    }
}

/// A roster entry.
///
/// `family_number` doubles as the network tag: people sharing it are kept
/// together when grouping by network and kept apart otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Person {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    #[serde(rename = "familyNumber", default, skip_serializing_if = "Option::is_none")]
    pub family_number: Option<u32>,
    #[serde(rename = "isLeader", default)]
    pub is_leader: bool,
    #[serde(rename = "isMissing", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_missing: bool,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            family_number: None,
            is_leader: false,
            is_missing: false,
        }
    }

    pub fn with_family(mut self, family_number: u32) -> Self {
        self.family_number = Some(family_number);
        self
    }

    pub fn as_leader(mut self) -> Self {
        self.is_leader = true;
        self
    }

    pub fn as_missing(mut self) -> Self {
        self.is_missing = true;
        self
    }

    /// Whether this person takes part in generation runs
    pub fn is_eligible(&self) -> bool {
        !self.is_missing
    }
}
