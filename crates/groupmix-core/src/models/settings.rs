use serde::{Deserialize, Serialize};

/// Default number of people per group
pub const DEFAULT_GROUP_SIZE: u32 = 3;

/// Smallest group size a generation run accepts
pub const MIN_GROUP_SIZE: u32 = 2;

/// Constraints for one generation run.
///
/// Every field is required when deserializing: a stored value missing a
/// field, or carrying one with the wrong type, is rejected as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct GroupSettings {
    #[serde(rename = "peoplePerGroup")]
    pub people_per_group: u32,
    #[serde(rename = "separateGenders")]
    pub separate_genders: bool,
    #[serde(rename = "requireLeader")]
    pub require_leader: bool,
    #[serde(rename = "groupByNetwork")]
    pub group_by_network: bool,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            people_per_group: DEFAULT_GROUP_SIZE,
            separate_genders: false,
            require_leader: false,
            group_by_network: false,
        }
    }
}

impl GroupSettings {
    /// Family diversification only applies when buckets don't already
    /// segregate people by family.
    pub fn diversify_family(&self) -> bool {
        !self.group_by_network
    }

    /// Target capacity as a `usize` for comparisons against group lengths
    pub fn target_size(&self) -> usize {
        self.people_per_group as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = GroupSettings::default();
        assert_eq!(settings.people_per_group, 3);
        assert!(!settings.separate_genders);
        assert!(!settings.require_leader);
        assert!(!settings.group_by_network);
        assert!(settings.diversify_family());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = GroupSettings {
            people_per_group: 5,
            separate_genders: true,
            require_leader: true,
            group_by_network: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: GroupSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_settings_missing_field_rejected() {
        let json = r#"{"peoplePerGroup":4,"separateGenders":true,"requireLeader":false}"#;
        assert!(serde_json::from_str::<GroupSettings>(json).is_err());
    }

    #[test]
    fn test_settings_wrong_type_rejected() {
        let json = r#"{"peoplePerGroup":"4","separateGenders":true,"requireLeader":false,"groupByNetwork":false}"#;
        assert!(serde_json::from_str::<GroupSettings>(json).is_err());

        let json = r#"{"peoplePerGroup":4,"separateGenders":1,"requireLeader":false,"groupByNetwork":false}"#;
        assert!(serde_json::from_str::<GroupSettings>(json).is_err());
    }
}
