//! Dataset and filter selections for an indicator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Scope of user data the query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserQueryCondition {
    /// Query across all users of the selected platforms
    #[default]
    AllUsers,
    /// Restrict the query to the requesting user's own data
    CurrentUser,
}

/// Time window restricting which statements are considered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DurationFilter {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DurationFilter {
    /// Both bounds of the window are set
    pub fn is_set(&self) -> bool {
        self.from.is_some() && self.until.is_some()
    }
}

/// Dataset selection and filters applied before analysis.
///
/// `activities` is keyed by activity-type query id; keys are expected to be
/// drawn from `activity_types`, and `action_on_activities` is only
/// meaningful once `activities` is non-empty. The evaluators tolerate
/// inconsistent combinations and simply report the earliest unmet step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IndicatorQuery {
    pub lrs_stores: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
    pub activity_types: BTreeSet<String>,
    pub activities: BTreeMap<String, Vec<String>>,
    pub action_on_activities: BTreeSet<String>,
    pub duration: DurationFilter,
    pub user_query_condition: UserQueryCondition,
}
