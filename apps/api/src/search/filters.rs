//! Search filters — the caller-facing filter set and the static tables that
//! map it onto the provider's vocabulary.
//!
//! The tables are immutable lookups, not conditional chains: adding a category
//! or experience level is a one-line change.

use serde::{Deserialize, Serialize};

/// Fixed page size for every provider call.
pub const RESULTS_PER_PAGE: u32 = 20;
/// Upper bound of the salary slider; doubles as the "no maximum" sentinel.
pub const SALARY_CEILING: u32 = 500_000;
/// Default posting recency window in days.
pub const DEFAULT_MAX_DAYS_OLD: u32 = 30;

/// Caller-facing search filters. Serde defaults mirror the UI's initial
/// state, so a partial JSON body deserializes to a full-range search.
///
/// `salary_min <= salary_max` is not enforced here — the query translator
/// clamps defensively instead of rejecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub salary_min: u32,
    #[serde(default = "default_salary_max")]
    pub salary_max: u32,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "default_max_days_old")]
    pub max_days_old: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            page: default_page(),
            category: None,
            contract_type: None,
            salary_min: 0,
            salary_max: default_salary_max(),
            company: None,
            max_days_old: default_max_days_old(),
            sort_by: default_sort_by(),
            experience_level: None,
            work_type: None,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_salary_max() -> u32 {
    SALARY_CEILING
}

fn default_max_days_old() -> u32 {
    DEFAULT_MAX_DAYS_OLD
}

fn default_sort_by() -> String {
    "date".to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Static provider vocabulary tables
// ────────────────────────────────────────────────────────────────────────────

/// Category label → provider category slug. Unknown labels are omitted from
/// the outbound query rather than rejected.
const CATEGORY_SLUGS: &[(&str, &str)] = &[
    ("IT Jobs", "it-jobs"),
    ("Engineering Jobs", "engineering-jobs"),
    ("Healthcare & Nursing Jobs", "healthcare-nursing-jobs"),
    ("Sales Jobs", "sales-jobs"),
    ("Accounting & Finance Jobs", "accounting-finance-jobs"),
    ("Teaching Jobs", "teaching-jobs"),
    ("Admin Jobs", "admin-jobs"),
    ("Marketing Jobs", "marketing-jobs"),
    ("Scientific & QA Jobs", "scientific-qa-jobs"),
];

/// Experience level → provider parameter value. Unrecognized values pass
/// through unchanged (forward-compatible with new provider levels).
const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("entry", "entry_level"),
    ("mid", "mid_level"),
    ("senior", "senior_level"),
    ("lead", "lead"),
    ("manager", "manager"),
    ("director", "director"),
    ("executive", "executive"),
];

/// Work type → provider parameter value. Same passthrough policy as
/// experience levels.
const WORK_TYPES: &[(&str, &str)] = &[
    ("remote", "remote"),
    ("hybrid", "hybrid"),
    ("onsite", "onsite"),
    ("flexible", "flexible"),
];

const SORT_OPTIONS: &[&str] = &["date", "salary", "relevance"];

/// Contract kinds expressed through the provider's boolean `full_time` flag.
const TIME_BASED_CONTRACTS: &[&str] = &["full_time", "part_time"];
/// Contract kinds expressed through the provider's `contract_type` parameter.
const KIND_BASED_CONTRACTS: &[&str] = &["permanent", "contract", "temporary", "internship"];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn category_slug(label: &str) -> Option<&'static str> {
    lookup(CATEGORY_SLUGS, label)
}

pub fn experience_level_param<'a>(value: &'a str) -> &'a str {
    lookup(EXPERIENCE_LEVELS, value).unwrap_or(value)
}

pub fn work_type_param<'a>(value: &'a str) -> &'a str {
    lookup(WORK_TYPES, value).unwrap_or(value)
}

/// Unrecognized sort values fall back to `date` rather than passing through:
/// the provider rejects unknown sort keys.
pub fn sort_param(value: &str) -> &'static str {
    SORT_OPTIONS
        .iter()
        .find(|&&option| option == value)
        .copied()
        .unwrap_or("date")
}

pub fn is_time_based_contract(value: &str) -> bool {
    TIME_BASED_CONTRACTS.contains(&value)
}

pub fn is_kind_based_contract(value: &str) -> bool {
    KIND_BASED_CONTRACTS.contains(&value)
}

/// Derives a free-text search term from a category label by stripping the
/// fixed " Jobs" suffix ("IT Jobs" → "IT").
pub fn category_search_term(label: &str) -> &str {
    label.strip_suffix(" Jobs").unwrap_or(label)
}
