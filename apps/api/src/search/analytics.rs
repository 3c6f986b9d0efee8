//! Page-scoped analytics — facet counts over the jobs visible on the current
//! page only, NOT the full matching set. A deliberate simplification:
//! population-wide facet counts would need a second upstream call with
//! aggregation support.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::search::normalize::JobRecord;

/// Facet counts for the current page. Wire names match the UI contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAnalytics {
    pub categories: BTreeMap<String, u32>,
    #[serde(rename = "experienceLevels")]
    pub experience_levels: BTreeMap<String, u32>,
    #[serde(rename = "workTypes")]
    pub work_types: BTreeMap<String, u32>,
    #[serde(rename = "contractTypes")]
    pub contract_types: BTreeMap<String, u32>,
}

/// Tallies one count per non-null facet value observed on the page.
pub fn aggregate(jobs: &[JobRecord]) -> FilterAnalytics {
    let mut analytics = FilterAnalytics::default();
    for job in jobs {
        tally(&mut analytics.categories, job.category.as_deref());
        tally(&mut analytics.experience_levels, job.experience_level.as_deref());
        tally(&mut analytics.work_types, job.work_type.as_deref());
        tally(&mut analytics.contract_types, job.contract_type.as_deref());
    }
    analytics
}

fn tally(counts: &mut BTreeMap<String, u32>, value: Option<&str>) {
    if let Some(value) = value {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(category: Option<&str>, level: Option<&str>, work: Option<&str>) -> JobRecord {
        JobRecord {
            id: String::new(),
            title: String::new(),
            company: String::new(),
            location: String::new(),
            job_type: String::new(),
            description: String::new(),
            posted_at: None,
            url: String::new(),
            salary: None,
            salary_min: None,
            salary_max: None,
            salary_is_predicted: false,
            category: category.map(String::from),
            contract_type: None,
            experience_level: level.map(String::from),
            work_type: work.map(String::from),
        }
    }

    #[test]
    fn test_counts_each_observed_facet_value() {
        let jobs = vec![
            job(Some("IT Jobs"), Some("senior"), Some("remote")),
            job(Some("IT Jobs"), Some("mid"), Some("remote")),
            job(Some("Sales Jobs"), None, Some("onsite")),
        ];
        let analytics = aggregate(&jobs);
        assert_eq!(analytics.categories["IT Jobs"], 2);
        assert_eq!(analytics.categories["Sales Jobs"], 1);
        assert_eq!(analytics.experience_levels["senior"], 1);
        assert_eq!(analytics.experience_levels["mid"], 1);
        assert_eq!(analytics.work_types["remote"], 2);
    }

    #[test]
    fn test_null_facets_are_skipped_not_counted() {
        let jobs = vec![job(None, None, None)];
        let analytics = aggregate(&jobs);
        assert!(analytics.categories.is_empty());
        assert!(analytics.experience_levels.is_empty());
        assert!(analytics.work_types.is_empty());
        assert!(analytics.contract_types.is_empty());
    }

    #[test]
    fn test_empty_page_produces_empty_maps() {
        assert_eq!(aggregate(&[]), FilterAnalytics::default());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let value = serde_json::to_value(FilterAnalytics::default()).unwrap();
        assert!(value.get("categories").is_some());
        assert!(value.get("experienceLevels").is_some());
        assert!(value.get("workTypes").is_some());
        assert!(value.get("contractTypes").is_some());
    }
}
