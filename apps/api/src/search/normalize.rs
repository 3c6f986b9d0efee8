//! Response normalizer — flattens raw provider records into the canonical,
//! provider-agnostic job shape with explicit per-field fallbacks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::filters::{SearchRequest, RESULTS_PER_PAGE};
use crate::search::provider::{RawJob, RawSearchResponse};

const COMPANY_FALLBACK: &str = "Company Not Listed";
const LOCATION_FALLBACK: &str = "Location Not Specified";
const TYPE_FALLBACK: &str = "Not Specified";

/// Canonical job record returned to callers. Constructed fresh per response,
/// never persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub url: String,
    /// Display string, e.g. `"$90,000 - $110,000/year"`. `None` means the UI
    /// renders no salary badge at all.
    pub salary: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_is_predicted: bool,
    pub category: Option<String>,
    pub contract_type: Option<String>,
    pub experience_level: Option<String>,
    pub work_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_results: u64,
    pub results_per_page: u32,
}

impl PaginationInfo {
    pub fn for_page(current_page: u32, total_results: u64) -> Self {
        Self {
            current_page,
            total_pages: total_results.div_ceil(u64::from(RESULTS_PER_PAGE)),
            total_results,
            results_per_page: RESULTS_PER_PAGE,
        }
    }

    /// The defaults rendered inside an error envelope, letting callers paint
    /// a "no results" state without special-casing the failure.
    pub fn empty() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_results: 0,
            results_per_page: RESULTS_PER_PAGE,
        }
    }
}

/// Normalizes a full provider page against the request that produced it.
/// The request's filters double as fallbacks for facet fields the provider
/// left off a record.
pub fn normalize_results(response: &RawSearchResponse, request: &SearchRequest) -> Vec<JobRecord> {
    response
        .results
        .iter()
        .map(|raw| normalize_job(raw, request))
        .collect()
}

fn normalize_job(raw: &RawJob, request: &SearchRequest) -> JobRecord {
    // Location: area path join → display name → placeholder.
    let location = raw
        .location
        .as_ref()
        .and_then(|loc| {
            loc.area
                .as_ref()
                .filter(|area| !area.is_empty())
                .map(|area| area.join(", "))
                .or_else(|| loc.display_name.clone().filter(|name| !name.is_empty()))
        })
        .unwrap_or_else(|| LOCATION_FALLBACK.to_string());

    JobRecord {
        id: raw.id.as_ref().map(id_string).unwrap_or_default(),
        title: raw.title.clone().unwrap_or_default(),
        company: raw
            .company
            .as_ref()
            .and_then(|company| company.display_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| COMPANY_FALLBACK.to_string()),
        location,
        job_type: raw
            .contract_time
            .clone()
            .or_else(|| raw.contract_type.clone())
            .unwrap_or_else(|| TYPE_FALLBACK.to_string()),
        description: raw.description.clone().unwrap_or_default(),
        posted_at: raw.created.as_deref().and_then(parse_posted_at),
        url: raw.redirect_url.clone().unwrap_or_default(),
        salary: salary_display(raw.salary_min, raw.salary_max, raw.salary_is_predicted),
        salary_min: raw.salary_min,
        salary_max: raw.salary_max,
        salary_is_predicted: raw.salary_is_predicted,
        category: raw
            .category
            .as_ref()
            .and_then(|category| category.label.clone())
            .or_else(|| request.category.clone()),
        contract_type: raw
            .contract_type
            .clone()
            .or_else(|| request.contract_type.clone()),
        experience_level: raw
            .experience_level
            .clone()
            .or_else(|| request.experience_level.clone()),
        work_type: raw.work_type.clone().or_else(|| request.work_type.clone()),
    }
}

fn id_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lenient timestamp parse — an unparseable `created` field drops the
/// timestamp rather than the record.
fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats the salary badge. Both bounds → a range; a predicted figure → an
/// "Est." single value; neither → no badge. Zero bounds count as absent.
pub fn salary_display(min: Option<f64>, max: Option<f64>, predicted: bool) -> Option<String> {
    let min = min.filter(|v| *v > 0.0);
    let max = max.filter(|v| *v > 0.0);

    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "${} - ${}/year",
            format_usd(min),
            format_usd(max)
        )),
        _ => {
            let figure = min.or(max)?;
            predicted.then(|| format!("Est. ${}/year", format_usd(figure)))
        }
    }
}

/// Rounds to whole dollars and inserts thousands separators.
fn format_usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
