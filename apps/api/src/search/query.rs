//! Query translator — maps a `SearchRequest` onto the provider's
//! query-string dialect.
//!
//! App credentials are attached by the provider client (they are config, not
//! filters); everything else, fixed parameters included, is built here.

use crate::search::filters::{
    self, SearchRequest, DEFAULT_MAX_DAYS_OLD, RESULTS_PER_PAGE, SALARY_CEILING,
};

/// Builds the outbound query parameters for one search.
pub fn build_query(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = vec![
        ("results_per_page", RESULTS_PER_PAGE.to_string()),
        ("content-type", "application/json".to_string()),
    ];

    // Free text: an explicit query wins; otherwise search the whole category.
    if !request.query.is_empty() {
        params.push(("what", request.query.clone()));
    } else if let Some(category) = request.category.as_deref() {
        params.push(("what", filters::category_search_term(category).to_string()));
    }

    if !request.location.is_empty() {
        params.push(("where", request.location.clone()));
    }

    // Unknown category labels are dropped, not errored — the provider
    // rejects unrecognized slugs outright.
    if let Some(slug) = request
        .category
        .as_deref()
        .and_then(filters::category_slug)
    {
        params.push(("category", slug.to_string()));
    }

    // A contract kind populates exactly one of the two provider parameters.
    if let Some(contract) = request.contract_type.as_deref() {
        if filters::is_time_based_contract(contract) {
            let flag = if contract == "full_time" { "1" } else { "0" };
            params.push(("full_time", flag.to_string()));
        } else if filters::is_kind_based_contract(contract) {
            params.push(("contract_type", contract.to_string()));
        }
    }

    if let Some(level) = request.experience_level.as_deref() {
        params.push((
            "experience_level",
            filters::experience_level_param(level).to_string(),
        ));
    }

    if let Some(work) = request.work_type.as_deref() {
        params.push(("work_type", filters::work_type_param(work).to_string()));
    }

    // Salary parameters only when the caller deviated from the full-range
    // default. Both bounds are clamped and always sent together.
    if request.salary_min > 0 || request.salary_max < SALARY_CEILING {
        let max = request.salary_max.min(SALARY_CEILING);
        let min = request.salary_min.min(max);
        params.push(("salary_min", min.to_string()));
        params.push(("salary_max", max.to_string()));
    }

    // The provider's dedicated company match is overly strict on its own;
    // what_and widens it into title/description text.
    if let Some(company) = request.company.as_deref() {
        if !company.is_empty() {
            params.push(("company", company.to_string()));
            params.push(("what_and", company.to_string()));
        }
    }

    if request.max_days_old > 0 && request.max_days_old != DEFAULT_MAX_DAYS_OLD {
        params.push(("max_days_old", request.max_days_old.to_string()));
    }

    params.push(("sort_by", filters::sort_param(&request.sort_by).to_string()));

    params
}
