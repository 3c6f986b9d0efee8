// Job Search pipeline: filter translation, provider call, response
// normalization, page-scoped analytics.
// All outbound provider calls go through the JobProvider trait in provider.rs —
// handlers never touch reqwest directly.

pub mod analytics;
pub mod filters;
pub mod handlers;
pub mod normalize;
pub mod provider;
pub mod query;
