//! Server-side aggregation pipelines for report statistics.
//!
//! Both pipelines run entirely in the store: group by key, count, sort by
//! count descending, limit, project. Ties keep the store's native order.

use csp_scout_core::report::{TOP_DIRECTIVES_LIMIT, TOP_IPS_LIMIT};
use mongodb::bson::{doc, Document};

/// Stored path of the client IP field.
pub const CLIENT_IP_PATH: &str = "report.clientip";
/// Stored path of the violated directive field.
pub const VIOLATED_DIRECTIVE_PATH: &str = "report.violateddirective";
/// Stored path of the report time field.
pub const REPORT_TIME_PATH: &str = "report.reporttime";
/// Stored path of the user agent field.
pub const USER_AGENT_PATH: &str = "report.useragent";

/// Build a `group → sort → limit → project` top-K pipeline.
///
/// `field` is the stored path to group on; `output_key` is the name the
/// group key is projected to.
pub fn top_k(field: &str, output_key: &str, limit: i64) -> Vec<Document> {
    let mut project = doc! { "count": 1, "_id": 0 };
    project.insert(output_key, "$_id");

    vec![
        doc! { "$group": { "_id": format!("${field}"), "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": limit },
        doc! { "$project": project },
    ]
}

pub fn top_ips() -> Vec<Document> {
    top_k(CLIENT_IP_PATH, "ip", TOP_IPS_LIMIT)
}

pub fn top_violated_directives() -> Vec<Document> {
    top_k(VIOLATED_DIRECTIVE_PATH, "directive", TOP_DIRECTIVES_LIMIT)
}
