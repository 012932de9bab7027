//! CSP violation report model.
//!
//! Field names are lowercase with no separators, identical in the JSON wire
//! form and in the stored documents.

use serde::{Deserialize, Serialize};

use crate::types::{deserialize_optional_id, ReportId, UnixSeconds};

/// Number of entries returned by the top client IPs aggregation.
pub const TOP_IPS_LIMIT: i64 = 20;
/// Number of entries returned by the top violated directives aggregation.
pub const TOP_DIRECTIVES_LIMIT: i64 = 10;

/// Entity name used in not-found errors.
pub const REPORT_ENTITY: &str = "report";

/// The violation event as sent by the browser, plus collector metadata.
///
/// Every field is always serialized; missing input fields default to `""`
/// or `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportData {
    #[serde(rename = "documenturi")]
    pub document_uri: String,
    pub referrer: String,
    #[serde(rename = "violateddirective")]
    pub violated_directive: String,
    #[serde(rename = "effectivedirective")]
    pub effective_directive: String,
    /// Full policy header text. Never logged.
    #[serde(rename = "originalpolicy")]
    pub original_policy: String,
    /// `enforce` or `report`.
    pub disposition: String,
    #[serde(rename = "blockeduri")]
    pub blocked_uri: String,
    #[serde(rename = "linenumber")]
    pub line_number: u32,
    #[serde(rename = "sourcefile")]
    pub source_file: String,
    #[serde(rename = "statuscode")]
    pub status_code: i32,
    /// May contain page internals. Never logged.
    #[serde(rename = "scriptsample")]
    pub script_sample: String,
    #[serde(rename = "clientip")]
    pub client_ip: String,
    #[serde(rename = "useragent")]
    pub user_agent: String,
    #[serde(rename = "reporttime")]
    pub report_time: UnixSeconds,
}

/// One persisted violation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: ReportId,
    #[serde(default)]
    pub report: ReportData,
}

/// Body of a create request. The id is optional; the store assigns one when
/// it is missing or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewReport {
    #[serde(rename = "_id", default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<ReportId>,
    #[serde(default)]
    pub report: ReportData,
}

impl NewReport {
    /// Finalize into a [`Report`], generating an id only when none was given.
    pub fn into_report(self, generate: impl FnOnce() -> ReportId) -> Report {
        Report {
            id: self.id.unwrap_or_else(generate),
            report: self.report,
        }
    }
}

/// One row of the top client IPs aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopIpResult {
    pub ip: String,
    pub count: u64,
}

/// One row of the top violated directives aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopDirectiveResult {
    pub directive: String,
    pub count: u64,
}
