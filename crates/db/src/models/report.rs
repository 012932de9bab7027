//! Stored document shapes for the reports collection.

use csp_scout_core::report::{Report, ReportData, TopDirectiveResult, TopIpResult};
use csp_scout_core::types::ReportId;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A document in the reports collection.
///
/// Same shape as the wire [`Report`], except the id is a native BSON
/// `ObjectId` rather than a hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub report: ReportData,
}

impl From<Report> for ReportDocument {
    fn from(report: Report) -> Self {
        Self {
            id: ObjectId::from_bytes(report.id.bytes()),
            report: report.report,
        }
    }
}

impl From<ReportDocument> for Report {
    fn from(doc: ReportDocument) -> Self {
        Self {
            id: ReportId::from_bytes(doc.id.bytes()),
            report: doc.report,
        }
    }
}

/// Fresh identifier in the store's native layout.
pub fn generate_id() -> ReportId {
    ReportId::from_bytes(ObjectId::new().bytes())
}

/// Output row of the top client IPs pipeline. Documents without a client IP
/// group under `null`.
#[derive(Debug, Deserialize)]
pub struct TopIpRow {
    pub ip: Option<String>,
    pub count: u64,
}

impl From<TopIpRow> for TopIpResult {
    fn from(row: TopIpRow) -> Self {
        Self {
            ip: row.ip.unwrap_or_default(),
            count: row.count,
        }
    }
}

/// Output row of the top violated directives pipeline.
#[derive(Debug, Deserialize)]
pub struct TopDirectiveRow {
    pub directive: Option<String>,
    pub count: u64,
}

impl From<TopDirectiveRow> for TopDirectiveResult {
    fn from(row: TopDirectiveRow) -> Self {
        Self {
            directive: row.directive.unwrap_or_default(),
            count: row.count,
        }
    }
}
