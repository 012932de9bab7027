//! Listing filters and pagination for report queries.

use std::fmt;

use crate::error::CoreError;
use crate::report::ReportData;
use crate::types::UnixSeconds;

/// Upper bound for a client-supplied page size.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Clamp a user-provided limit to `[1, max]`.
pub fn clamp_limit(limit: i64, max: i64) -> i64 {
    limit.max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Optional window over a listing. The default returns everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: u64,
}

impl Page {
    pub fn from_params(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.map(|l| clamp_limit(l, MAX_PAGE_LIMIT)),
            offset: clamp_offset(offset) as u64,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit.is_none() && self.offset == 0
    }

    /// Apply the window to an already-ordered sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(self.offset as usize);
        match self.limit {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}

/// Which reports a listing should return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFilter {
    #[default]
    All,
    /// `reporttime` strictly less than the bound.
    ReportedBefore(UnixSeconds),
    /// `reporttime` strictly greater than the bound.
    ReportedAfter(UnixSeconds),
    /// Exact `useragent` match.
    UserAgent(String),
}

impl ReportFilter {
    /// Build a filter from optional query parameters. At most one may be set.
    pub fn from_params(
        before: Option<UnixSeconds>,
        after: Option<UnixSeconds>,
        user_agent: Option<String>,
    ) -> Result<Self, CoreError> {
        match (before, after, user_agent) {
            (None, None, None) => Ok(Self::All),
            (Some(t), None, None) => Ok(Self::ReportedBefore(t)),
            (None, Some(t), None) => Ok(Self::ReportedAfter(t)),
            (None, None, Some(ua)) => Ok(Self::UserAgent(ua)),
            _ => Err(CoreError::Validation(
                "only one of before, after or user_agent may be given".into(),
            )),
        }
    }

    pub fn matches(&self, report: &ReportData) -> bool {
        match self {
            Self::All => true,
            Self::ReportedBefore(t) => report.report_time < *t,
            Self::ReportedAfter(t) => report.report_time > *t,
            Self::UserAgent(ua) => report.user_agent == *ua,
        }
    }
}

/// Log-safe rendering: user-agent values are reduced to their length.
impl fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("{}"),
            Self::ReportedBefore(t) => write!(f, "report.reporttime < {t}"),
            Self::ReportedAfter(t) => write!(f, "report.reporttime > {t}"),
            Self::UserAgent(ua) => write!(f, "report.useragent = <redacted, {} chars>", ua.len()),
        }
    }
}
