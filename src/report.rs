//! Text rendering of rule findings. One line per finding plus a summary.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};

use crate::rules::{Finding, FindingKind, RuleReport, Severity, Subject};

/// `YYYY-MM-DD` for an epoch-milliseconds timestamp.
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|at| at.format("%Y-%m-%d").to_string())
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.game_name, self.game_id)?;
        let Some(asset) = &self.asset else {
            return Ok(());
        };
        match &asset.id {
            Some(id) => write!(f, " / {} '{}'", asset.kind, id)?,
            None => write!(f, " / {} #{}", asset.kind, asset.index)?,
        }
        if let Some(updated) = asset.updated_at.and_then(format_timestamp) {
            write!(f, " [updated {updated}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVersion => write!(f, "version missing"),
            Self::RemovedTag { tag } => write!(f, "removed redundant feature tag '{tag}'"),
            Self::DerivedVariant {
                base_table,
                contributed_by,
            } => write!(
                f,
                "builds on table '{base_table}', contributed by {}",
                contributed_by.join(", ")
            ),
            Self::MissingTags { base_table, tags } => write!(
                f,
                "missing feature tags carried by table '{base_table}': {}",
                tags.join(", ")
            ),
            Self::MissingId => write!(f, "no id"),
            Self::MissingYear => write!(f, "year missing"),
            Self::MissingTheme => write!(f, "theme missing"),
            Self::MissingFeature { feature } => write!(f, "feature '{feature}' missing"),
            Self::SharedUrl { url, first_game } => {
                write!(f, "download url {url} already listed for {first_game}")
            }
        }
    }
}

pub fn render_finding(finding: &Finding) -> String {
    format!(
        "[{}] {}: {}: {}",
        finding.severity, finding.rule, finding.subject, finding.kind
    )
}

pub fn render_summary(report: &RuleReport) -> String {
    format!(
        "{} finding(s): {} error(s), {} warning(s), {} info",
        report.len(),
        report.count(Severity::Error),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    )
}

/// Every finding in report order, then the summary line.
pub fn render_report(report: &RuleReport) -> String {
    let mut out = String::new();
    for finding in &report.findings {
        let _ = writeln!(out, "{}", render_finding(finding));
    }
    let _ = writeln!(out, "{}", render_summary(report));
    out
}
