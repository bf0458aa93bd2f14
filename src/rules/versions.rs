use crate::catalog::{Asset, Catalog};

use super::{Finding, FindingKind, RuleId, RuleSettings, Severity, Subject};

/// Tables without a version, unless an exempt author (a commercial publisher)
/// is credited.
pub fn missing_table_version(catalog: &Catalog, settings: &RuleSettings) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &catalog.games {
        for (index, table) in game.tables().iter().enumerate() {
            if table.version().is_none() && !settings.is_exempt(table) {
                findings.push(Finding::new(
                    RuleId::MissingTableVersion,
                    Severity::Warning,
                    Subject::asset(game, table, index),
                    FindingKind::MissingVersion,
                ));
            }
        }
    }
    findings
}

/// Like [`missing_table_version`] for backglasses, restricted to ones that
/// have at least one download link.
pub fn missing_backglass_version(catalog: &Catalog, settings: &RuleSettings) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &catalog.games {
        for (index, b2s) in game.backglasses().iter().enumerate() {
            let downloadable = b2s.urls().is_some_and(|urls| !urls.is_empty());
            if b2s.version().is_none() && downloadable && !settings.is_exempt(b2s) {
                findings.push(Finding::new(
                    RuleId::MissingBackglassVersion,
                    Severity::Warning,
                    Subject::asset(game, b2s, index),
                    FindingKind::MissingVersion,
                ));
            }
        }
    }
    findings
}
