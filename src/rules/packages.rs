use crate::catalog::{Asset, Catalog};

use super::{Finding, FindingKind, RuleId, Severity, Subject};

/// Pup-packs without an id cannot be linked from generated pages.
pub fn orphaned_pup_packs(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &catalog.games {
        for (index, pack) in game.pup_packs().iter().enumerate() {
            if pack.id().is_none() {
                findings.push(Finding::new(
                    RuleId::OrphanedPupPacks,
                    Severity::Error,
                    Subject::asset(game, pack, index),
                    FindingKind::MissingId,
                ));
            }
        }
    }
    findings
}
