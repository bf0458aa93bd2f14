use crate::catalog::{Asset, Catalog};

use super::{AssetRef, Finding, FindingKind, RuleId, Severity, Subject};

pub const MOD_FEATURE: &str = "MOD";
pub const RETHEME_FEATURE: &str = "Retheme";

/// Comment keywords that mark a table as a retheme.
const RETHEME_MARKERS: &[&str] = &["Retheme", "Reskin"];

/// Strip `redundant` tags from every table's feature set, whether or not the
/// game has the assets the tags point at. One finding per removed tag.
pub fn remove_redundant_feature_tags(catalog: &mut Catalog, redundant: &[String]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &mut catalog.games {
        let subject = Subject::game(game);
        for (index, table) in game.tables_mut().iter_mut().enumerate() {
            let asset = AssetRef::of(&*table, index);
            let Some(features) = table.features.as_mut() else {
                continue;
            };
            for tag in redundant {
                if features.remove(tag) {
                    findings.push(Finding::new(
                        RuleId::RedundantFeatureTags,
                        Severity::Info,
                        subject.clone().with_asset(asset.clone()),
                        FindingKind::RemovedTag { tag: tag.clone() },
                    ));
                }
            }
        }
    }
    findings
}

/// Tables credited to more than one author that lack the MOD feature.
pub fn missing_mod_tag(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &catalog.games {
        for (index, table) in game.tables().iter().enumerate() {
            let tagged = table
                .features
                .as_option()
                .is_some_and(|features| features.contains(MOD_FEATURE));
            if table.authors.len() > 1 && !tagged {
                findings.push(Finding::new(
                    RuleId::MissingModTag,
                    Severity::Warning,
                    Subject::asset(game, table, index),
                    FindingKind::MissingFeature {
                        feature: MOD_FEATURE,
                    },
                ));
            }
        }
    }
    findings
}

/// Tables whose comment calls them a retheme or reskin but lack the Retheme
/// feature.
pub fn missing_retheme_tag(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &catalog.games {
        for (index, table) in game.tables().iter().enumerate() {
            let Some(comment) = table.comment() else {
                continue;
            };
            if !RETHEME_MARKERS.iter().any(|marker| comment.contains(marker)) {
                continue;
            }
            let tagged = table
                .features
                .as_option()
                .is_some_and(|features| features.contains(RETHEME_FEATURE));
            if !tagged {
                findings.push(Finding::new(
                    RuleId::MissingRethemeTag,
                    Severity::Warning,
                    Subject::asset(game, table, index),
                    FindingKind::MissingFeature {
                        feature: RETHEME_FEATURE,
                    },
                ));
            }
        }
    }
    findings
}
