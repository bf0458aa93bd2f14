use crate::catalog::Catalog;

use super::{Finding, FindingKind, RuleId, Severity, Subject};

/// Games with no year, or the placeholder year 0.
pub fn missing_year(catalog: &Catalog) -> Vec<Finding> {
    catalog
        .games
        .iter()
        .filter(|game| matches!(game.year.as_option(), None | Some(0)))
        .map(|game| {
            Finding::new(
                RuleId::MissingYear,
                Severity::Warning,
                Subject::game(game),
                FindingKind::MissingYear,
            )
        })
        .collect()
}

pub fn missing_theme(catalog: &Catalog) -> Vec<Finding> {
    catalog
        .games
        .iter()
        .filter(|game| game.theme.as_option().map_or(true, |theme| theme.is_empty()))
        .map(|game| {
            Finding::new(
                RuleId::MissingTheme,
                Severity::Warning,
                Subject::game(game),
                FindingKind::MissingTheme,
            )
        })
        .collect()
}
