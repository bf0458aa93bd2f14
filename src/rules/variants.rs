//! Derived-variant inference between tables of one game.
//!
//! Authors are listed newest contributor first, so a table whose authors are
//! `[Bob, Alice]` is taken to build on the table credited to `[Alice]`. The
//! match is on author lists only: two unrelated tables that happen to share an
//! author suffix are reported as well.

use crate::catalog::{Catalog, Game, Table};

use super::{Finding, FindingKind, RuleId, Severity, Subject};

pub fn derived_variants(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();
    for game in &catalog.games {
        let tables = game.tables();
        for (index, table) in tables.iter().enumerate() {
            scan_table(game, tables, index, table, &mut findings);
        }
    }
    findings
}

/// Drop leading authors of `table` one at a time and look for a table in the
/// game credited to exactly the remaining authors. The remainder is never
/// empty: a table with no authors has no lead author for the variant to build
/// on, so it is never a base.
fn scan_table(
    game: &Game,
    tables: &[Table],
    index: usize,
    table: &Table,
    findings: &mut Vec<Finding>,
) {
    let authors = table.authors.as_slice();
    for dropped in 1..authors.len() {
        let remaining = &authors[dropped..];
        for base in tables.iter().filter(|other| other.authors.as_slice() == remaining) {
            findings.push(Finding::new(
                RuleId::DerivedVariants,
                Severity::Info,
                Subject::asset(game, table, index),
                FindingKind::DerivedVariant {
                    base_table: base.id.clone(),
                    contributed_by: authors[..dropped].to_vec(),
                },
            ));

            if let Some(tags) = missing_tags(table, base) {
                findings.push(Finding::new(
                    RuleId::DerivedVariants,
                    Severity::Warning,
                    Subject::asset(game, table, index),
                    FindingKind::MissingTags {
                        base_table: base.id.clone(),
                        tags,
                    },
                ));
            }
        }
    }
}

/// Tags `base` carries beyond `table`, when `table` has fewer of them.
fn missing_tags(table: &Table, base: &Table) -> Option<Vec<String>> {
    let mine = table.features.as_option()?;
    let theirs = base.features.as_option()?;
    if mine.len() >= theirs.len() {
        return None;
    }
    Some(theirs.difference(mine).into_iter().map(str::to_string).collect())
}
