use std::collections::HashMap;

use crate::catalog::{Asset, Catalog};

use super::{Finding, FindingKind, RuleId, Severity, Subject};

/// Tables whose primary download url was already listed by an earlier table.
/// The first game to list a url owns it; later tables are flagged.
pub fn shared_download_urls(catalog: &Catalog) -> Vec<Finding> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut findings = Vec::new();

    for game in &catalog.games {
        for (index, table) in game.tables().iter().enumerate() {
            let Some(primary) = table.urls().and_then(<[_]>::first) else {
                continue;
            };
            match owners.get(primary.url.as_str()) {
                Some(first_game) => findings.push(Finding::new(
                    RuleId::SharedDownloadUrl,
                    Severity::Warning,
                    Subject::asset(game, table, index),
                    FindingKind::SharedUrl {
                        url: primary.url.clone(),
                        first_game: first_game.to_string(),
                    },
                )),
                None => {
                    owners.insert(primary.url.as_str(), game.name.as_str());
                }
            }
        }
    }
    findings
}
