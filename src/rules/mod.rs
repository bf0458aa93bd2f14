//! Consistency rules over a loaded [`Catalog`].
//!
//! Each rule is a function from the catalog to a list of [`Finding`] values.
//! Only [`RuleId::RedundantFeatureTags`] mutates the catalog; its changes are
//! visible to rules run after it. Rendering lives in [`crate::report`].

mod metadata;
mod packages;
mod tags;
mod urls;
mod variants;
mod versions;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Asset, AssetKind, Catalog, Game};

pub use metadata::{missing_theme, missing_year};
pub use packages::orphaned_pup_packs;
pub use tags::{
    missing_mod_tag, missing_retheme_tag, remove_redundant_feature_tags, MOD_FEATURE,
    RETHEME_FEATURE,
};
pub use urls::shared_download_urls;
pub use variants::derived_variants;
pub use versions::{missing_backglass_version, missing_table_version};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    MissingTableVersion,
    MissingBackglassVersion,
    RedundantFeatureTags,
    DerivedVariants,
    OrphanedPupPacks,
    MissingYear,
    MissingTheme,
    MissingModTag,
    MissingRethemeTag,
    SharedDownloadUrl,
}

impl RuleId {
    /// Default run order.
    pub const ALL: [RuleId; 10] = [
        Self::MissingTableVersion,
        Self::MissingBackglassVersion,
        Self::RedundantFeatureTags,
        Self::DerivedVariants,
        Self::OrphanedPupPacks,
        Self::MissingYear,
        Self::MissingTheme,
        Self::MissingModTag,
        Self::MissingRethemeTag,
        Self::SharedDownloadUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTableVersion => "missing-table-version",
            Self::MissingBackglassVersion => "missing-backglass-version",
            Self::RedundantFeatureTags => "redundant-feature-tags",
            Self::DerivedVariants => "derived-variants",
            Self::OrphanedPupPacks => "orphaned-pup-packs",
            Self::MissingYear => "missing-year",
            Self::MissingTheme => "missing-theme",
            Self::MissingModTag => "missing-mod-tag",
            Self::MissingRethemeTag => "missing-retheme-tag",
            Self::SharedDownloadUrl => "shared-download-url",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingTableVersion => "table without a version (exempt authors skipped)",
            Self::MissingBackglassVersion => {
                "downloadable backglass without a version (exempt authors skipped)"
            }
            Self::RedundantFeatureTags => "remove redundant feature tags from tables",
            Self::DerivedVariants => "tables whose authors extend another table's authors",
            Self::OrphanedPupPacks => "pup-pack without an id",
            Self::MissingYear => "game without a year",
            Self::MissingTheme => "game without a theme",
            Self::MissingModTag => "multi-author table not tagged MOD",
            Self::MissingRethemeTag => "retheme/reskin table not tagged Retheme",
            Self::SharedDownloadUrl => "table download url already used by another table",
        }
    }

    /// Whether the rule edits the catalog.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::RedundantFeatureTags)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule '{0}'")]
pub struct UnknownRule(pub String);

impl FromStr for RuleId {
    type Err = UnknownRule;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == wanted)
            .ok_or_else(|| UnknownRule(raw.to_string()))
    }
}

/// Tunables shared by the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    /// Authors whose releases are never expected to carry a version.
    pub exempt_authors: Vec<String>,
    /// Feature tags removed from every table by the cleanup rule.
    pub redundant_feature_tags: Vec<String>,
}

pub const DEFAULT_EXEMPT_AUTHORS: &[&str] = &["Zen Studios"];
pub const DEFAULT_REDUNDANT_FEATURE_TAGS: &[&str] =
    &["incl. B2S", "incl. Art", "includes backglass", "includes art"];

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            exempt_authors: DEFAULT_EXEMPT_AUTHORS.iter().map(|s| s.to_string()).collect(),
            redundant_feature_tags: DEFAULT_REDUNDANT_FEATURE_TAGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RuleSettings {
    pub fn is_exempt(&self, asset: &dyn Asset) -> bool {
        self.exempt_authors
            .iter()
            .any(|author| asset.has_author(author))
    }
}

/// Position of an asset inside its game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub kind: AssetKind,
    pub id: Option<String>,
    pub index: usize,
    pub updated_at: Option<i64>,
}

impl AssetRef {
    pub fn of(asset: &dyn Asset, index: usize) -> Self {
        Self {
            kind: asset.kind(),
            id: asset.id().map(str::to_string),
            index,
            updated_at: asset.updated_at(),
        }
    }
}

/// The entity a finding is about: a game, or one asset of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub game_id: String,
    pub game_name: String,
    pub asset: Option<AssetRef>,
}

impl Subject {
    pub fn game(game: &Game) -> Self {
        Self {
            game_id: game.id.clone(),
            game_name: game.name.clone(),
            asset: None,
        }
    }

    pub fn asset(game: &Game, asset: &dyn Asset, index: usize) -> Self {
        Self::game(game).with_asset(AssetRef::of(asset, index))
    }

    pub fn with_asset(mut self, asset: AssetRef) -> Self {
        self.asset = Some(asset);
        self
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.asset.as_ref().and_then(|asset| asset.id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    MissingVersion,
    RemovedTag {
        tag: String,
    },
    /// The subject table's authors are `contributed_by` followed by the
    /// authors of `base_table`.
    DerivedVariant {
        base_table: String,
        contributed_by: Vec<String>,
    },
    /// The subject table carries fewer feature tags than its `base_table`.
    MissingTags {
        base_table: String,
        tags: Vec<String>,
    },
    MissingId,
    MissingYear,
    MissingTheme,
    MissingFeature {
        feature: &'static str,
    },
    SharedUrl {
        url: String,
        first_game: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: RuleId,
    pub severity: Severity,
    pub subject: Subject,
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(rule: RuleId, severity: Severity, subject: Subject, kind: FindingKind) -> Self {
        Self {
            rule,
            severity,
            subject,
            kind,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleReport {
    pub findings: Vec<Finding>,
}

impl RuleReport {
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    pub fn for_rule(&self, rule: RuleId) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |finding| finding.rule == rule)
    }
}

/// Run a single rule.
pub fn run_rule(catalog: &mut Catalog, rule: RuleId, settings: &RuleSettings) -> Vec<Finding> {
    match rule {
        RuleId::MissingTableVersion => missing_table_version(catalog, settings),
        RuleId::MissingBackglassVersion => missing_backglass_version(catalog, settings),
        RuleId::RedundantFeatureTags => {
            remove_redundant_feature_tags(catalog, &settings.redundant_feature_tags)
        }
        RuleId::DerivedVariants => derived_variants(catalog),
        RuleId::OrphanedPupPacks => orphaned_pup_packs(catalog),
        RuleId::MissingYear => missing_year(catalog),
        RuleId::MissingTheme => missing_theme(catalog),
        RuleId::MissingModTag => missing_mod_tag(catalog),
        RuleId::MissingRethemeTag => missing_retheme_tag(catalog),
        RuleId::SharedDownloadUrl => shared_download_urls(catalog),
    }
}

/// Run `rules` in order, collecting every finding.
pub fn run_rules(catalog: &mut Catalog, rules: &[RuleId], settings: &RuleSettings) -> RuleReport {
    let mut report = RuleReport::default();
    for &rule in rules {
        let findings = run_rule(catalog, rule, settings);
        debug!(rule = rule.as_str(), findings = findings.len(), "rule finished");
        report.extend(findings);
    }
    report
}
