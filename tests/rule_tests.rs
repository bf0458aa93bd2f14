use std::path::{Path, PathBuf};

use vpsdb_check::catalog::{
    self, B2s, Catalog, Game, Presence, PupPack, Resource, Table, TagSet,
};
use vpsdb_check::report::render_report;
use vpsdb_check::rules::{
    self, run_rule, run_rules, FindingKind, RuleId, RuleSettings, Severity,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample() -> Catalog {
    catalog::load(fixture_path("sample_catalog.json")).expect("load sample catalog")
}

fn table(id: &str, authors: &[&str]) -> Table {
    Table {
        id: id.to_string(),
        created_at: 0,
        updated_at: 0,
        urls: Presence::Absent,
        authors: authors.iter().map(|a| a.to_string()).collect(),
        features: Presence::Absent,
        theme: Presence::Absent,
        table_format: "VPX".to_string(),
        version: Presence::Absent,
        edition: Presence::Absent,
        comment: Presence::Absent,
        img_url: Presence::Absent,
        game: Presence::Absent,
        game_file_name: Presence::Absent,
    }
}

fn tags(raw: &[&str]) -> Presence<TagSet> {
    Presence::Present(raw.iter().copied().collect())
}

fn single_game(tables: Vec<Table>) -> Catalog {
    let mut game = Game::new("g1", "Attack from Mars", "Bally");
    game.year = Presence::Present(1995);
    game.theme = tags(&["Aliens"]);
    game.table_files = Presence::Present(tables);
    Catalog::new(vec![game])
}

#[test]
fn sample_catalog_full_run_counts() {
    let mut catalog = sample();
    let report = run_rules(&mut catalog, &RuleId::ALL, &RuleSettings::default());

    assert_eq!(report.len(), 11);
    assert_eq!(report.count(Severity::Error), 1);
    assert_eq!(report.count(Severity::Warning), 7);
    assert_eq!(report.count(Severity::Info), 3);

    let per_rule = |rule| report.for_rule(rule).count();
    assert_eq!(per_rule(RuleId::MissingTableVersion), 1);
    assert_eq!(per_rule(RuleId::MissingBackglassVersion), 1);
    assert_eq!(per_rule(RuleId::RedundantFeatureTags), 2);
    assert_eq!(per_rule(RuleId::DerivedVariants), 2);
    assert_eq!(per_rule(RuleId::OrphanedPupPacks), 1);
    assert_eq!(per_rule(RuleId::MissingYear), 1);
    assert_eq!(per_rule(RuleId::MissingTheme), 1);
    assert_eq!(per_rule(RuleId::MissingModTag), 0);
    assert_eq!(per_rule(RuleId::MissingRethemeTag), 1);
    assert_eq!(per_rule(RuleId::SharedDownloadUrl), 1);

    let rendered = render_report(&report);
    assert!(rendered.ends_with("11 finding(s): 1 error(s), 7 warning(s), 3 info\n"));
}

#[test]
fn findings_follow_rule_order() {
    let mut catalog = sample();
    let report = run_rules(&mut catalog, &RuleId::ALL, &RuleSettings::default());
    let order: Vec<RuleId> = report.findings.iter().map(|finding| finding.rule).collect();
    let mut sorted = order.clone();
    sorted.sort_by_key(|rule| RuleId::ALL.iter().position(|candidate| candidate == rule));
    assert_eq!(order, sorted);
}

#[test]
fn missing_table_version_skips_exempt_authors() {
    let findings = rules::missing_table_version(&sample(), &RuleSettings::default());
    let ids: Vec<Option<&str>> = findings.iter().map(|f| f.subject.asset_id()).collect();
    assert_eq!(ids, vec![Some("t-taf-1")]);
    assert_eq!(findings[0].kind, FindingKind::MissingVersion);

    let strict = RuleSettings {
        exempt_authors: Vec::new(),
        ..RuleSettings::default()
    };
    assert_eq!(rules::missing_table_version(&sample(), &strict).len(), 2);
}

#[test]
fn missing_backglass_version_needs_a_download_link() {
    let findings = rules::missing_backglass_version(&sample(), &RuleSettings::default());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].subject.asset_id(), Some("b-1"));

    let mut catalog = single_game(Vec::new());
    catalog.games[0].b2s_files = Presence::Present(vec![B2s {
        urls: Presence::Present(vec![Resource::new("https://example.org/b2s")]),
        authors: Presence::Present(vec!["Zen Studios".to_string()]),
        ..B2s::default()
    }]);
    assert!(rules::missing_backglass_version(&catalog, &RuleSettings::default()).is_empty());
}

#[test]
fn cleanup_removes_redundant_tags_and_keeps_the_rest() {
    let mut first = table("t1", &["Alice"]);
    first.features = tags(&["incl. B2S", "VR", "incl. Art", "incl. B2S"]);
    let mut second = table("t2", &["Bob"]);
    second.features = Presence::Null;
    let mut catalog = single_game(vec![first, second]);

    let findings = run_rule(
        &mut catalog,
        RuleId::RedundantFeatureTags,
        &RuleSettings::default(),
    );

    let removed: Vec<FindingKind> = findings.into_iter().map(|finding| finding.kind).collect();
    assert_eq!(
        removed,
        vec![
            FindingKind::RemovedTag {
                tag: "incl. B2S".to_string()
            },
            FindingKind::RemovedTag {
                tag: "incl. Art".to_string()
            },
        ]
    );
    let tables = catalog.games[0].tables();
    assert_eq!(tables[0].features, tags(&["VR"]));
    assert_eq!(tables[1].features, Presence::Null);
}

#[test]
fn cleanup_drops_descriptive_spellings() {
    let mut only = table("t1", &["Alice"]);
    only.features = tags(&["includes backglass", "includes art", "widebody"]);
    let mut catalog = single_game(vec![only]);

    let findings = run_rule(
        &mut catalog,
        RuleId::RedundantFeatureTags,
        &RuleSettings::default(),
    );

    assert_eq!(findings.len(), 2);
    assert_eq!(catalog.games[0].tables()[0].features, tags(&["widebody"]));
}

#[test]
fn cleanup_is_unconditional_on_game_assets() {
    let mut only = table("t1", &["Alice"]);
    only.features = tags(&["incl. B2S"]);
    let mut catalog = single_game(vec![only]);
    assert!(catalog.games[0].backglasses().is_empty());

    let findings = run_rule(
        &mut catalog,
        RuleId::RedundantFeatureTags,
        &RuleSettings::default(),
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(catalog.games[0].tables()[0].features, tags(&[]));
}

#[test]
fn derived_variant_names_the_contributor() {
    let catalog = single_game(vec![table("t1", &["Bob", "Alice"]), table("t2", &["Alice"])]);
    let findings = rules::derived_variants(&catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].subject.asset_id(), Some("t1"));
    assert_eq!(
        findings[0].kind,
        FindingKind::DerivedVariant {
            base_table: "t2".to_string(),
            contributed_by: vec!["Bob".to_string()],
        }
    );
}

#[test]
fn unrelated_authors_are_not_variants() {
    let catalog = single_game(vec![table("t1", &["Alice"]), table("t2", &["Zed"])]);
    assert!(rules::derived_variants(&catalog).is_empty());
}

#[test]
fn shared_author_suffix_is_a_known_false_positive() {
    // Different machines' conversions that both credit the same original author.
    let catalog = single_game(vec![
        table("original-conversion", &["Alice"]),
        table("unrelated-rebuild", &["Mallory", "Alice"]),
    ]);
    assert_eq!(rules::derived_variants(&catalog).len(), 1);
}

#[test]
fn derived_variant_with_fewer_tags_reports_missing_tags() {
    let mut variant = table("t1", &["Bob", "Alice"]);
    variant.features = tags(&["VR"]);
    let mut base = table("t2", &["Alice"]);
    base.features = tags(&["VR", "FSS", "nFozzy"]);
    let catalog = single_game(vec![variant, base]);

    let findings = rules::derived_variants(&catalog);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[1].severity, Severity::Warning);
    assert_eq!(
        findings[1].kind,
        FindingKind::MissingTags {
            base_table: "t2".to_string(),
            tags: vec!["FSS".to_string(), "nFozzy".to_string()],
        }
    );
}

#[test]
fn missing_tags_needs_features_on_both_tables() {
    let variant = table("t1", &["Bob", "Alice"]);
    let mut base = table("t2", &["Alice"]);
    base.features = tags(&["VR", "FSS"]);
    let catalog = single_game(vec![variant, base]);

    let findings = rules::derived_variants(&catalog);
    assert_eq!(findings.len(), 1);
    assert!(matches!(findings[0].kind, FindingKind::DerivedVariant { .. }));
}

#[test]
fn cleanup_before_inference_changes_missing_tags() {
    let settings = RuleSettings::default();

    let mut cleaned_first = sample();
    let report = run_rules(
        &mut cleaned_first,
        &[RuleId::RedundantFeatureTags, RuleId::DerivedVariants],
        &settings,
    );
    let missing_after_cleanup = report
        .for_rule(RuleId::DerivedVariants)
        .filter(|finding| matches!(finding.kind, FindingKind::MissingTags { .. }))
        .count();
    assert_eq!(missing_after_cleanup, 1);

    let mut untouched = sample();
    let report = run_rules(&mut untouched, &[RuleId::DerivedVariants], &settings);
    let missing_without_cleanup = report
        .for_rule(RuleId::DerivedVariants)
        .filter(|finding| matches!(finding.kind, FindingKind::MissingTags { .. }))
        .count();
    assert_eq!(missing_without_cleanup, 0);
}

#[test]
fn orphaned_pup_pack_is_flagged_only_without_id() {
    let mut catalog = single_game(Vec::new());
    catalog.games[0].pup_pack_files = Presence::Present(vec![
        PupPack {
            name: Presence::Present("no id".to_string()),
            ..PupPack::default()
        },
        PupPack {
            id: Presence::Present("p1".to_string()),
            ..PupPack::default()
        },
        PupPack {
            id: Presence::Null,
            ..PupPack::default()
        },
    ]);

    let findings = rules::orphaned_pup_packs(&catalog);
    let positions: Vec<usize> = findings
        .iter()
        .filter_map(|finding| finding.subject.asset.as_ref().map(|asset| asset.index))
        .collect();
    assert_eq!(positions, vec![0, 2]);
    assert!(findings.iter().all(|finding| finding.severity == Severity::Error));
}

#[test]
fn year_zero_and_empty_theme_count_as_missing() {
    let mut game = Game::new("g2", "Flash", "Williams");
    game.year = Presence::Present(0);
    game.theme = tags(&[]);
    let mut catalog = single_game(Vec::new());
    catalog.games.push(game);

    let years = rules::missing_year(&catalog);
    let themes = rules::missing_theme(&catalog);
    assert_eq!(years.len(), 1);
    assert_eq!(years[0].subject.game_id, "g2");
    assert_eq!(themes.len(), 1);
    assert_eq!(themes[0].subject.game_id, "g2");
}

#[test]
fn multi_author_table_without_mod_is_flagged() {
    let mut tagged = table("t1", &["Bob", "Alice"]);
    tagged.features = tags(&["MOD"]);
    let untagged = table("t2", &["Carol", "Alice"]);
    let solo = table("t3", &["Alice"]);
    let catalog = single_game(vec![tagged, untagged, solo]);

    let findings = rules::missing_mod_tag(&catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].subject.asset_id(), Some("t2"));
    assert_eq!(
        findings[0].kind,
        FindingKind::MissingFeature {
            feature: rules::MOD_FEATURE
        }
    );
}

#[test]
fn retheme_comment_without_feature_is_flagged() {
    let mut reskin = table("t1", &["Alice"]);
    reskin.comment = Presence::Present("Retheme of Xenon".to_string());
    let mut tagged = table("t2", &["Bob"]);
    tagged.comment = Presence::Present("Reskin".to_string());
    tagged.features = tags(&["Retheme"]);
    let mut plain = table("t3", &["Carol"]);
    plain.comment = Presence::Present("physics tweaks".to_string());
    let catalog = single_game(vec![reskin, tagged, plain]);

    let findings = rules::missing_retheme_tag(&catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].subject.asset_id(), Some("t1"));
}

#[test]
fn shared_url_names_the_first_game() {
    let findings = rules::shared_download_urls(&sample());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].subject.asset_id(), Some("t-xen-1"));
    assert_eq!(
        findings[0].kind,
        FindingKind::SharedUrl {
            url: "https://vpuniverse.com/files/file/taf".to_string(),
            first_game: "The Addams Family".to_string(),
        }
    );
}
