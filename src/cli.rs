use std::env;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::catalog::{self, Catalog};
use crate::config::{resolve_config, CheckConfig};
use crate::report::render_report;
use crate::rules::{run_rules, RuleId};

pub const DATABASE_PATH_ENV: &str = "VPSDB_PATH";

const USAGE: &str = "usage: vpsdb-check <check|fix|rules> [--db PATH] [--config PATH] [--rule ID]...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Check,
    Fix,
    Rules,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("check") => Some(Command::Check),
        Some("fix") => Some(Command::Fix),
        Some("rules") => Some(Command::Rules),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub db: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub rules: Vec<RuleId>,
}

/// Options after the subcommand.
pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--db" => options.db = Some(PathBuf::from(value("--db")?)),
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--rule" => {
                let raw = value("--rule")?;
                let rule = raw.parse::<RuleId>().map_err(|err| err.to_string())?;
                options.rules.push(rule);
            }
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    Ok(options)
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Check) => handle_check(&args[2..]),
        Some(Command::Fix) => handle_fix(&args[2..]),
        Some(Command::Rules) => handle_rules(),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// `--db` wins over `VPSDB_PATH`, which wins over the config file.
fn database_path(options: &CliOptions, config: &CheckConfig) -> PathBuf {
    options
        .db
        .clone()
        .or_else(|| env::var_os(DATABASE_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| config.database.clone())
}

struct Session {
    config: CheckConfig,
    path: PathBuf,
    catalog: Catalog,
    rules: Vec<RuleId>,
}

/// Shared front half of `check` and `fix`: options, config and load.
fn open_session(args: &[String]) -> Result<Session, i32> {
    let options = parse_options(args).map_err(|msg| {
        eprintln!("{msg}");
        eprintln!("{USAGE}");
        2
    })?;
    let config = resolve_config(options.config.as_deref()).map_err(|err| {
        eprintln!("config error: {err}");
        1
    })?;
    let path = database_path(&options, &config);
    let catalog = catalog::load(&path).map_err(|err| {
        error!(path = %path.display(), "catalog load failed");
        eprintln!("load failed: {err}");
        1
    })?;
    let rules = if options.rules.is_empty() {
        config.rules.clone()
    } else {
        options.rules
    };
    Ok(Session {
        config,
        path,
        catalog,
        rules,
    })
}

fn handle_check(args: &[String]) -> i32 {
    let mut session = match open_session(args) {
        Ok(session) => session,
        Err(code) => return code,
    };
    let report = run_rules(
        &mut session.catalog,
        &session.rules,
        &session.config.rule_settings(),
    );
    print!("{}", render_report(&report));
    0
}

fn handle_fix(args: &[String]) -> i32 {
    let mut session = match open_session(args) {
        Ok(session) => session,
        Err(code) => return code,
    };
    let rules = fix_order(&session.rules);
    let report = run_rules(&mut session.catalog, &rules, &session.config.rule_settings());
    print!("{}", render_report(&report));

    let removed = report.for_rule(RuleId::RedundantFeatureTags).count();
    match save_catalog(&session.catalog, &session.path, &session.config) {
        Ok(()) => info!(removed, "cleanup saved"),
        Err(msg) => eprintln!("{msg}"),
    }
    0
}

/// Cleanup always runs first so later rules see the cleaned catalog.
fn fix_order(rules: &[RuleId]) -> Vec<RuleId> {
    let mut ordered = vec![RuleId::RedundantFeatureTags];
    ordered.extend(rules.iter().copied().filter(|rule| !rule.is_mutating()));
    ordered
}

fn save_catalog(catalog: &Catalog, path: &Path, config: &CheckConfig) -> Result<(), String> {
    catalog::save(catalog, path, config.output_format()).map_err(|err| {
        error!(path = %path.display(), "catalog save failed");
        format!("save failed: {err}")
    })
}

fn handle_rules() -> i32 {
    for rule in RuleId::ALL {
        println!("{:<26}{}", rule.as_str(), rule.description());
    }
    0
}
