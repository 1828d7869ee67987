// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! `cargo xtask <command>` runs the build, lint and test steps used in CI,
//! plus `verify-migrations`, which applies the embedded persistence
//! migrations to a scratch in-memory `SQLite` database and checks the
//! resulting schema.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeSet;
use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context, eyre::eyre};
use diesel::sql_types::{BigInt, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, verify migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply the embedded migrations to a scratch database and check the schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, verify migrations)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Tables the persistence layer reads or writes, with the columns it selects.
const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("profiles", &["profile_id", "display_name", "role", "created_at"]),
    (
        "permission_grants",
        &["grant_id", "profile_id", "action", "scope_kind", "scope_id"],
    ),
    ("places", &["place_id", "name"]),
    ("games", &["game_id", "name"]),
    (
        "matches",
        &[
            "match_id",
            "game_id",
            "place_id",
            "start_at",
            "end_at",
            "winner_profile_id",
        ],
    ),
    (
        "match_participants",
        &["participant_id", "match_id", "profile_id", "points", "confirmed"],
    ),
    (
        "ratings",
        &[
            "rating_id",
            "scope_kind",
            "scope_id",
            "profile_id",
            "rating",
            "wins",
            "losses",
            "draws",
            "minutes_played",
        ],
    ),
];

/// Verify the embedded migrations produce the schema persistence expects
///
/// ## What This Command Does
///
/// 1. Opens an in-memory `SQLite` database with foreign keys enabled
/// 2. Applies every embedded migration
/// 3. Checks each required table and column exists
/// 4. Checks foreign key integrity of the empty schema
/// 5. Reverts every migration and checks no required table is left behind
///
/// No external services are needed.
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let tables: BTreeSet<String> = list_tables(&mut conn)?;
    for (table, columns) in REQUIRED_SCHEMA {
        if !tables.contains(*table) {
            return Err(eyre!("Missing table after migration: {table}"));
        }

        let present: BTreeSet<String> = list_columns(&mut conn, table)?;
        let missing: Vec<&str> = columns
            .iter()
            .copied()
            .filter(|column| !present.contains(*column))
            .collect();
        if !missing.is_empty() {
            return Err(eyre!("Table {table} is missing columns: {missing:?}"));
        }
        tracing::debug!("Table {} has {} column(s)", table, present.len());
    }

    let violations: i64 =
        diesel::sql_query("SELECT COUNT(*) AS count FROM pragma_foreign_key_check()")
            .get_result::<CountRow>(&mut conn)
            .wrap_err("Failed to run foreign key check")?
            .count;
    if violations != 0 {
        return Err(eyre!("Foreign key check reported {violations} violation(s)"));
    }

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let leftover: Vec<String> = list_tables(&mut conn)?
        .into_iter()
        .filter(|table| REQUIRED_SCHEMA.iter().any(|(name, _)| name == table))
        .collect();
    if !leftover.is_empty() {
        return Err(eyre!("Tables left after reverting migrations: {leftover:?}"));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// List user tables, excluding `SQLite` and Diesel bookkeeping
fn list_tables(conn: &mut SqliteConnection) -> Result<BTreeSet<String>> {
    let rows: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list tables")?;

    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// List the column names of one table
fn list_columns(conn: &mut SqliteConnection, table: &str) -> Result<BTreeSet<String>> {
    let rows: Vec<NameRow> =
        diesel::sql_query(format!("SELECT name FROM pragma_table_info('{table}')"))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read columns of {table}"))?;

    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
