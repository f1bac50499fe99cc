//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `grounding_core` linkage and
//!   the configured record store.
//! - Keep output deterministic for quick local sanity checks.

use grounding_core::db::{open_db, schema_version};
use grounding_core::{
    capture, init_logging, AppSession, CoreConfig, LocalStore, SqliteRecordRepository, ThemeStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CoreConfig::from_env();
    println!("grounding_core version={}", grounding_core::core_version());

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let session = AppSession::open(LocalStore::new(SqliteRecordRepository::new(&conn)));
    let theme = ThemeStore::new(SqliteRecordRepository::new(&conn)).current();
    let state = session.state();

    println!("db_path={}", config.db_path.display());
    match schema_version(&conn) {
        Ok(version) => println!("schema=v{version}"),
        Err(err) => eprintln!("schema version unreadable: {err}"),
    }
    println!("theme={theme}");
    println!(
        "drafts={} pending={} tasks={} habits={} logs={} goals={} projects={}",
        state.drafts.len(),
        capture::pending(&state.drafts).count(),
        state.tasks.len(),
        state.habits.len(),
        state.logs.len(),
        state.goals.len(),
        state.projects.len(),
    );
    println!("xp_total={}", state.xp.global_total);
    ExitCode::SUCCESS
}
