//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `initdeck_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use initdeck_core::db::open_db_in_memory;
use initdeck_core::{GroupKind, KeyInput, SqliteBlobRepository, TrackerApp};

fn main() {
    println!("initdeck_core version={}", initdeck_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("smoke db open failed: {err}");
            std::process::exit(1);
        }
    };
    let repo = match SqliteBlobRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("smoke repo init failed: {err}");
            std::process::exit(1);
        }
    };

    // One in-memory shortcut round: ctrl-+ creates a group, + adds a
    // character to it.
    let mut app = TrackerApp::load(repo, GroupKind::Encounters);
    app.handle_key(KeyInput::ctrl_char('+'));
    app.handle_key(KeyInput::char('+'));

    let groups = app.store().groups();
    println!(
        "smoke kind={} groups={} characters={}",
        app.store().kind().storage_key(),
        groups.len(),
        groups.first().map_or(0, |group| group.characters.len())
    );
}
