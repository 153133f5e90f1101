//! Session orchestration against the real filesystem collaborators

use modcfg_content::{ConfigValue, Format};
use modcfg_core::{CandidateIndex, DirCandidateIndex, EditorSession, FsConfigStore};
use modcfg_edit::EditOp;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &TempDir, rel: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn open_edit_save_reload_cycle() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "config/server.toml", "[server]\nmax-players = 20\n");

    let mut session = EditorSession::open(FsConfigStore::new(), &path).unwrap();
    assert_eq!(session.format(), Format::Toml);
    session
        .apply_edit("server.max-players", EditOp::Set(ConfigValue::Number(32.0)))
        .unwrap();
    assert!(session.is_dirty());
    assert!(session.save().unwrap());
    assert!(!session.is_dirty());

    // A fresh session sees the saved value
    let reopened = EditorSession::open(FsConfigStore::new(), &path).unwrap();
    assert_eq!(
        reopened
            .tree()
            .and_then(|t| t.get("server"))
            .and_then(|s| s.get("max-players")),
        Some(&ConfigValue::Number(32.0))
    );
}

#[test]
fn switching_files_discards_unsaved_edits() {
    let temp = TempDir::new().unwrap();
    let first = write_file(&temp, "one.yml", "a: 1\n");
    let second = write_file(&temp, "two.yml", "b: 2\n");

    let mut session = EditorSession::open(FsConfigStore::new(), &first).unwrap();
    session
        .apply_edit("a", EditOp::Set(ConfigValue::Number(9.0)))
        .unwrap();

    // Selecting another file is just opening a new session; no auto-save
    let session = EditorSession::open(FsConfigStore::new(), &second).unwrap();
    assert_eq!(session.tree().and_then(|t| t.get("b")), Some(&ConfigValue::Number(2.0)));
    assert_eq!(fs::read_to_string(&first).unwrap(), "a: 1\n");
}

#[test]
fn malformed_file_opens_in_raw_text_mode() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "broken.json", "{ \"unterminated\": ");

    let mut session = EditorSession::open(FsConfigStore::new(), &path).unwrap();
    assert!(!session.is_structured());

    // Raw-text editing and saving remain possible
    session.set_raw_text("{\"fixed\": 1}");
    assert!(session.is_structured());
    assert!(session.save().unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"fixed\": 1}");
}

#[test]
fn candidate_listing_feeds_session_open() {
    let temp = TempDir::new().unwrap();
    write_file(&temp, "config/CreeperControl/settings.yml", "fuse: 30\n");
    write_file(&temp, "config/unrelated.toml", "x = 1\n");

    let index = DirCandidateIndex::new(temp.path());
    let candidates = index.list_candidates("creepercontrol", "creepercontrol");
    assert_eq!(candidates.len(), 1);

    let session =
        EditorSession::open_default(FsConfigStore::new(), &index, "creepercontrol", "creepercontrol")
            .unwrap()
            .unwrap();
    assert_eq!(session.tree().and_then(|t| t.get("fuse")), Some(&ConfigValue::Number(30.0)));
}

#[test]
fn properties_comment_survives_to_session() {
    let temp = TempDir::new().unwrap();
    let path = write_file(
        &temp,
        "server.properties",
        "# whether player-vs-player damage is on\npvp=true\n",
    );
    let session = EditorSession::open(FsConfigStore::new(), &path).unwrap();
    assert_eq!(
        session.comments().and_then(|c| c.get("pvp")),
        Some("whether player-vs-player damage is on")
    );
}
