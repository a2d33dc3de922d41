//! Persisted mirror semantics: one versioned blob, tolerant reads, and the
//! clear-on-logout contract.

use anyhow::Result;
use tempfile::tempdir;

use classport::session::{Identity, Role, SessionMirror, MIRROR_VERSION};

fn sample_identity() -> Identity {
    Identity {
        token: "abc".into(),
        username: "alice".into(),
        role: Role::Student,
        level: Some("ss2".into()),
        department: Some("science".into()),
        full_name: Some("Alice A.".into()),
    }
}

#[test]
fn write_then_read_roundtrips_the_identity() -> Result<()> {
    let tmp = tempdir()?;
    let mirror = SessionMirror::new(tmp.path());
    assert!(mirror.read().is_none());

    mirror.write(&sample_identity())?;
    let back = mirror.read().expect("persisted identity should read back");
    assert_eq!(back, sample_identity());
    Ok(())
}

#[test]
fn write_creates_the_state_dir() -> Result<()> {
    let tmp = tempdir()?;
    let nested = tmp.path().join("deeper").join("still");
    let mirror = SessionMirror::new(&nested);
    mirror.write(&sample_identity())?;
    assert!(mirror.exists());
    Ok(())
}

#[test]
fn clear_is_idempotent() -> Result<()> {
    let tmp = tempdir()?;
    let mirror = SessionMirror::new(tmp.path());
    mirror.write(&sample_identity())?;
    mirror.clear();
    assert!(!mirror.exists());
    assert!(mirror.read().is_none());
    // Clearing an already-empty mirror observes the same result.
    mirror.clear();
    assert!(!mirror.exists());
    Ok(())
}

#[test]
fn corrupt_blob_reads_as_absent() -> Result<()> {
    let tmp = tempdir()?;
    let mirror = SessionMirror::new(tmp.path());
    std::fs::write(mirror.path(), b"{ not json at all")?;
    assert!(mirror.read().is_none());
    Ok(())
}

#[test]
fn version_mismatch_reads_as_absent() -> Result<()> {
    let tmp = tempdir()?;
    let mirror = SessionMirror::new(tmp.path());
    mirror.write(&sample_identity())?;

    // Rewrite the stored blob with a future version; it must be ignored,
    // not migrated.
    let raw = std::fs::read_to_string(mirror.path())?;
    let bumped = raw.replace(
        &format!("\"version\": {}", MIRROR_VERSION),
        &format!("\"version\": {}", MIRROR_VERSION + 1),
    );
    assert_ne!(raw, bumped, "fixture must actually change the version field");
    std::fs::write(mirror.path(), bumped)?;
    assert!(mirror.read().is_none());
    Ok(())
}
