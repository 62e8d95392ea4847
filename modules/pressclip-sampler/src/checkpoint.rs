//! Durable campaign progress, one JSON object mapping keyword → UIDs.
//!
//! The file is rewritten wholesale after every keyword via
//! write-temp-then-rename, so a crash leaves either the previous or the new
//! complete file. Read failures degrade to an empty starting state — a lost
//! checkpoint costs re-sampling, never the run.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use pressclip_common::CampaignResult;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checkpoint serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load prior progress. Absent, unreadable, or malformed files all start
/// the campaign fresh.
pub fn load(path: &Path) -> CampaignResult {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No checkpoint found, starting fresh");
            return CampaignResult::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read checkpoint, starting fresh");
            return CampaignResult::new();
        }
    };

    match serde_json::from_str::<CampaignResult>(&raw) {
        Ok(results) => {
            info!(path = %path.display(), keywords = results.len(), "Loaded checkpoint");
            results
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Malformed checkpoint, starting fresh");
            CampaignResult::new()
        }
    }
}

/// Persist progress atomically: serialize pretty JSON to a temp file in the
/// target directory, then rename over the destination.
pub fn save(path: &Path, results: &CampaignResult) -> Result<(), CheckpointError> {
    let json = serde_json::to_string_pretty(results)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path).map_err(|e| CheckpointError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut results = CampaignResult::new();
        results.insert("agencyA".to_string(), vec!["u1".to_string(), "u2".to_string()]);
        results.insert("agencyB".to_string(), Vec::new());

        save(&path, &results).unwrap();
        assert_eq!(load(&path), results);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load(&path).is_empty());
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut first = CampaignResult::new();
        first.insert("old".to_string(), vec!["u1".to_string()]);
        save(&path, &first).unwrap();

        let mut second = CampaignResult::new();
        second.insert("new".to_string(), vec!["u2".to_string()]);
        save(&path, &second).unwrap();

        assert_eq!(load(&path), second);
    }

    #[test]
    fn output_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut results = CampaignResult::new();
        results.insert("agencyA".to_string(), vec!["u1".to_string()]);
        save(&path, &results).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'), "checkpoint should be human-diffable");
    }
}
