//! Agent disabled-lock interpreter.
//!
//! `puppet agent --disable "<reason>"` writes a small JSON lock file. Its
//! presence means the agent is disabled; the message is best effort.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ExporterError, Result};
use crate::reader::read_file;

/// Disabled state of the agent for one scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledState {
    pub disabled: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct LockContent {
    #[serde(default)]
    disabled_message: Option<String>,
}

/// Interpret the lock file at `path`.
///
/// A missing file means "enabled". Unparseable content still reports the
/// agent as disabled and carries the parse error text as the message.
pub fn read_disabled_lock(path: &Path) -> Result<DisabledState> {
    let raw = match read_file(path) {
        Ok(raw) => raw,
        Err(ExporterError::NotFound { .. }) => return Ok(DisabledState::default()),
        Err(e) => return Err(e),
    };

    let message = match serde_json::from_slice::<LockContent>(&raw) {
        Ok(content) => content.disabled_message.unwrap_or_default(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "disabled lock is not valid json");
            e.to_string()
        }
    };

    Ok(DisabledState {
        disabled: true,
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn absent_lock_means_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let st = read_disabled_lock(&dir.path().join("agent_disabled.lock")).unwrap();
        assert_eq!(st, DisabledState { disabled: false, message: String::new() });
    }

    #[test]
    fn lock_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent_disabled.lock");
        fs::write(&path, r#"{"disabled_message": "maintenance"}"#).unwrap();
        let st = read_disabled_lock(&path).unwrap();
        assert!(st.disabled);
        assert_eq!(st.message, "maintenance");
    }

    #[test]
    fn lock_without_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent_disabled.lock");
        fs::write(&path, "{}").unwrap();
        let st = read_disabled_lock(&path).unwrap();
        assert!(st.disabled);
        assert_eq!(st.message, "");
    }

    #[test]
    fn garbage_lock_is_still_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent_disabled.lock");
        fs::write(&path, "not json").unwrap();
        let st = read_disabled_lock(&path).unwrap();
        assert!(st.disabled);
        assert!(!st.message.is_empty());
    }

    #[test]
    fn unreadable_lock_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_disabled_lock(dir.path()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ReadFailure);
    }
}
