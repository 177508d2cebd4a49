use std::path::PathBuf;

use tracing::{debug, warn};

use crate::models::{Clock, NoteStore};

pub fn config_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config_dir.join("daynotes").join("config.json")
}

/// Logs the whole collection as JSON at debug level.
pub fn dump_notes<C: Clock>(store: &NoteStore<C>) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match serde_json::to_string_pretty(store.all_notes()) {
        Ok(json) => debug!("{} notes in store:\n{}", store.len(), json),
        Err(e) => warn!("Failed to serialize notes: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_in_app_directory() {
        let path = config_path();
        assert!(path.ends_with("daynotes/config.json"));
    }

    #[test]
    fn dumping_without_subscriber_is_silent() {
        let mut store = NoteStore::new();
        store.start_create();
        store.update_draft_title("dump me");
        store.save().unwrap();

        dump_notes(&store);
        assert_eq!(store.len(), 1);
    }
}
