//! File-backed preference persistence.
//!
//! Each preference lives under its own key file so the three entries stay
//! independent: the last write to a key wins, and a corrupt or missing entry
//! never affects the others.

use std::fs;
use std::path::PathBuf;

use engine_logging::{engine_error, engine_warn};
use paraphraser_core::PrefKey;
use paraphraser_engine::AtomicFileWriter;

/// Injected persistence seam for the stored preferences.
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: PrefKey) -> Option<String>;
    fn save(&self, key: PrefKey, value: &str);
}

pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: PrefKey) -> Option<String> {
        let path = self.dir.join(key.as_str());
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                engine_warn!("Failed to read preference {:?}: {}", path, err);
                None
            }
        }
    }

    fn save(&self, key: PrefKey, value: &str) {
        let writer = AtomicFileWriter::new(self.dir.clone());
        if let Err(err) = writer.write(key.as_str(), value) {
            engine_error!("Failed to persist preference '{}': {}", key.as_str(), err);
        }
    }
}
