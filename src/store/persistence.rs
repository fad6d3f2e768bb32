use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StudioError;
use crate::model::page::PageObject;
use crate::model::test_case::TestCase;
use crate::model::test_data::TestData;
use crate::store::seed;
use crate::store::store::PageStore;

// ============================================================================
// JSON collection storage — three independently keyed documents
// ============================================================================

pub const PAGES_FILE: &str = "pages.json";
pub const TEST_DATA_FILE: &str = "test_data.json";
pub const TEST_CASES_FILE: &str = "test_cases.json";

/// Content fingerprint of a serialized collection, used to skip rewriting
/// documents that have not changed.
pub fn text_fingerprint(text: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// On-disk storage for the three collections, one JSON document each,
/// under a single data directory.
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the full store. Each collection falls back to the seed dataset
    /// independently when its document is missing or unparsable; a corrupt
    /// file is never surfaced as an error.
    pub fn load_store(&self) -> PageStore {
        let pages = self
            .load_collection(PAGES_FILE)
            .unwrap_or_else(seed::seed_pages);
        let test_data = self
            .load_collection(TEST_DATA_FILE)
            .unwrap_or_else(seed::seed_test_data);
        let test_cases = self
            .load_collection(TEST_CASES_FILE)
            .unwrap_or_else(seed::seed_test_cases);

        PageStore::from_collections(pages, test_data, test_cases)
    }

    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Option<Vec<T>> {
        let path = self.data_dir.join(file);
        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save_pages(&self, pages: &[PageObject]) -> Result<bool, StudioError> {
        self.save_collection(PAGES_FILE, pages)
    }

    pub fn save_test_data(&self, test_data: &[TestData]) -> Result<bool, StudioError> {
        self.save_collection(TEST_DATA_FILE, test_data)
    }

    pub fn save_test_cases(&self, test_cases: &[TestCase]) -> Result<bool, StudioError> {
        self.save_collection(TEST_CASES_FILE, test_cases)
    }

    /// Serialize and write one collection document. Returns `false` and
    /// leaves the file untouched when the existing content already carries
    /// the same fingerprint.
    fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<bool, StudioError> {
        let json = serde_json::to_string_pretty(items).map_err(|e| StudioError::Serialize {
            context: file.to_string(),
            source: e,
        })?;

        let path = self.data_dir.join(file);
        if let Ok(existing) = fs::read_to_string(&path) {
            if text_fingerprint(&existing) == text_fingerprint(&json) {
                return Ok(false);
            }
        }

        fs::create_dir_all(&self.data_dir).map_err(|e| StudioError::Storage {
            path: self.data_dir.display().to_string(),
            source: e,
        })?;
        fs::write(&path, &json).map_err(|e| StudioError::Storage {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(true)
    }
}
