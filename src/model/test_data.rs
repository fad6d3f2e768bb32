use serde::{Deserialize, Serialize};

/// Scope marker for test data shared across all pages.
pub const GLOBAL_SCOPE: &str = "global";

/// A key/value pair of test input data.
///
/// `scope` is either `"global"` or a page id. The page reference is a soft
/// string reference: it is never integrity-checked, and deleting the page
/// leaves the entry behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestData {
    pub id: String,
    pub key: String,
    pub value: String,
    pub scope: String,
}

impl TestData {
    pub fn is_global(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }
}
