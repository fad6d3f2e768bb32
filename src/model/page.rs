use serde::{Deserialize, Serialize};

use crate::model::locator::Locator;

/// A page object: a named collection of locators plus the accumulated
/// method source text generated for (or hand-written against) them.
///
/// A page owns its locators exclusively; deleting the page deletes them.
/// Locator insertion order is render order in the generated class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageObject {
    /// Slug-derived, unique across pages
    pub id: String,

    pub name: String,

    pub locators: Vec<Locator>,

    /// Accumulating method text. New model output is appended after
    /// existing content by convention, but direct edits may replace it
    /// arbitrarily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_methods: Option<String>,

    /// Optional saved HTML of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_source: Option<String>,

    /// Optional canonical URL of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

impl PageObject {
    pub fn locator(&self, locator_id: &str) -> Option<&Locator> {
        self.locators.iter().find(|l| l.id == locator_id)
    }

    pub fn locator_mut(&mut self, locator_id: &str) -> Option<&mut Locator> {
        self.locators.iter_mut().find(|l| l.id == locator_id)
    }
}
