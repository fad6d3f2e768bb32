use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::StudioError;
use crate::model::locator::{Locator, LocatorKind};
use crate::model::page::PageObject;
use crate::model::test_case::{TestCase, TestCaseStep};
use crate::model::test_data::TestData;
use crate::store::persistence::JsonStorage;
use crate::store::seed;

// ============================================================================
// Store events and observers
// ============================================================================

/// Emitted after every successful mutation. Serializable so observers can
/// write them straight to a trace file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    PageAdded { page_id: String, name: String },
    PageRenamed { page_id: String, name: String },
    PageDeleted { page_id: String },
    PageMethodsUpdated { page_id: String },
    PageSourceUpdated { page_id: String },
    PageUrlUpdated { page_id: String },
    LocatorAdded { page_id: String, locator_id: String, name: String },
    LocatorUpdated { page_id: String, locator_id: String },
    LocatorDeleted { page_id: String, locator_id: String },
    TestDataAdded { id: String, key: String },
    TestDataUpdated { id: String },
    TestDataDeleted { id: String },
    TestCaseAdded { id: String, name: String },
    TestCaseUpdated { id: String },
    TestCaseDeleted { id: String },
    TestCaseCodeSaved { id: String },
    Committed { collections: Vec<String> },
}

/// Receives store events; registered with [`PageStore::subscribe`].
pub trait StoreObserver {
    fn on_event(&self, event: &StoreEvent);
}

// ============================================================================
// Update payloads
// ============================================================================

/// Partial locator update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LocatorUpdate {
    pub name: Option<String>,
    pub kind: Option<LocatorKind>,
    pub value: Option<String>,
}

/// Partial test data update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TestDataUpdate {
    pub key: Option<String>,
    pub value: Option<String>,
    pub scope: Option<String>,
}

/// Denormalized step reference used when assembling a test case. The page
/// name is cached here and never re-validated against the pages collection.
#[derive(Debug, Clone)]
pub struct StepRef {
    pub page_id: String,
    pub page_name: String,
    pub method_name: String,
}

// ============================================================================
// PageStore — explicit owner of the three collections
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct DirtyFlags {
    pages: bool,
    test_data: bool,
    test_cases: bool,
}

/// In-memory owner of pages, test data and test cases.
///
/// All mutations go through named entry points which validate input,
/// apply the change, mark the owning collection dirty, and notify
/// observers. Nothing is persisted until [`PageStore::commit`], which
/// writes dirty collections only (last-writer-wins per collection).
pub struct PageStore {
    pages: Vec<PageObject>,
    test_data: Vec<TestData>,
    test_cases: Vec<TestCase>,
    dirty: DirtyFlags,
    observers: Vec<Box<dyn StoreObserver>>,
    next_id: u64,
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn counter_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl PageStore {
    /// A store populated with the seed dataset.
    pub fn seeded() -> Self {
        Self::from_collections(seed::seed_pages(), seed::seed_test_data(), seed::seed_test_cases())
    }

    pub fn from_collections(
        pages: Vec<PageObject>,
        test_data: Vec<TestData>,
        test_cases: Vec<TestCase>,
    ) -> Self {
        Self {
            pages,
            test_data,
            test_cases,
            dirty: DirtyFlags::default(),
            observers: Vec::new(),
            next_id: counter_seed(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn pages(&self) -> &[PageObject] {
        &self.pages
    }

    pub fn page(&self, page_id: &str) -> Option<&PageObject> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn test_data(&self) -> &[TestData] {
        &self.test_data
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn test_case(&self, id: &str) -> Option<&TestCase> {
        self.test_cases.iter().find(|tc| tc.id == id)
    }

    fn page_mut(&mut self, page_id: &str) -> Result<&mut PageObject, StudioError> {
        self.pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| StudioError::PageNotFound(page_id.to_string()))
    }

    // ------------------------------------------------------------------
    // Page mutations
    // ------------------------------------------------------------------

    pub fn add_page(&mut self, name: &str) -> Result<String, StudioError> {
        if name.trim().is_empty() {
            return Err(StudioError::InvalidInput("page name cannot be empty".to_string()));
        }

        let page_id = format!("{}-{}", slug(name), self.next_id());
        self.pages.push(PageObject {
            id: page_id.clone(),
            name: name.to_string(),
            locators: Vec::new(),
            generated_methods: Some(String::new()),
            page_source: None,
            page_url: None,
        });

        self.dirty.pages = true;
        self.notify(StoreEvent::PageAdded {
            page_id: page_id.clone(),
            name: name.to_string(),
        });
        Ok(page_id)
    }

    pub fn update_page_name(&mut self, page_id: &str, new_name: &str) -> Result<(), StudioError> {
        if new_name.trim().is_empty() {
            return Err(StudioError::InvalidInput("page name cannot be empty".to_string()));
        }

        let page = self.page_mut(page_id)?;
        page.name = new_name.to_string();

        self.dirty.pages = true;
        self.notify(StoreEvent::PageRenamed {
            page_id: page_id.to_string(),
            name: new_name.to_string(),
        });
        Ok(())
    }

    /// Delete a page and with it every locator it owns. Test case steps
    /// referencing the page are left behind and may dangle.
    pub fn delete_page(&mut self, page_id: &str) -> Result<(), StudioError> {
        let before = self.pages.len();
        self.pages.retain(|p| p.id != page_id);
        if self.pages.len() == before {
            return Err(StudioError::PageNotFound(page_id.to_string()));
        }

        self.dirty.pages = true;
        self.notify(StoreEvent::PageDeleted {
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    /// Replace the page's accumulated method text wholesale.
    pub fn update_page_methods(&mut self, page_id: &str, methods: &str) -> Result<(), StudioError> {
        let page = self.page_mut(page_id)?;
        page.generated_methods = Some(methods.to_string());

        self.dirty.pages = true;
        self.notify(StoreEvent::PageMethodsUpdated {
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    /// Append new method text after any existing content, separated by a
    /// blank line. This is the convention used for model output.
    pub fn append_page_methods(&mut self, page_id: &str, methods: &str) -> Result<(), StudioError> {
        let page = self.page_mut(page_id)?;
        let combined = match page.generated_methods.as_deref() {
            Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, methods),
            _ => methods.to_string(),
        };
        page.generated_methods = Some(combined);

        self.dirty.pages = true;
        self.notify(StoreEvent::PageMethodsUpdated {
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    pub fn update_page_source(&mut self, page_id: &str, html: &str) -> Result<(), StudioError> {
        let page = self.page_mut(page_id)?;
        page.page_source = Some(html.to_string());

        self.dirty.pages = true;
        self.notify(StoreEvent::PageSourceUpdated {
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    pub fn update_page_url(&mut self, page_id: &str, url: &str) -> Result<(), StudioError> {
        let page = self.page_mut(page_id)?;
        page.page_url = Some(url.to_string());

        self.dirty.pages = true;
        self.notify(StoreEvent::PageUrlUpdated {
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Locator mutations
    // ------------------------------------------------------------------

    pub fn add_locator(
        &mut self,
        page_id: &str,
        name: &str,
        kind: LocatorKind,
        value: &str,
    ) -> Result<String, StudioError> {
        if name.trim().is_empty() {
            return Err(StudioError::InvalidInput("locator name cannot be empty".to_string()));
        }
        if value.is_empty() {
            return Err(StudioError::InvalidInput("locator value cannot be empty".to_string()));
        }

        let locator_id = self.next_id().to_string();
        let page = self.page_mut(page_id)?;
        page.locators.push(Locator {
            id: locator_id.clone(),
            name: name.to_string(),
            kind,
            value: value.to_string(),
        });

        self.dirty.pages = true;
        self.notify(StoreEvent::LocatorAdded {
            page_id: page_id.to_string(),
            locator_id: locator_id.clone(),
            name: name.to_string(),
        });
        Ok(locator_id)
    }

    pub fn update_locator(
        &mut self,
        page_id: &str,
        locator_id: &str,
        update: LocatorUpdate,
    ) -> Result<(), StudioError> {
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(StudioError::InvalidInput("locator name cannot be empty".to_string()));
        }
        if update.value.as_deref().is_some_and(|v| v.is_empty()) {
            return Err(StudioError::InvalidInput("locator value cannot be empty".to_string()));
        }

        let page = self.page_mut(page_id)?;
        let locator = page
            .locator_mut(locator_id)
            .ok_or_else(|| StudioError::LocatorNotFound {
                page_id: page_id.to_string(),
                locator_id: locator_id.to_string(),
            })?;

        if let Some(name) = update.name {
            locator.name = name;
        }
        if let Some(kind) = update.kind {
            locator.kind = kind;
        }
        if let Some(value) = update.value {
            locator.value = value;
        }

        self.dirty.pages = true;
        self.notify(StoreEvent::LocatorUpdated {
            page_id: page_id.to_string(),
            locator_id: locator_id.to_string(),
        });
        Ok(())
    }

    pub fn delete_locator(&mut self, page_id: &str, locator_id: &str) -> Result<(), StudioError> {
        let page = self.page_mut(page_id)?;
        let before = page.locators.len();
        page.locators.retain(|l| l.id != locator_id);
        if page.locators.len() == before {
            return Err(StudioError::LocatorNotFound {
                page_id: page_id.to_string(),
                locator_id: locator_id.to_string(),
            });
        }

        self.dirty.pages = true;
        self.notify(StoreEvent::LocatorDeleted {
            page_id: page_id.to_string(),
            locator_id: locator_id.to_string(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Test data mutations
    // ------------------------------------------------------------------

    pub fn add_test_data(
        &mut self,
        key: &str,
        value: &str,
        scope: &str,
    ) -> Result<String, StudioError> {
        if key.trim().is_empty() {
            return Err(StudioError::InvalidInput("test data key cannot be empty".to_string()));
        }
        if value.is_empty() {
            return Err(StudioError::InvalidInput("test data value cannot be empty".to_string()));
        }

        let id = self.next_id().to_string();
        self.test_data.push(TestData {
            id: id.clone(),
            key: key.to_string(),
            value: value.to_string(),
            scope: scope.to_string(),
        });

        self.dirty.test_data = true;
        self.notify(StoreEvent::TestDataAdded {
            id: id.clone(),
            key: key.to_string(),
        });
        Ok(id)
    }

    pub fn update_test_data(&mut self, id: &str, update: TestDataUpdate) -> Result<(), StudioError> {
        if update.key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err(StudioError::InvalidInput("test data key cannot be empty".to_string()));
        }

        let entry = self
            .test_data
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StudioError::TestDataNotFound(id.to_string()))?;

        if let Some(key) = update.key {
            entry.key = key;
        }
        if let Some(value) = update.value {
            entry.value = value;
        }
        if let Some(scope) = update.scope {
            entry.scope = scope;
        }

        self.dirty.test_data = true;
        self.notify(StoreEvent::TestDataUpdated { id: id.to_string() });
        Ok(())
    }

    pub fn delete_test_data(&mut self, id: &str) -> Result<(), StudioError> {
        let before = self.test_data.len();
        self.test_data.retain(|d| d.id != id);
        if self.test_data.len() == before {
            return Err(StudioError::TestDataNotFound(id.to_string()));
        }

        self.dirty.test_data = true;
        self.notify(StoreEvent::TestDataDeleted { id: id.to_string() });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Test case mutations
    // ------------------------------------------------------------------

    pub fn add_test_case(&mut self, name: &str, steps: Vec<StepRef>) -> Result<String, StudioError> {
        if name.trim().is_empty() {
            return Err(StudioError::InvalidInput("test case name cannot be empty".to_string()));
        }

        let batch = self.next_id();
        let id = format!("tc-{}", batch);
        let steps = make_steps(batch, steps);

        self.test_cases.push(TestCase {
            id: id.clone(),
            name: name.to_string(),
            steps,
            generated_code: None,
        });

        self.dirty.test_cases = true;
        self.notify(StoreEvent::TestCaseAdded {
            id: id.clone(),
            name: name.to_string(),
        });
        Ok(id)
    }

    /// Replace a test case's name and steps. Previously saved generated
    /// code is discarded.
    pub fn update_test_case(
        &mut self,
        id: &str,
        name: &str,
        steps: Vec<StepRef>,
    ) -> Result<(), StudioError> {
        if name.trim().is_empty() {
            return Err(StudioError::InvalidInput("test case name cannot be empty".to_string()));
        }

        let batch = self.next_id();
        let steps = make_steps(batch, steps);

        let case = self
            .test_cases
            .iter_mut()
            .find(|tc| tc.id == id)
            .ok_or_else(|| StudioError::TestCaseNotFound(id.to_string()))?;

        case.name = name.to_string();
        case.steps = steps;
        case.generated_code = None;

        self.dirty.test_cases = true;
        self.notify(StoreEvent::TestCaseUpdated { id: id.to_string() });
        Ok(())
    }

    pub fn delete_test_case(&mut self, id: &str) -> Result<(), StudioError> {
        let before = self.test_cases.len();
        self.test_cases.retain(|tc| tc.id != id);
        if self.test_cases.len() == before {
            return Err(StudioError::TestCaseNotFound(id.to_string()));
        }

        self.dirty.test_cases = true;
        self.notify(StoreEvent::TestCaseDeleted { id: id.to_string() });
        Ok(())
    }

    pub fn save_test_case_code(&mut self, id: &str, code: &str) -> Result<(), StudioError> {
        let case = self
            .test_cases
            .iter_mut()
            .find(|tc| tc.id == id)
            .ok_or_else(|| StudioError::TestCaseNotFound(id.to_string()))?;

        case.generated_code = Some(code.to_string());

        self.dirty.test_cases = true;
        self.notify(StoreEvent::TestCaseCodeSaved { id: id.to_string() });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Persist dirty collections through the given storage. Each dirty
    /// collection is written whole (last-writer-wins); collections whose
    /// serialized form is unchanged are skipped. Returns the names of the
    /// collections actually written.
    pub fn commit(&mut self, storage: &JsonStorage) -> Result<Vec<&'static str>, StudioError> {
        let mut written = Vec::new();

        if self.dirty.pages {
            if storage.save_pages(&self.pages)? {
                written.push("pages");
            }
            self.dirty.pages = false;
        }
        if self.dirty.test_data {
            if storage.save_test_data(&self.test_data)? {
                written.push("test_data");
            }
            self.dirty.test_data = false;
        }
        if self.dirty.test_cases {
            if storage.save_test_cases(&self.test_cases)? {
                written.push("test_cases");
            }
            self.dirty.test_cases = false;
        }

        if !written.is_empty() {
            self.notify(StoreEvent::Committed {
                collections: written.iter().map(|c| c.to_string()).collect(),
            });
        }
        Ok(written)
    }
}

fn make_steps(batch: u64, refs: Vec<StepRef>) -> Vec<TestCaseStep> {
    refs.into_iter()
        .enumerate()
        .map(|(index, step)| TestCaseStep {
            id: format!("step-{}-{}", batch, index),
            page_id: step.page_id,
            page_name: step.page_name,
            method_name: step.method_name,
        })
        .collect()
}
