use std::cell::RefCell;
use std::rc::Rc;

use pageforge::model::locator::LocatorKind;
use pageforge::store::persistence::{JsonStorage, text_fingerprint};
use pageforge::store::seed::seed_pages;
use pageforge::store::store::{
    LocatorUpdate, PageStore, StepRef, StoreEvent, StoreObserver, TestDataUpdate,
};

// ============================================================================
// Helper builders
// ============================================================================

fn temp_storage(name: &str) -> JsonStorage {
    let dir = std::env::temp_dir().join(format!(
        "pageforge-store-tests-{}-{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    JsonStorage::new(dir)
}

fn step(page_id: &str, page_name: &str, method_name: &str) -> StepRef {
    StepRef {
        page_id: page_id.to_string(),
        page_name: page_name.to_string(),
        method_name: method_name.to_string(),
    }
}

struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl StoreObserver for Recorder {
    fn on_event(&self, event: &StoreEvent) {
        let json = serde_json::to_string(event).unwrap();
        self.events.borrow_mut().push(json);
    }
}

// ============================================================================
// Seed dataset
// ============================================================================

#[test]
fn seeded_store_contents() {
    let store = PageStore::seeded();

    assert_eq!(store.pages().len(), 2);
    assert_eq!(store.test_data().len(), 4);
    assert_eq!(store.test_cases().len(), 1);

    let login = store.page("login-page").unwrap();
    assert_eq!(login.name, "Login Page");
    assert_eq!(login.locators.len(), 3);
    assert_eq!(login.locators[2].kind, LocatorKind::Xpath);
}

// ============================================================================
// Page mutations
// ============================================================================

#[test]
fn add_page_mints_slug_derived_id() {
    let mut store = PageStore::seeded();
    let id = store.add_page("My Checkout Page").unwrap();

    assert!(id.starts_with("my-checkout-page-"), "got id {}", id);
    assert_eq!(store.page(&id).unwrap().name, "My Checkout Page");
}

#[test]
fn add_page_rejects_empty_name() {
    let mut store = PageStore::seeded();
    assert!(store.add_page("   ").is_err());
}

#[test]
fn rename_missing_page_errors() {
    let mut store = PageStore::seeded();
    assert!(store.update_page_name("nope", "New Name").is_err());
}

#[test]
fn delete_page_removes_owned_locators() {
    let mut store = PageStore::seeded();
    store.delete_page("login-page").unwrap();

    assert!(store.page("login-page").is_none());
    assert_eq!(store.pages().len(), 1);
}

#[test]
fn delete_page_leaves_test_case_steps_dangling() {
    let mut store = PageStore::seeded();
    store.delete_page("login-page").unwrap();

    // Steps still reference the deleted page; there is no cascade.
    let case = store.test_case("tc-1").unwrap();
    assert_eq!(case.steps.len(), 3);
    assert!(case.steps.iter().all(|s| s.page_id == "login-page"));
}

// ============================================================================
// Locator mutations
// ============================================================================

#[test]
fn add_locator_assigns_unique_ids() {
    let mut store = PageStore::seeded();
    let a = store
        .add_locator("dashboard-page", "Menu", LocatorKind::Css, ".menu")
        .unwrap();
    let b = store
        .add_locator("dashboard-page", "Menu", LocatorKind::Css, ".menu")
        .unwrap();

    assert_ne!(a, b);
    assert_eq!(store.page("dashboard-page").unwrap().locators.len(), 4);
}

#[test]
fn add_locator_to_missing_page_errors() {
    let mut store = PageStore::seeded();
    assert!(
        store
            .add_locator("nope", "Menu", LocatorKind::Css, ".menu")
            .is_err()
    );
}

#[test]
fn update_locator_applies_partial_changes() {
    let mut store = PageStore::seeded();
    store
        .update_locator(
            "login-page",
            "1",
            LocatorUpdate {
                value: Some("user-name".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let locator = store.page("login-page").unwrap().locator("1").unwrap();
    assert_eq!(locator.value, "user-name");
    assert_eq!(locator.name, "Username Field");
    assert_eq!(locator.kind, LocatorKind::Id);
}

#[test]
fn delete_missing_locator_errors() {
    let mut store = PageStore::seeded();
    assert!(store.delete_locator("login-page", "999").is_err());
}

// ============================================================================
// Method text mutations
// ============================================================================

#[test]
fn append_methods_separates_with_blank_line() {
    let mut store = PageStore::seeded();
    let id = store.add_page("Fresh").unwrap();

    store.append_page_methods(&id, "public void first() {}").unwrap();
    store.append_page_methods(&id, "public void second() {}").unwrap();

    let methods = store.page(&id).unwrap().generated_methods.clone().unwrap();
    assert_eq!(methods, "public void first() {}\n\npublic void second() {}");
}

#[test]
fn set_methods_replaces_wholesale() {
    let mut store = PageStore::seeded();
    store.update_page_methods("login-page", "public void only() {}").unwrap();

    let methods = store
        .page("login-page")
        .unwrap()
        .generated_methods
        .clone()
        .unwrap();
    assert_eq!(methods, "public void only() {}");
}

// ============================================================================
// Test data mutations
// ============================================================================

#[test]
fn test_data_crud() {
    let mut store = PageStore::seeded();
    let id = store.add_test_data("Token", "abc123", "global").unwrap();

    store
        .update_test_data(
            &id,
            TestDataUpdate {
                value: Some("xyz789".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let entry = store.test_data().iter().find(|d| d.id == id).unwrap();
    assert_eq!(entry.value, "xyz789");
    assert!(entry.is_global());

    store.delete_test_data(&id).unwrap();
    assert_eq!(store.test_data().len(), 4);
}

#[test]
fn test_data_scope_is_a_soft_reference() {
    let mut store = PageStore::seeded();
    // Scope may point at a page that never existed; nothing checks it.
    let id = store.add_test_data("Orphan", "x", "no-such-page").unwrap();
    assert_eq!(
        store.test_data().iter().find(|d| d.id == id).unwrap().scope,
        "no-such-page"
    );
}

// ============================================================================
// Test case mutations
// ============================================================================

#[test]
fn add_test_case_numbers_steps() {
    let mut store = PageStore::seeded();
    let id = store
        .add_test_case(
            "Logout",
            vec![
                step("dashboard-page", "Dashboard", "clickLogoutLink"),
                step("login-page", "Login Page", "enterUsername"),
            ],
        )
        .unwrap();

    let case = store.test_case(&id).unwrap();
    assert!(id.starts_with("tc-"));
    assert_eq!(case.steps.len(), 2);
    assert!(case.steps[0].id.starts_with("step-"));
    assert!(case.steps[0].id.ends_with("-0"));
    assert!(case.steps[1].id.ends_with("-1"));
}

#[test]
fn update_test_case_discards_saved_code() {
    let mut store = PageStore::seeded();
    store.save_test_case_code("tc-1", "// generated").unwrap();
    assert!(store.test_case("tc-1").unwrap().generated_code.is_some());

    store
        .update_test_case("tc-1", "Renamed", vec![step("login-page", "Login Page", "enterUsername")])
        .unwrap();

    let case = store.test_case("tc-1").unwrap();
    assert_eq!(case.name, "Renamed");
    assert_eq!(case.steps.len(), 1);
    assert!(case.generated_code.is_none());
}

#[test]
fn delete_missing_test_case_errors() {
    let mut store = PageStore::seeded();
    assert!(store.delete_test_case("tc-999").is_err());
}

// ============================================================================
// Observer notification
// ============================================================================

#[test]
fn observers_see_every_mutation() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut store = PageStore::seeded();
    store.subscribe(Box::new(Recorder {
        events: Rc::clone(&events),
    }));

    let id = store.add_page("Observed").unwrap();
    store.add_locator(&id, "Button", LocatorKind::Id, "btn").unwrap();
    store.delete_page(&id).unwrap();

    let seen = events.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].contains("\"event\":\"page_added\""));
    assert!(seen[1].contains("\"event\":\"locator_added\""));
    assert!(seen[2].contains("\"event\":\"page_deleted\""));
}

// ============================================================================
// Persistence — commit, reload, seed fallback
// ============================================================================

#[test]
fn commit_writes_only_dirty_collections() {
    let storage = temp_storage("dirty");
    let mut store = storage.load_store();

    store.add_test_data("Key", "Value", "global").unwrap();
    let written = store.commit(&storage).unwrap();

    assert_eq!(written, vec!["test_data"]);
    assert!(storage.data_dir().join("test_data.json").exists());
    assert!(!storage.data_dir().join("pages.json").exists());
}

#[test]
fn commit_then_reload_round_trips() {
    let storage = temp_storage("roundtrip");
    let mut store = storage.load_store();

    let id = store.add_page("Persisted Page").unwrap();
    store
        .add_locator(&id, "Save Button", LocatorKind::Css, "button.save")
        .unwrap();
    store.commit(&storage).unwrap();

    let reloaded = storage.load_store();
    let page = reloaded.page(&id).unwrap();
    assert_eq!(page.name, "Persisted Page");
    assert_eq!(page.locators.len(), 1);
    assert_eq!(page.locators[0].kind, LocatorKind::Css);
}

#[test]
fn corrupt_document_falls_back_to_seed() {
    let storage = temp_storage("corrupt");
    let mut store = storage.load_store();
    store.add_test_data("Key", "Value", "global").unwrap();
    store.commit(&storage).unwrap();

    std::fs::write(storage.data_dir().join("pages.json"), "{ not json").unwrap();

    let reloaded = storage.load_store();
    // Pages recover from the seed; the intact collection still loads.
    assert_eq!(reloaded.pages().len(), seed_pages().len());
    assert_eq!(reloaded.test_data().len(), 5);
}

#[test]
fn missing_data_dir_loads_seed() {
    let storage = temp_storage("missing");
    let store = storage.load_store();
    assert_eq!(store.pages().len(), 2);
    assert_eq!(store.test_cases().len(), 1);
}

#[test]
fn unchanged_collection_is_not_rewritten() {
    let storage = temp_storage("unchanged");
    let mut store = storage.load_store();

    let id = store.add_page("Stable").unwrap();
    assert_eq!(store.commit(&storage).unwrap(), vec!["pages"]);

    // Renaming to the identical name dirties the collection without
    // changing its serialized form.
    store.update_page_name(&id, "Stable").unwrap();
    assert!(store.commit(&storage).unwrap().is_empty());
}

#[test]
fn fingerprint_is_stable_sha1_hex() {
    assert_eq!(
        text_fingerprint("abc"),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(text_fingerprint(""), text_fingerprint(""));
}
