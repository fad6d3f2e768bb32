use pageforge::codegen::catalog::{build_catalog, parse_catalog_key, scan_methods};
use pageforge::store::seed::seed_pages;

// ============================================================================
// Method text scanning
// ============================================================================

#[test]
fn scan_finds_public_void_methods_only() {
    let text = r#"
/**
 * Clicks the login button.
 */
public void clickLoginButton() {
    driver.findElement(loginButton).click();
}

public String getText() {
    return driver.findElement(header).getText();
}
"#;

    let methods = scan_methods(text);
    assert_eq!(methods, vec!["clickLoginButton".to_string()]);
}

#[test]
fn scan_accepts_parameters() {
    let text = "public void enterUsername(String username) { }";
    assert_eq!(scan_methods(text), vec!["enterUsername".to_string()]);
}

#[test]
fn scan_skips_private_and_protected() {
    let text = r#"
private void hidden() { }
protected void alsoHidden() { }
public void visible() { }
"#;
    assert_eq!(scan_methods(text), vec!["visible".to_string()]);
}

#[test]
fn scan_of_empty_text_is_empty() {
    assert!(scan_methods("").is_empty());
}

#[test]
fn scan_skips_text_that_is_not_java_at_all() {
    assert!(scan_methods("once upon a time").is_empty());
}

#[test]
fn scan_preserves_text_order() {
    let text = "public void first() {}\npublic void second() {}";
    assert_eq!(
        scan_methods(text),
        vec!["first".to_string(), "second".to_string()]
    );
}

// ============================================================================
// Catalog building
// ============================================================================

#[test]
fn catalog_over_seed_pages() {
    let pages = seed_pages();
    let entries = build_catalog(&pages);

    let keys: Vec<String> = entries.iter().map(|e| e.key()).collect();
    assert_eq!(
        keys,
        vec![
            "login-page::Login Page::clickLoginButton",
            "login-page::Login Page::enterUsername",
            "login-page::Login Page::enterPassword",
            // getWelcomeMessage returns String and is excluded
            "dashboard-page::Dashboard::clickLogoutLink",
        ]
    );
}

#[test]
fn catalog_labels_pair_page_and_method() {
    let pages = seed_pages();
    let entries = build_catalog(&pages);
    assert_eq!(entries[0].label(), "Login Page: clickLoginButton");
}

#[test]
fn catalog_skips_pages_without_methods() {
    let mut pages = seed_pages();
    pages[0].generated_methods = None;
    let entries = build_catalog(&pages);
    assert!(entries.iter().all(|e| e.page_id == "dashboard-page"));
}

// ============================================================================
// Catalog key parsing
// ============================================================================

#[test]
fn parse_key_splits_three_segments() {
    assert_eq!(
        parse_catalog_key("login-page::Login Page::clickLoginButton"),
        Some((
            "login-page".to_string(),
            "Login Page".to_string(),
            "clickLoginButton".to_string()
        ))
    );
}

#[test]
fn parse_key_rejects_short_keys() {
    assert_eq!(parse_catalog_key("login-page::clickLoginButton"), None);
    assert_eq!(parse_catalog_key("clickLoginButton"), None);
}

#[test]
fn parse_key_ignores_extra_segments() {
    let parsed = parse_catalog_key("a::b::c::d").unwrap();
    assert_eq!(parsed.2, "c");
}
