use crate::model::locator::{Locator, LocatorKind};
use crate::model::page::PageObject;
use crate::model::test_case::{TestCase, TestCaseStep};
use crate::model::test_data::TestData;

// ============================================================================
// Seed dataset — substituted whenever a persisted document is absent or
// unparsable, so a fresh workspace starts populated
// ============================================================================

const LOGIN_PAGE_METHODS: &str = r#"/**
 * Clicks the login button.
 */
public void clickLoginButton() {
    driver.findElement(loginButton).click();
}

/**
 * Enters the provided username.
 * @param username The username to enter.
 */
public void enterUsername(String username) {
    driver.findElement(usernameField).sendKeys(username);
}

/**
 * Enters the provided password.
 * @param password The password to enter.
 */
public void enterPassword(String password) {
    driver.findElement(passwordField).sendKeys(password);
}"#;

const DASHBOARD_METHODS: &str = r#"/**
 * Returns the welcome message text.
 * @return The welcome message.
 */
public String getWelcomeMessage() {
    return driver.findElement(welcomeHeader).getText();
}

/**
 * Clicks the logout link.
 */
public void clickLogoutLink() {
    driver.findElement(logoutLink).click();
}"#;

pub fn seed_pages() -> Vec<PageObject> {
    vec![
        PageObject {
            id: "login-page".to_string(),
            name: "Login Page".to_string(),
            locators: vec![
                Locator {
                    id: "1".to_string(),
                    name: "Username Field".to_string(),
                    kind: LocatorKind::Id,
                    value: "username".to_string(),
                },
                Locator {
                    id: "2".to_string(),
                    name: "Password Field".to_string(),
                    kind: LocatorKind::Id,
                    value: "password".to_string(),
                },
                Locator {
                    id: "3".to_string(),
                    name: "Login Button".to_string(),
                    kind: LocatorKind::Xpath,
                    value: "//button[text()='Login']".to_string(),
                },
            ],
            generated_methods: Some(LOGIN_PAGE_METHODS.to_string()),
            page_source: None,
            page_url: None,
        },
        PageObject {
            id: "dashboard-page".to_string(),
            name: "Dashboard".to_string(),
            locators: vec![
                Locator {
                    id: "4".to_string(),
                    name: "Welcome Header".to_string(),
                    kind: LocatorKind::Css,
                    value: "h1.dashboard-welcome".to_string(),
                },
                Locator {
                    id: "5".to_string(),
                    name: "Logout Link".to_string(),
                    kind: LocatorKind::LinkText,
                    value: "Logout".to_string(),
                },
            ],
            generated_methods: Some(DASHBOARD_METHODS.to_string()),
            page_source: None,
            page_url: None,
        },
    ]
}

pub fn seed_test_data() -> Vec<TestData> {
    vec![
        TestData {
            id: "data-1".to_string(),
            key: "Application URL".to_string(),
            value: "https://example.com".to_string(),
            scope: "global".to_string(),
        },
        TestData {
            id: "data-2".to_string(),
            key: "Admin Username".to_string(),
            value: "admin".to_string(),
            scope: "global".to_string(),
        },
        TestData {
            id: "data-3".to_string(),
            key: "Admin Password".to_string(),
            value: "password123".to_string(),
            scope: "global".to_string(),
        },
        TestData {
            id: "data-4".to_string(),
            key: "Username".to_string(),
            value: "testuser".to_string(),
            scope: "login-page".to_string(),
        },
    ]
}

pub fn seed_test_cases() -> Vec<TestCase> {
    vec![TestCase {
        id: "tc-1".to_string(),
        name: "Successful Login".to_string(),
        steps: vec![
            TestCaseStep {
                id: "step-1-1".to_string(),
                page_id: "login-page".to_string(),
                page_name: "Login Page".to_string(),
                method_name: "enterUsername".to_string(),
            },
            TestCaseStep {
                id: "step-1-2".to_string(),
                page_id: "login-page".to_string(),
                page_name: "Login Page".to_string(),
                method_name: "enterPassword".to_string(),
            },
            TestCaseStep {
                id: "step-1-3".to_string(),
                page_id: "login-page".to_string(),
                page_name: "Login Page".to_string(),
                method_name: "clickLoginButton".to_string(),
            },
        ],
        generated_code: None,
    }]
}
