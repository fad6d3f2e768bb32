use crate::codegen::identifier::to_camel_case;
use crate::model::locator::{Locator, LocatorKind};
use crate::model::page::PageObject;

// ============================================================================
// Java page object class rendering
// ============================================================================

/// Selenium `By` factory invocation for each locator kind.
pub fn by_factory(kind: LocatorKind) -> &'static str {
    match kind {
        LocatorKind::Id => "By.id",
        LocatorKind::Name => "By.name",
        LocatorKind::ClassName => "By.className",
        LocatorKind::TagName => "By.tagName",
        LocatorKind::LinkText => "By.linkText",
        LocatorKind::PartialLinkText => "By.partialLinkText",
        LocatorKind::Css => "By.cssSelector",
        LocatorKind::Xpath => "By.xpath",
    }
}

/// Class name: page name with all whitespace removed, plus the fixed suffix.
pub fn class_name(page_name: &str) -> String {
    let compact: String = page_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}Page", compact)
}

/// Field declaration line for one locator. Double quotes inside the value
/// are backslash-escaped; nothing else is touched.
pub fn locator_field_line(locator: &Locator) -> String {
    format!(
        "    public static final By {} = {}(\"{}\");",
        to_camel_case(&locator.name),
        by_factory(locator.kind),
        locator.value.replace('"', "\\\"")
    )
}

const METHODS_PLACEHOLDER: &str = r#"
    // Add methods to interact with the elements here
    // For example:
    /*
    public void clickLoginButton() {
        driver.findElement(loginButton).click();
    }
    */"#;

/// Render the complete page object class source.
///
/// Pure function of `(page.name, ordered locators, extra_methods)`:
/// re-rendering identical input yields byte-identical output. Non-empty
/// `extra_methods` is emitted verbatim after the field block; the text is
/// never validated, so malformed method bodies pass straight through.
pub fn render_page_class(page: &PageObject, extra_methods: Option<&str>) -> String {
    let class_name = class_name(&page.name);

    let locators_code = page
        .locators
        .iter()
        .map(locator_field_line)
        .collect::<Vec<_>>()
        .join("\n");

    let methods_code = match extra_methods {
        Some(methods) if !methods.is_empty() => format!("\n{}", methods),
        _ => METHODS_PLACEHOLDER.to_string(),
    };

    format!(
        r#"
import org.openqa.selenium.By;
import org.openqa.selenium.WebDriver;

public class {class_name} {{

    private WebDriver driver;

    public {class_name}(WebDriver driver) {{
        this.driver = driver;
    }}

    // Locators for {page_name}
{locators_code}
{methods_code}
}}
"#,
        class_name = class_name,
        page_name = page.name,
        locators_code = locators_code,
        methods_code = methods_code,
    )
    .trim()
    .to_string()
}
