use regex::Regex;

use crate::model::page::PageObject;

// ============================================================================
// Method catalog — advisory scan of accumulated method text
// ============================================================================

/// One selectable method discovered in a page's accumulated method text.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub page_id: String,
    pub page_name: String,
    pub method_name: String,
}

impl CatalogEntry {
    /// Stable lookup key used when assembling test case steps.
    pub fn key(&self) -> String {
        format!("{}::{}::{}", self.page_id, self.page_name, self.method_name)
    }

    /// Display label for selection lists.
    pub fn label(&self) -> String {
        format!("{}: {}", self.page_name, self.method_name)
    }
}

/// Extract method names from accumulated method text.
///
/// Matches public, void, single-line method declarations only. Anything
/// else (non-void returns, non-public visibility, signatures split across
/// lines) is silently skipped; the catalog feeds a selection list, not a
/// compiler.
pub fn scan_methods(text: &str) -> Vec<String> {
    let re = Regex::new(r"public\s+void\s+([a-zA-Z0-9_]+)\s*\([^)]*\)").unwrap();
    re.captures_iter(text).map(|c| c[1].to_string()).collect()
}

/// Build the flat catalog across all pages, in page order then text order.
pub fn build_catalog(pages: &[PageObject]) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for page in pages {
        if let Some(methods) = &page.generated_methods {
            for method_name in scan_methods(methods) {
                entries.push(CatalogEntry {
                    page_id: page.id.clone(),
                    page_name: page.name.clone(),
                    method_name,
                });
            }
        }
    }

    entries
}

/// Split a `pageId::pageName::methodName` catalog key back into its parts.
/// Returns `None` when fewer than three segments are present; extra
/// segments beyond the third are ignored.
pub fn parse_catalog_key(key: &str) -> Option<(String, String, String)> {
    let parts: Vec<&str> = key.split("::").collect();
    if parts.len() < 3 {
        return None;
    }
    Some((parts[0].to_string(), parts[1].to_string(), parts[2].to_string()))
}
