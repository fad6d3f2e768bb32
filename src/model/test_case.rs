use serde::{Deserialize, Serialize};

/// One step of a test case: a denormalized reference into a page's
/// accumulated method text.
///
/// `page_name` is cached at step creation and not updated when the page is
/// renamed. Deleting a page or rewriting its method text does NOT cascade
/// here; steps may dangle, which is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseStep {
    pub id: String,
    pub page_id: String,
    pub page_name: String,
    pub method_name: String,
}

/// An ordered sequence of method-step references spanning one or more pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub name: String,
    pub steps: Vec<TestCaseStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<String>,
}
