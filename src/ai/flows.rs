use serde::Deserialize;

use crate::ai::backend::TextInference;
use crate::codegen::identifier::to_camel_case;
use crate::error::StudioError;
use crate::model::locator::Locator;

// ============================================================================
// Locator suggestion flow
// ============================================================================

/// Inputs for the locator suggestion flow.
#[derive(Debug, Clone)]
pub struct SuggestLocatorRequest {
    /// HTML of the element to find a locator for
    pub html: String,
    /// Full HTML source of the page
    pub page_source: String,
    /// URL of the page
    pub url: String,
}

/// The model's locator suggestion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorSuggestion {
    pub locator: String,
    /// Raw kind string from the model (`xpath`, `css` or `id`); parsed
    /// leniently downstream, unknown kinds fall back to xpath
    pub locator_type: String,
    pub confidence: f64,
    pub explanation: String,
}

pub fn build_suggest_prompt(request: &SuggestLocatorRequest) -> String {
    format!(
        r#"You are an AI expert in suggesting the best locator for a given element on a webpage.

You are given the HTML of the element, the full HTML source code of the page, and the URL of the page.

You should suggest the best locator (XPath, CSS, or ID) for the element, and explain why you chose that locator.

Be sure to include a confidence score for your suggestion.

Element HTML: {html}
Page Source: {page_source}
URL: {url}

Return ONLY valid JSON matching this exact schema:
{{
  "locator": "the suggested locator string",
  "locatorType": "xpath|css|id",
  "confidence": 0.9,
  "explanation": "why this locator was chosen"
}}

Respond with ONLY valid JSON, no explanation outside the JSON."#,
        html = request.html,
        page_source = request.page_source,
        url = request.url,
    )
}

/// Ask the model for the best locator for an element.
pub fn suggest_locator(
    backend: &dyn TextInference,
    request: &SuggestLocatorRequest,
) -> Result<LocatorSuggestion, StudioError> {
    if request.html.is_empty() {
        return Err(StudioError::InvalidInput("element HTML cannot be empty".to_string()));
    }
    if request.page_source.is_empty() {
        return Err(StudioError::InvalidInput("page source cannot be empty".to_string()));
    }
    if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
        return Err(StudioError::InvalidInput(format!("'{}' is not a valid URL", request.url)));
    }

    let prompt = build_suggest_prompt(request);
    let response = backend.infer(&prompt)?;

    let suggestion: LocatorSuggestion =
        serde_json::from_str(&response).map_err(|e| StudioError::AiResponse {
            flow: "suggest-locator".to_string(),
            message: format!("unparsable JSON: {}", e),
        })?;

    if !(0.0..=1.0).contains(&suggestion.confidence) {
        return Err(StudioError::AiResponse {
            flow: "suggest-locator".to_string(),
            message: format!("confidence {} outside [0, 1]", suggestion.confidence),
        });
    }

    Ok(suggestion)
}

// ============================================================================
// Method generation flow
// ============================================================================

/// Inputs for the method generation flow.
#[derive(Debug, Clone)]
pub struct GenerateMethodsRequest {
    pub page_name: String,
    pub locators: Vec<Locator>,
    /// Natural language description of the desired interaction
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct GenerateMethodsResponse {
    methods: String,
}

/// One prompt line per locator. Carries the normalized identifier alongside
/// name/kind/value; the model is instructed to reference locators
/// exclusively by that identifier.
fn locator_prompt_line(locator: &Locator) -> String {
    format!(
        "- Name: \"{}\", camelCaseName: \"{}\", Type: {}, Value: \"{}\"",
        locator.name,
        to_camel_case(&locator.name),
        locator.kind.as_str(),
        locator.value,
    )
}

pub fn build_methods_prompt(request: &GenerateMethodsRequest) -> String {
    let locator_lines = request
        .locators
        .iter()
        .map(locator_prompt_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert Selenium test automation engineer who writes clean, maintainable Java code.
Your task is to generate Java methods for a Page Object class based on a natural language description.

You will be given the Page Object class name, a list of available locators, and a description of the desired user interaction.

Rules:
1.  Generate one or more public void Java methods that perform the actions described.
2.  Use the provided locators. The locators are defined as static 'By' variables in the class. You must refer to them by their camelCased variable names.
3.  Assume a 'WebDriver driver' instance is available in the class scope. You should also assume the driver has been initialized.
4.  Each generated method should have a Javadoc comment explaining what it does.
5.  Do not include the class definition or the locator definitions in your output. Only generate the methods.
6.  If the description implies interacting with input fields, generate methods that accept string parameters (e.g., 'public void enterUsername(String username)').
7.  The generated code should be only the method(s), without any surrounding markdown or explanations.

Here is the context for the page object:
Page Object Class Name: {page_name}Page

Available Locators (use the camelCaseName for variable names):
{locator_lines}

User Interaction Description:
"{description}"

Return ONLY valid JSON matching this exact schema:
{{"methods": "the generated Java methods as a single string"}}

Respond with ONLY valid JSON, no explanation outside the JSON."#,
        page_name = request.page_name,
        locator_lines = locator_lines,
        description = request.description,
    )
}

/// Ask the model for new page object methods. Returns the raw method text;
/// the caller appends it to the page's accumulated methods.
pub fn generate_methods(
    backend: &dyn TextInference,
    request: &GenerateMethodsRequest,
) -> Result<String, StudioError> {
    if request.description.trim().is_empty() {
        return Err(StudioError::InvalidInput("description cannot be empty".to_string()));
    }

    let prompt = build_methods_prompt(request);
    let response = backend.infer(&prompt)?;

    let parsed: GenerateMethodsResponse =
        serde_json::from_str(&response).map_err(|e| StudioError::AiResponse {
            flow: "generate-methods".to_string(),
            message: format!("unparsable JSON: {}", e),
        })?;

    Ok(parsed.methods)
}
