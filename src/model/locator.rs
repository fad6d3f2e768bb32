use serde::{Deserialize, Serialize};

// ============================================================================
// Locator model
// ============================================================================

/// How a locator finds its element, mirroring Selenium's `By` factories.
///
/// Serialized names match the persisted document format (`id`, `name`,
/// `className`, `tagName`, `linkText`, `partialLinkText`, `css`, `xpath`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocatorKind {
    Id,
    Name,
    ClassName,
    TagName,
    LinkText,
    PartialLinkText,
    Css,
    Xpath,
}

impl LocatorKind {
    pub const ALL: [LocatorKind; 8] = [
        LocatorKind::Id,
        LocatorKind::Name,
        LocatorKind::ClassName,
        LocatorKind::TagName,
        LocatorKind::LinkText,
        LocatorKind::PartialLinkText,
        LocatorKind::Css,
        LocatorKind::Xpath,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorKind::Id => "id",
            LocatorKind::Name => "name",
            LocatorKind::ClassName => "className",
            LocatorKind::TagName => "tagName",
            LocatorKind::LinkText => "linkText",
            LocatorKind::PartialLinkText => "partialLinkText",
            LocatorKind::Css => "css",
            LocatorKind::Xpath => "xpath",
        }
    }

    /// Lenient parse for kind strings arriving from free text (CLI arguments,
    /// model suggestions). Unrecognized strings fall back to `Xpath` rather
    /// than erroring.
    pub fn parse_loose(s: &str) -> LocatorKind {
        match s {
            "id" => LocatorKind::Id,
            "name" => LocatorKind::Name,
            "className" => LocatorKind::ClassName,
            "tagName" => LocatorKind::TagName,
            "linkText" => LocatorKind::LinkText,
            "partialLinkText" => LocatorKind::PartialLinkText,
            "css" => LocatorKind::Css,
            "xpath" => LocatorKind::Xpath,
            _ => LocatorKind::Xpath,
        }
    }
}

/// A named rule for finding one element on a page.
///
/// `id` is assigned at creation and never changes; `name`, `kind` and
/// `value` are mutable in place. Two locators on the same page may carry
/// the same name (and may normalize to the same identifier); no
/// uniqueness is enforced beyond the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locator {
    pub id: String,

    /// Human label; also the source of the generated field name
    pub name: String,

    #[serde(rename = "type")]
    pub kind: LocatorKind,

    pub value: String,
}
