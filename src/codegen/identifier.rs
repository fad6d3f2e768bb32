// ============================================================================
// Identifier normalization — label text to camelCase variable name
// ============================================================================

/// Convert a human-readable label into a lower-camel-case identifier.
///
/// `"Login Button"` → `"loginButton"`, `"XML Parser"` → `"xMLParser"`,
/// `"id"` → `"id"`. The transform is total and never fails: input with no
/// letters passes through unchanged apart from whitespace removal, and
/// leading digits are left as-is even though the result is then not a
/// valid identifier.
///
/// Every consumer that needs to correlate a label with a generated field
/// name (locator rendering, method generation payloads, catalog indexing)
/// must go through this one function.
pub fn to_camel_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev: Option<char> = None;

    for (i, c) in label.chars().enumerate() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        let after_boundary = match prev {
            None => true,
            Some(p) => !(p.is_ascii_alphanumeric() || p == '_'),
        };

        // A character is re-cased when it starts the string, is an ASCII
        // uppercase letter, or is a word character right after a boundary.
        let matched = c.is_ascii_uppercase() || (is_word && (i == 0 || after_boundary));

        let mapped = if matched {
            if i == 0 {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        } else {
            c
        };

        if !mapped.is_whitespace() {
            out.push(mapped);
        }
        prev = Some(c);
    }

    out
}
