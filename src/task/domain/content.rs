//! Rich-text extraction from structured post bodies.

use serde_json::Value;

const TEXT_COMPONENT: &str = "TEXT";

/// Extracts readable text from a post body.
///
/// A body that parses as JSON with a `COMPS` array yields its `TEXT`
/// components joined by newlines, in document order. Components of any other
/// type are skipped whatever their shape. Any other body is returned as is.
/// When the result is empty, `plain_fallback` is returned instead.
#[must_use]
pub fn extract_rich_text(content: &str, plain_fallback: &str) -> String {
    let extracted = serde_json::from_str::<Value>(content)
        .ok()
        .and_then(|document| match document.get("COMPS") {
            Some(Value::Array(components)) => Some(join_text_components(components)),
            _ => None,
        })
        .unwrap_or_else(|| content.to_owned());

    if extracted.is_empty() {
        plain_fallback.to_owned()
    } else {
        extracted
    }
}

fn join_text_components(components: &[Value]) -> String {
    components
        .iter()
        .filter(|component| {
            component.get("COMP_TYPE").and_then(Value::as_str) == Some(TEXT_COMPONENT)
        })
        .map(|component| {
            component
                .get("COMP_DETAIL")
                .and_then(|detail| detail.get("CONTENTS"))
                .and_then(Value::as_str)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
