mod attributed;

pub use attributed::{
    attributed, merge_translated, AttributeKey, AttributeOverlay, AttributeRun, AttributeValue,
    AttributedStringConfig, AttributedText, Attributes, StringAttributes,
};

/// Marker characters hosts embed in source strings; never shown to the user.
pub const SANITIZED_MARKERS: [char; 2] = ['⌘', '⁂'];

pub fn sanitized(text: &str) -> String {
    text.chars()
        .filter(|c| !SANITIZED_MARKERS.contains(c))
        .collect()
}
