//! Rich-text overlays for alert titles and messages.
//!
//! An overlay is authored against a specific string: primary attributes cover
//! the whole string, secondary attributes target named substrings. When the
//! string is replaced by a translation, only the whole-string attributes
//! survive, because the named substrings rarely appear verbatim in the
//! translated text.

use crate::text::sanitized;
use crate::util::unique;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    Font,
    ForegroundColor,
    BackgroundColor,
    Underline,
    Strikethrough,
    Kern,
    Link,
    Custom(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AttributeValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

pub type Attributes = BTreeMap<AttributeKey, AttributeValue>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StringAttributes {
    attributes: Attributes,
    string_ranges: Vec<String>,
}

impl StringAttributes {
    /// Panics if `attributes` or `string_ranges` is empty.
    pub fn new(attributes: Attributes, string_ranges: Vec<String>) -> Self {
        assert!(
            !attributes.is_empty() && !string_ranges.is_empty(),
            "StringAttributes requires non-empty attributes and string ranges"
        );
        Self {
            attributes,
            string_ranges: unique(string_ranges.into_iter().filter(|s| !s.is_empty())),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn string_ranges(&self) -> &[String] {
        &self.string_ranges
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttributedStringConfig {
    primary_attributes: Attributes,
    secondary_attributes: Option<Vec<StringAttributes>>,
}

impl AttributedStringConfig {
    /// Panics if `primary_attributes` is empty.
    pub fn new(
        primary_attributes: Attributes,
        secondary_attributes: Option<Vec<StringAttributes>>,
    ) -> Self {
        assert!(
            !primary_attributes.is_empty(),
            "AttributedStringConfig requires non-empty primary attributes"
        );
        Self {
            primary_attributes,
            secondary_attributes,
        }
    }

    pub fn primary_attributes(&self) -> &Attributes {
        &self.primary_attributes
    }

    pub fn secondary_attributes(&self) -> Option<&[StringAttributes]> {
        self.secondary_attributes.as_deref()
    }
}

/// A byte range of an [`AttributedText`] and the attributes applied to it.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRun {
    pub range: Range<usize>,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText {
    text: String,
    runs: Vec<AttributeRun>,
}

impl AttributedText {
    pub fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Attributes applied uniformly across the whole string.
    pub fn uniform_attributes(&self) -> Attributes {
        let mut out = Attributes::new();
        for run in &self.runs {
            if run.range.start == 0 && run.range.end == self.text.len() {
                out.extend(run.attributes.clone());
            }
        }
        out
    }
}

/// Renders `text` with `config`: primary attributes over the whole string,
/// then each secondary attribute set over the first occurrence of each of its
/// substrings. Substrings absent from `text` are skipped.
pub fn attributed(text: &str, config: &AttributedStringConfig) -> AttributedText {
    let mut runs = vec![AttributeRun {
        range: 0..text.len(),
        attributes: config.primary_attributes.clone(),
    }];

    for secondary in config.secondary_attributes().unwrap_or_default() {
        for needle in secondary.string_ranges() {
            if let Some(start) = text.find(needle.as_str()) {
                runs.push(AttributeRun {
                    range: start..start + needle.len(),
                    attributes: secondary.attributes.clone(),
                });
            }
        }
    }

    AttributedText {
        text: text.to_owned(),
        runs,
    }
}

/// Replaces the plain text of `original` with `translated`.
///
/// Returns `original` itself when the text did not change. Otherwise the new
/// text carries only the whole-string attributes of `original`; substring runs
/// are dropped.
pub fn merge_translated<'a>(original: &'a AttributedText, translated: &str) -> Cow<'a, AttributedText> {
    if original.text == translated {
        return Cow::Borrowed(original);
    }

    let uniform = original.uniform_attributes();
    let runs = if uniform.is_empty() {
        Vec::new()
    } else {
        vec![AttributeRun {
            range: 0..translated.len(),
            attributes: uniform,
        }]
    };

    Cow::Owned(AttributedText {
        text: translated.to_owned(),
        runs,
    })
}

/// An [`AttributedStringConfig`] plus the text it was authored against.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeOverlay {
    config: AttributedStringConfig,
    anchor: Option<String>,
}

impl AttributeOverlay {
    pub fn new(config: AttributedStringConfig) -> Self {
        Self {
            config,
            anchor: None,
        }
    }

    pub fn config(&self) -> &AttributedStringConfig {
        &self.config
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Pins the overlay to `source` unless it is already pinned.
    pub fn anchored_to(&self, source: &str) -> Self {
        Self {
            config: self.config.clone(),
            anchor: Some(
                self.anchor
                    .clone()
                    .unwrap_or_else(|| sanitized(source)),
            ),
        }
    }

    pub fn render(&self, text: &str) -> AttributedText {
        let anchor = self.anchor.as_deref().unwrap_or(text);
        let original = attributed(anchor, &self.config);
        merge_translated(&original, text).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(AttributeKey::Font, AttributeValue::Text("bold".into()));
        attrs
    }

    fn red() -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(
            AttributeKey::ForegroundColor,
            AttributeValue::Text("red".into()),
        );
        attrs
    }

    fn config() -> AttributedStringConfig {
        AttributedStringConfig::new(
            bold(),
            Some(vec![StringAttributes::new(red(), vec!["file".into()])]),
        )
    }

    #[test]
    fn attributed_applies_primary_and_secondary_runs() {
        let text = attributed("Delete file?", &config());
        assert_eq!(text.runs().len(), 2);
        assert_eq!(text.runs()[0].range, 0..12);
        assert_eq!(text.runs()[1].range, 7..11);
        assert_eq!(text.runs()[1].attributes, red());
    }

    #[test]
    fn attributed_skips_missing_substrings() {
        let text = attributed("Delete folder?", &config());
        assert_eq!(text.runs().len(), 1);
    }

    #[test]
    fn string_attributes_drop_empty_and_duplicate_ranges() {
        let attrs = StringAttributes::new(
            red(),
            vec!["a".into(), String::new(), "b".into(), "a".into()],
        );
        assert_eq!(attrs.string_ranges(), ["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    #[should_panic]
    fn config_rejects_empty_primary_attributes() {
        let _ = AttributedStringConfig::new(Attributes::new(), None);
    }

    #[test]
    #[should_panic]
    fn string_attributes_reject_empty_ranges() {
        let _ = StringAttributes::new(red(), Vec::new());
    }

    #[test]
    fn merge_reuses_original_when_text_unchanged() {
        let original = attributed("Delete file?", &config());
        let merged = merge_translated(&original, "Delete file?");
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(merged.runs(), original.runs());
    }

    #[test]
    fn merge_keeps_only_uniform_attributes_for_new_text() {
        let original = attributed("Delete file?", &config());
        let merged = merge_translated(&original, "Supprimer le fichier ?");
        assert_eq!(merged.text(), "Supprimer le fichier ?");
        assert_eq!(merged.runs().len(), 1);
        assert_eq!(merged.runs()[0].range, 0..merged.text().len());
        assert_eq!(merged.runs()[0].attributes, bold());
    }

    #[test]
    fn merge_of_plain_text_stays_plain() {
        let original = AttributedText::plain("Hello");
        let merged = merge_translated(&original, "Bonjour");
        assert!(merged.runs().is_empty());
    }

    #[test]
    fn overlay_renders_fully_until_text_diverges_from_anchor() {
        let overlay = AttributeOverlay::new(config()).anchored_to("Delete file?");
        assert_eq!(overlay.render("Delete file?").runs().len(), 2);
        assert_eq!(overlay.render("Supprimer le fichier ?").runs().len(), 1);
    }

    #[test]
    fn overlay_keeps_its_first_anchor() {
        let overlay = AttributeOverlay::new(config())
            .anchored_to("Delete file?")
            .anchored_to("Supprimer le fichier ?");
        assert_eq!(overlay.anchor(), Some("Delete file?"));
    }
}
