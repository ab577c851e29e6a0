use crate::text::sanitized;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Capitalization {
    None,
    Words,
    #[default]
    Sentences,
    AllCharacters,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClearButtonMode {
    #[default]
    Never,
    WhileEditing,
    UnlessEditing,
    Always,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Correction {
    #[default]
    Default,
    No,
    Yes,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum KeyboardAppearance {
    #[default]
    Default,
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum KeyboardType {
    #[default]
    Default,
    Ascii,
    NumbersAndPunctuation,
    Url,
    NumberPad,
    PhonePad,
    EmailAddress,
    DecimalPad,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
    Justified,
    Natural,
}

/// Configuration of the single text field on a text input alert.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextFieldAttributes {
    pub placeholder_text: Option<String>,
    pub sample_text: Option<String>,
    pub capitalization: Capitalization,
    pub clear_button_mode: ClearButtonMode,
    pub correction: Correction,
    pub is_secure_text_entry: bool,
    pub keyboard_appearance: KeyboardAppearance,
    pub keyboard_type: KeyboardType,
    pub text_alignment: TextAlignment,
}

impl TextFieldAttributes {
    pub fn replacing_placeholder_text<S: Into<String>>(&self, placeholder_text: S) -> Self {
        Self {
            placeholder_text: Some(placeholder_text.into()),
            ..self.clone()
        }
    }

    pub fn replacing_sample_text<S: Into<String>>(&self, sample_text: S) -> Self {
        Self {
            sample_text: Some(sample_text.into()),
            ..self.clone()
        }
    }

    pub(crate) fn sanitized(&self) -> Self {
        Self {
            placeholder_text: self.placeholder_text.as_deref().map(sanitized),
            sample_text: self.sample_text.as_deref().map(sanitized),
            ..self.clone()
        }
    }
}
