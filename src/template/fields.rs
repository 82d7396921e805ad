use crate::{
    foundation::error::{CoverError, CoverResult},
    template::kind::TemplateKind,
};

/// Names of the editable text fields across both templates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum FieldKey {
    /// Main title.
    #[serde(rename = "title")]
    Title,
    /// Line under the title.
    #[serde(rename = "subtitle")]
    Subtitle,
    /// Edition year range.
    #[serde(rename = "year")]
    Year,
    /// First feature line.
    #[serde(rename = "feature1")]
    Feature1,
    /// Second feature line.
    #[serde(rename = "feature2")]
    Feature2,
    /// Third feature line.
    #[serde(rename = "feature3")]
    Feature3,
    /// Author name.
    #[serde(rename = "author")]
    Author,
    /// Closing text at the bottom of the cover.
    #[serde(rename = "bottomText")]
    BottomText,
}

impl FieldKey {
    /// Stable key name.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Subtitle => "subtitle",
            FieldKey::Year => "year",
            FieldKey::Feature1 => "feature1",
            FieldKey::Feature2 => "feature2",
            FieldKey::Feature3 => "feature3",
            FieldKey::Author => "author",
            FieldKey::BottomText => "bottomText",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldKey {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "title" => FieldKey::Title,
            "subtitle" => FieldKey::Subtitle,
            "year" => FieldKey::Year,
            "feature1" => FieldKey::Feature1,
            "feature2" => FieldKey::Feature2,
            "feature3" => FieldKey::Feature3,
            "author" => FieldKey::Author,
            "bottomText" => FieldKey::BottomText,
            other => {
                return Err(CoverError::validation(format!(
                    "unknown text field '{other}'"
                )));
            }
        })
    }
}

/// One entry of a template's fixed text schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FieldSpec {
    /// Field key.
    pub key: FieldKey,
    /// Control label.
    pub label: &'static str,
    /// Value the field starts with when the template mounts.
    pub default: &'static str,
    /// Edited with a multi-line control.
    pub multiline: bool,
}

const fn field(key: FieldKey, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        default,
        multiline: false,
    }
}

const STUDY_SCHEMA: [FieldSpec; 6] = [
    field(FieldKey::Title, "Title", "VTNE"),
    field(FieldKey::Subtitle, "Subtitle", "PREP STUDY GUIDE"),
    field(FieldKey::Year, "Year", "2025-2026"),
    field(FieldKey::Feature1, "Feature Text", "EXTRA 399+ STUDY TOOLS"),
    field(FieldKey::Author, "Author", "AIDEN WHITLOCK"),
    field(
        FieldKey::BottomText,
        "Bottom Text",
        "VETERINARY TECHNICIAN LICENSE",
    ),
];

const TEAS_SCHEMA: [FieldSpec; 7] = [
    field(FieldKey::Title, "Main Title", "ATI TEAS"),
    field(FieldKey::Subtitle, "Subtitle", "EXAM PREP"),
    field(FieldKey::Year, "Year", "2024-2025"),
    field(FieldKey::Feature1, "Feature 1", "200 Flashcards"),
    field(FieldKey::Feature2, "Feature 2", "7 Full-Length Tests"),
    field(FieldKey::Feature3, "Feature 3", "50 HRs E-Learning"),
    FieldSpec {
        key: FieldKey::BottomText,
        label: "Bottom Text",
        default: "The Most Updated Guide with Practice Tests to Pass the Exam on Your First Attempt",
        multiline: true,
    },
];

/// Fixed text schema for a template, in control order.
pub fn schema(kind: TemplateKind) -> &'static [FieldSpec] {
    match kind {
        TemplateKind::Study => &STUDY_SCHEMA,
        TemplateKind::Teas => &TEAS_SCHEMA,
    }
}

/// Per-template text values. The key set is fixed by the template schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFields {
    kind: TemplateKind,
    values: Vec<String>,
}

impl TextFields {
    /// Fields populated with the template's default strings.
    pub fn defaults(kind: TemplateKind) -> Self {
        Self {
            kind,
            values: schema(kind).iter().map(|f| f.default.to_string()).collect(),
        }
    }

    /// Template this field set belongs to.
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Static schema backing this field set.
    pub fn schema(&self) -> &'static [FieldSpec] {
        schema(self.kind)
    }

    /// Current value of `key`, or `None` if the template has no such field.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.index_of(key).map(|i| self.values[i].as_str())
    }

    /// Current value of `key`, or the empty string if the template has no such field.
    pub fn text(&self, key: FieldKey) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Overwrite `key` with `value`. Any string is accepted, including the empty string.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) -> CoverResult<()> {
        let i = self.index_of(key).ok_or_else(|| {
            CoverError::validation(format!(
                "template '{}' has no text field '{key}'",
                self.kind
            ))
        })?;
        self.values[i] = value.into();
        Ok(())
    }

    /// Entries in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        self.schema()
            .iter()
            .zip(&self.values)
            .map(|(field, v)| (field.key, v.as_str()))
    }

    fn index_of(&self, key: FieldKey) -> Option<usize> {
        self.schema().iter().position(|f| f.key == key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/fields.rs"]
mod tests;
