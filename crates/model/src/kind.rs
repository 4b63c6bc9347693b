use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The type tag of a model field, determining which validator runs for it.
///
/// Tags round-trip through their wire names (`"text"`, `"datetime-local"`, …).
/// A name that matches no known tag parses to [`FieldType::Unrecognized`],
/// which the dispatch table routes to the unsupported-type validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Textarea,
    Email,
    Password,
    Url,
    Tel,
    Number,
    Range,
    Boolean,
    Checkbox,
    Radio,
    Date,
    Time,
    DateTime,
    Object,
    Array,
    Class,
    File,
    Color,
    Select,
    Hidden,
    Enum,
    /// A tag outside the known set.
    Unrecognized(String),
}

impl FieldType {
    /// Every recognized tag, in declaration order.
    pub const ALL: [FieldType; 22] = [
        Self::String,
        Self::Textarea,
        Self::Email,
        Self::Password,
        Self::Url,
        Self::Tel,
        Self::Number,
        Self::Range,
        Self::Boolean,
        Self::Checkbox,
        Self::Radio,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Object,
        Self::Array,
        Self::Class,
        Self::File,
        Self::Color,
        Self::Select,
        Self::Hidden,
        Self::Enum,
    ];

    /// The wire name of this tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::String => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Password => "password",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Range => "range",
            Self::Boolean => "boolean",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime-local",
            Self::Object => "object",
            Self::Array => "array",
            Self::Class => "class",
            Self::File => "file",
            Self::Color => "color",
            Self::Select => "select",
            Self::Hidden => "hidden",
            Self::Enum => "enum",
            Self::Unrecognized(tag) => tag,
        }
    }

    /// The HTML input type a form renderer should use for this field.
    #[must_use]
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::String | Self::Textarea | Self::Email | Self::Password | Self::Url | Self::Tel => {
                "text"
            }
            Self::Number | Self::Range => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime-local",
            Self::Color => "color",
            Self::File => "file",
            Self::Radio => "radio",
            Self::Checkbox | Self::Boolean => "checkbox",
            Self::Hidden => "hidden",
            Self::Select | Self::Enum => "select",
            Self::Class | Self::Object | Self::Array => "object",
            Self::Unrecognized(_) => "text",
        }
    }

    /// Whether fields of this type may link to a nested model.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Class | Self::Object)
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::ALL
            .iter()
            .find(|t| t.tag() == s)
            .cloned()
            .unwrap_or_else(|| Self::Unrecognized(s.to_owned())))
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        match t {
            FieldType::Unrecognized(tag) => tag,
            other => other.tag().to_owned(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
