//! Semantic types and parsed annotations.
//!
//! The checker works with a closed set of runtime shapes. Declared types
//! outside that set (composites such as `number[]` or `string|number`, or
//! names the checker has no rule for) are carried verbatim as `Complex`.

use std::fmt;

/// Characters that make a declared type a composite.
const COMPLEX_TYPE_CHARS: &[char] = &['[', ']', '<', '>', '|', '&'];

/// The runtime shape of an expression, or a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SemanticType {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Object,
    Array,
    Function,
    /// An identifier whose binding is not tracked.
    Reference,
    Unknown,
    /// A lower-cased declared type outside the closed set.
    Complex(String),
}

impl SemanticType {
    /// Map a declared type name onto the closed set.
    ///
    /// The text is lower-cased first, so `Number` and `number` agree.
    pub fn from_declared(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        match lowered.as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            "undefined" => Self::Undefined,
            "object" => Self::Object,
            "array" => Self::Array,
            "function" => Self::Function,
            "reference" => Self::Reference,
            "unknown" => Self::Unknown,
            _ => Self::Complex(lowered),
        }
    }

    /// Lower-case name used for comparison and reporting.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Array => "array",
            Self::Function => "function",
            Self::Reference => "reference",
            Self::Unknown => "unknown",
            Self::Complex(text) => text,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type annotation as written at one declaration or assignment site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    /// Captured text, case preserved
    pub raw_text: String,
    /// Lower-cased `raw_text`
    pub declared_type: String,
    /// Whether `raw_text` contains any of `[ ] < > | &`
    pub is_complex: bool,
}

impl Annotation {
    pub fn parse(raw_text: &str) -> Self {
        let raw_text = raw_text.trim();
        Annotation {
            raw_text: raw_text.to_string(),
            declared_type: raw_text.to_lowercase(),
            is_complex: raw_text.contains(COMPLEX_TYPE_CHARS),
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        SemanticType::from_declared(&self.declared_type)
    }

    /// Element type of an array-suffixed annotation (`number` for `number[]`).
    pub fn array_element_type(&self) -> Option<&str> {
        self.declared_type.strip_suffix("[]")
    }
}
