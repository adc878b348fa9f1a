use crate::vocab::{rdf, rdf_ext, xsd};
use crate::ConstructionError;
use oxrdf::{NamedNode, NamedNodeRef};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").unwrap()
});

/// The base direction of a directional language-tagged string (`"text"@en--ltr`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseDirection {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BaseDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseDirection::Ltr => "ltr",
            BaseDirection::Rtl => "rtl",
        }
    }
}

impl FromStr for BaseDirection {
    type Err = ConstructionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "ltr" => Ok(BaseDirection::Ltr),
            "rtl" => Ok(BaseDirection::Rtl),
            _ => Err(ConstructionError::InvalidDirection(value.to_owned())),
        }
    }
}

impl fmt::Display for BaseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks whether `tag` is a well-formed (BCP47-shaped) language tag.
pub fn is_valid_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG.is_match(tag)
}

/// A literal without a datatype IRI: either a simple string or a language-tagged string,
/// optionally carrying a base direction.
///
/// Language tags are normalized to lower case, as RDF compares them case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlainLiteral {
    value: String,
    language: Option<String>,
    direction: Option<BaseDirection>,
}

impl PlainLiteral {
    /// Creates a simple literal without a language.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            direction: None,
        }
    }

    /// Creates a language-tagged literal.
    ///
    /// The tag may carry a base direction suffix (`en-US--ltr`).
    pub fn new_language_tagged(
        value: impl Into<String>,
        tag: &str,
    ) -> Result<Self, ConstructionError> {
        let (language, direction) = match tag.split_once("--") {
            Some((language, direction)) => (language, Some(direction.parse()?)),
            None => (tag, None),
        };
        Self::new_directional(value, language, direction)
    }

    /// Creates a language-tagged literal with an explicit base direction.
    pub fn new_directional(
        value: impl Into<String>,
        language: &str,
        direction: Option<BaseDirection>,
    ) -> Result<Self, ConstructionError> {
        if !is_valid_language_tag(language) {
            return Err(ConstructionError::InvalidLanguageTag(language.to_owned()));
        }
        Ok(Self {
            value: value.into(),
            language: Some(language.to_ascii_lowercase()),
            direction,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns a literal with the same language and direction but a different value.
    #[must_use]
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: self.language.clone(),
            direction: self.direction,
        }
    }

    /// The language tag, without the direction suffix.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn direction(&self) -> Option<BaseDirection> {
        self.direction
    }

    /// The implicit datatype: `xsd:string`, `rdf:langString`, or `rdf:dirLangString`.
    pub fn datatype(&self) -> NamedNodeRef<'static> {
        match (&self.language, self.direction) {
            (None, _) => xsd::STRING,
            (Some(_), None) => rdf::LANG_STRING,
            (Some(_), Some(_)) => rdf_ext::DIR_LANG_STRING,
        }
    }
}

/// A literal with an explicit datatype IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypedLiteral {
    value: String,
    datatype: NamedNode,
}

impl TypedLiteral {
    pub fn new(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn datatype(&self) -> NamedNodeRef<'_> {
        self.datatype.as_ref()
    }
}

pub(crate) fn write_quoted(f: &mut impl fmt::Write, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for PlainLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.value)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")?;
            if let Some(direction) = self.direction {
                write!(f, "--{direction}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.value)?;
        write!(f, "^^{}", self.datatype)
    }
}
