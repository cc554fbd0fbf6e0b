//! The syntax-provider input contract.
//!
//! A provider hands the pipeline a sequence of declared types, each with a
//! marker list and member declarations. Method bodies, fields, and non-type
//! declarations are irrelevant and may be omitted. Any front-end that can
//! fill these structs works; [`crate::frontend`] ships a conservative
//! line-oriented one.

use posture_core::errors::ParseError;

/// One marker argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerValue {
    /// A quoted string literal.
    Literal(String),
    /// An unquoted identifier or qualified constant (`RequestMethod.GET`).
    Symbol(String),
    /// A brace-delimited array of values.
    List(Vec<MarkerValue>),
}

impl MarkerValue {
    /// The literal text, if this value is a string literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// All string literals reachable from this value, in order.
    /// Non-literal items are skipped, not errors.
    pub fn literals(&self) -> Vec<&str> {
        match self {
            Self::Literal(s) => vec![s],
            Self::Symbol(_) => vec![],
            Self::List(items) => items.iter().filter_map(|v| v.as_literal()).collect(),
        }
    }

    /// Raw token texts: literals and symbols alike, flattening lists.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::Literal(s) | Self::Symbol(s) => vec![s],
            Self::List(items) => items.iter().flat_map(|v| v.tokens()).collect(),
        }
    }
}

/// One declaration-site marker: a name plus either a single positional value
/// or named attribute pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Simple name without sigils (`PreAuthorize`, not `@PreAuthorize`).
    pub name: String,
    pub value: Option<MarkerValue>,
    pub attributes: Vec<(String, MarkerValue)>,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_value(name: impl Into<String>, value: MarkerValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&MarkerValue> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }

    /// The marker's path argument: the positional value's first literal,
    /// else the first literal of a `value` or `path` attribute.
    pub fn path_argument(&self) -> Option<&str> {
        if let Some(value) = &self.value {
            if let Some(first) = value.literals().first() {
                return Some(first);
            }
        }
        self.attribute("value")
            .or_else(|| self.attribute("path"))
            .and_then(|v| v.literals().first().copied())
    }

    /// String literals from the positional value or `value` attribute
    /// (role-list extraction: non-literal arguments are ignored).
    pub fn literal_arguments(&self) -> Vec<&str> {
        if let Some(value) = &self.value {
            let literals = value.literals();
            if !literals.is_empty() {
                return literals;
            }
        }
        self.attribute("value")
            .map(|v| v.literals())
            .unwrap_or_default()
    }
}

/// A member declaration inside a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDeclaration {
    pub name: String,
    pub markers: Vec<Marker>,
    /// 1-based declaration line; 0 when unknown.
    pub line: u32,
}

/// A declared reference type with its markers and members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub markers: Vec<Marker>,
    pub members: Vec<MemberDeclaration>,
}

/// Everything the pipeline needs from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxUnit {
    pub file: String,
    pub types: Vec<TypeDeclaration>,
}

/// The external parser boundary.
pub trait SyntaxProvider: Send + Sync {
    /// Parse one file's content into the declaration contract.
    fn parse(&self, content: &str, file: &str) -> Result<SyntaxUnit, ParseError>;
}
