use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use thiserror::Error;

/// Value object ensuring that supplied text represents a valid IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// The constructor rejects malformed identifiers so that every entity in
    /// the model carries a canonical identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Constructs an [`Iri`] from text already known to be well formed.
    ///
    /// Reserved for vocabulary constants and local names appended to an
    /// already validated namespace.
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Appends a local name to this IRI, validating the combined identifier.
    pub fn join(&self, local: &str) -> Result<Self, IriError> {
        Self::new(format!("{}{local}", self.value))
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

/// The `prefix:local` identifier under which an entity is known in the model.
///
/// Qualified names are the global entity key: classes and properties share a
/// single namespace of them, so two entities carrying the same qualified name
/// are a modelling error regardless of their kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    prefix: String,
    local: String,
}

impl QualifiedName {
    /// Creates a qualified name from an already trimmed prefix and local name.
    #[must_use]
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    /// Returns the namespace prefix part.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the local name part.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

impl FromStr for QualifiedName {
    type Err = QualifiedNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, local) = s
            .split_once(':')
            .ok_or_else(|| QualifiedNameError::Unqualified {
                value: s.to_owned(),
            })?;
        if prefix.is_empty() || local.is_empty() {
            return Err(QualifiedNameError::Unqualified {
                value: s.to_owned(),
            });
        }
        Ok(Self::new(prefix, local))
    }
}

/// Errors produced when parsing a [`QualifiedName`] from text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QualifiedNameError {
    /// The text did not contain both a prefix and a local name.
    #[error("`{value}` is not a `prefix:name` pair")]
    Unqualified { value: String },
}
