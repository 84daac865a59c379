use std::collections::BTreeMap;

use thiserror::Error;

use super::value_objects::{Iri, IriError, QualifiedName};

/// Registry mapping namespace prefixes to their namespace IRIs.
///
/// Lookup failure is always an error, never a silent default: every prefix
/// referenced by a sheet row must have been declared before it is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceRegistry {
    entries: BTreeMap<String, Iri>,
}

impl NamespaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a prefix to a namespace IRI.
    ///
    /// Re-registering the identical pair is a no-op; binding an existing
    /// prefix to a different IRI is rejected.
    pub fn register(
        &mut self,
        prefix: impl Into<String>,
        uri: Iri,
    ) -> Result<(), NamespaceError> {
        let prefix = prefix.into();
        if let Some(existing) = self.entries.get(&prefix) {
            if *existing == uri {
                return Ok(());
            }
            return Err(NamespaceError::DuplicatePrefix {
                prefix,
                existing: existing.clone(),
                attempted: uri,
            });
        }
        self.entries.insert(prefix, uri);
        Ok(())
    }

    /// Binds a prefix only when no explicit declaration exists for it.
    ///
    /// Used for the ontology's own name, which is registered after the
    /// namespace table so that explicit declarations take precedence.
    pub fn register_default(&mut self, prefix: impl Into<String>, uri: Iri) {
        self.entries.entry(prefix.into()).or_insert(uri);
    }

    /// Resolves a prefix to its namespace IRI.
    pub fn resolve(&self, prefix: &str) -> Result<&Iri, NamespaceError> {
        self.entries
            .get(prefix)
            .ok_or_else(|| NamespaceError::UnknownPrefix {
                prefix: prefix.to_owned(),
            })
    }

    /// Expands a qualified name into the full identifier
    /// `resolve(prefix) + localName`.
    pub fn expand(&self, name: &QualifiedName) -> Result<Iri, NamespaceError> {
        let namespace = self.resolve(name.prefix())?;
        namespace
            .join(name.local())
            .map_err(|source| NamespaceError::InvalidLocalName {
                name: name.clone(),
                source,
            })
    }

    /// Returns whether the prefix has been registered.
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Returns the number of registered prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the registered prefix bindings in lexical prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Iri)> {
        self.entries.iter().map(|(prefix, uri)| (prefix.as_str(), uri))
    }
}

/// Errors raised when registering or resolving namespace prefixes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    /// A prefix was bound a second time to a different IRI.
    #[error("prefix `{prefix}` is already bound to `{existing}`, refusing `{attempted}`")]
    DuplicatePrefix {
        prefix: String,
        existing: Iri,
        attempted: Iri,
    },
    /// A prefix was referenced without having been registered.
    #[error("prefix `{prefix}` is not registered")]
    UnknownPrefix { prefix: String },
    /// A local name could not be appended to its namespace.
    #[error("`{name}` does not expand to a valid identifier")]
    InvalidLocalName {
        name: QualifiedName,
        source: IriError,
    },
}
