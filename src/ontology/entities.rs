use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::namespaces::NamespaceRegistry;
use super::value_objects::{Iri, QualifiedName};

/// Ontology-wide metadata taken from the fixed rows of the info sheet.
///
/// Built once per compilation run and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OntologyDescriptor {
    name: String,
    base_uri: Iri,
    version: String,
    authors: Vec<String>,
    description: String,
}

impl OntologyDescriptor {
    /// Creates a descriptor from the parsed metadata values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        base_uri: Iri,
        version: impl Into<String>,
        authors: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_uri,
            version: version.into(),
            authors,
            description: description.into(),
        }
    }

    /// Returns the declared ontology name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base namespace of the ontology.
    #[must_use]
    pub fn base_uri(&self) -> &Iri {
        &self.base_uri
    }

    /// Returns the declared version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the declared authors in sheet order.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Resolved reference to a class: its qualified name plus full identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRef {
    qualified: QualifiedName,
    iri: Iri,
}

impl ClassRef {
    /// Creates a reference from an already resolved pair.
    #[must_use]
    pub fn new(qualified: QualifiedName, iri: Iri) -> Self {
        Self { qualified, iri }
    }

    /// Returns the qualified name of the referenced class.
    #[must_use]
    pub fn qualified(&self) -> &QualifiedName {
        &self.qualified
    }

    /// Returns the full identifier of the referenced class.
    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.iri
    }
}

/// Class ("variable") definition with its optional parent and annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    qualified: QualifiedName,
    subject: Iri,
    parent: Option<ClassRef>,
    definition: Option<String>,
    alt_names: Vec<String>,
    unit: Option<String>,
    axioms: Option<String>,
}

impl Class {
    /// Creates a class with no parent and no annotations.
    #[must_use]
    pub fn new(qualified: QualifiedName, subject: Iri) -> Self {
        Self {
            qualified,
            subject,
            parent: None,
            definition: None,
            alt_names: Vec::new(),
            unit: None,
            axioms: None,
        }
    }

    /// Sets the resolved parent class reference.
    #[must_use]
    pub fn with_parent(mut self, parent: ClassRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the human definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Sets the ordered alternative names.
    #[must_use]
    pub fn with_alt_names(mut self, alt_names: Vec<String>) -> Self {
        self.alt_names = alt_names;
        self
    }

    /// Sets the unit annotation.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the logical-axiom text.
    #[must_use]
    pub fn with_axioms(mut self, axioms: impl Into<String>) -> Self {
        self.axioms = Some(axioms.into());
        self
    }

    /// Returns the display name (the local part of the qualified name).
    #[must_use]
    pub fn name(&self) -> &str {
        self.qualified.local()
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn qualified(&self) -> &QualifiedName {
        &self.qualified
    }

    /// Returns the full identifier of the class.
    #[must_use]
    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    /// Returns the resolved parent reference, when the class has one.
    #[must_use]
    pub fn parent(&self) -> Option<&ClassRef> {
        self.parent.as_ref()
    }

    /// Returns the human definition.
    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// Returns the alternative names in sheet order.
    #[must_use]
    pub fn alt_names(&self) -> &[String] {
        &self.alt_names
    }

    /// Returns the unit annotation.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Returns the logical-axiom text.
    #[must_use]
    pub fn axioms(&self) -> Option<&str> {
        self.axioms.as_deref()
    }
}

/// Where a data property applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyDomain {
    /// The property is attached to a class of the model.
    Class(ClassRef),
    /// The domain names a literal built-in type rather than a class.
    LiteralType(String),
    /// The sheet left the domain blank.
    Unspecified,
}

/// Data-property ("value type") definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataProperty {
    qualified: QualifiedName,
    subject: Iri,
    domain: PropertyDomain,
    range: Option<String>,
    definition: Option<String>,
    alt_names: Vec<String>,
    axioms: Option<String>,
}

impl DataProperty {
    /// Creates a data property with an unspecified domain and no range.
    #[must_use]
    pub fn new(qualified: QualifiedName, subject: Iri) -> Self {
        Self {
            qualified,
            subject,
            domain: PropertyDomain::Unspecified,
            range: None,
            definition: None,
            alt_names: Vec::new(),
            axioms: None,
        }
    }

    /// Sets the resolved domain.
    #[must_use]
    pub fn with_domain(mut self, domain: PropertyDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the literal-type range label.
    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Sets the human definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Sets the ordered alternative names.
    #[must_use]
    pub fn with_alt_names(mut self, alt_names: Vec<String>) -> Self {
        self.alt_names = alt_names;
        self
    }

    /// Sets the logical-axiom text.
    #[must_use]
    pub fn with_axioms(mut self, axioms: impl Into<String>) -> Self {
        self.axioms = Some(axioms.into());
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.qualified.local()
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn qualified(&self) -> &QualifiedName {
        &self.qualified
    }

    /// Returns the full identifier of the property.
    #[must_use]
    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    /// Returns the resolved domain.
    #[must_use]
    pub fn domain(&self) -> &PropertyDomain {
        &self.domain
    }

    /// Returns the literal-type range label.
    #[must_use]
    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    /// Returns the human definition.
    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// Returns the alternative names in sheet order.
    #[must_use]
    pub fn alt_names(&self) -> &[String] {
        &self.alt_names
    }

    /// Returns the logical-axiom text.
    #[must_use]
    pub fn axioms(&self) -> Option<&str> {
        self.axioms.as_deref()
    }
}

/// Object-property ("relationship") definition linking two classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectProperty {
    qualified: QualifiedName,
    subject: Iri,
    domain: ClassRef,
    range: ClassRef,
    definition: Option<String>,
    alt_names: Vec<String>,
    axioms: Option<String>,
}

impl ObjectProperty {
    /// Creates an object property between two resolved classes.
    #[must_use]
    pub fn new(qualified: QualifiedName, subject: Iri, domain: ClassRef, range: ClassRef) -> Self {
        Self {
            qualified,
            subject,
            domain,
            range,
            definition: None,
            alt_names: Vec::new(),
            axioms: None,
        }
    }

    /// Sets the human definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Sets the ordered alternative names.
    #[must_use]
    pub fn with_alt_names(mut self, alt_names: Vec<String>) -> Self {
        self.alt_names = alt_names;
        self
    }

    /// Sets the logical-axiom text.
    #[must_use]
    pub fn with_axioms(mut self, axioms: impl Into<String>) -> Self {
        self.axioms = Some(axioms.into());
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.qualified.local()
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn qualified(&self) -> &QualifiedName {
        &self.qualified
    }

    /// Returns the full identifier of the property.
    #[must_use]
    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    /// Returns the resolved domain class.
    #[must_use]
    pub fn domain(&self) -> &ClassRef {
        &self.domain
    }

    /// Returns the resolved range class.
    #[must_use]
    pub fn range(&self) -> &ClassRef {
        &self.range
    }

    /// Returns the human definition.
    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// Returns the alternative names in sheet order.
    #[must_use]
    pub fn alt_names(&self) -> &[String] {
        &self.alt_names
    }

    /// Returns the logical-axiom text.
    #[must_use]
    pub fn axioms(&self) -> Option<&str> {
        self.axioms.as_deref()
    }
}

/// Validated in-memory representation of one compiled sheet set.
///
/// Entities are keyed by qualified name; the key space is shared across
/// classes and both property kinds, so insertion rejects any collision.
/// Iteration order is lexical, which fixes the emission order downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OntologyModel {
    descriptor: OntologyDescriptor,
    namespaces: NamespaceRegistry,
    classes: BTreeMap<QualifiedName, Class>,
    data_properties: BTreeMap<QualifiedName, DataProperty>,
    object_properties: BTreeMap<QualifiedName, ObjectProperty>,
}

impl OntologyModel {
    /// Creates an empty model around its descriptor and namespace registry.
    #[must_use]
    pub fn new(descriptor: OntologyDescriptor, namespaces: NamespaceRegistry) -> Self {
        Self {
            descriptor,
            namespaces,
            classes: BTreeMap::new(),
            data_properties: BTreeMap::new(),
            object_properties: BTreeMap::new(),
        }
    }

    fn check_unique(&self, qualified: &QualifiedName) -> Result<(), ModelError> {
        if self.classes.contains_key(qualified)
            || self.data_properties.contains_key(qualified)
            || self.object_properties.contains_key(qualified)
        {
            return Err(ModelError::DuplicateEntity {
                qualified: qualified.clone(),
            });
        }
        Ok(())
    }

    /// Adds a class, enforcing global qualified-name uniqueness.
    pub fn add_class(&mut self, class: Class) -> Result<(), ModelError> {
        self.check_unique(class.qualified())?;
        self.classes.insert(class.qualified().clone(), class);
        Ok(())
    }

    /// Adds a data property, enforcing global qualified-name uniqueness.
    pub fn add_data_property(&mut self, property: DataProperty) -> Result<(), ModelError> {
        self.check_unique(property.qualified())?;
        self.data_properties
            .insert(property.qualified().clone(), property);
        Ok(())
    }

    /// Adds an object property, enforcing global qualified-name uniqueness.
    pub fn add_object_property(&mut self, property: ObjectProperty) -> Result<(), ModelError> {
        self.check_unique(property.qualified())?;
        self.object_properties
            .insert(property.qualified().clone(), property);
        Ok(())
    }

    /// Returns the ontology descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &OntologyDescriptor {
        &self.descriptor
    }

    /// Returns the namespace registry backing the model.
    #[must_use]
    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    /// Retrieves a class by qualified name.
    #[must_use]
    pub fn class(&self, qualified: &QualifiedName) -> Option<&Class> {
        self.classes.get(qualified)
    }

    /// Returns all classes in qualified-name order.
    #[must_use]
    pub fn classes(&self) -> &BTreeMap<QualifiedName, Class> {
        &self.classes
    }

    /// Returns all data properties in qualified-name order.
    #[must_use]
    pub fn data_properties(&self) -> &BTreeMap<QualifiedName, DataProperty> {
        &self.data_properties
    }

    /// Returns all object properties in qualified-name order.
    #[must_use]
    pub fn object_properties(&self) -> &BTreeMap<QualifiedName, ObjectProperty> {
        &self.object_properties
    }

    /// Returns a serializable summary of the model.
    #[must_use]
    pub fn summary(&self) -> ModelSummary {
        ModelSummary::from(self)
    }
}

/// Serializable counts describing a compiled model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    /// Declared ontology name.
    pub name: String,
    /// Number of classes.
    pub classes: usize,
    /// Number of data properties.
    pub data_properties: usize,
    /// Number of object properties.
    pub object_properties: usize,
    /// Number of registered namespace prefixes.
    pub namespaces: usize,
}

impl From<&OntologyModel> for ModelSummary {
    fn from(model: &OntologyModel) -> Self {
        Self {
            name: model.descriptor().name().to_owned(),
            classes: model.classes.len(),
            data_properties: model.data_properties.len(),
            object_properties: model.object_properties.len(),
            namespaces: model.namespaces.len(),
        }
    }
}

/// Errors raised when populating an [`OntologyModel`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Two entities resolved to the same qualified name.
    #[error("entity `{qualified}` is declared more than once")]
    DuplicateEntity { qualified: QualifiedName },
}

#[cfg(test)]
mod tests {
    use super::{Class, DataProperty, ModelError, OntologyDescriptor, OntologyModel};
    use crate::ontology::namespaces::NamespaceRegistry;
    use crate::ontology::value_objects::{Iri, QualifiedName};

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    fn model() -> OntologyModel {
        let descriptor = OntologyDescriptor::new(
            "TestOntology",
            iri("http://example.com/ontology#"),
            "1.0",
            vec!["John Doe".to_owned()],
            "A test ontology",
        );
        OntologyModel::new(descriptor, NamespaceRegistry::new())
    }

    #[test]
    fn class_defaults_are_empty() {
        let class = Class::new(
            QualifiedName::new("PMDCo", "Identifier"),
            iri("https://w3id.org/pmd/co/Identifier"),
        );
        assert_eq!(class.name(), "Identifier");
        assert!(class.parent().is_none());
        assert!(class.definition().is_none());
        assert!(class.alt_names().is_empty());
        assert!(class.unit().is_none());
        assert!(class.axioms().is_none());
    }

    #[test]
    fn qualified_names_are_unique_across_entity_kinds() {
        let mut model = model();
        let qualified = QualifiedName::new("PMDCo", "Identifier");
        let subject = iri("https://w3id.org/pmd/co/Identifier");

        model
            .add_class(Class::new(qualified.clone(), subject.clone()))
            .expect("class inserted");

        let err = model
            .add_data_property(DataProperty::new(qualified.clone(), subject))
            .expect_err("collision across kinds");
        assert!(matches!(
            err,
            ModelError::DuplicateEntity { qualified: name } if name == qualified
        ));
    }

    #[test]
    fn summary_counts_every_entity_kind() {
        let mut model = model();
        model
            .add_class(Class::new(
                QualifiedName::new("PMDCo", "Identifier"),
                iri("https://w3id.org/pmd/co/Identifier"),
            ))
            .expect("class inserted");

        let summary = model.summary();
        assert_eq!(summary.name, "TestOntology");
        assert_eq!(summary.classes, 1);
        assert_eq!(summary.data_properties, 0);
        assert_eq!(summary.object_properties, 0);
    }
}
