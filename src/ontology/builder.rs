use std::collections::BTreeMap;

use thiserror::Error;

use crate::emit::vocab;
use crate::sheet::{columns, Record, SheetSource};

use super::entities::{
    Class, ClassRef, DataProperty, ModelError, ObjectProperty, OntologyDescriptor, OntologyModel,
    PropertyDomain,
};
use super::namespaces::{NamespaceError, NamespaceRegistry};
use super::value_objects::{Iri, QualifiedName};

/// The metadata sheet carries exactly these rows, in this order:
/// name, base URI, version, authors, description.
const METADATA_ROWS: usize = 5;

/// Single-pass transformation from sheet rows to a validated [`OntologyModel`].
///
/// The builder fails fast: the first violated invariant aborts the run and no
/// partial model is handed to the emitters. Errors carry the 1-based data row
/// index within the offending sheet.
pub struct ModelBuilder<'a, S>
where
    S: SheetSource + ?Sized,
{
    source: &'a S,
}

impl<'a, S> ModelBuilder<'a, S>
where
    S: SheetSource + ?Sized,
{
    /// Creates a builder reading from the supplied source.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Runs the full build: metadata, namespaces, classes, properties,
    /// uniqueness enforcement.
    pub fn build(&self) -> Result<OntologyModel, BuildError> {
        let descriptor = self.parse_metadata()?;
        let registry = self.parse_namespaces(&descriptor)?;
        let (classes, class_index) = self.parse_classes(&registry)?;
        let data_properties = self.parse_data_properties(&registry, &class_index)?;
        let object_properties = self.parse_object_properties(&registry, &class_index)?;

        let mut model = OntologyModel::new(descriptor, registry);
        for (row, class) in classes {
            model.add_class(class).map_err(|err| duplicate(row, err))?;
        }
        for (row, property) in data_properties {
            model
                .add_data_property(property)
                .map_err(|err| duplicate(row, err))?;
        }
        for (row, property) in object_properties {
            model
                .add_object_property(property)
                .map_err(|err| duplicate(row, err))?;
        }

        tracing::debug!(
            classes = model.classes().len(),
            data_properties = model.data_properties().len(),
            object_properties = model.object_properties().len(),
            namespaces = model.namespaces().len(),
            "sheet model built"
        );
        Ok(model)
    }

    fn parse_metadata(&self) -> Result<OntologyDescriptor, BuildError> {
        let rows = self.source.ontology_info();
        if rows.len() != METADATA_ROWS {
            return Err(BuildError::MalformedMetadata {
                expected: METADATA_ROWS,
                found: rows.len(),
            });
        }

        let name = rows[0].1.trim().to_owned();
        let url = rows[1].1.trim();
        let base_uri = Iri::new(url).map_err(|_| BuildError::InvalidNamespace {
            row: 2,
            prefix: name.clone(),
            url: url.to_owned(),
        })?;
        let version = rows[2].1.trim().to_owned();
        let authors = split_list(&rows[3].1);
        let description = rows[4].1.trim().to_owned();

        Ok(OntologyDescriptor::new(
            name,
            base_uri,
            version,
            authors,
            description,
        ))
    }

    fn parse_namespaces(
        &self,
        descriptor: &OntologyDescriptor,
    ) -> Result<NamespaceRegistry, BuildError> {
        let mut registry = NamespaceRegistry::new();
        for (index, record) in self.source.namespaces().iter().enumerate() {
            let row = index + 1;
            let prefix = record.get(columns::PREFIX_NAME);
            let url = record.get(columns::ONTOLOGY_URL);
            let (Some(prefix), Some(url)) = (prefix, url) else {
                return Err(BuildError::InvalidNamespace {
                    row,
                    prefix: prefix.unwrap_or_default().to_owned(),
                    url: url.unwrap_or_default().to_owned(),
                });
            };
            let uri = Iri::new(url).map_err(|_| BuildError::InvalidNamespace {
                row,
                prefix: prefix.to_owned(),
                url: url.to_owned(),
            })?;
            registry
                .register(prefix, uri)
                .map_err(|err| namespace_error(row, err))?;
        }

        registry.register_default(descriptor.name(), descriptor.base_uri().clone());
        Ok(registry)
    }

    fn parse_classes(
        &self,
        registry: &NamespaceRegistry,
    ) -> Result<(Vec<(usize, Class)>, BTreeMap<String, ClassRef>), BuildError> {
        struct Seed {
            row: usize,
            qualified: QualifiedName,
            subject: Iri,
            parent: Option<String>,
            definition: Option<String>,
            alt_names: Vec<String>,
            unit: Option<String>,
            axioms: Option<String>,
        }

        let mut seeds = Vec::new();
        for (index, record) in self.source.classes().iter().enumerate() {
            let row = index + 1;
            let Some(name) = record.get(columns::VARIABLE_NAME) else {
                continue;
            };
            let prefix = record.get(columns::BELONGS_TO_ONTOLOGY).unwrap_or_default();
            let qualified = QualifiedName::new(prefix, name);
            let subject = expand(registry, row, &qualified)?;
            seeds.push(Seed {
                row,
                qualified,
                subject,
                parent: record.get(columns::PARENT_VARIABLE).map(str::to_owned),
                definition: record
                    .get(columns::DEFINITION_OF_VARIABLE)
                    .map(str::to_owned),
                alt_names: record.list(columns::ALTERNATIVE_NAMES),
                unit: record.get(columns::UNIT).map(str::to_owned),
                axioms: record.get(columns::LOGICAL_AXIOMS).map(str::to_owned),
            });
        }

        // Parents may be declared before or after their children, so the
        // name index must cover every row before any reference is resolved.
        let mut class_index: BTreeMap<String, ClassRef> = BTreeMap::new();
        for seed in &seeds {
            class_index
                .entry(seed.qualified.local().to_owned())
                .or_insert_with(|| ClassRef::new(seed.qualified.clone(), seed.subject.clone()));
        }

        let mut classes = Vec::new();
        for seed in seeds {
            let mut class = Class::new(seed.qualified.clone(), seed.subject);
            if let Some(parent_name) = &seed.parent {
                let parent =
                    class_index
                        .get(parent_name)
                        .ok_or_else(|| BuildError::DanglingParent {
                            row: seed.row,
                            class: seed.qualified.local().to_owned(),
                            parent: parent_name.clone(),
                        })?;
                class = class.with_parent(parent.clone());
            }
            if let Some(definition) = seed.definition {
                class = class.with_definition(definition);
            }
            class = class.with_alt_names(seed.alt_names);
            if let Some(unit) = seed.unit {
                class = class.with_unit(unit);
            }
            if let Some(axioms) = seed.axioms {
                class = class.with_axioms(axioms);
            }
            classes.push((seed.row, class));
        }

        Ok((classes, class_index))
    }

    fn parse_data_properties(
        &self,
        registry: &NamespaceRegistry,
        class_index: &BTreeMap<String, ClassRef>,
    ) -> Result<Vec<(usize, DataProperty)>, BuildError> {
        let mut properties = Vec::new();
        for (index, record) in self.source.data_properties().iter().enumerate() {
            let row = index + 1;
            let Some(name) = record.get(columns::VALUETYPE_NAME) else {
                continue;
            };
            let prefix = record.get(columns::BELONGS_TO_ONTOLOGY).unwrap_or_default();
            let qualified = QualifiedName::new(prefix, name);
            let subject = expand(registry, row, &qualified)?;

            let domain = match record.get(columns::DOMAIN) {
                None => PropertyDomain::Unspecified,
                Some(domain) => {
                    if let Some(class) = class_index.get(domain) {
                        PropertyDomain::Class(class.clone())
                    } else if vocab::is_literal_type(domain) {
                        PropertyDomain::LiteralType(domain.to_owned())
                    } else {
                        return Err(BuildError::DanglingReference {
                            row,
                            property: name.to_owned(),
                            reference: domain.to_owned(),
                        });
                    }
                }
            };

            let mut property = DataProperty::new(qualified, subject)
                .with_domain(domain)
                .with_alt_names(record.list(columns::ALTERNATIVE_NAMES));
            if let Some(range) = record.get(columns::RANGE) {
                property = property.with_range(range);
            }
            if let Some(definition) = record.get(columns::DEFINITION_OF_PROPERTY) {
                property = property.with_definition(definition);
            }
            if let Some(axioms) = record.get(columns::LOGICAL_AXIOMS) {
                property = property.with_axioms(axioms);
            }
            properties.push((row, property));
        }
        Ok(properties)
    }

    fn parse_object_properties(
        &self,
        registry: &NamespaceRegistry,
        class_index: &BTreeMap<String, ClassRef>,
    ) -> Result<Vec<(usize, ObjectProperty)>, BuildError> {
        let mut properties = Vec::new();
        for (index, record) in self.source.object_properties().iter().enumerate() {
            let row = index + 1;
            let Some(name) = record.get(columns::RELATIONSHIP_NAME) else {
                continue;
            };
            let prefix = record.get(columns::BELONGS_TO_ONTOLOGY).unwrap_or_default();
            let qualified = QualifiedName::new(prefix, name);
            let subject = expand(registry, row, &qualified)?;

            let domain = class_reference(record, columns::DOMAIN, class_index, row, name)?;
            let range = class_reference(record, columns::RANGE, class_index, row, name)?;

            let mut property = ObjectProperty::new(qualified, subject, domain, range)
                .with_alt_names(record.list(columns::ALTERNATIVE_NAMES));
            if let Some(definition) = record.get(columns::DEFINITION) {
                property = property.with_definition(definition);
            }
            if let Some(axioms) = record.get(columns::LOGICAL_AXIOMS) {
                property = property.with_axioms(axioms);
            }
            properties.push((row, property));
        }
        Ok(properties)
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn expand(
    registry: &NamespaceRegistry,
    row: usize,
    qualified: &QualifiedName,
) -> Result<Iri, BuildError> {
    registry
        .expand(qualified)
        .map_err(|err| namespace_error(row, err))
}

fn class_reference(
    record: &Record,
    column: &str,
    class_index: &BTreeMap<String, ClassRef>,
    row: usize,
    property: &str,
) -> Result<ClassRef, BuildError> {
    let value = record.get(column).unwrap_or_default();
    class_index
        .get(value)
        .cloned()
        .ok_or_else(|| BuildError::DanglingReference {
            row,
            property: property.to_owned(),
            reference: value.to_owned(),
        })
}

fn namespace_error(row: usize, err: NamespaceError) -> BuildError {
    match err {
        NamespaceError::UnknownPrefix { prefix } => BuildError::UnknownPrefix { row, prefix },
        NamespaceError::DuplicatePrefix {
            prefix,
            existing,
            attempted,
        } => BuildError::DuplicatePrefix {
            row,
            prefix,
            existing,
            attempted,
        },
        NamespaceError::InvalidLocalName { name, .. } => {
            BuildError::InvalidEntityName { row, name }
        }
    }
}

fn duplicate(row: usize, err: ModelError) -> BuildError {
    match err {
        ModelError::DuplicateEntity { qualified } => BuildError::DuplicateEntity { row, qualified },
    }
}

/// Errors aborting a model build, each locating the offending sheet row.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The metadata sheet did not contain the fixed row set.
    #[error("ontology metadata must contain exactly {expected} rows, found {found}")]
    MalformedMetadata { expected: usize, found: usize },
    /// A namespace row had a missing prefix or malformed URI.
    #[error("namespace row {row} is invalid (prefix `{prefix}`, url `{url}`)")]
    InvalidNamespace {
        row: usize,
        prefix: String,
        url: String,
    },
    /// A row referenced a prefix absent from the registry.
    #[error("row {row} references unknown prefix `{prefix}`")]
    UnknownPrefix { row: usize, prefix: String },
    /// A namespace row rebound an existing prefix to a different URI.
    #[error("namespace row {row} rebinds prefix `{prefix}` from `{existing}` to `{attempted}`")]
    DuplicatePrefix {
        row: usize,
        prefix: String,
        existing: Iri,
        attempted: Iri,
    },
    /// A class row named a parent that no class row defines.
    #[error("class row {row}: parent `{parent}` of `{class}` is not defined")]
    DanglingParent {
        row: usize,
        class: String,
        parent: String,
    },
    /// A property row referenced a class that does not exist.
    #[error("property row {row}: `{property}` references unknown class `{reference}`")]
    DanglingReference {
        row: usize,
        property: String,
        reference: String,
    },
    /// Two rows resolved to the same fully-qualified name.
    #[error("row {row} declares duplicate entity `{qualified}`")]
    DuplicateEntity { row: usize, qualified: QualifiedName },
    /// An entity name could not be appended to its namespace.
    #[error("row {row}: `{name}` does not expand to a valid identifier")]
    InvalidEntityName { row: usize, name: QualifiedName },
}

#[cfg(test)]
mod tests {
    use super::{BuildError, ModelBuilder};
    use crate::ontology::entities::PropertyDomain;
    use crate::ontology::value_objects::QualifiedName;
    use crate::sheet::{columns, MemorySheets, Record};

    fn metadata() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Ontology Name", "TestOntology"),
            ("Ontology URI", "http://example.com/ontology#"),
            ("Ontology Version", "1.0"),
            ("Ontology Author(s)", "John Doe, Jane Smith"),
            ("Ontology Description", "A test ontology"),
        ]
    }

    fn namespace_row(prefix: &str, url: &str) -> Record {
        Record::new()
            .with(columns::PREFIX_NAME, prefix)
            .with(columns::ONTOLOGY_URL, url)
    }

    fn class_row(name: &str, prefix: &str, parent: &str) -> Record {
        Record::new()
            .with(columns::VARIABLE_NAME, name)
            .with(columns::BELONGS_TO_ONTOLOGY, prefix)
            .with(columns::PARENT_VARIABLE, parent)
    }

    fn sheets() -> MemorySheets {
        MemorySheets::new()
            .with_ontology_info(metadata())
            .with_namespaces([namespace_row("PMDCo", "https://w3id.org/pmd/co/")])
    }

    #[test]
    fn rejects_metadata_with_wrong_row_count() {
        let source = MemorySheets::new()
            .with_ontology_info([("Ontology Name", "TestOntology")]);
        let err = ModelBuilder::new(&source).build().expect_err("short metadata");
        assert!(matches!(
            err,
            BuildError::MalformedMetadata { expected: 5, found: 1 }
        ));
    }

    #[test]
    fn rejects_namespace_rows_without_prefix_or_url() {
        let source = MemorySheets::new()
            .with_ontology_info(metadata())
            .with_namespaces([namespace_row("", "http://example.com/test#")]);
        let err = ModelBuilder::new(&source).build().expect_err("missing prefix");
        assert!(matches!(err, BuildError::InvalidNamespace { row: 1, .. }));

        let source = MemorySheets::new()
            .with_ontology_info(metadata())
            .with_namespaces([namespace_row("test", "not a url")]);
        let err = ModelBuilder::new(&source).build().expect_err("malformed url");
        assert!(matches!(
            err,
            BuildError::InvalidNamespace { row: 1, url, .. } if url == "not a url"
        ));
    }

    #[test]
    fn rejects_conflicting_prefix_rebinding_with_row_context() {
        let source = MemorySheets::new()
            .with_ontology_info(metadata())
            .with_namespaces([
                namespace_row("test", "http://example.com/test#"),
                namespace_row("test", "http://example.com/other#"),
            ]);
        let err = ModelBuilder::new(&source).build().expect_err("rebinding");
        assert!(matches!(
            err,
            BuildError::DuplicatePrefix { row: 2, prefix, .. } if prefix == "test"
        ));
    }

    #[test]
    fn explicit_declaration_of_the_ontology_name_takes_precedence() {
        let source = MemorySheets::new()
            .with_ontology_info(metadata())
            .with_namespaces([namespace_row("TestOntology", "http://example.com/elsewhere#")]);
        let model = ModelBuilder::new(&source).build().expect("model");
        assert_eq!(
            model
                .namespaces()
                .resolve("TestOntology")
                .expect("resolved")
                .as_str(),
            "http://example.com/elsewhere#"
        );
    }

    #[test]
    fn class_rows_with_unknown_prefix_fail_with_row_context() {
        let source = sheets().with_classes([class_row("Identifier", "missing", "")]);
        let err = ModelBuilder::new(&source).build().expect_err("unknown prefix");
        assert!(matches!(
            err,
            BuildError::UnknownPrefix { row: 1, prefix } if prefix == "missing"
        ));
    }

    #[test]
    fn parent_references_resolve_forwards_and_backwards() {
        let source = sheets().with_classes([
            class_row("Child", "PMDCo", "Parent"),
            class_row("Parent", "PMDCo", ""),
        ]);
        let model = ModelBuilder::new(&source).build().expect("model");
        let child = model
            .class(&QualifiedName::new("PMDCo", "Child"))
            .expect("child class");
        assert_eq!(
            child.parent().expect("parent resolved").qualified(),
            &QualifiedName::new("PMDCo", "Parent")
        );
    }

    #[test]
    fn dangling_parent_fails_the_build() {
        let source = sheets().with_classes([class_row("Child", "PMDCo", "Ghost")]);
        let err = ModelBuilder::new(&source).build().expect_err("dangling parent");
        assert!(matches!(
            err,
            BuildError::DanglingParent { row: 1, class, parent }
                if class == "Child" && parent == "Ghost"
        ));
    }

    #[test]
    fn class_names_breaking_the_identifier_fail_the_build() {
        let source = sheets().with_classes([class_row("has space", "PMDCo", "")]);
        let err = ModelBuilder::new(&source).build().expect_err("invalid name");
        assert!(matches!(
            err,
            BuildError::InvalidEntityName { row: 1, name }
                if name == QualifiedName::new("PMDCo", "has space")
        ));
    }

    #[test]
    fn data_property_domains_accept_classes_and_literal_types() {
        let source = sheets()
            .with_classes([class_row("Specimen", "PMDCo", "")])
            .with_data_properties([
                Record::new()
                    .with(columns::VALUETYPE_NAME, "identifier")
                    .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
                    .with(columns::DOMAIN, "Specimen")
                    .with(columns::RANGE, "string"),
                Record::new()
                    .with(columns::VALUETYPE_NAME, "timestamp")
                    .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
                    .with(columns::DOMAIN, "xsd:string")
                    .with(columns::RANGE, "dateTime"),
            ]);
        let model = ModelBuilder::new(&source).build().expect("model");

        let identifier = model
            .data_properties()
            .get(&QualifiedName::new("PMDCo", "identifier"))
            .expect("identifier property");
        assert!(matches!(
            identifier.domain(),
            PropertyDomain::Class(class) if class.qualified() == &QualifiedName::new("PMDCo", "Specimen")
        ));

        let timestamp = model
            .data_properties()
            .get(&QualifiedName::new("PMDCo", "timestamp"))
            .expect("timestamp property");
        assert!(matches!(
            timestamp.domain(),
            PropertyDomain::LiteralType(label) if label == "xsd:string"
        ));
    }

    #[test]
    fn data_property_domain_naming_an_unknown_class_fails() {
        let source = sheets().with_data_properties([Record::new()
            .with(columns::VALUETYPE_NAME, "identifier")
            .with(columns::BELONGS_TO_ONTOLOGY, "PMDCo")
            .with(columns::DOMAIN, "Ghost")
            .with(columns::RANGE, "string")]);
        let err = ModelBuilder::new(&source).build().expect_err("unknown domain");
        assert!(matches!(
            err,
            BuildError::DanglingReference { row: 1, reference, .. } if reference == "Ghost"
        ));
    }

    #[test]
    fn placeholder_property_rows_are_skipped() {
        let source = sheets()
            .with_data_properties([Record::new()
                .with(columns::VALUETYPE_NAME, "")
                .with(columns::DOMAIN, "")])
            .with_object_properties([Record::new().with(columns::RELATIONSHIP_NAME, "  ")]);
        let model = ModelBuilder::new(&source).build().expect("model");
        assert!(model.data_properties().is_empty());
        assert!(model.object_properties().is_empty());
    }
}
