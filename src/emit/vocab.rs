//! Well-known RDF vocabulary terms addressed by the triple projection.

use crate::ontology::value_objects::Iri;

const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const OWL: &str = "http://www.w3.org/2002/07/owl#";
const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
const DCTERMS: &str = "http://purl.org/dc/terms/";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// XSD types the sheets may name, keyed by their lowercased spelling.
const XSD_TYPES: &[(&str, &str)] = &[
    ("anyuri", "anyURI"),
    ("boolean", "boolean"),
    ("date", "date"),
    ("datetime", "dateTime"),
    ("decimal", "decimal"),
    ("double", "double"),
    ("float", "float"),
    ("int", "int"),
    ("integer", "integer"),
    ("long", "long"),
    ("string", "string"),
];

fn term(namespace: &str, local: &str) -> Iri {
    Iri::new_unchecked(format!("{namespace}{local}"))
}

pub fn rdf_type() -> Iri {
    term(RDF, "type")
}

pub fn rdfs_label() -> Iri {
    term(RDFS, "label")
}

pub fn rdfs_comment() -> Iri {
    term(RDFS, "comment")
}

pub fn rdfs_sub_class_of() -> Iri {
    term(RDFS, "subClassOf")
}

pub fn rdfs_domain() -> Iri {
    term(RDFS, "domain")
}

pub fn rdfs_range() -> Iri {
    term(RDFS, "range")
}

pub fn owl_ontology() -> Iri {
    term(OWL, "Ontology")
}

pub fn owl_class() -> Iri {
    term(OWL, "Class")
}

pub fn owl_datatype_property() -> Iri {
    term(OWL, "DatatypeProperty")
}

pub fn owl_object_property() -> Iri {
    term(OWL, "ObjectProperty")
}

pub fn owl_version_info() -> Iri {
    term(OWL, "versionInfo")
}

pub fn skos_definition() -> Iri {
    term(SKOS, "definition")
}

pub fn skos_alt_label() -> Iri {
    term(SKOS, "altLabel")
}

pub fn dcterms_creator() -> Iri {
    term(DCTERMS, "creator")
}

pub fn dcterms_description() -> Iri {
    term(DCTERMS, "description")
}

/// Resolves a sheet label naming an XSD literal type to its identifier.
///
/// Labels match case-insensitively, with or without an `xsd:` prefix;
/// anything else returns `None`.
#[must_use]
pub fn xsd_type(label: &str) -> Option<Iri> {
    let bare = label.strip_prefix("xsd:").unwrap_or(label);
    let lowered = bare.to_lowercase();
    XSD_TYPES
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, canonical)| term(XSD, canonical))
}

/// Returns whether the label names a recognized XSD literal type.
#[must_use]
pub fn is_literal_type(label: &str) -> bool {
    xsd_type(label).is_some()
}

#[cfg(test)]
mod tests {
    use super::{is_literal_type, rdf_type, xsd_type};

    #[test]
    fn terms_expand_into_their_namespace() {
        assert_eq!(
            rdf_type().as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
    }

    #[test]
    fn xsd_labels_match_case_insensitively_with_optional_prefix() {
        assert_eq!(
            xsd_type("string").expect("recognized").as_str(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
        assert_eq!(
            xsd_type("xsd:dateTime").expect("recognized").as_str(),
            "http://www.w3.org/2001/XMLSchema#dateTime"
        );
        assert_eq!(
            xsd_type("DateTime").expect("recognized").as_str(),
            "http://www.w3.org/2001/XMLSchema#dateTime"
        );
        assert!(xsd_type("Identifier").is_none());
    }

    #[test]
    fn literal_type_check_mirrors_resolution() {
        assert!(is_literal_type("integer"));
        assert!(!is_literal_type("Specimen"));
    }
}
