//! Boundary between the compiler and whatever reads the ontology sheets.
//!
//! The compiler never touches files: a [`SheetSource`] hands it the five
//! ordered row sequences, each row already split into field-name/value pairs.
//! [`MemorySheets`] is the bundled implementation used by tests and by
//! embedders that assemble rows themselves; file-reading collaborators live
//! outside this crate and implement the same trait.

use std::collections::BTreeMap;

/// Column names of the published sheet schema.
pub mod columns {
    pub const PREFIX_NAME: &str = "Prefix Name";
    pub const ONTOLOGY_URL: &str = "Ontology URL";

    pub const VARIABLE_NAME: &str = "Variable Name";
    pub const BELONGS_TO_ONTOLOGY: &str = "Belongs to Ontology";
    pub const PARENT_VARIABLE: &str = "Parent Variable";
    pub const DEFINITION_OF_VARIABLE: &str = "Definition of Variable";
    pub const ALTERNATIVE_NAMES: &str = "Alternative Name(s)";
    pub const UNIT: &str = "Unit";
    pub const LOGICAL_AXIOMS: &str = "Logical Axioms";

    pub const VALUETYPE_NAME: &str = "ValueType Name";
    pub const DEFINITION_OF_PROPERTY: &str = "Definition of Property";

    pub const RELATIONSHIP_NAME: &str = "Relationship Name";
    pub const DEFINITION: &str = "Definition";

    pub const DOMAIN: &str = "Domain";
    pub const RANGE: &str = "Range";
}

/// One sheet row as a field-name to value mapping.
///
/// Values are stored verbatim; every read trims surrounding whitespace and
/// treats blank cells as absent, so downstream code never sees the empty
/// string as a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field value, replacing any previous value for the column.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Returns the trimmed value of a column, or `None` when the cell is
    /// missing or blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Splits a comma-separated cell into its trimmed, non-empty items.
    #[must_use]
    pub fn list(&self, column: &str) -> Vec<String> {
        self.get(column)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<C, V> FromIterator<(C, V)> for Record
where
    C: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// Supplies the five ordered row sequences backing one compilation run.
pub trait SheetSource {
    /// The fixed metadata rows as label/value pairs, in sheet order.
    fn ontology_info(&self) -> Vec<(String, String)>;

    /// Namespace declaration rows.
    fn namespaces(&self) -> Vec<Record>;

    /// Class ("variable") definition rows.
    fn classes(&self) -> Vec<Record>;

    /// Data-property ("value type") definition rows.
    fn data_properties(&self) -> Vec<Record>;

    /// Object-property ("relationship") definition rows.
    fn object_properties(&self) -> Vec<Record>;
}

/// In-memory [`SheetSource`] assembled row by row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySheets {
    ontology_info: Vec<(String, String)>,
    namespaces: Vec<Record>,
    classes: Vec<Record>,
    data_properties: Vec<Record>,
    object_properties: Vec<Record>,
}

impl MemorySheets {
    /// Creates a source with all five sheets empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the metadata rows.
    #[must_use]
    pub fn with_ontology_info<L, V>(mut self, rows: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        self.ontology_info = rows
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect();
        self
    }

    /// Replaces the namespace rows.
    #[must_use]
    pub fn with_namespaces(mut self, rows: impl IntoIterator<Item = Record>) -> Self {
        self.namespaces = rows.into_iter().collect();
        self
    }

    /// Replaces the class rows.
    #[must_use]
    pub fn with_classes(mut self, rows: impl IntoIterator<Item = Record>) -> Self {
        self.classes = rows.into_iter().collect();
        self
    }

    /// Replaces the data-property rows.
    #[must_use]
    pub fn with_data_properties(mut self, rows: impl IntoIterator<Item = Record>) -> Self {
        self.data_properties = rows.into_iter().collect();
        self
    }

    /// Replaces the object-property rows.
    #[must_use]
    pub fn with_object_properties(mut self, rows: impl IntoIterator<Item = Record>) -> Self {
        self.object_properties = rows.into_iter().collect();
        self
    }
}

impl SheetSource for MemorySheets {
    fn ontology_info(&self) -> Vec<(String, String)> {
        self.ontology_info.clone()
    }

    fn namespaces(&self) -> Vec<Record> {
        self.namespaces.clone()
    }

    fn classes(&self) -> Vec<Record> {
        self.classes.clone()
    }

    fn data_properties(&self) -> Vec<Record> {
        self.data_properties.clone()
    }

    fn object_properties(&self) -> Vec<Record> {
        self.object_properties.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{columns, MemorySheets, Record, SheetSource};

    #[test]
    fn reads_are_trimmed_and_blank_cells_are_absent() {
        let record = Record::new()
            .with(columns::VARIABLE_NAME, "  Identifier  ")
            .with(columns::PARENT_VARIABLE, "   ")
            .with(columns::UNIT, "");

        assert_eq!(record.get(columns::VARIABLE_NAME), Some("Identifier"));
        assert_eq!(record.get(columns::PARENT_VARIABLE), None);
        assert_eq!(record.get(columns::UNIT), None);
        assert_eq!(record.get(columns::DEFINITION_OF_VARIABLE), None);
    }

    #[test]
    fn lists_split_on_commas_and_drop_blank_items() {
        let record = Record::new().with(columns::ALTERNATIVE_NAMES, " id , key ,, label ");
        assert_eq!(record.list(columns::ALTERNATIVE_NAMES), vec!["id", "key", "label"]);
        assert!(record.list(columns::UNIT).is_empty());
    }

    #[test]
    fn records_collect_from_header_value_pairs() {
        let headers = [columns::VARIABLE_NAME, columns::BELONGS_TO_ONTOLOGY];
        let values = ["Identifier", "PMDCo"];
        let record: Record = headers.into_iter().zip(values).collect();
        assert_eq!(record.get(columns::VARIABLE_NAME), Some("Identifier"));
        assert_eq!(record.get(columns::BELONGS_TO_ONTOLOGY), Some("PMDCo"));
    }

    #[test]
    fn memory_sheets_preserve_row_order() {
        let source = MemorySheets::new()
            .with_ontology_info([("Ontology Name", "TestOntology")])
            .with_classes([
                Record::new().with(columns::VARIABLE_NAME, "First"),
                Record::new().with(columns::VARIABLE_NAME, "Second"),
            ]);

        let rows = source.classes();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(columns::VARIABLE_NAME), Some("First"));
        assert_eq!(rows[1].get(columns::VARIABLE_NAME), Some("Second"));
        assert_eq!(
            source.ontology_info(),
            vec![("Ontology Name".to_owned(), "TestOntology".to_owned())]
        );
    }
}
