//! Form schemas and the static schema table.
//!
//! A `Schema` is an ordered list of field descriptors defining one form
//! type. The `SchemaTable` maps human-readable form-type names to their
//! schemas; the selector in the UI is populated from its keys.

use crate::error::FormError;

/// Input flavor of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Dropdown,
    Date,
    Password,
}

impl FieldKind {
    /// HTML input type attribute for this kind.
    ///
    /// `Dropdown` has no input type; it renders as a `<select>`.
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Number => Some("number"),
            FieldKind::Dropdown => None,
            FieldKind::Date => Some("date"),
            FieldKind::Password => Some("password"),
        }
    }
}

/// One field of a form schema.
///
/// `options` is populated only for `Dropdown` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    pub options: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: &str, kind: FieldKind, label: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: label.to_string(),
            required,
            options: Vec::new(),
        }
    }

    /// Dropdown field with its option list.
    pub fn dropdown(name: &str, label: &str, required: bool, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Dropdown,
            label: label.to_string(),
            required,
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered list of field descriptors for one form type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema, rejecting duplicate field names.
    pub fn new(name: &str, fields: Vec<FieldDescriptor>) -> Result<Self, FormError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(FormError::DuplicateField {
                    schema: name.to_string(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self {
            name: name.to_string(),
            fields,
        })
    }

    /// Anonymous schema with no fields. Tags records submitted while no
    /// form type was selected.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Static lookup from form-type name to `Schema`.
///
/// Insertion order is preserved so the selector lists form types in a
/// stable order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaTable {
    schemas: Vec<Schema>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, keyed by its own name.
    pub fn insert(&mut self, schema: Schema) {
        self.schemas.push(schema);
    }

    /// Look up a schema by form-type name.
    pub fn lookup(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Form-type names in insertion order, for the selector.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// The built-in form types: user, address, and payment information.
    pub fn builtin() -> Self {
        let mut table = Self::new();

        let user = Schema::new(
            "User Information",
            vec![
                FieldDescriptor::new("firstName", FieldKind::Text, "First Name", true),
                FieldDescriptor::new("lastName", FieldKind::Text, "Last Name", true),
                FieldDescriptor::new("age", FieldKind::Number, "Age", false),
            ],
        );

        let address = Schema::new(
            "Address Information",
            vec![
                FieldDescriptor::new("street", FieldKind::Text, "Street", true),
                FieldDescriptor::new("city", FieldKind::Text, "City", true),
                FieldDescriptor::dropdown(
                    "state",
                    "State",
                    true,
                    &["California", "Texas", "New York"],
                ),
                FieldDescriptor::new("zipCode", FieldKind::Text, "Zip Code", false),
            ],
        );

        let payment = Schema::new(
            "Payment Information",
            vec![
                FieldDescriptor::new("cardNumber", FieldKind::Text, "Card Number", true),
                FieldDescriptor::new("expiryDate", FieldKind::Date, "Expiry Date", true),
                FieldDescriptor::new("cvv", FieldKind::Password, "CVV", true),
                FieldDescriptor::new("cardholderName", FieldKind::Text, "Cardholder Name", true),
            ],
        );

        // Builtin field names are unique, so these cannot fail.
        for schema in [user, address, payment] {
            match schema {
                Ok(s) => table.insert(s),
                Err(_) => unreachable!("builtin schemas have unique field names"),
            }
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_names() {
        let table = SchemaTable::builtin();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(
            names,
            vec![
                "User Information",
                "Address Information",
                "Payment Information"
            ]
        );
    }

    #[test]
    fn test_lookup_found() {
        let table = SchemaTable::builtin();
        let schema = table.lookup("User Information").unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.fields()[0].name, "firstName");
        assert!(schema.fields()[0].required);
        assert!(!schema.fields()[2].required);
    }

    #[test]
    fn test_lookup_not_found() {
        let table = SchemaTable::builtin();
        assert!(table.lookup("Tax Information").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_dropdown_field_carries_options() {
        let table = SchemaTable::builtin();
        let address = table.lookup("Address Information").unwrap();
        let state = address.field("state").unwrap();
        assert_eq!(state.kind, FieldKind::Dropdown);
        assert_eq!(state.options, vec!["California", "Texas", "New York"]);
    }

    #[test]
    fn test_non_dropdown_fields_have_no_options() {
        let table = SchemaTable::builtin();
        let user = table.lookup("User Information").unwrap();
        assert!(user.fields().iter().all(|f| f.options.is_empty()));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let result = Schema::new(
            "Broken",
            vec![
                FieldDescriptor::new("email", FieldKind::Text, "Email", true),
                FieldDescriptor::new("email", FieldKind::Text, "Email (again)", false),
            ],
        );
        assert!(matches!(result, Err(FormError::DuplicateField { .. })));
    }

    #[test]
    fn test_input_type_mapping() {
        assert_eq!(FieldKind::Text.input_type(), Some("text"));
        assert_eq!(FieldKind::Number.input_type(), Some("number"));
        assert_eq!(FieldKind::Date.input_type(), Some("date"));
        assert_eq!(FieldKind::Password.input_type(), Some("password"));
        assert_eq!(FieldKind::Dropdown.input_type(), None);
    }
}
