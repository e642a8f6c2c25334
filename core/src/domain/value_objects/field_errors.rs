//! Per-field validation failures.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::entities::FormField;
use crate::errors::FieldErrorKind;

/// A single field failure with its display message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Mapping from form field to its current error
///
/// An entry is cleared the moment its field is edited and the whole map is
/// recomputed on every submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: BTreeMap<FormField, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, kind: FieldErrorKind, message: impl Into<String>) {
        self.entries.insert(
            field,
            FieldError {
                kind,
                message: message.into(),
            },
        );
    }

    pub fn clear(&mut self, field: FormField) -> Option<FieldError> {
        self.entries.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.entries.get(&field)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.entries.iter().map(|(field, error)| (*field, error))
    }

    /// Field names in form order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields().map(|field| field.name()).collect()
    }

    /// Field name to message, ready for display
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.entries
            .iter()
            .map(|(field, error)| (field.name(), error.message.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_clear() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::Phone, FieldErrorKind::Required, "Phone number is required");
        errors.insert(FormField::FullName, FieldErrorKind::Required, "Name is required");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.field_names(), vec!["full_name", "phone"]);

        let cleared = errors.clear(FormField::Phone).unwrap();
        assert_eq!(cleared.kind, FieldErrorKind::Required);
        assert!(!errors.contains(FormField::Phone));
        assert!(errors.clear(FormField::Phone).is_none());
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::TaxId, FieldErrorKind::InvalidFormat, "Invalid tax ID format");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["tax_id"]["kind"], "invalid_format");
        assert_eq!(json["tax_id"]["message"], "Invalid tax ID format");
    }
}
