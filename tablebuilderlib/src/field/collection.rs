//! Ordered, uniquely named collections of fields.

use serde_json::Value;

use super::spec::Field;
use crate::error::TableError;
use crate::Result;

/// The shape of a table: fields in display order, each with a unique name.
///
/// Declared once and reused across builds.
pub struct FieldSet<R = Value> {
    fields: Vec<Field<R>>,
}

impl<R> FieldSet<R> {
    /// An empty declaration.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register a field under `name` (builder style).
    pub fn field(mut self, name: impl Into<String>, field: Field<R>) -> Result<Self> {
        self.push(name, field)?;
        Ok(self)
    }

    /// Register a field under `name`. Fails on a duplicate name.
    pub fn push(&mut self, name: impl Into<String>, mut field: Field<R>) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(TableError::DuplicateField(name));
        }
        field.name = name;
        self.fields.push(field);
        Ok(())
    }

    /// Build from `(name, field)` pairs, preserving order.
    pub fn from_fields<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Field<R>)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, field) in fields {
            set.push(name, field)?;
        }
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&Field<R>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<R>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A new set holding only `names`, in the given order.
    ///
    /// Unknown names raise `UnknownField`; repeated names `DuplicateField`.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut selected = Self::new();
        for name in names {
            let name = name.as_ref();
            let field = self
                .get(name)
                .ok_or_else(|| TableError::UnknownField(name.to_string()))?;
            selected.push(name, field.clone())?;
        }
        Ok(selected)
    }
}

impl<R> Default for FieldSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FieldSet<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<R> std::fmt::Debug for FieldSet<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

impl<'a, R> IntoIterator for &'a FieldSet<R> {
    type Item = &'a Field<R>;
    type IntoIter = std::slice::Iter<'a, Field<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> FieldSet {
        FieldSet::new()
            .field("name", Field::new("Item Name").key("name"))
            .unwrap()
            .field("quantity", Field::new("Quantity").key("quantity"))
            .unwrap()
            .field("price", Field::new("Item Price").key("price"))
            .unwrap()
    }

    #[test]
    fn test_order_preserved() {
        let cart = cart();
        let names: Vec<&str> = cart.names().collect();
        assert_eq!(names, vec!["name", "quantity", "price"]);
    }

    #[test]
    fn test_registration_assigns_name() {
        let fields = cart();
        assert_eq!(fields.get("price").unwrap().name(), "price");
        assert_eq!(fields.get("price").unwrap().header_text(), Some("Item Price"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = cart().field("name", Field::new("Again")).unwrap_err();
        assert!(matches!(err, TableError::DuplicateField(name) if name == "name"));
    }

    #[test]
    fn test_from_fields() {
        let fields: FieldSet =
            FieldSet::from_fields([("a", Field::new("A")), ("b", Field::new("B"))]).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(FieldSet::<Value>::from_fields([("a", Field::new("A")), ("a", Field::new("B"))])
            .is_err());
    }

    #[test]
    fn test_select_reorders() {
        let selected = cart().select(&["price", "name"]).unwrap();
        let names: Vec<&str> = selected.names().collect();
        assert_eq!(names, vec!["price", "name"]);
    }

    #[test]
    fn test_select_unknown() {
        let err = cart().select(&["name", "colour"]).unwrap_err();
        assert!(matches!(err, TableError::UnknownField(name) if name == "colour"));
    }

    #[test]
    fn test_select_repeated() {
        assert!(matches!(
            cart().select(&["name", "name"]),
            Err(TableError::DuplicateField(_))
        ));
    }
}
