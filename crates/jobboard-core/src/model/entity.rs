use crate::model::field::FieldModel;

///
/// EntityModel
/// Static runtime model for one listable entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Stable external name used in diagnostics and observability.
    pub path: &'static str,
    /// Storage collection (table) name.
    pub table: &'static str,
    /// Primary key field (points at an entry in `fields`); the sort tie-break.
    pub primary_key: &'static FieldModel,
    /// Ordered field list (authoritative for validation).
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    /// Resolve a field by its filter-facing name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolve a field only when it may be used as a sort key.
    #[must_use]
    pub fn sortable_field(&self, name: &str) -> Option<&'static FieldModel> {
        self.field(name)
            .filter(|field| field.sortable || field.name == self.primary_key.name)
    }

    #[must_use]
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.name == name
    }
}

// Models are static singletons; the path identifies one.
impl PartialEq for EntityModel {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for EntityModel {}
