use crate::error::{Error, Result};
use crate::field_type::FieldType;
use derive_more::{Deref, From};
use std::sync::Arc;


/// A schema can declare at most this many entries: keys travel as one byte.
pub const MAX_SCHEMA_ENTRIES: usize = 256;

/// Dense index identifying one entry within its schema. Assigned at
/// insertion, in order, and stable for the schema's life.
#[derive(From, Deref, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SchemaKey(u8);

/// Ordered declaration of a record's field layout, by (tag, type, optional
/// nested schema).
///
/// A schema is populated once, then shared frozen behind an [`Arc`]: every
/// record bound to it holds a clone of that `Arc`, as does every outer
/// schema that nests it. Nesting cannot cycle, since a nested schema must
/// be fully built before an outer entry can reference it.
#[derive(Default, Debug)]
pub struct Schema {
    field_types: Vec<FieldType>,
    field_tags: Vec<String>,
    nested_schemas: Vec<Option<Arc<Schema>>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a non-Struct entry under `tag`. Returns the assigned key.
    pub fn add_field(&mut self, tag: &str, field_type: FieldType) -> Result<SchemaKey> {
        if field_type == FieldType::Struct {
            return Err(Error::WrongBuilder);
        }
        self.push_entry(tag, field_type, None)
    }

    /// Declares a Struct entry under `tag`, bound to `nested`. Returns the
    /// assigned key.
    pub fn add_struct(&mut self, tag: &str, nested: Arc<Schema>) -> Result<SchemaKey> {
        self.push_entry(tag, FieldType::Struct, Some(nested))
    }

    fn push_entry(
        &mut self,
        tag: &str,
        field_type: FieldType,
        nested: Option<Arc<Schema>>,
    ) -> Result<SchemaKey> {
        if self.lookup(tag).is_some() {
            return Err(Error::DuplicateTag(String::from(tag)));
        }
        if self.len() == MAX_SCHEMA_ENTRIES {
            return Err(Error::SchemaFull);
        }

        self.field_types.push(field_type);
        self.field_tags.push(String::from(tag));
        self.nested_schemas.push(nested);
        Ok(SchemaKey::from((self.len() - 1) as u8))
    }

    /// The key assigned to `tag`, if declared. A linear scan: schemas stay
    /// small, and hot paths hold the key rather than the tag.
    pub fn lookup(&self, tag: &str) -> Option<SchemaKey> {
        self.field_tags
            .iter()
            .position(|t| t == tag)
            .map(|i| SchemaKey::from(i as u8))
    }

    pub fn type_at(&self, key: SchemaKey) -> Result<FieldType> {
        self.field_types
            .get(*key as usize)
            .copied()
            .ok_or_else(|| self.invalid_key(key))
    }

    pub fn tag_at(&self, key: SchemaKey) -> Result<&str> {
        self.field_tags
            .get(*key as usize)
            .map(String::as_str)
            .ok_or_else(|| self.invalid_key(key))
    }

    /// The nested schema at `key`; present iff the entry is a Struct.
    pub fn nested_schema_at(&self, key: SchemaKey) -> Option<&Arc<Schema>> {
        self.nested_schemas.get(*key as usize)?.as_ref()
    }

    pub fn len(&self) -> usize {
        self.field_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_types.is_empty()
    }

    fn invalid_key(&self, key: SchemaKey) -> Error {
        Error::InvalidKey {
            key: *key,
            declared: self.len(),
        }
    }
}
