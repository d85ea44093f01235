use crate::error::{Error, Result};
use crate::field::Field;
use crate::field_type::FieldType;
use crate::schema::{Schema, SchemaKey};
use std::fmt;
use std::sync::Arc;


const DEFAULT_FIELD_CAPACITY: usize = 64;

/// Anything that can locate a schema entry: a tag, or the key it was
/// assigned.
pub trait Locator {
    fn resolve(&self, schema: &Schema) -> Result<SchemaKey>;
}

impl Locator for &str {
    fn resolve(&self, schema: &Schema) -> Result<SchemaKey> {
        schema
            .lookup(self)
            .ok_or_else(|| Error::UnknownTag(String::from(*self)))
    }
}

impl Locator for SchemaKey {
    fn resolve(&self, schema: &Schema) -> Result<SchemaKey> {
        schema.type_at(*self)?;
        Ok(*self)
    }
}

/// Ordered sequence of (schema-key, field) pairs bound to one schema.
///
/// Append-only between resets. The same key may be appended many times;
/// insertion order is preserved, which is what makes repeated fields under
/// one tag work. Reuse an instance across encode cycles where
/// possible: `reset` keeps the allocated capacity.
#[derive(Debug)]
pub struct Record {
    schema: Arc<Schema>,
    schema_keys: Vec<SchemaKey>,
    fields: Vec<Field>,
}

/* Ordered-field equality: same (key, field) sequence. The bound schema is
not part of the comparison. */
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema_keys == other.schema_keys && self.fields == other.fields
    }
}

impl Record {
    /// A record bound to `schema`, with the default starting field capacity.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_field_capacity(schema, DEFAULT_FIELD_CAPACITY)
    }

    /// A record sized for a known field count. Only worth lowering from the
    /// default when a record is known to stay small.
    pub fn with_field_capacity(schema: Arc<Schema>, field_capacity: usize) -> Self {
        Self {
            schema,
            schema_keys: Vec::with_capacity(field_capacity),
            fields: Vec::with_capacity(field_capacity),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Functionally removes every field. Capacity is retained.
    pub fn reset(&mut self) {
        self.schema_keys.clear();
        self.fields.clear();
    }

    /// The (key, field) pairs in insertion order, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = (SchemaKey, &Field)> {
        self.schema_keys.iter().copied().zip(self.fields.iter())
    }

    /// Appends a pre-built field, re-checking its declared type against the
    /// schema entry.
    pub fn add(&mut self, loc: impl Locator, field: Field) -> Result<()> {
        let key = loc.resolve(&self.schema)?;
        let declared = self.schema.type_at(key)?;
        if field.field_type() != declared {
            return Err(Error::TypeMismatch {
                expected: declared,
                actual: field.field_type(),
            });
        }
        self.store(key, field);
        Ok(())
    }

    pub fn add_bool(&mut self, loc: impl Locator, value: bool) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_bool(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_byte(&mut self, loc: impl Locator, value: u8) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_byte(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_short(&mut self, loc: impl Locator, value: u16) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_short(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_int(&mut self, loc: impl Locator, value: u32) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_int(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_long(&mut self, loc: impl Locator, value: u64) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_long(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_float(&mut self, loc: impl Locator, value: f32) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_float(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_double(&mut self, loc: impl Locator, value: f64) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_double(value)?;
        self.store(key, field);
        Ok(())
    }

    pub fn add_string(&mut self, loc: impl Locator, value: &str) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_string(value)?;
        self.store(key, field);
        Ok(())
    }

    /// Stores `value` into a field typed per the schema entry, with no type
    /// cross-check. Meant for Raw entries; a caller who bypasses that is
    /// trusted to know the wire representation.
    pub fn add_bytes(&mut self, loc: impl Locator, value: &[u8]) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_bytes(value);
        self.store(key, field);
        Ok(())
    }

    pub fn add_struct(&mut self, loc: impl Locator, value: Record) -> Result<()> {
        let (key, mut field) = self.new_field(loc)?;
        field.put_struct(value)?;
        self.store(key, field);
        Ok(())
    }

    /// The first field appended under the locator, in insertion order. An
    /// unresolvable locator reads as absent.
    pub fn first(&self, loc: impl Locator) -> Option<&Field> {
        let key = loc.resolve(&self.schema).ok()?;
        self.entries().find(|(k, _)| *k == key).map(|(_, f)| f)
    }

    /// Every field appended under the locator, in insertion order.
    pub fn all_for(&self, loc: impl Locator) -> Vec<&Field> {
        match loc.resolve(&self.schema) {
            Err(_) => Vec::new(),
            Ok(key) => self
                .entries()
                .filter(|(k, _)| *k == key)
                .map(|(_, f)| f)
                .collect(),
        }
    }

    pub fn has(&self, loc: impl Locator) -> bool {
        self.first(loc).is_some()
    }

    fn new_field(&self, loc: impl Locator) -> Result<(SchemaKey, Field)> {
        let key = loc.resolve(&self.schema)?;
        let field = Field::new(self.schema.type_at(key)?);
        Ok((key, field))
    }

    fn store(&mut self, key: SchemaKey, field: Field) {
        self.schema_keys.push(key);
        self.fields.push(field);
    }
}

/* Human-readable dump; nested records indent one tab per level. */
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, 0)
    }
}

impl Record {
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, nesting: usize) -> fmt::Result {
        for (key, field) in self.entries() {
            for _ in 0..nesting {
                write!(f, "\t")?;
            }
            let tag = self.schema.tag_at(key).unwrap_or("?");
            write!(
                f,
                "Tag: {}, SchemaKey: {}, Type: {:?}, Value: ",
                tag,
                *key,
                field.field_type()
            )?;
            self.fmt_value(f, field, nesting)?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>, field: &Field, nesting: usize) -> fmt::Result {
        match field.field_type() {
            FieldType::Bool => fmt_scalar(f, field, field.as_bool()),
            FieldType::Byte => fmt_scalar(f, field, field.as_byte()),
            FieldType::Short => fmt_scalar(f, field, field.as_short()),
            FieldType::Int => fmt_scalar(f, field, field.as_int()),
            FieldType::Long => fmt_scalar(f, field, field.as_long()),
            FieldType::Float => fmt_scalar(f, field, field.as_float()),
            FieldType::Double => fmt_scalar(f, field, field.as_double()),
            FieldType::Str => match field.as_string() {
                Ok(s) => write!(f, "{}", s),
                Err(_) => fmt_byte_run(f, field.as_bytes()),
            },
            FieldType::Raw => fmt_byte_run(f, field.as_bytes()),
            FieldType::Struct => match field.as_struct() {
                Ok(rec) => {
                    writeln!(f)?;
                    rec.fmt_nested(f, nesting + 1)
                }
                Err(_) => fmt_byte_run(f, field.as_bytes()),
            },
        }
    }
}

fn fmt_scalar<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    field: &Field,
    value: Result<T>,
) -> fmt::Result {
    match value {
        Ok(v) => write!(f, "{}", v),
        Err(_) => fmt_byte_run(f, field.as_bytes()),
    }
}

fn fmt_byte_run(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", b)?;
    }
    Ok(())
}
