use crate::error::{Error, Result};
use crate::field_type::FieldType;
use crate::record::Record;

mod get;
mod put;

/// A single typed value held by a record.
///
/// The declared type is fixed at construction. The payload is either an
/// owned byte run (scalars are stored big-endian, so the codec copies them
/// verbatim onto the wire) or an owned nested record for Struct fields.
#[derive(PartialEq, Debug)]
pub struct Field {
    field_type: FieldType,
    payload: Payload,
}

#[derive(PartialEq, Debug)]
enum Payload {
    Bytes(Vec<u8>),
    Record(Record),
}

impl Field {
    /// An empty field of the given declared type; populate it with one of
    /// the `put_*` setters.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            payload: Payload::Bytes(Vec::new()),
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Count of meaningful payload bytes. Zero for a field carrying a
    /// not-yet-encoded record.
    pub fn len(&self) -> usize {
        match &self.payload {
            Payload::Bytes(b) => b.len(),
            Payload::Record(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expect_type(&self, expected: FieldType) -> Result<()> {
        if self.field_type != expected {
            return Err(Error::TypeMismatch {
                expected,
                actual: self.field_type,
            });
        }
        Ok(())
    }
}
