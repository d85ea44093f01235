use crate::field_type::FieldType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a schema declaration, record append, or codec pass can fail.
///
/// Nothing is recovered internally; each failure aborts the operation that
/// raised it and surfaces here.
#[derive(Error, Clone, PartialEq, Debug)]
pub enum Error {
    #[error("tag {0:?} is not declared in the schema")]
    UnknownTag(String),

    #[error("schema key {key} is outside the {declared} declared entries")]
    InvalidKey { key: u8, declared: usize },

    #[error("tag {0:?} has already been declared")]
    DuplicateTag(String),

    #[error("a Struct entry carries a nested schema; declare it via add_struct")]
    WrongBuilder,

    #[error("schema already holds the maximum of 256 entries")]
    SchemaFull,

    #[error("field of type {actual:?} was treated as {expected:?}")]
    TypeMismatch {
        expected: FieldType,
        actual: FieldType,
    },

    #[error("field payload spans {0} bytes, over the 65535-byte wire limit")]
    FieldTooLong(usize),

    #[error("input ended with {have} of {want} bytes available")]
    TruncatedInput { want: usize, have: usize },

    #[error("field payload holds {have} bytes, fewer than the {want} read")]
    ShortPayload { want: usize, have: usize },

    #[error("field payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("struct field was never populated with a record")]
    EmptyStructField,
}
