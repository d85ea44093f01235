//! Schema-driven binary serialization for compound records.
//!
//! A [`Schema`] declares a record's field layout ahead of time; a
//! [`Record`] holds ordered, typed field values bound to one schema; a
//! [`Processor`] turns records into wire bytes and back. Both endpoints
//! hold the schema out of band, so the wire carries nothing beyond a
//! one-byte key per field and a two-byte length for variable-length
//! values (see the [`codec`] module for the exact format).
//!
//! ```
//! use rapidstruct::{FieldType, Processor, Record, Schema};
//! use std::sync::Arc;
//!
//! # fn main() -> rapidstruct::Result<()> {
//! let mut schema = Schema::new();
//! schema.add_field("Name", FieldType::Str)?;
//! schema.add_field("Port", FieldType::Short)?;
//! let schema = Arc::new(schema);
//!
//! let mut record = Record::new(Arc::clone(&schema));
//! record.add_string("Name", "gateway")?;
//! record.add_short("Port", 4433)?;
//!
//! let mut processor = Processor::new();
//! let bytes = processor.encode(&record)?;
//!
//! let mut decoded = Record::new(Arc::clone(&schema));
//! processor.decode(&bytes, &mut decoded)?;
//! assert_eq!(decoded.first("Port").unwrap().as_short()?, 4433);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod field;
pub mod field_type;
pub mod record;
pub mod schema;

pub use codec::*;
pub use error::*;
pub use field::*;
pub use field_type::*;
pub use record::*;
pub use schema::*;
