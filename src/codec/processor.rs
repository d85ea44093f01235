use super::read_stream::ReadStream;
use super::write_stream::WriteStream;
use super::PayloadLen;
use crate::error::Result;
use crate::field::Field;
use crate::record::Record;
use crate::schema::SchemaKey;
use std::sync::Arc;

/// Converts records to wire bytes and back.
///
/// A processor owns mutable scratch buffers, so one instance must never run
/// two operations at once; instantiate one per worker or per logical stream
/// to process in parallel. Any record bound to any schema can go through
/// the same instance, and the buffers are reused across calls.
pub struct Processor {
    write_stream: WriteStream,
    read_stream: ReadStream,
}

impl Processor {
    pub fn new() -> Self {
        Self {
            write_stream: WriteStream::new(),
            read_stream: ReadStream::new(),
        }
    }

    /// A processor whose write buffer starts at `size` bytes. Worth setting
    /// when encoded sizes are known ahead of time; the buffer still grows
    /// on demand.
    pub fn with_write_capacity(size: usize) -> Self {
        Self {
            write_stream: WriteStream::with_capacity(size),
            read_stream: ReadStream::new(),
        }
    }

    /// Serializes `record` into a fresh byte sequence.
    ///
    /// The record is not modified: a field carrying a nested record is
    /// materialized into the shared scratch buffer behind a mark and copied
    /// out, leaving the caller's field intact. Fails with `FieldTooLong`
    /// when a variable-length payload exceeds 65535 bytes.
    pub fn encode(&mut self, record: &Record) -> Result<Vec<u8>> {
        self.write_stream.reset();
        self.encode_record(record)
    }

    fn encode_record(&mut self, record: &Record) -> Result<Vec<u8>> {
        self.write_stream.push_mark();

        for (key, field) in record.entries() {
            self.write_field(key, field)?;
        }

        let bytes = self.write_stream.copy_from_last_mark();
        self.write_stream.rewind_to_last_mark();
        self.write_stream.pop_mark();
        Ok(bytes)
    }

    fn write_field(&mut self, key: SchemaKey, field: &Field) -> Result<()> {
        self.write_stream.write_byte(*key);

        if field.field_type().is_variable_len() {
            // A field carrying a record is serialized first; its wire
            // length is the length of the materialized bytes. A Struct
            // field already holding bytes is emitted as-is.
            let materialized;
            let payload: &[u8] = match field.as_struct().ok() {
                Some(nested) => {
                    materialized = self.encode_record(nested)?;
                    &materialized
                }
                None => field.as_bytes(),
            };

            let len = PayloadLen::from_payload(payload)?;
            self.write_stream.write(&len.to_be_bytes());
            self.write_stream.write(payload);
        } else {
            self.write_stream.write(field.as_bytes());
        }
        Ok(())
    }

    /// Deserializes `bytes` into `record`, which must be bound to the
    /// schema the bytes were encoded against. The record is reset first.
    ///
    /// On failure the record's contents are unspecified; discard or reset
    /// it. The processor itself stays reusable.
    pub fn decode(&mut self, bytes: &[u8], record: &mut Record) -> Result<()> {
        self.read_stream.reset();
        self.decode_record(bytes, record)
    }

    fn decode_record(&mut self, bytes: &[u8], record: &mut Record) -> Result<()> {
        record.reset();
        self.read_stream.push_bytes(bytes);

        while self.read_stream.remaining() > 0 {
            self.read_field(record)?;
        }

        self.read_stream.pop_bytes();
        Ok(())
    }

    fn read_field(&mut self, record: &mut Record) -> Result<()> {
        let schema = Arc::clone(record.schema());

        let key = SchemaKey::from(self.read_stream.read_byte()?);
        let field_type = schema.type_at(key)?;

        let payload_len = match field_type.fixed_len() {
            Some(fixed) => fixed,
            None => {
                let len = PayloadLen::from_be_bytes([
                    self.read_stream.read_byte()?,
                    self.read_stream.read_byte()?,
                ]);
                *len as usize
            }
        };
        let payload = self.read_stream.read_exact(payload_len)?;

        let mut field = Field::new(field_type);
        match schema.nested_schema_at(key) {
            Some(nested_schema) => {
                let mut nested = Record::new(Arc::clone(nested_schema));
                self.decode_record(&payload, &mut nested)?;
                field.put_struct(nested)?;
            }
            None => field.put_bytes(&payload),
        }
        record.add(key, field)
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}
