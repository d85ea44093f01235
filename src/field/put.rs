use super::{Field, Payload};
use crate::error::Result;
use crate::field_type::FieldType;
use crate::record::Record;

/* Setters. Each replaces the whole payload. */
impl Field {
    pub fn put_bool(&mut self, value: bool) -> Result<()> {
        self.expect_type(FieldType::Bool)?;
        self.payload = Payload::Bytes(vec![u8::from(value)]);
        Ok(())
    }

    pub fn put_byte(&mut self, value: u8) -> Result<()> {
        self.expect_type(FieldType::Byte)?;
        self.payload = Payload::Bytes(vec![value]);
        Ok(())
    }

    pub fn put_short(&mut self, value: u16) -> Result<()> {
        self.expect_type(FieldType::Short)?;
        self.payload = Payload::Bytes(value.to_be_bytes().to_vec());
        Ok(())
    }

    pub fn put_int(&mut self, value: u32) -> Result<()> {
        self.expect_type(FieldType::Int)?;
        self.payload = Payload::Bytes(value.to_be_bytes().to_vec());
        Ok(())
    }

    pub fn put_long(&mut self, value: u64) -> Result<()> {
        self.expect_type(FieldType::Long)?;
        self.payload = Payload::Bytes(value.to_be_bytes().to_vec());
        Ok(())
    }

    pub fn put_float(&mut self, value: f32) -> Result<()> {
        self.expect_type(FieldType::Float)?;
        self.payload = Payload::Bytes(value.to_be_bytes().to_vec());
        Ok(())
    }

    pub fn put_double(&mut self, value: f64) -> Result<()> {
        self.expect_type(FieldType::Double)?;
        self.payload = Payload::Bytes(value.to_be_bytes().to_vec());
        Ok(())
    }

    pub fn put_string(&mut self, value: &str) -> Result<()> {
        self.expect_type(FieldType::Str)?;
        self.payload = Payload::Bytes(value.as_bytes().to_vec());
        Ok(())
    }

    /// Replaces the payload with `value`, regardless of the declared type.
    ///
    /// The one setter with no type cross-check. It exists for Raw fields,
    /// but a caller who knows the wire representation may use it under any
    /// type.
    pub fn put_bytes(&mut self, value: &[u8]) {
        self.payload = Payload::Bytes(value.to_vec());
    }

    pub fn put_struct(&mut self, value: Record) -> Result<()> {
        self.expect_type(FieldType::Struct)?;
        self.payload = Payload::Record(value);
        Ok(())
    }
}
