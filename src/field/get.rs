use super::{Field, Payload};
use crate::error::{Error, Result};
use crate::field_type::FieldType;
use crate::record::Record;
use std::str;

/* Getters. Each checks the declared type; the scalar ones additionally
require the payload to hold at least the scalar's width, which only the
bytes escape hatch can violate. */
impl Field {
    pub fn as_bool(&self) -> Result<bool> {
        self.expect_type(FieldType::Bool)?;
        Ok(self.scalar_bytes::<1>()?[0] == 1)
    }

    pub fn as_byte(&self) -> Result<u8> {
        self.expect_type(FieldType::Byte)?;
        Ok(self.scalar_bytes::<1>()?[0])
    }

    pub fn as_short(&self) -> Result<u16> {
        self.expect_type(FieldType::Short)?;
        Ok(u16::from_be_bytes(self.scalar_bytes::<2>()?))
    }

    pub fn as_int(&self) -> Result<u32> {
        self.expect_type(FieldType::Int)?;
        Ok(u32::from_be_bytes(self.scalar_bytes::<4>()?))
    }

    pub fn as_long(&self) -> Result<u64> {
        self.expect_type(FieldType::Long)?;
        Ok(u64::from_be_bytes(self.scalar_bytes::<8>()?))
    }

    pub fn as_float(&self) -> Result<f32> {
        self.expect_type(FieldType::Float)?;
        Ok(f32::from_be_bytes(self.scalar_bytes::<4>()?))
    }

    pub fn as_double(&self) -> Result<f64> {
        self.expect_type(FieldType::Double)?;
        Ok(f64::from_be_bytes(self.scalar_bytes::<8>()?))
    }

    pub fn as_string(&self) -> Result<&str> {
        self.expect_type(FieldType::Str)?;
        str::from_utf8(self.as_bytes()).map_err(|_| Error::InvalidUtf8)
    }

    /// The raw payload bytes. Works under every declared type and never
    /// fails; a field carrying a not-yet-encoded record reads as empty.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.payload {
            Payload::Bytes(b) => b,
            Payload::Record(_) => &[],
        }
    }

    pub fn as_struct(&self) -> Result<&Record> {
        self.expect_type(FieldType::Struct)?;
        match &self.payload {
            Payload::Record(rec) => Ok(rec),
            Payload::Bytes(_) => Err(Error::EmptyStructField),
        }
    }

    fn scalar_bytes<const LEN: usize>(&self) -> Result<[u8; LEN]> {
        let payload = self.as_bytes();
        let head = payload.get(..LEN).ok_or(Error::ShortPayload {
            want: LEN,
            have: payload.len(),
        })?;

        let mut buf = [0u8; LEN];
        buf.copy_from_slice(head);
        Ok(buf)
    }
}
