use crate::error::{Error, Result};
use derive_more::Deref;

/// Wire length of one variable-length payload: two bytes big-endian,
/// counting payload bytes only (never the key or the length itself).
#[derive(Deref, Clone, Copy)]
pub struct PayloadLen(u16);

impl PayloadLen {
    /// The widest payload the two-byte length can describe.
    pub const MAX: usize = u16::MAX as usize;

    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() > Self::MAX {
            return Err(Error::FieldTooLong(payload.len()));
        }
        Ok(Self(payload.len() as u16))
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}
