//! Request definitions
//!
//! Represents requests sent to the server.

use crate::error::BenchError;

/// Request opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Set = 0x01,
    Get = 0x02,
}

impl TryFrom<u8> for Opcode {
    type Error = BenchError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(Opcode::Set),
            0x02 => Ok(Opcode::Get),
            _ => Err(BenchError::Protocol(format!(
                "Unknown opcode: 0x{:02x}",
                byte
            ))),
        }
    }
}

/// A single key-value request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Store a value under a key
    Set { key: Vec<u8>, value: Vec<u8> },

    /// Fetch the value stored under a key
    Get { key: Vec<u8> },
}

impl Request {
    /// Get the request opcode
    pub fn opcode(&self) -> Opcode {
        match self {
            Request::Set { .. } => Opcode::Set,
            Request::Get { .. } => Opcode::Get,
        }
    }
}
