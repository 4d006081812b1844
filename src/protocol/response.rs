//! Response definitions
//!
//! Represents responses read back from the server.

use std::fmt;

/// Status byte for a stored SET or a found GET
pub const STATUS_OK: u8 = 0x00;

// Codes used by the reference server
pub const STATUS_DATA_CORRUPTION: u8 = 65;
pub const STATUS_STORE_FULL: u8 = 66;
pub const STATUS_KEY_NOT_FOUND: u8 = 67;
pub const STATUS_KEY_UPDATED: u8 = 68;
pub const STATUS_SUCCESS: u8 = 69;

/// Outcome of reading a status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A status byte sent by the server
    Code(u8),

    /// The connection yielded no bytes (peer closed or reset)
    ConnectionLost,
}

impl Status {
    /// Numeric form, with `-1` for a lost connection
    pub fn code(&self) -> i16 {
        match self {
            Status::Code(byte) => i16::from(*byte),
            Status::ConnectionLost => -1,
        }
    }

    /// Whether the server answered `0x00`
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Code(STATUS_OK))
    }

    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Status::ConnectionLost)
    }

    /// Human readable description of the status
    pub fn describe(&self) -> String {
        match self {
            Status::Code(STATUS_OK) => "OK".to_string(),
            Status::Code(STATUS_SUCCESS) => "OK: success".to_string(),
            Status::Code(STATUS_KEY_UPDATED) => "OK: key updated".to_string(),
            Status::Code(STATUS_KEY_NOT_FOUND) => "ERR: key not found".to_string(),
            Status::Code(STATUS_STORE_FULL) => "ERR: store full".to_string(),
            Status::Code(STATUS_DATA_CORRUPTION) => "ERR: data corruption".to_string(),
            Status::Code(other) => format!("ERR: unknown response 0x{:02x}", other),
            Status::ConnectionLost => "ERR: connection lost".to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A decoded GET response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    /// Status byte (or lost connection)
    pub status: Status,

    /// Value bytes, present only when the server reported a hit
    pub value: Option<Vec<u8>>,
}

impl GetResponse {
    /// Response for a connection that closed before the status byte
    pub fn connection_lost() -> Self {
        Self {
            status: Status::ConnectionLost,
            value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_code() {
        assert_eq!(Status::ConnectionLost.code(), -1);
        assert_eq!(Status::Code(0).code(), 0);
        assert_eq!(Status::Code(255).code(), 255);
    }

    #[test]
    fn test_describe_known_codes() {
        assert_eq!(Status::Code(STATUS_OK).describe(), "OK");
        assert_eq!(Status::Code(STATUS_KEY_NOT_FOUND).describe(), "ERR: key not found");
        assert_eq!(Status::Code(0x7f).describe(), "ERR: unknown response 0x7f");
    }
}
