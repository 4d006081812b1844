//! Protocol Module
//!
//! Defines the binary wire protocol spoken with the key-value server.
//!
//! ## Protocol Format
//!
//! Every length field is a single byte, so keys and values are limited to
//! 255 bytes.
//!
//! ### Requests
//! - 0x01: SET - key_len (1) + val_len (1) + key + value
//! - 0x02: GET - key_len (1) + key
//!
//! ### Responses
//! - SET: status (1)
//! - GET: status (1), then val_len (1) + value when status is 0x00
//!
//! ### Status Codes
//! - 0x00: OK (stored / found)
//! - anything else: server-defined failure or miss
//!
//! A read that yields no bytes is reported locally as
//! [`Status::ConnectionLost`] (numeric `-1`); the server never sends it.

mod request;
mod response;
mod codec;

pub use request::{Opcode, Request};
pub use response::{
    GetResponse, Status, STATUS_DATA_CORRUPTION, STATUS_KEY_NOT_FOUND, STATUS_KEY_UPDATED,
    STATUS_OK, STATUS_STORE_FULL, STATUS_SUCCESS,
};
pub use codec::{
    decode_get_response, decode_set_response, encode_get, encode_get_response, encode_request,
    encode_set, encode_set_response, read_request, write_request, MAX_FIELD_LEN,
};
