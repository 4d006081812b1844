//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Requests
//! ```text
//! SET: ┌──────────┬────────────┬────────────┬─────────┬───────────┐
//!      │ 0x01 (1) │ KeyLen (1) │ ValLen (1) │   Key   │   Value   │
//!      └──────────┴────────────┴────────────┴─────────┴───────────┘
//! GET: ┌──────────┬────────────┬─────────┐
//!      │ 0x02 (1) │ KeyLen (1) │   Key   │
//!      └──────────┴────────────┴─────────┘
//! ```
//!
//! ### Responses
//! ```text
//! SET: ┌────────────┐
//!      │ Status (1) │
//!      └────────────┘
//! GET: ┌────────────┬────────────┬─────────┐
//!      │ Status (1) │ ValLen (1) │  Value  │   (ValLen + Value only if Status == 0x00)
//!      └────────────┴────────────┴─────────┘
//! ```

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{GetResponse, Opcode, Request, Status, STATUS_OK};
use crate::error::{BenchError, Result};

/// Keys and values are length-prefixed with a single byte
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// Opcode + key length + value length
pub const SET_HEADER_SIZE: usize = 3;

/// Opcode + key length
pub const GET_HEADER_SIZE: usize = 2;

fn field_len(name: &str, field: &[u8]) -> Result<u8> {
    u8::try_from(field.len()).map_err(|_| {
        BenchError::Protocol(format!(
            "{} too long: {} bytes (max {})",
            name,
            field.len(),
            MAX_FIELD_LEN
        ))
    })
}

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a SET request
///
/// Format: 0x01 + key_len (1) + val_len (1) + key + value
pub fn encode_set(key: &[u8], value: &[u8]) -> Result<Bytes> {
    let key_len = field_len("key", key)?;
    let val_len = field_len("value", value)?;

    let mut buf = BytesMut::with_capacity(SET_HEADER_SIZE + key.len() + value.len());
    buf.put_u8(Opcode::Set as u8);
    buf.put_u8(key_len);
    buf.put_u8(val_len);
    buf.put_slice(key);
    buf.put_slice(value);

    Ok(buf.freeze())
}

/// Encode a GET request
///
/// Format: 0x02 + key_len (1) + key
pub fn encode_get(key: &[u8]) -> Result<Bytes> {
    let key_len = field_len("key", key)?;

    let mut buf = BytesMut::with_capacity(GET_HEADER_SIZE + key.len());
    buf.put_u8(Opcode::Get as u8);
    buf.put_u8(key_len);
    buf.put_slice(key);

    Ok(buf.freeze())
}

/// Encode any request
pub fn encode_request(request: &Request) -> Result<Bytes> {
    match request {
        Request::Set { key, value } => encode_set(key, value),
        Request::Get { key } => encode_get(key),
    }
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = encode_request(request)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Read a single byte, `None` if the stream is at EOF
fn read_byte<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read up to `len` bytes, stopping early if the stream closes
///
/// A short read is returned as-is rather than treated as an error.
fn read_up_to<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

/// Read a SET response (one status byte)
pub fn decode_set_response<R: Read>(reader: &mut R) -> Result<Status> {
    Ok(match read_byte(reader)? {
        Some(byte) => Status::Code(byte),
        None => Status::ConnectionLost,
    })
}

/// Read a GET response
///
/// A hit carries a length byte and the value. If the stream closes before the
/// length byte the status is kept and the value is absent; if it closes while
/// the value is being read, whatever arrived is returned.
pub fn decode_get_response<R: Read>(reader: &mut R) -> Result<GetResponse> {
    let status = match read_byte(reader)? {
        Some(byte) => byte,
        None => return Ok(GetResponse::connection_lost()),
    };

    if status != STATUS_OK {
        return Ok(GetResponse {
            status: Status::Code(status),
            value: None,
        });
    }

    let value = match read_byte(reader)? {
        Some(val_len) => Some(read_up_to(reader, usize::from(val_len))?),
        None => None,
    };

    Ok(GetResponse {
        status: Status::Code(status),
        value,
    })
}

// =============================================================================
// Server Side
// =============================================================================

/// Read a complete request from a stream
///
/// Returns `Ok(None)` when the peer closes cleanly between requests.
pub fn read_request<R: Read>(reader: &mut R) -> Result<Option<Request>> {
    let opcode = match read_byte(reader)? {
        Some(byte) => Opcode::try_from(byte)?,
        None => return Ok(None),
    };

    let request = match opcode {
        Opcode::Set => {
            let mut header = [0u8; 2];
            reader.read_exact(&mut header)?;
            let mut key = vec![0u8; usize::from(header[0])];
            reader.read_exact(&mut key)?;
            let mut value = vec![0u8; usize::from(header[1])];
            reader.read_exact(&mut value)?;
            Request::Set { key, value }
        }
        Opcode::Get => {
            let mut key_len = [0u8; 1];
            reader.read_exact(&mut key_len)?;
            let mut key = vec![0u8; usize::from(key_len[0])];
            reader.read_exact(&mut key)?;
            Request::Get { key }
        }
    };

    Ok(Some(request))
}

/// Encode a SET response
pub fn encode_set_response(status: u8) -> Bytes {
    Bytes::copy_from_slice(&[status])
}

/// Encode a GET response
///
/// The value is only written when `status` is `0x00`.
pub fn encode_get_response(status: u8, value: &[u8]) -> Result<Bytes> {
    if status != STATUS_OK {
        return Ok(Bytes::copy_from_slice(&[status]));
    }

    let val_len = field_len("value", value)?;
    let mut buf = BytesMut::with_capacity(2 + value.len());
    buf.put_u8(status);
    buf.put_u8(val_len);
    buf.put_slice(value);
    Ok(buf.freeze())
}
