//! Raw frames handed over by a transport.
//!
//! The server speaks JSON text; binary frames are accepted as UTF-8 JSON too.

use bytes::Bytes;

use crate::error::{Result, TricklineError};
use crate::protocol::envelope::decode_inbound;
use crate::protocol::messages::Inbound;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Bytes),
}

impl Frame {
    pub fn len(&self) -> usize {
        match self {
            Frame::Text(s) => s.len(),
            Frame::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a frame into a typed inbound event.
pub fn decode_frame(frame: &Frame) -> Result<Inbound> {
    match frame {
        Frame::Text(s) => decode_inbound(s),
        Frame::Binary(b) => {
            let s = std::str::from_utf8(b)
                .map_err(|e| TricklineError::Decode(format!("utf8 invalid: {e}")))?;
            decode_inbound(s)
        }
    }
}
