//! WebSocket message <-> frame mapping.
//!
//! Text and binary data frames pass through; control frames are handled by
//! the socket pump and never reach the decoder.

use bytes::Bytes;
use tokio_tungstenite::tungstenite::Message;
use trickline_core::protocol::Frame;

pub fn into_frame(msg: Message) -> Option<Frame> {
    match msg {
        Message::Text(s) => Some(Frame::Text(s)),
        Message::Binary(b) => Some(Frame::Binary(Bytes::from(b))),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}

pub fn into_message(frame: Frame) -> Message {
    match frame {
        Frame::Text(s) => Message::Text(s),
        Frame::Binary(b) => Message::Binary(b.to_vec()),
    }
}
