//! Protocol modules: the JSON envelope, typed payloads, and transport frames.
//!
//! - Envelope: `{"type": <kind>, "payload": <object>}` with the payload kept as
//!   a `RawValue` until the kind is known.
//! - Messages: the closed set of outbound commands and inbound events.
//! - Frame: raw text/binary units handed over by a transport.
//!
//! All decoders are panic-free: malformed input is reported as
//! `TricklineError::Decode`, which the transport discards.

pub mod envelope;
pub mod frame;
pub mod messages;

pub use envelope::{decode_inbound, encode_outbound, MessageKind, RawEnvelope};
pub use frame::{decode_frame, Frame};
pub use messages::{
    EmptyPayload, ErrorPayload, ExclusionPayload, Inbound, JoinGamePayload, JoinedPayload,
    Outbound, PlayCardPayload, RoundCompletePayload, StartRoundPayload, StateUpdatePayload,
    TrickCompletePayload,
};
