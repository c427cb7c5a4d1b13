//! Records handed to the writer by upstream payload builders.

/// Step (sequence) number attached to a record by its producer.
pub type Step = u64;

/// An opaque payload plus the step it was produced at.
///
/// The writer never interprets `payload`. A record is moved into the queue on
/// push, so the producer keeps no alias to the bytes once it is enqueued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Producer-supplied step number
    pub step: Step,
    /// Serialized event bytes, written to the file verbatim
    pub payload: Vec<u8>,
}

impl Record {
    /// Create a record from a payload and step.
    pub fn new(payload: impl Into<Vec<u8>>, step: Step) -> Self {
        Self {
            step,
            payload: payload.into(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Consume the record, returning its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}
