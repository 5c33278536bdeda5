//! Hand-written protobuf types for the run log.
//!
//! Uses prost derive macros for encode/decode without prost-build.
//! Boolean vectors travel as packed bytes (LSB-first, see `bits`).

use prost::Message;

// ── Envelope ───────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoRecordEnvelope {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(message, optional, tag = "2")]
    pub record: Option<ProtoRecord>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ProtoRecord {
    #[prost(oneof = "RecordKind", tags = "1, 2")]
    pub kind: Option<RecordKind>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum RecordKind {
    #[prost(message, tag = "1")]
    RunHeader(ProtoRunHeader),
    #[prost(message, tag = "2")]
    Step(ProtoStep),
}

// ── Policy ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ProtoPolicy {
    Xor = 0,
    And = 1,
    Or = 2,
}

// ── Records ────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoRunHeader {
    #[prost(uint32, tag = "1")]
    pub nodes: u32,
    /// N*N bits, row-major
    #[prost(bytes = "vec", tag = "2")]
    pub adjacency: Vec<u8>,
    /// N*N bits, row-major
    #[prost(bytes = "vec", tag = "3")]
    pub mask: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub initial_state: Vec<u8>,
    #[prost(enumeration = "ProtoPolicy", tag = "5")]
    pub policy: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct ProtoStep {
    #[prost(bytes = "vec", tag = "1")]
    pub state: Vec<u8>,
}
