//! Proto ↔ record conversion bridge.
//!
//! Decoding never trusts the wire: node counts, packed lengths, policy
//! values and matrix shapes are all rechecked.

use boolnet_engine::bits::{pack_bits, unpack_bits};
use boolnet_engine::{BoolMatrix, Network, Policy};

use crate::error::{Result, RuntimeError};
use crate::proto_types::*;
use crate::records::{RecordEnvelope, RunHeader, RunRecord};

pub fn policy_to_proto(policy: Policy) -> ProtoPolicy {
    match policy {
        Policy::Xor => ProtoPolicy::Xor,
        Policy::And => ProtoPolicy::And,
        Policy::Or => ProtoPolicy::Or,
    }
}

pub fn proto_to_policy(raw: i32) -> Result<Policy> {
    match ProtoPolicy::try_from(raw) {
        Ok(ProtoPolicy::Xor) => Ok(Policy::Xor),
        Ok(ProtoPolicy::And) => Ok(Policy::And),
        Ok(ProtoPolicy::Or) => Ok(Policy::Or),
        Err(_) => Err(RuntimeError::malformed(format!("unknown policy value {}", raw))),
    }
}

pub fn header_to_proto(header: &RunHeader) -> ProtoRunHeader {
    ProtoRunHeader {
        nodes: header.network.nodes() as u32,
        adjacency: pack_bits(header.network.adjacency().as_flat()),
        mask: pack_bits(header.network.mask().as_flat()),
        initial_state: pack_bits(&header.initial_state),
        policy: policy_to_proto(header.policy) as i32,
    }
}

pub fn proto_to_header(proto: &ProtoRunHeader) -> Result<RunHeader> {
    let n = proto.nodes as usize;
    let cells = n
        .checked_mul(n)
        .ok_or_else(|| RuntimeError::malformed(format!("node count {} overflows", n)))?;
    let adjacency = unpack(&proto.adjacency, cells, "adjacency")?;
    let mask = unpack(&proto.mask, cells, "mask")?;
    let initial_state = unpack(&proto.initial_state, n, "initial_state")?;

    let network = Network::new(
        BoolMatrix::from_flat(n, n, adjacency)?,
        BoolMatrix::from_flat(n, n, mask)?,
    )?;
    Ok(RunHeader {
        network,
        initial_state,
        policy: proto_to_policy(proto.policy)?,
    })
}

pub fn step_to_proto(state: &[bool]) -> ProtoStep {
    ProtoStep {
        state: pack_bits(state),
    }
}

/// `nodes` comes from the run header; the step carries no length.
pub fn proto_to_step(proto: &ProtoStep, nodes: usize) -> Result<Vec<bool>> {
    unpack(&proto.state, nodes, "step state")
}

pub fn envelope_to_proto(envelope: &RecordEnvelope) -> ProtoRecordEnvelope {
    let kind = match &envelope.record {
        RunRecord::Header(h) => RecordKind::RunHeader(header_to_proto(h)),
        RunRecord::Step(s) => RecordKind::Step(step_to_proto(s)),
    };
    ProtoRecordEnvelope {
        sequence: envelope.sequence,
        record: Some(ProtoRecord { kind: Some(kind) }),
    }
}

/// Convert a whole log. The first envelope must carry the header, which
/// fixes the node count for every step after it.
pub fn proto_to_envelopes(protos: &[ProtoRecordEnvelope]) -> Result<Vec<RecordEnvelope>> {
    let mut nodes: Option<usize> = None;
    let mut out = Vec::with_capacity(protos.len());
    for proto in protos {
        let record = match kind_of(proto)? {
            RecordKind::RunHeader(h) => {
                if nodes.is_some() {
                    return Err(RuntimeError::DuplicateHeader);
                }
                let header = proto_to_header(h)?;
                nodes = Some(header.network.nodes());
                RunRecord::Header(header)
            }
            RecordKind::Step(s) => {
                let n = nodes.ok_or(RuntimeError::HeaderRequired)?;
                RunRecord::Step(proto_to_step(s, n)?)
            }
        };
        out.push(RecordEnvelope {
            sequence: proto.sequence,
            record,
        });
    }
    Ok(out)
}

pub(crate) fn kind_of(proto: &ProtoRecordEnvelope) -> Result<&RecordKind> {
    proto
        .record
        .as_ref()
        .and_then(|r| r.kind.as_ref())
        .ok_or_else(|| RuntimeError::malformed(format!("record {} has no kind", proto.sequence)))
}

fn unpack(bytes: &[u8], len: usize, field: &str) -> Result<Vec<bool>> {
    unpack_bits(bytes, len).ok_or_else(|| {
        RuntimeError::malformed(format!(
            "{}: {} bytes cannot hold exactly {} bits",
            field,
            bytes.len(),
            len
        ))
    })
}
