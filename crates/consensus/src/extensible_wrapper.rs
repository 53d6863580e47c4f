//! ExtensiblePayload wrapper for consensus messages.
//!
//! This module provides functionality to wrap consensus messages in ExtensiblePayload
//! format for Neo N3 network compatibility.

use crate::{ConsensusMessage, Error, Result};
use neo_core::{UInt160, Witness};
use neo_network::messages::ExtensiblePayload;

/// Wraps a consensus message in an ExtensiblePayload for network transmission
pub fn wrap_consensus_message(
    message: &ConsensusMessage,
    valid_block_start: u32,
    valid_block_end: u32,
    sender: UInt160,
    witness: Witness,
) -> Result<ExtensiblePayload> {
    // Serialize the consensus message
    let message_bytes = message.to_bytes()?;

    // Create ExtensiblePayload with "dBFT" category
    Ok(ExtensiblePayload::consensus(
        valid_block_start,
        valid_block_end,
        sender,
        message_bytes,
        witness,
    ))
}

/// Unwraps a consensus message from an ExtensiblePayload
pub fn unwrap_consensus_message(payload: &ExtensiblePayload) -> Result<ConsensusMessage> {
    // Check if it's a consensus payload
    if !payload.is_consensus() {
        return Err(Error::Generic(format!(
            "ExtensiblePayload is not a consensus message, category: {}",
            payload.category
        )));
    }

    // Deserialize the consensus message from the payload data
    ConsensusMessage::from_bytes(&payload.data)
}

/// Creates an ExtensiblePayload for broadcasting a consensus message
pub fn create_broadcast_payload(
    message: &ConsensusMessage,
    current_height: u32,
    sender: UInt160,
    witness: Witness,
) -> Result<ExtensiblePayload> {
    // Consensus messages are typically valid for a range of blocks
    // Starting from current height and valid for next 100 blocks
    let valid_block_start = current_height;
    let valid_block_end = current_height + 100;

    wrap_consensus_message(message, valid_block_start, valid_block_end, sender, witness)
}
