//! Adapters wiring the concrete ledger/network/mempool types into the
//! `LedgerService`/`NetworkService`/`MempoolService` trait seams that
//! `ConsensusService` depends on.
//!
//! `neo_core::Block`/`BlockHeader` and `neo_ledger`'s own `Block`/`BlockHeader`
//! are independently-defined types with identical fields; the conversions
//! below are a straight field copy, not a semantic transform.

use crate::service::{LedgerService, MempoolService, NetworkService};
use crate::{Error, Result};
use async_trait::async_trait;
use neo_core::neo_system::ProtocolSettings;
use neo_core::{Transaction, UInt256};
use neo_cryptography::ECPoint;
use neo_ledger::{Blockchain, MemoryPool};
use neo_network::{NetworkMessage, P2pNode, ProtocolMessage};
use std::sync::Arc;

fn ledger_header_to_core(header: &neo_ledger::BlockHeader) -> neo_core::BlockHeader {
    neo_core::BlockHeader {
        version: header.version,
        previous_hash: header.previous_hash,
        merkle_root: header.merkle_root,
        timestamp: header.timestamp,
        nonce: header.nonce,
        index: header.index,
        primary_index: header.primary_index,
        next_consensus: header.next_consensus,
        witnesses: header.witnesses.clone(),
    }
}

fn core_header_to_ledger(header: &neo_core::BlockHeader) -> neo_ledger::BlockHeader {
    neo_ledger::BlockHeader {
        version: header.version,
        previous_hash: header.previous_hash,
        merkle_root: header.merkle_root,
        timestamp: header.timestamp,
        nonce: header.nonce,
        index: header.index,
        primary_index: header.primary_index,
        next_consensus: header.next_consensus,
        witnesses: header.witnesses.clone(),
    }
}

fn ledger_block_to_core(block: &neo_ledger::Block) -> neo_core::Block {
    neo_core::Block {
        header: ledger_header_to_core(&block.header),
        transactions: block.transactions.clone(),
    }
}

fn core_block_to_ledger(block: neo_core::Block) -> neo_ledger::Block {
    neo_ledger::Block::new(core_header_to_ledger(&block.header), block.transactions)
}

/// Bridges `neo_ledger::Blockchain` to the `LedgerService` trait consensus expects.
pub struct LedgerBridge {
    blockchain: Arc<Blockchain>,
    settings: ProtocolSettings,
}

impl LedgerBridge {
    pub fn new(blockchain: Arc<Blockchain>, settings: ProtocolSettings) -> Self {
        Self {
            blockchain,
            settings,
        }
    }

    fn validators(&self) -> Vec<ECPoint> {
        self.settings
            .standby_committee
            .iter()
            .take(self.settings.validators_count as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LedgerService for LedgerBridge {
    async fn get_block(&self, height: u32) -> Result<Option<neo_core::Block>> {
        let block = self
            .blockchain
            .get_block(height)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))?;
        Ok(block.as_ref().map(ledger_block_to_core))
    }

    async fn get_block_by_hash(&self, hash: &UInt256) -> Result<Option<neo_core::Block>> {
        let block = self
            .blockchain
            .get_block_by_hash(hash)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))?;
        Ok(block.as_ref().map(ledger_block_to_core))
    }

    async fn get_current_height(&self) -> Result<u32> {
        Ok(self.blockchain.get_height().await)
    }

    async fn add_block(&self, block: neo_core::Block) -> Result<()> {
        let ledger_block = core_block_to_ledger(block);
        self.blockchain
            .add_block_with_fork_detection(&ledger_block)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    async fn get_transaction(&self, hash: &UInt256) -> Result<Option<Transaction>> {
        self.blockchain
            .get_transaction(hash)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    async fn contains_transaction(&self, hash: &UInt256) -> Result<bool> {
        self.blockchain
            .contains_transaction(hash)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    async fn get_next_block_validators(&self) -> Result<Vec<ECPoint>> {
        Ok(self.validators())
    }

    async fn get_validators(&self, _height: u32) -> Result<Vec<ECPoint>> {
        Ok(self.validators())
    }

    async fn validate_transaction(&self, transaction: &Transaction) -> Result<bool> {
        self.blockchain
            .validate_transaction(transaction)
            .await
            .map_err(|e| Error::Ledger(e.to_string()))
    }
}

/// Bridges `neo_network::P2pNode` to the `NetworkService` trait consensus expects.
///
/// Consensus messages travel as `ProtocolMessage::Extensible` payloads, the same
/// carrier C# Neo uses for out-of-band payloads (category `"dBFT"`).
pub struct NetworkBridge {
    node: Arc<P2pNode>,
}

impl NetworkBridge {
    pub fn new(node: Arc<P2pNode>) -> Self {
        Self { node }
    }
}

const CONSENSUS_CATEGORY: &str = "dBFT";

#[async_trait]
impl NetworkService for NetworkBridge {
    async fn broadcast_consensus_message(&self, message: Vec<u8>) -> Result<()> {
        let payload = ProtocolMessage::extensible(CONSENSUS_CATEGORY, message);
        let msg = NetworkMessage::new(self.node.magic(), payload);
        self.node
            .broadcast_message(msg)
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    async fn send_consensus_message(&self, peer_id: &str, message: Vec<u8>) -> Result<()> {
        let addr = peer_id
            .parse()
            .map_err(|_| Error::Network(format!("invalid peer address: {peer_id}")))?;
        let payload = ProtocolMessage::extensible(CONSENSUS_CATEGORY, message);
        let msg = NetworkMessage::new(self.node.magic(), payload);
        self.node
            .send_message_to_peer(addr, msg)
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    async fn get_connected_peers(&self) -> Result<Vec<String>> {
        Ok(self
            .node
            .get_connected_peer_addresses()
            .await
            .iter()
            .map(|addr| addr.to_string())
            .collect())
    }

    async fn is_connected(&self) -> bool {
        !self.node.get_connected_peer_addresses().await.is_empty()
    }
}

/// Bridges `neo_ledger::MemoryPool` to the `MempoolService` trait consensus expects.
pub struct MempoolBridge {
    pool: Arc<MemoryPool>,
}

impl MempoolBridge {
    pub fn new(pool: Arc<MemoryPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MempoolService for MempoolBridge {
    async fn get_verified_transactions(&self, count: usize) -> Vec<Transaction> {
        self.pool.get_sorted_transactions(count)
    }

    async fn contains_transaction(&self, hash: &UInt256) -> bool {
        self.pool.contains(hash)
    }

    async fn add_transaction(&self, tx: Transaction) -> Result<()> {
        self.pool
            .try_add(tx, false)
            .map(|_| ())
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    async fn remove_transaction(&self, hash: &UInt256) -> Result<()> {
        self.pool
            .try_remove(hash)
            .map(|_| ())
            .map_err(|e| Error::Ledger(e.to_string()))
    }

    async fn get_transaction_count(&self) -> usize {
        self.pool.count()
    }

    async fn clear(&self) -> Result<()> {
        self.pool.clear().map_err(|e| Error::Ledger(e.to_string()))
    }
}
