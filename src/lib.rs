// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # neo-rs
//!
//! Facade crate re-exporting the Neo N3 node's component crates under a
//! single dependency, mirroring how the `node` binary composes them.

pub use neo_config as config;
pub use neo_core as core;
pub use neo_cryptography as cryptography;
pub use neo_ledger as ledger;
pub use neo_network as network;
pub use neo_persistence as persistence;
pub use neo_smart_contract as smart_contract;
pub use neo_vm as vm;

#[cfg(feature = "consensus")]
pub use neo_consensus as consensus;

#[cfg(feature = "rpc")]
pub use neo_rpc_client as rpc_client;
#[cfg(feature = "rpc")]
pub use neo_rpc_server as rpc_server;

pub use neo_core::{Block, BlockHeader, Transaction, UInt160, UInt256};
pub use neo_ledger::Blockchain;
pub use neo_network::{NetworkConfig, P2pNode};
