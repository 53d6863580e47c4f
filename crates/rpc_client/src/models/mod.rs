// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

// Core RPC types
pub mod rpc_request;
pub mod rpc_response;

// Block and transaction types
pub mod rpc_block;
pub mod rpc_block_header;
pub mod rpc_transaction;

// Contract and execution types
pub mod rpc_contract_state;
pub mod rpc_invoke_result;
pub mod rpc_method_token;
pub mod rpc_nef_file;

// NEP17 token types
pub mod rpc_nep17_balances;
pub mod rpc_nep17_token_info;
pub mod rpc_nep17_transfers;

// State service types
pub mod rpc_found_states;
pub mod rpc_state_root;

// Network and peer types
pub mod rpc_peers;
pub mod rpc_plugin;
pub mod rpc_version;

// Application and execution types
pub mod rpc_application_log;
pub mod rpc_raw_mempool;

// Account and wallet types
pub mod rpc_account;
pub mod rpc_transfer_out;
pub mod rpc_unclaimed_gas;
pub mod rpc_validate_address_result;
pub mod rpc_validator;

// Stub modules (to be implemented if needed)
pub mod rpc_get_peers;
pub mod rpc_mempool_accepted;
pub mod rpc_mempool_unverified;
pub mod rpc_method_invocation;
pub mod rpc_notification_event;
pub mod rpc_oracle_response;
pub mod rpc_plugin_info;

// Re-export main types
pub use rpc_account::RpcAccount;
pub use rpc_application_log::{Execution, RpcApplicationLog, RpcNotifyEventArgs};
pub use rpc_block::RpcBlock;
pub use rpc_block_header::RpcBlockHeader;
pub use rpc_contract_state::RpcContractState;
pub use rpc_found_states::RpcFoundStates;
pub use rpc_invoke_result::{RpcInvokeResult, RpcStack};
pub use rpc_method_token::RpcMethodToken;
pub use rpc_nef_file::RpcNefFile;
pub use rpc_nep17_balances::{RpcNep17Balance, RpcNep17Balances};
pub use rpc_nep17_token_info::RpcNep17TokenInfo;
pub use rpc_nep17_transfers::{RpcNep17Transfer, RpcNep17Transfers};
pub use rpc_peers::{RpcPeer, RpcPeers};
pub use rpc_plugin::RpcPlugin;
pub use rpc_raw_mempool::RpcRawMemPool;
pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcResponse, RpcResponseError};
pub use rpc_state_root::RpcStateRoot;
pub use rpc_transaction::RpcTransaction;
pub use rpc_transfer_out::RpcTransferOut;
pub use rpc_unclaimed_gas::RpcUnclaimedGas;
pub use rpc_validate_address_result::RpcValidateAddressResult;
pub use rpc_validator::RpcValidator;
pub use rpc_version::{RpcProtocol, RpcVersion};
