// Copyright (C) 2015-2025 The Neo Project.
//
// main.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Neo node binary entry point.
//!
//! Wires the blockchain engine, the memory pool, and the P2P network together
//! and drives them until a shutdown signal arrives.

use clap::Parser;
use neo_config::NetworkType;
use neo_consensus::{
    ConsensusService, ConsensusServiceConfig, LedgerBridge, MempoolBridge, NetworkBridge,
};
use neo_core::neo_system::ProtocolSettings;
use neo_core::ShutdownCoordinator;
use neo_ledger::{Blockchain, MemoryPool, MempoolConfig};
use neo_network::{NetworkCommand, NetworkConfig, P2pNode};
use neo_wallets::KeyPair;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "neo-node", version, about = "Neo N3 full node")]
struct Cli {
    /// Network to join: mainnet, testnet, or private
    #[arg(long, default_value = "testnet")]
    network: String,

    /// Path to a TOML config file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// P2P listen port (overrides the network's default)
    #[arg(long)]
    listen_port: Option<u16>,

    /// Comma-separated seed node addresses, replacing the network's defaults
    #[arg(long, value_delimiter = ',')]
    seed: Vec<String>,

    /// Run without P2P networking, exposing only local chain access
    #[arg(long)]
    no_network: bool,

    /// WIF-encoded validator private key; if set, this node joins dBFT consensus
    /// as that validator. Without it the node runs as a relay/observer only.
    #[arg(long)]
    validator_wif: Option<String>,
}

fn protocol_settings(network: NetworkType) -> ProtocolSettings {
    match network {
        NetworkType::MainNet => ProtocolSettings::mainnet(),
        NetworkType::TestNet => ProtocolSettings::testnet(),
        NetworkType::Private => ProtocolSettings::new(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn build_network_config(cli: &Cli, network: NetworkType) -> anyhow::Result<NetworkConfig> {
    let mut net_cfg = match network {
        NetworkType::MainNet => NetworkConfig::default(),
        NetworkType::TestNet => NetworkConfig::testnet(),
        NetworkType::Private => NetworkConfig::private(),
    };

    if let Some(port) = cli.listen_port {
        net_cfg.port = port;
        net_cfg.listen_address = format!("0.0.0.0:{}", port).parse()?;
        net_cfg.p2p_config.listen_address = net_cfg.listen_address;
    }

    if !cli.seed.is_empty() {
        net_cfg.seed_nodes = cli
            .seed
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<_>, _>>()?;
    }

    Ok(net_cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let network = NetworkType::from_str(&cli.network).map_err(anyhow::Error::msg)?;
    tracing::info!(network = ?network, "starting neo-node");

    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "config file override requested but not yet merged; using CLI/network defaults");
    }

    let blockchain = Arc::new(Blockchain::new(network).await?);
    tracing::info!(
        height = blockchain.get_height().await,
        "blockchain store ready"
    );

    let mempool = Arc::new(MemoryPool::new(MempoolConfig::default()));

    let shutdown = Arc::new(ShutdownCoordinator::new());

    let p2p_node = if cli.no_network {
        tracing::info!("networking disabled via --no-network");
        None
    } else {
        let net_cfg = build_network_config(&cli, network)?;
        let magic = net_cfg.magic;
        let (_cmd_tx, cmd_rx) = mpsc::channel::<NetworkCommand>(100);
        let node = Arc::new(P2pNode::new(net_cfg, cmd_rx)?);
        node.start().await?;
        tracing::info!(magic = %format!("{:#x}", magic), "p2p node started");
        Some(node)
    };

    let mut consensus_service = match (&cli.validator_wif, &p2p_node) {
        (Some(wif), Some(node)) => {
            let key_pair = KeyPair::from_wif(wif).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            let validator_hash = key_pair.get_script_hash();

            let ledger_bridge = Arc::new(LedgerBridge::new(
                blockchain.clone(),
                protocol_settings(network),
            ));
            let network_bridge = Arc::new(NetworkBridge::new(node.clone()));
            let mempool_bridge = Arc::new(MempoolBridge::new(mempool.clone()));

            let mut service = ConsensusService::new(
                ConsensusServiceConfig::default(),
                validator_hash,
                ledger_bridge,
                network_bridge,
                mempool_bridge,
            );
            service.start().await?;
            tracing::info!(validator = %validator_hash, "consensus service started");
            Some(service)
        }
        (Some(_), None) => {
            tracing::warn!(
                "--validator-wif given but --no-network is set; consensus requires networking, running as relay only"
            );
            None
        }
        (None, _) => {
            tracing::info!("no --validator-wif given; running as relay/observer, not joining dBFT consensus");
            None
        }
    };

    tracing::info!("neo-node ready; waiting for shutdown signal");
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, stopping");

    if let Some(service) = &mut consensus_service {
        service.stop().await;
    }
    if let Some(node) = &p2p_node {
        node.stop().await;
    }
    if let Err(e) = shutdown.initiate_shutdown("ctrl-c".to_string()).await {
        tracing::warn!(error = %e, "shutdown coordinator reported an error");
    }

    let stats = mempool.get_stats();
    tracing::info!(
        height = blockchain.get_height().await,
        pooled_transactions = stats.transaction_count,
        "neo-node stopped"
    );

    Ok(())
}
