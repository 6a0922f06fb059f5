//! Commands that read from a live network.

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use partykit_client::{PartyClient, ProposalView};
use partykit_core::{normalize_address, ContractFamily, NetworkId};
use partykit_registry::RegistrySet;
use partykit_rpc::{HttpTransportConfig, RpcChainReader};
use std::sync::Arc;

use crate::config::{rpc_env_var, PartykitConfig};

/// Bundled registry, plus configured and command-line deployment files.
pub fn load_registry(config: &PartykitConfig, extra: &[std::path::PathBuf]) -> Result<RegistrySet> {
    let paths: Vec<_> = config.deployments.iter().chain(extra).cloned().collect();
    if paths.is_empty() {
        return Ok(RegistrySet::bundled().context("bundled deployment tables are broken")?.clone());
    }
    RegistrySet::with_extensions(&paths).context("failed to load deployment files")
}

/// Build a client for `network` from the config, the environment, or `--rpc`.
pub fn connect(
    config: &PartykitConfig,
    registry: RegistrySet,
    network: NetworkId,
    rpc: Option<&str>,
) -> Result<PartyClient> {
    let url = rpc
        .map(str::to_string)
        .or_else(|| config.rpc_url(network))
        .with_context(|| {
            format!("no RPC URL for {network}: pass --rpc, set {}, or add it to the config", rpc_env_var(network))
        })?;

    let transport = HttpTransportConfig { request_timeout: config.request_timeout() };
    let mut reader = RpcChainReader::http(&url, network, transport)
        .with_context(|| format!("cannot create HTTP transport for {url}"))?;
    if let Some(multicall) = config.multicall(network) {
        reader = reader.with_multicall(multicall);
    }
    tracing::info!(%network, url = %url, "connected");

    let mut client = PartyClient::new(Arc::new(reader), Arc::new(registry));
    if let Some(marketplace) = config.marketplace {
        client = client.with_marketplace(marketplace);
    }
    Ok(client)
}

// ─── Command implementations ──────────────────────────────────────────────────

pub async fn cmd_resolve(client: &PartyClient, addresses: &[Address], json: bool) -> Result<()> {
    let resolved = client
        .resolve_implementations(addresses)
        .await
        .context("batch resolution failed")?;

    if json {
        let rows: Vec<_> = addresses
            .iter()
            .zip(&resolved)
            .map(|(a, r)| serde_json::json!({ "address": a, "implementation": r }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (address, implementation) in addresses.iter().zip(&resolved) {
        match implementation {
            Some(i) => println!("{} → {}", normalize_address(address), normalize_address(i)),
            None => println!("{} → unresolved", normalize_address(address)),
        }
    }
    Ok(())
}

pub async fn cmd_interface(client: &PartyClient, family: ContractFamily, address: Address) -> Result<()> {
    let contract = client
        .interface(family, address)
        .await
        .with_context(|| format!("no {family} interface for {}", normalize_address(&address)))?;
    let descriptor = &contract.descriptor;

    println!("Address:        {}", normalize_address(&contract.address));
    println!("Implementation: {}", normalize_address(&contract.implementation));
    println!("Network:        {}", contract.network);
    println!("Descriptor:     {} (v{})", descriptor.name, descriptor.version);
    println!("Functions:");
    for function in descriptor.abi.functions() {
        println!("  {}", function.signature());
    }
    println!("Events:");
    for event in descriptor.abi.events() {
        println!("  {}", event.signature());
    }
    Ok(())
}

pub async fn cmd_proposals(
    client: &PartyClient,
    party: Address,
    id: Option<U256>,
    now: Option<u64>,
    json: bool,
) -> Result<()> {
    let party = client.party(party).await.context("address is not a known party")?;
    let records = client
        .proposals(&party)
        .proposals()
        .await
        .context("failed to read proposals")?;

    let mut views: Vec<ProposalView> = Vec::new();
    for record in records.iter().filter(|r| id.map_or(true, |id| r.id == id)) {
        let view = match now {
            Some(now) => client.evaluate_at(&party, record, now).await,
            None => client.evaluate(&party, record).await,
        }
        .with_context(|| format!("failed to evaluate proposal {}", record.id))?;
        views.push(view);
    }
    if let Some(id) = id {
        anyhow::ensure!(!views.is_empty(), "proposal {id} not found");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!("Party {} ({})", normalize_address(&party.address), party.descriptor.name);
    for view in &views {
        let kind = view
            .record
            .variant
            .as_ref()
            .map(|v| v.proposal_type().to_string())
            .unwrap_or_else(|| "<undecodable>".into());
        println!(
            "#{:<5} {:<28} {:<14} next: {:?}",
            view.record.id.to_string(),
            kind,
            format!("{:?}", view.evaluation.display_status),
            view.evaluation.next_step,
        );
        if let Some(order) = &view.order {
            println!(
                "        order {} filled {}/{}",
                order.order_hash, order.status.total_filled, order.status.total_size
            );
        }
    }
    Ok(())
}

pub async fn cmd_order(client: &PartyClient, party: Address, id: U256) -> Result<()> {
    let party = client.party(party).await.context("address is not a known party")?;
    match client.order(&party, id).await.context("order lookup failed")? {
        Some(order) => println!("{}", serde_json::to_string_pretty(&order)?),
        None => println!("proposal {id} has no marketplace order"),
    }
    Ok(())
}

pub fn cmd_networks(config: &PartykitConfig) {
    println!("{:<14} {:>10}  {:<8} {:<28} {}", "NETWORK", "CHAIN ID", "TESTNET", "RPC ENV VAR", "RPC");
    for network in NetworkId::ALL {
        let rpc = if config.rpc_url(network).is_some() { "configured" } else { "-" };
        println!(
            "{:<14} {:>10}  {:<8} {:<28} {}",
            network.slug(),
            network.chain_id(),
            network.is_testnet(),
            rpc_env_var(network),
            rpc
        );
    }
}
