//! partykit CLI: inspect Party Protocol proposals from the command line.
//!
//! # Commands
//! ```text
//! partykit decode     --data <hex>
//! partykit encode     --variant <json> [--max-executable-time <ts> --cancel-delay <secs>]
//! partykit resolve    --network <net> <address>...
//! partykit interface  --network <net> --family <family> --address <addr>
//! partykit proposals  --network <net> --party <addr> [--id <id>] [--now <ts>]
//! partykit order      --network <net> --party <addr> --id <id>
//! partykit networks
//! ```

use alloy_primitives::{Address, U256};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use partykit_core::{ContractFamily, NetworkId};
use std::path::PathBuf;
use std::str::FromStr;

mod cmd_chain;
mod cmd_codec;
mod config;
mod logging;

use config::PartykitConfig;

#[derive(Parser)]
#[command(
    name = "partykit",
    about = "Party Protocol client: proposals, proxies and marketplace orders",
    long_about = "
partykit: decode proposal payloads, resolve party proxies to their implementation,
and evaluate proposals and their marketplace orders against live chain state.

ENVIRONMENT VARIABLES:
  PARTYKIT_CONFIG            Path to a partykit.yaml config file
  PARTYKIT_RPC_<NETWORK>     RPC URL per network, e.g. PARTYKIT_RPC_BASE, PARTYKIT_RPC_BASE_SEPOLIA
",
    version
)]
struct Cli {
    /// Config file (YAML)
    #[arg(long, global = true, env = "PARTYKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, overriding the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Extra deployment table (YAML); repeatable
    #[arg(long = "deployments", global = true)]
    deployments: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode raw proposalData into its typed variant
    Decode {
        /// proposalData (0x-prefixed hex)
        #[arg(long)]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a proposal variant given as JSON, e.g. '{"type":"distribute",...}'
    Encode {
        #[arg(long)]
        variant: String,
        /// Wrap the payload in a Proposal with this maxExecutableTime
        #[arg(long)]
        max_executable_time: Option<u64>,
        #[arg(long)]
        cancel_delay: Option<u64>,
    },

    /// Resolve proxy addresses to their implementation in one batch
    Resolve {
        #[command(flatten)]
        net: NetworkArgs,
        /// Addresses to resolve
        #[arg(required = true, num_args = 1..)]
        addresses: Vec<String>,
        #[arg(long)]
        json: bool,
    },

    /// Show the interface descriptor bound to a deployed contract
    Interface {
        #[command(flatten)]
        net: NetworkArgs,
        /// Contract family, e.g. party, crowdfund, proposal_execution_engine
        #[arg(long, default_value = "party")]
        family: String,
        #[arg(long)]
        address: String,
    },

    /// List a party's proposals with their evaluated status
    Proposals {
        #[command(flatten)]
        net: NetworkArgs,
        #[arg(long)]
        party: String,
        /// Only this proposal id
        #[arg(long)]
        id: Option<String>,
        /// Evaluate as of this unix timestamp instead of now
        #[arg(long)]
        now: Option<u64>,
        #[arg(long)]
        json: bool,
    },

    /// Find the marketplace order created by a listing proposal
    Order {
        #[command(flatten)]
        net: NetworkArgs,
        #[arg(long)]
        party: String,
        #[arg(long)]
        id: String,
    },

    /// List supported networks and their RPC configuration
    Networks,
}

#[derive(clap::Args)]
struct NetworkArgs {
    /// Network slug or chain id
    #[arg(long, default_value = "base")]
    network: String,
    /// RPC URL, overriding config and environment
    #[arg(long)]
    rpc: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PartykitConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level.clone() {
        config.log.level = Some(level);
    }
    config.log.json |= cli.log_json;
    logging::init(&config.log);

    match cli.command {
        Commands::Decode { data, json } => cmd_codec::cmd_decode(&data, json),
        Commands::Encode { variant, max_executable_time, cancel_delay } => {
            cmd_codec::cmd_encode(&variant, max_executable_time, cancel_delay)
        }
        Commands::Resolve { net, addresses, json } => {
            let addresses = addresses.iter().map(|a| parse_address(a)).collect::<Result<Vec<_>>>()?;
            let client = connect(&config, &cli.deployments, &net)?;
            cmd_chain::cmd_resolve(&client, &addresses, json).await
        }
        Commands::Interface { net, family, address } => {
            let family = ContractFamily::from_str(&family)?;
            let address = parse_address(&address)?;
            let client = connect(&config, &cli.deployments, &net)?;
            cmd_chain::cmd_interface(&client, family, address).await
        }
        Commands::Proposals { net, party, id, now, json } => {
            let party = parse_address(&party)?;
            let id = id.as_deref().map(parse_u256).transpose()?;
            let client = connect(&config, &cli.deployments, &net)?;
            cmd_chain::cmd_proposals(&client, party, id, now, json).await
        }
        Commands::Order { net, party, id } => {
            let party = parse_address(&party)?;
            let id = parse_u256(&id)?;
            let client = connect(&config, &cli.deployments, &net)?;
            cmd_chain::cmd_order(&client, party, id).await
        }
        Commands::Networks => {
            cmd_chain::cmd_networks(&config);
            Ok(())
        }
    }
}

fn connect(
    config: &PartykitConfig,
    deployments: &[PathBuf],
    net: &NetworkArgs,
) -> Result<partykit_client::PartyClient> {
    let network = NetworkId::from_str(&net.network)?;
    let registry = cmd_chain::load_registry(config, deployments)?;
    cmd_chain::connect(config, registry, network, net.rpc.as_deref())
}

// ─── Argument parsing ─────────────────────────────────────────────────────────

pub(crate) fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).with_context(|| format!("invalid hex: {s}"))
}

fn parse_address(s: &str) -> Result<Address> {
    partykit_core::parse_address(s).map_err(|e| anyhow!("invalid address {s}: {e}"))
}

/// Decimal or `0x`-prefixed hex.
fn parse_u256(s: &str) -> Result<U256> {
    U256::from_str(s.trim()).with_context(|| format!("invalid integer: {s}"))
}
