//! Cross-referencing listing proposals with the marketplace orders they created.
//!
//! Executing a listing proposal emits a listing event from the party (the
//! engine runs by delegatecall) in the same transaction as
//! `ProposalExecuted`. We walk a proposal's executions newest first, decode
//! each receipt with the engine descriptor live at that block, and join the
//! first listing found with the marketplace's fill state.

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::{Event, Function};
use alloy_primitives::{address, Address, U256};
use partykit_core::{u256_topic, BlockTag, CallRequest, ChainReader, Log, LogFilter, PartyError};
use partykit_lifecycle::{OrderDetails, OrderKind, OrderStatus};
use partykit_registry::{InterfaceDescriptor, RegistrySet};

use crate::abi::{self, as_address, as_bool, as_uint, as_word};
use crate::engine::EngineHistory;
use crate::interface::ResolvedContract;

/// Seaport 1.5, deployed at the same address on every supported network.
pub const SEAPORT_ADDRESS: Address = address!("00000000000000ADc04C56Bf30aC9d3c0aAF14dC");

const GET_ORDER_STATUS: &str = "function getOrderStatus(bytes32 orderHash) view returns (bool isValidated, bool isCancelled, uint256 totalFilled, uint256 totalSize)";

const STANDARD_LISTING: &str = "OpenseaOrderListed";
const ADVANCED_LISTING: &str = "OpenseaAdvancedOrderListed";

pub struct OrderResolver<'a> {
    reader: &'a dyn ChainReader,
    registry: &'a RegistrySet,
    marketplace: Address,
}

impl<'a> OrderResolver<'a> {
    pub fn new(reader: &'a dyn ChainReader, registry: &'a RegistrySet) -> Self {
        Self { reader, registry, marketplace: SEAPORT_ADDRESS }
    }

    pub fn with_marketplace(mut self, marketplace: Address) -> Self {
        self.marketplace = marketplace;
        self
    }

    /// The order created by the most recent execution of `proposal_id`
    /// that emitted a listing, or `None` if there is none.
    pub async fn resolve(
        &self,
        party: &ResolvedContract,
        proposal_id: U256,
    ) -> Result<Option<OrderDetails>, PartyError> {
        let executed = party.descriptor.event("ProposalExecuted")?;
        let filter = LogFilter::new(party.address)
            .event(executed.selector())
            .topic(1, u256_topic(proposal_id));
        let mut executions = self.reader.get_logs(&filter).await?;
        if executions.is_empty() {
            tracing::debug!(party = %party.address, %proposal_id, "proposal never executed");
            return Ok(None);
        }
        executions.sort_by_key(|l| std::cmp::Reverse((l.block_number, l.log_index)));

        let mut history = EngineHistory::new();
        for execution in &executions {
            let Some(receipt) = self
                .reader
                .get_transaction_receipt(execution.transaction_hash)
                .await?
            else {
                tracing::warn!(tx = %execution.transaction_hash, "execution receipt missing");
                continue;
            };

            let engine = history
                .descriptor_at(self.reader, self.registry, party, receipt.block_number)
                .await?;
            let listing = receipt
                .logs
                .iter()
                .filter(|l| l.address == party.address)
                .find_map(|l| listing_from_log(&engine, l).transpose())
                .transpose()?;

            if let Some(mut order) = listing {
                order.block_number = receipt.block_number;
                order.transaction_hash = receipt.transaction_hash;
                order.status = self.order_status(&order).await?;
                return Ok(Some(order));
            }
        }

        tracing::debug!(party = %party.address, %proposal_id, executions = executions.len(), "no listing found");
        Ok(None)
    }

    async fn order_status(&self, order: &OrderDetails) -> Result<OrderStatus, PartyError> {
        let function =
            Function::parse(GET_ORDER_STATUS).map_err(|e| PartyError::abi(e.to_string()))?;
        let data = abi::encode_call(&function, &[DynSolValue::FixedBytes(order.order_hash, 32)])?;
        let ret = self
            .reader
            .call(&CallRequest::new(self.marketplace, data), BlockTag::Latest)
            .await?;
        let out = abi::decode_output(&function, &ret)?;
        Ok(OrderStatus {
            is_validated: as_bool(abi::arg(&out, 0, "getOrderStatus")?)?,
            is_cancelled: as_bool(abi::arg(&out, 1, "getOrderStatus")?)?,
            total_filled: as_uint(abi::arg(&out, 2, "getOrderStatus")?)?,
            total_size: as_uint(abi::arg(&out, 3, "getOrderStatus")?)?,
        })
    }
}

/// Decode `log` as one of the engine's listing events. Fill state and
/// location fields are left at their defaults for the caller to merge.
fn listing_from_log(
    engine: &InterfaceDescriptor,
    log: &Log,
) -> Result<Option<OrderDetails>, PartyError> {
    for name in [STANDARD_LISTING, ADVANCED_LISTING] {
        let Ok(event) = engine.event(name) else {
            continue;
        };
        if !abi::is_event(event, log) {
            continue;
        }
        let args = abi::decode_log(event, log)?;
        let named = |field: &str| named_arg(event, &args, field);

        let kind = if name == ADVANCED_LISTING {
            OrderKind::Advanced {
                start_price: as_uint(named("startPrice")?)?,
                end_price: as_uint(named("endPrice")?)?,
            }
        } else {
            OrderKind::Standard { list_price: as_uint(named("listPrice")?)? }
        };
        return Ok(Some(OrderDetails {
            order_hash: as_word(named("orderHash")?)?,
            kind,
            token: as_address(named("token")?)?,
            token_id: as_uint(named("tokenId")?)?,
            expiry: as_uint(named("expiry")?)?,
            block_number: log.block_number,
            transaction_hash: log.transaction_hash,
            status: OrderStatus::default(),
        }));
    }
    Ok(None)
}

fn named_arg<'v>(event: &Event, args: &'v [DynSolValue], field: &str) -> Result<&'v DynSolValue, PartyError> {
    event
        .inputs
        .iter()
        .position(|p| p.name == field)
        .and_then(|i| args.get(i))
        .ok_or_else(|| PartyError::abi(format!("{} has no '{field}' argument", event.name)))
}
