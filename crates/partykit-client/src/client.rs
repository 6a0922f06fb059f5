//! `PartyClient`: one handle over a chain reader and the interface registry.

use alloy_primitives::{Address, U256};
use futures::try_join;
use partykit_core::{ChainReader, ContractFamily, NetworkId, PartyError};
use partykit_lifecycle::{
    compute_status, evaluate, Evaluation, LifecycleInput, OrderDetails, PreciousList,
    ProposalStatus,
};
use partykit_registry::RegistrySet;
use serde::Serialize;
use std::sync::Arc;

use crate::interface::{resolve_interface, ResolvedContract};
use crate::orders::{OrderResolver, SEAPORT_ADDRESS};
use crate::proposals::{ProposalReader, ProposalRecord, ProposalState};
use crate::resolver;

/// A proposal joined with its state, evaluation and, for listings, the order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub record: ProposalRecord,
    pub state: ProposalState,
    /// Status recomputed from the state values at evaluation time. Differs
    /// from `state.status` when a time boundary passed since the last block.
    pub projected_status: ProposalStatus,
    pub evaluation: Evaluation,
    pub order: Option<OrderDetails>,
}

#[derive(Clone)]
pub struct PartyClient {
    reader: Arc<dyn ChainReader>,
    registry: Arc<RegistrySet>,
    marketplace: Address,
}

impl PartyClient {
    pub fn new(reader: Arc<dyn ChainReader>, registry: Arc<RegistrySet>) -> Self {
        Self { reader, registry, marketplace: SEAPORT_ADDRESS }
    }

    /// Client over the bundled deployment tables.
    pub fn with_bundled_registry(reader: Arc<dyn ChainReader>) -> Result<Self, PartyError> {
        Ok(Self::new(reader, Arc::new(RegistrySet::bundled()?.clone())))
    }

    pub fn with_marketplace(mut self, marketplace: Address) -> Self {
        self.marketplace = marketplace;
        self
    }

    pub fn reader(&self) -> &dyn ChainReader {
        self.reader.as_ref()
    }

    pub fn registry(&self) -> &RegistrySet {
        &self.registry
    }

    pub fn network(&self) -> NetworkId {
        self.reader.network()
    }

    pub async fn resolve_implementation(&self, address: Address) -> Result<Address, PartyError> {
        resolver::resolve(self.reader(), address).await
    }

    pub async fn resolve_implementations(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<Option<Address>>, PartyError> {
        resolver::resolve_batch(self.reader(), addresses).await
    }

    pub async fn interface(
        &self,
        family: ContractFamily,
        address: Address,
    ) -> Result<ResolvedContract, PartyError> {
        resolve_interface(self.reader(), &self.registry, family, address).await
    }

    pub async fn party(&self, address: Address) -> Result<ResolvedContract, PartyError> {
        self.interface(ContractFamily::Party, address).await
    }

    pub fn proposals<'a>(&'a self, party: &'a ResolvedContract) -> ProposalReader<'a> {
        ProposalReader::new(self.reader(), party)
    }

    pub fn orders(&self) -> OrderResolver<'_> {
        OrderResolver::new(self.reader(), &self.registry).with_marketplace(self.marketplace)
    }

    pub async fn order(
        &self,
        party: &ResolvedContract,
        proposal_id: U256,
    ) -> Result<Option<OrderDetails>, PartyError> {
        self.orders().resolve(party, proposal_id).await
    }

    /// Evaluate a proposal against the wall clock.
    pub async fn evaluate(
        &self,
        party: &ResolvedContract,
        record: &ProposalRecord,
    ) -> Result<ProposalView, PartyError> {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        self.evaluate_at(party, record, now).await
    }

    /// Evaluate a proposal as of `now` (unix seconds).
    ///
    /// The precious list is only read for marketplace listings, concurrently
    /// with the state. The order is read once a listing has started executing.
    pub async fn evaluate_at(
        &self,
        party: &ResolvedContract,
        record: &ProposalRecord,
        now: u64,
    ) -> Result<ProposalView, PartyError> {
        let reader = self.proposals(party);
        let is_listing = record
            .variant
            .as_ref()
            .and_then(|v| v.marketplace_listing())
            .is_some();

        let precious_read = async {
            if is_listing {
                reader.precious_list().await
            } else {
                Ok::<Option<PreciousList>, PartyError>(None)
            }
        };
        let (state, precious) = try_join!(reader.state(record.id), precious_read)?;

        let executed = matches!(state.status, ProposalStatus::InProgress | ProposalStatus::Complete);
        let order = if is_listing && executed {
            self.order(party, record.id).await?
        } else {
            None
        };

        let evaluation = evaluate(&LifecycleInput {
            status: state.status,
            values: &state.values,
            max_executable_time: record.raw.max_executable_time,
            cancel_delay: record.raw.cancel_delay,
            variant: record.variant.as_ref(),
            precious: precious.as_ref(),
            order: order.as_ref(),
            now,
        });
        let projected_status = compute_status(&state.values, &state.governance, now);

        tracing::debug!(
            party = %party.address,
            id = %record.id,
            status = %state.status,
            display = ?evaluation.display_status,
            next = ?evaluation.next_step,
            "evaluated proposal"
        );
        Ok(ProposalView { record: record.clone(), state, projected_status, evaluation, order })
    }
}
