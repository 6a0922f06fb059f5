//! `partykit decode` / `partykit encode`: offline proposal codec.

use anyhow::{Context, Result};
use partykit_codec::{CallAnnotation, ProposalType, ProposalVariant, RawProposal};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeReport {
    pub tag: u32,
    pub proposal_type: ProposalType,
    pub variant: ProposalVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<CallAnnotation>,
}

/// Decode raw `proposalData` into its variant and call annotation.
pub fn decode_report(data: &[u8]) -> Result<DecodeReport> {
    let variant = partykit_codec::decode_proposal_data(data).context("proposal data does not decode")?;
    Ok(DecodeReport {
        tag: variant.tag(),
        proposal_type: variant.proposal_type(),
        annotation: variant.annotation(),
        variant,
    })
}

pub fn cmd_decode(data: &str, json: bool) -> Result<()> {
    let bytes = crate::parse_hex(data)?;
    let report = decode_report(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Type: {} (tag {})", report.proposal_type, report.tag);
    println!("{}", serde_json::to_string_pretty(&report.variant)?);
    if let Some(annotation) = &report.annotation {
        println!("Annotation:");
        println!("{}", serde_json::to_string_pretty(annotation)?);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeReport {
    pub proposal_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<RawProposal>,
}

/// Encode a JSON variant; wrap it in a `Proposal` when both timings are given.
pub fn encode_report(
    variant_json: &str,
    max_executable_time: Option<u64>,
    cancel_delay: Option<u64>,
) -> Result<EncodeReport> {
    let variant: ProposalVariant =
        serde_json::from_str(variant_json).context("variant JSON does not match any proposal type")?;
    let data = partykit_codec::encode(&variant).context("variant cannot be encoded")?;

    let proposal = match (max_executable_time, cancel_delay) {
        (Some(max_executable_time), Some(cancel_delay)) => Some(RawProposal {
            max_executable_time,
            cancel_delay,
            proposal_data: data.clone(),
        }),
        (None, None) => None,
        _ => anyhow::bail!("--max-executable-time and --cancel-delay must be given together"),
    };
    Ok(EncodeReport { proposal_data: format!("0x{}", hex::encode(&data)), proposal })
}

pub fn cmd_encode(
    variant_json: &str,
    max_executable_time: Option<u64>,
    cancel_delay: Option<u64>,
) -> Result<()> {
    let report = encode_report(variant_json, max_executable_time, cancel_delay)?;
    match report.proposal {
        Some(_) => println!("{}", serde_json::to_string_pretty(&report)?),
        None => println!("{}", report.proposal_data),
    }
    Ok(())
}
