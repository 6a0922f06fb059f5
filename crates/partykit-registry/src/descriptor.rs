//! Interface descriptors: one per deployment generation of a contract family.

use alloy_json_abi::{Event, Function, JsonAbi};
use partykit_core::{ContractFamily, PartyError, RegistryError};
use std::fmt;

/// The function/event signatures valid for one historical deployment.
///
/// Descriptors are historical facts: once built they are never mutated.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub family: ContractFamily,
    pub version: String,
    pub abi: JsonAbi,
}

impl InterfaceDescriptor {
    /// Build a descriptor from human-readable signatures, e.g.
    /// `"function veto(uint256 proposalId)"` or
    /// `"event ProposalPassed(uint256 indexed proposalId)"`.
    ///
    /// Tuple components are unnamed: `(uint40, bytes) proposal` parses,
    /// `(uint40 cancelDelay, bytes data) proposal` does not.
    pub fn from_signatures<'a, I>(
        name: impl Into<String>,
        family: ContractFamily,
        version: impl Into<String>,
        signatures: I,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let name = name.into();
        let abi = parse_signatures(&name, signatures)?;
        Ok(Self { name, family, version: version.into(), abi })
    }

    /// First overload of the named function.
    pub fn function(&self, name: &str) -> Result<&Function, PartyError> {
        self.abi
            .functions
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| PartyError::MissingFunction {
                descriptor: self.name.clone(),
                function: name.to_string(),
            })
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.abi.functions.contains_key(name)
    }

    /// First overload of the named event.
    pub fn event(&self, name: &str) -> Result<&Event, PartyError> {
        self.abi
            .events
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| PartyError::MissingEvent {
                descriptor: self.name.clone(),
                event: name.to_string(),
            })
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.abi.events.contains_key(name)
    }
}

impl fmt::Display for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

fn parse_signatures<'a, I>(descriptor: &str, signatures: I) -> Result<JsonAbi, RegistryError>
where
    I: IntoIterator<Item = &'a str>,
{
    let invalid = |reason: String| RegistryError::InvalidAbi {
        descriptor: descriptor.to_string(),
        reason,
    };

    let mut abi = JsonAbi::new();
    for raw in signatures {
        let sig = raw.trim();
        if sig.starts_with("function ") {
            let f = Function::parse(sig).map_err(|e| invalid(format!("{sig}: {e}")))?;
            abi.functions.entry(f.name.clone()).or_default().push(f);
        } else if sig.starts_with("event ") {
            let e = Event::parse(sig).map_err(|e| invalid(format!("{sig}: {e}")))?;
            abi.events.entry(e.name.clone()).or_default().push(e);
        } else {
            return Err(invalid(format!("unsupported signature kind: {sig}")));
        }
    }
    Ok(abi)
}
