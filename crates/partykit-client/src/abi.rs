//! Descriptor-driven ABI encoding and decoding.
//!
//! Descriptors are parsed from human-readable signatures, so every call and
//! event is encoded from the `Function`/`Event` the registry handed us rather
//! than from compile-time bindings.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Event, EventParam, Function, Param};
use alloy_primitives::{Address, Bytes, B256, U256};
use partykit_core::{Log, PartyError};

/// Resolve a parameter list into dyn-abi types.
pub fn param_types(params: &[Param]) -> Result<Vec<DynSolType>, PartyError> {
    params
        .iter()
        .map(|p| p.resolve().map_err(|e| PartyError::abi(format!("{}: {e}", p.ty))))
        .collect()
}

fn event_param_type(param: &EventParam) -> Result<DynSolType, PartyError> {
    param.resolve().map_err(|e| PartyError::abi(format!("{}: {e}", param.ty)))
}

/// `selector ++ abi.encode(args...)`, type-checked against `function.inputs`.
pub fn encode_call(function: &Function, args: &[DynSolValue]) -> Result<Bytes, PartyError> {
    let types = param_types(&function.inputs)?;
    if types.len() != args.len() {
        return Err(PartyError::abi(format!(
            "{} takes {} arguments, got {}",
            function.signature(),
            types.len(),
            args.len()
        )));
    }
    if let Some((i, ty)) = types.iter().enumerate().find(|(i, ty)| !ty.matches(&args[*i])) {
        return Err(PartyError::abi(format!(
            "{}: argument {i} is not a {ty}",
            function.signature()
        )));
    }

    let mut data = function.selector().to_vec();
    data.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
    Ok(data.into())
}

/// Decode return data into one value per declared output.
pub fn decode_output(function: &Function, data: &[u8]) -> Result<Vec<DynSolValue>, PartyError> {
    let ty = DynSolType::Tuple(param_types(&function.outputs)?);
    match ty.abi_decode_params(data) {
        Ok(DynSolValue::Tuple(values)) => Ok(values),
        Ok(other) => Err(PartyError::abi(format!("{}: unexpected {other:?}", function.name))),
        Err(e) => Err(PartyError::abi(format!("{} output: {e}", function.name))),
    }
}

/// `true` if `log` was emitted as `event` (anonymous events never match).
pub fn is_event(event: &Event, log: &Log) -> bool {
    !event.anonymous && log.topic0() == Some(&event.selector())
}

/// Decode a log into its arguments, in declaration order.
///
/// Indexed value types are decoded from their topic. Indexed dynamic types
/// and tuples are only available as their keccak hash and come back as a
/// `bytes32`.
pub fn decode_log(event: &Event, log: &Log) -> Result<Vec<DynSolValue>, PartyError> {
    if !is_event(event, log) {
        return Err(PartyError::abi(format!("log is not a {} event", event.name)));
    }

    let mut topics = log.topics.iter().skip(1);
    let mut indexed = Vec::new();
    let mut body_types = Vec::new();
    for param in &event.inputs {
        let ty = event_param_type(param)?;
        if param.indexed {
            let topic = topics.next().ok_or_else(|| {
                PartyError::abi(format!("{}: missing topic for {}", event.name, param.name))
            })?;
            indexed.push(decode_topic(&ty, topic)?);
        } else {
            body_types.push(ty);
        }
    }

    let body = match DynSolType::Tuple(body_types).abi_decode_params(&log.data) {
        Ok(DynSolValue::Tuple(values)) => values,
        Ok(other) => return Err(PartyError::abi(format!("{}: unexpected {other:?}", event.name))),
        Err(e) => return Err(PartyError::abi(format!("{} data: {e}", event.name))),
    };

    let mut indexed = indexed.into_iter();
    let mut body = body.into_iter();
    event
        .inputs
        .iter()
        .map(|param| {
            let next = if param.indexed { indexed.next() } else { body.next() };
            next.ok_or_else(|| PartyError::abi(format!("{}: short decode", event.name)))
        })
        .collect()
}

fn decode_topic(ty: &DynSolType, topic: &B256) -> Result<DynSolValue, PartyError> {
    match ty {
        DynSolType::Address
        | DynSolType::Bool
        | DynSolType::Int(_)
        | DynSolType::Uint(_)
        | DynSolType::FixedBytes(_) => {
            ty.abi_decode(topic.as_slice()).map_err(|e| PartyError::abi(format!("topic: {e}")))
        }
        _ => Ok(DynSolValue::FixedBytes(*topic, 32)),
    }
}

// Value accessors. Each names what it expected so a schema drift shows up
// in the error rather than as a silent default.

pub fn as_uint(value: &DynSolValue) -> Result<U256, PartyError> {
    match value {
        DynSolValue::Uint(v, _) => Ok(*v),
        other => Err(PartyError::abi(format!("expected uint, got {other:?}"))),
    }
}

pub fn as_u64(value: &DynSolValue) -> Result<u64, PartyError> {
    let v = as_uint(value)?;
    if v.bit_len() > 64 {
        return Err(PartyError::abi(format!("{v} does not fit in u64")));
    }
    Ok(v.to::<u64>())
}

pub fn as_u128(value: &DynSolValue) -> Result<u128, PartyError> {
    let v = as_uint(value)?;
    if v.bit_len() > 128 {
        return Err(PartyError::abi(format!("{v} does not fit in u128")));
    }
    Ok(v.to::<u128>())
}

pub fn as_address(value: &DynSolValue) -> Result<Address, PartyError> {
    match value {
        DynSolValue::Address(a) => Ok(*a),
        other => Err(PartyError::abi(format!("expected address, got {other:?}"))),
    }
}

pub fn as_bool(value: &DynSolValue) -> Result<bool, PartyError> {
    match value {
        DynSolValue::Bool(b) => Ok(*b),
        other => Err(PartyError::abi(format!("expected bool, got {other:?}"))),
    }
}

pub fn as_word(value: &DynSolValue) -> Result<B256, PartyError> {
    match value {
        DynSolValue::FixedBytes(w, 32) => Ok(*w),
        other => Err(PartyError::abi(format!("expected bytes32, got {other:?}"))),
    }
}

pub fn as_tuple(value: &DynSolValue) -> Result<&[DynSolValue], PartyError> {
    match value {
        DynSolValue::Tuple(fields) => Ok(fields),
        other => Err(PartyError::abi(format!("expected tuple, got {other:?}"))),
    }
}

pub fn as_array(value: &DynSolValue) -> Result<&[DynSolValue], PartyError> {
    match value {
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => Ok(items),
        other => Err(PartyError::abi(format!("expected array, got {other:?}"))),
    }
}

/// Positional argument, with the event or function name in the error.
pub fn arg<'a>(values: &'a [DynSolValue], index: usize, what: &str) -> Result<&'a DynSolValue, PartyError> {
    values
        .get(index)
        .ok_or_else(|| PartyError::abi(format!("{what}: missing argument {index}")))
}
