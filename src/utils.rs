use crate::errors::{RelayerClientException, Result};
use alloy_primitives::{Address, U256};

pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes a hex string with or without the `0x` prefix. `"0x"` decodes to an
/// empty buffer.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(strip_hex_prefix(s))
        .map_err(|e| RelayerClientException::invalid_input(format!("invalid hex {:?}: {}", s, e)))
}

pub fn decode_hash(s: &str) -> Result<[u8; 32]> {
    let bytes = decode_hex(s)?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        RelayerClientException::invalid_input(format!(
            "expected 32-byte hash, got {} bytes",
            bytes.len()
        ))
    })
}

/// Parses a 20-byte address. Case is not validated; callers re-render with
/// `Display`, which is EIP-55 checksummed.
pub fn parse_address(s: &str) -> Result<Address> {
    let bytes = decode_hex(s)?;
    if bytes.len() != 20 {
        return Err(RelayerClientException::invalid_input(format!(
            "invalid address {:?}: expected 20 bytes, got {}",
            s,
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}

/// Parses a decimal uint256 string.
pub fn parse_u256(s: &str, field: &str) -> Result<U256> {
    if s.is_empty() {
        return Err(RelayerClientException::invalid_input(format!(
            "invalid {}: empty string",
            field
        )));
    }
    U256::from_str_radix(s, 10)
        .map_err(|e| RelayerClientException::invalid_input(format!("invalid {}: {}", field, e)))
}

pub fn to_hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
