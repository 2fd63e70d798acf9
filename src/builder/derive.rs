use crate::constants::{PROXY_INIT_CODE_HASH, SAFE_INIT_CODE_HASH};
use crate::errors::Result;
use crate::utils::decode_hash;
use alloy_primitives::{keccak256, Address};

/// `keccak256(0xff ++ deployer ++ salt ++ init_code_hash)[12..]`
pub fn get_create2_address(
    bytecode_hash: &str,
    from_address: &Address,
    salt: &[u8; 32],
) -> Result<Address> {
    let bytecode_hash = decode_hash(bytecode_hash)?;

    let mut input = Vec::with_capacity(1 + 20 + 32 + 32);
    input.push(0xff);
    input.extend_from_slice(from_address.as_slice());
    input.extend_from_slice(salt);
    input.extend_from_slice(&bytecode_hash);

    let hash = keccak256(&input);
    Ok(Address::from_slice(&hash[12..]))
}

/// Safe wallet owned by `address`. The salt hashes the ABI-encoded owner,
/// i.e. left-padded to 32 bytes.
pub fn derive(address: &Address, safe_factory: &Address) -> Result<Address> {
    let salt = keccak256(address.into_word());
    let safe = get_create2_address(SAFE_INIT_CODE_HASH, safe_factory, &salt.0)?;
    log::debug!("derived safe {} for {}", safe, address);
    Ok(safe)
}

/// Proxy wallet owned by `address`. The salt hashes the tightly packed
/// 20-byte owner, not its ABI encoding.
pub fn derive_proxy(address: &Address, proxy_factory: &Address) -> Result<Address> {
    let salt = keccak256(address.as_slice());
    let proxy = get_create2_address(PROXY_INIT_CODE_HASH, proxy_factory, &salt.0)?;
    log::debug!("derived proxy wallet {} for {}", proxy, address);
    Ok(proxy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RelayerClientException;
    use alloy_primitives::address;

    const OWNER: Address = address!("0x6e0c80c90ea6c15917308F820Eac91Ce2724B5b5");
    const FACTORY: Address = address!("0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b");

    #[test]
    fn test_derive_safe() {
        let safe = derive(&OWNER, &FACTORY).unwrap();
        assert_eq!(safe.to_string(), "0x6d8c4e9aDF5748Af82Dabe2C6225207770d6B4fa");
    }

    #[test]
    fn test_derive_proxy() {
        let proxy = derive_proxy(&OWNER, &FACTORY).unwrap();
        let rendered = proxy.to_string();
        assert!(rendered.starts_with("0x"));
        assert_eq!(rendered.len(), 42);
        assert_eq!(rendered, proxy.to_checksum(None));
        assert_ne!(proxy, derive(&OWNER, &FACTORY).unwrap());
    }

    #[test]
    fn derive_proxy_known_vectors() {
        let polygon_proxy_factory = address!("0xaB45c5A4B0c941a2F231C04C3f49182e1A254052");
        assert_eq!(
            derive_proxy(&OWNER, &polygon_proxy_factory).unwrap(),
            address!("0x410afd66773504329b0d4733ac407914a0840da8")
        );
        assert_eq!(
            derive_proxy(&OWNER, &FACTORY).unwrap(),
            address!("0x6f637516414fd2ecb0c442e452f7acae4b3182f0")
        );
    }

    #[test]
    fn create2_matches_alloy() {
        let salt = [7u8; 32];
        let ours = get_create2_address(SAFE_INIT_CODE_HASH, &FACTORY, &salt).unwrap();
        let init_code_hash = decode_hash(SAFE_INIT_CODE_HASH).unwrap();
        assert_eq!(ours, FACTORY.create2(salt, init_code_hash));
    }

    #[test]
    fn malformed_init_code_hash_is_rejected() {
        let salt = [0u8; 32];
        for bad in ["0x1234", "0xzz", ""] {
            assert!(matches!(
                get_create2_address(bad, &FACTORY, &salt),
                Err(RelayerClientException::InvalidInput(_))
            ));
        }
    }
}
