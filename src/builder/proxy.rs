use crate::builder::derive::derive_proxy;
use crate::config::ContractConfig;
use crate::constants::{DEFAULT_GAS_LIMIT, RELAY_HUB_PREFIX};
use crate::errors::{RelayerClientException, Result};
use crate::models::{ProxyTransactionArgs, SignatureParams, TransactionRequest, TransactionType};
use crate::signer::Signer;
use crate::utils::{decode_hex, parse_u256};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Recovers a failed gas estimate with [`DEFAULT_GAS_LIMIT`]. Only
/// `NetworkDegraded` is recovered; anything else still propagates.
pub trait GasEstimateExt {
    fn or_default_gas_limit(self) -> Result<U256>;
}

impl GasEstimateExt for Result<U256> {
    fn or_default_gas_limit(self) -> Result<U256> {
        match self {
            Err(RelayerClientException::NetworkDegraded(reason)) => {
                log::warn!(
                    "Error estimating gas for proxy transaction, using default gas limit: {}",
                    reason
                );
                Ok(U256::from(DEFAULT_GAS_LIMIT))
            }
            other => other,
        }
    }
}

/// RelayHub hash: `keccak256("rlx:" ++ from ++ to ++ data ++ txFee ++ gasPrice
/// ++ gasLimit ++ nonce ++ relayHub ++ relay)`. Addresses are 20 raw bytes,
/// numbers 32-byte big-endian and `data` is appended raw with no length prefix.
#[allow(clippy::too_many_arguments)]
pub fn create_struct_hash(
    from: &Address,
    to: &Address,
    data: &str,
    tx_fee: &str,
    gas_price: &str,
    gas_limit: &str,
    nonce: &str,
    relay_hub: &Address,
    relay: &Address,
) -> Result<B256> {
    let data = decode_hex(data)?;

    let mut buf = Vec::with_capacity(RELAY_HUB_PREFIX.len() + 20 * 4 + 32 * 4 + data.len());
    buf.extend_from_slice(RELAY_HUB_PREFIX);
    buf.extend_from_slice(from.as_slice());
    buf.extend_from_slice(to.as_slice());
    buf.extend_from_slice(&data);
    for (value, field) in [
        (tx_fee, "tx_fee"),
        (gas_price, "gas_price"),
        (gas_limit, "gas_limit"),
        (nonce, "nonce"),
    ] {
        buf.extend_from_slice(&parse_u256(value, field)?.to_be_bytes::<32>());
    }
    buf.extend_from_slice(relay_hub.as_slice());
    buf.extend_from_slice(relay.as_slice());

    Ok(keccak256(&buf))
}

pub fn create_proxy_signature(signer: &Signer, struct_hash: &B256) -> Result<String> {
    signer.sign_eip191(&struct_hash.0)
}

/// Caller-supplied non-zero `gas_limit` wins; otherwise the signer's RPC
/// estimate, falling back to [`DEFAULT_GAS_LIMIT`] when estimation fails.
pub fn get_gas_limit(signer: &Signer, to: &Address, args: &ProxyTransactionArgs) -> Result<String> {
    if let Some(gas_limit) = args.gas_limit.as_deref() {
        if !parse_u256(gas_limit, "gas_limit")?.is_zero() {
            return Ok(gas_limit.to_string());
        }
    }

    let estimate = signer
        .estimate_gas(&args.from_address, to, &args.data)
        .or_default_gas_limit()?;
    Ok(estimate.to_string())
}

pub fn build_proxy_transaction_request(
    signer: &Signer,
    args: &ProxyTransactionArgs,
    config: &ContractConfig,
    metadata: Option<&str>,
) -> Result<TransactionRequest> {
    let (proxy_factory, relay_hub) = config.proxy_contracts()?;

    let to = proxy_factory;
    let proxy = derive_proxy(&args.from_address, &proxy_factory)?;
    let relayer_fee = "0";
    let gas_limit = get_gas_limit(signer, &to, args)?;

    let tx_hash = create_struct_hash(
        &args.from_address,
        &to,
        &args.data,
        relayer_fee,
        &args.gas_price,
        &gas_limit,
        &args.nonce,
        &relay_hub,
        &args.relay,
    )?;
    log::debug!("proxy {} relay hub hash {}", proxy, tx_hash);

    let sig = create_proxy_signature(signer, &tx_hash)?;

    let signature_params = SignatureParams::Proxy {
        gas_price: args.gas_price.clone(),
        gas_limit,
        relayer_fee: relayer_fee.to_string(),
        relay_hub: relay_hub.to_string(),
        relay: args.relay.to_string(),
    };

    Ok(TransactionRequest {
        transaction_type: TransactionType::Proxy,
        from_address: args.from_address.to_string(),
        to: to.to_string(),
        proxy: proxy.to_string(),
        data: args.data.clone(),
        signature: sig,
        signature_params,
        value: None,
        nonce: Some(args.nonce.clone()),
        metadata: Some(metadata.unwrap_or_default().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const RELAY: Address = address!("0x1234567890123456789012345678901234567890");

    fn config() -> ContractConfig {
        ContractConfig {
            safe_factory: address!("0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b"),
            safe_multisend: address!("0xA238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761"),
            proxy_factory: Some(address!("0xaB45c5A4B0c941a2F231C04C3f49182e1A254052")),
            relay_hub: Some(address!("0xD216153c06E857cD7f72665E0aF1d7D82172F494")),
        }
    }

    fn args(signer: &Signer, gas_limit: Option<&str>) -> ProxyTransactionArgs {
        ProxyTransactionArgs {
            from_address: signer.address(),
            nonce: "0".to_string(),
            gas_price: "0".to_string(),
            gas_limit: gas_limit.map(str::to_string),
            data: "0x095ea7b3".to_string(),
            relay: RELAY,
        }
    }

    #[test]
    fn struct_hash_concatenates_data_raw() {
        let from = Address::repeat_byte(0x01);
        let to = Address::repeat_byte(0x02);
        let hub = Address::repeat_byte(0x03);

        let hash =
            create_struct_hash(&from, &to, "0x095ea7b3", "0", "1", "50000", "2", &hub, &RELAY)
                .unwrap();

        let mut expected = b"rlx:".to_vec();
        expected.extend_from_slice(from.as_slice());
        expected.extend_from_slice(to.as_slice());
        expected.extend_from_slice(&[0x09, 0x5e, 0xa7, 0xb3]);
        for n in [0u64, 1, 50000, 2] {
            expected.extend_from_slice(&U256::from(n).to_be_bytes::<32>());
        }
        expected.extend_from_slice(hub.as_slice());
        expected.extend_from_slice(RELAY.as_slice());
        assert_eq!(hash, keccak256(&expected));
        assert_eq!(expected.len(), 4 + 20 + 20 + 4 + 128 + 20 + 20);
    }

    #[test]
    fn struct_hash_known_vector() {
        let hash = create_struct_hash(
            &Address::repeat_byte(0x01),
            &Address::repeat_byte(0x02),
            "0x095ea7b3",
            "0",
            "1",
            "50000",
            "2",
            &Address::repeat_byte(0x03),
            &RELAY,
        )
        .unwrap();
        assert_eq!(
            hash,
            b256!("0x6ae9d530c5a85ad0eee024e4478050f5e869f7cb79efa6981d56e9b91607de63")
        );
    }

    #[test]
    fn struct_hash_depends_on_every_field() {
        let base = |data: &str, nonce: &str| {
            create_struct_hash(
                &Address::ZERO,
                &Address::ZERO,
                data,
                "0",
                "0",
                "1",
                nonce,
                &Address::ZERO,
                &Address::ZERO,
            )
            .unwrap()
        };
        assert_ne!(base("0x", "0"), base("0x00", "0"));
        assert_ne!(base("0x", "0"), base("0x", "1"));
    }

    #[test]
    fn gas_limit_uses_supplied_value() {
        let signer = Signer::new(PK, 137).unwrap();
        let to = config().proxy_factory.unwrap();
        assert_eq!(
            get_gas_limit(&signer, &to, &args(&signer, Some("50000"))).unwrap(),
            "50000"
        );
    }

    #[test]
    fn gas_limit_falls_back_to_default() {
        let signer = Signer::new(PK, 137).unwrap();
        let to = config().proxy_factory.unwrap();
        for gas_limit in [None, Some("0")] {
            assert_eq!(
                get_gas_limit(&signer, &to, &args(&signer, gas_limit)).unwrap(),
                "10000000"
            );
        }

        let unreachable = Signer::new(PK, 137)
            .unwrap()
            .with_rpc_url("http://127.0.0.1:1");
        assert_eq!(
            get_gas_limit(&unreachable, &to, &args(&unreachable, None)).unwrap(),
            "10000000"
        );
    }

    #[test]
    fn fallback_only_recovers_network_errors() {
        let err: Result<U256> = Err(RelayerClientException::invalid_input("bad"));
        assert!(err.or_default_gas_limit().is_err());
        let ok: Result<U256> = Ok(U256::from(21000u64));
        assert_eq!(ok.or_default_gas_limit().unwrap(), U256::from(21000u64));
    }

    #[test]
    fn invalid_supplied_gas_limit_is_rejected() {
        let signer = Signer::new(PK, 137).unwrap();
        let to = config().proxy_factory.unwrap();
        assert!(get_gas_limit(&signer, &to, &args(&signer, Some("lots"))).is_err());
    }

    #[test]
    fn test_build_proxy_transaction_request() {
        let signer = Signer::new(PK, 137).unwrap();
        let config = config();
        let args = args(&signer, None);

        let request =
            build_proxy_transaction_request(&signer, &args, &config, Some("test")).unwrap();

        assert_eq!(request.transaction_type, TransactionType::Proxy);
        assert_eq!(request.from_address, signer.address().to_string());
        assert_eq!(request.to, "0xaB45c5A4B0c941a2F231C04C3f49182e1A254052");
        assert_eq!(
            request.proxy,
            derive_proxy(&signer.address(), &config.proxy_factory.unwrap())
                .unwrap()
                .to_string()
        );
        assert_eq!(request.metadata.as_deref(), Some("test"));
        assert_eq!(request.nonce.as_deref(), Some("0"));
        assert_eq!(request.data, "0x095ea7b3");
        assert_eq!(request.signature.len(), 2 + 130);
        assert_eq!(
            request.signature_params,
            SignatureParams::Proxy {
                gas_price: "0".to_string(),
                gas_limit: "10000000".to_string(),
                relayer_fee: "0".to_string(),
                relay_hub: "0xD216153c06E857cD7f72665E0aF1d7D82172F494".to_string(),
                relay: RELAY.to_string(),
            }
        );
    }

    #[test]
    fn proxy_requires_proxy_contracts() {
        let signer = Signer::new(PK, 80002).unwrap();
        let config = ContractConfig::for_chain(80002).unwrap();
        let err = build_proxy_transaction_request(&signer, &args(&signer, None), &config, None)
            .unwrap_err();
        assert!(matches!(err, RelayerClientException::UnsupportedFeature(_)));
    }
}
