use crate::builder::derive::derive;
use crate::config::ContractConfig;
use crate::errors::Result;
use crate::model::create_proxy::{create_proxy_signing_hash, CreateProxy};
use crate::models::{SafeCreateTransactionArgs, SignatureParams, TransactionRequest, TransactionType};
use crate::signer::Signer;
use crate::utils::{decode_hash, parse_u256, to_hex_string};
use alloy_primitives::Address;

pub fn create_safe_create_struct_hash(
    safe_factory: &Address,
    chain_id: u64,
    payment_token: &Address,
    payment: &str,
    payment_receiver: &Address,
) -> Result<String> {
    let create_proxy = CreateProxy {
        paymentToken: *payment_token,
        payment: parse_u256(payment, "payment")?,
        paymentReceiver: *payment_receiver,
    };

    let hash = create_proxy_signing_hash(&create_proxy, chain_id, safe_factory);
    Ok(to_hex_string(hash.as_slice()))
}

/// The factory verifies the raw ECDSA signature, so no EIP-191 prefix here.
pub fn create_safe_create_signature(
    signer: &Signer,
    safe_factory: &Address,
    chain_id: u64,
    payment_token: &Address,
    payment: &str,
    payment_receiver: &Address,
) -> Result<String> {
    let struct_hash = create_safe_create_struct_hash(
        safe_factory,
        chain_id,
        payment_token,
        payment,
        payment_receiver,
    )?;
    signer.sign(&decode_hash(&struct_hash)?)
}

pub fn build_safe_create_transaction_request(
    signer: &Signer,
    args: &SafeCreateTransactionArgs,
    config: &ContractConfig,
) -> Result<TransactionRequest> {
    let factory = config.safe_factory;
    let safe_address = derive(&args.from_address, &factory)?;

    let sig = create_safe_create_signature(
        signer,
        &factory,
        args.chain_id,
        &args.payment_token,
        &args.payment,
        &args.payment_receiver,
    )?;

    let signature_params = SignatureParams::SafeCreate {
        payment_token: args.payment_token.to_string(),
        payment: args.payment.clone(),
        payment_receiver: args.payment_receiver.to_string(),
    };

    Ok(TransactionRequest {
        transaction_type: TransactionType::SafeCreate,
        from_address: args.from_address.to_string(),
        to: factory.to_string(),
        proxy: safe_address.to_string(),
        data: "0x".to_string(),
        signature: sig,
        signature_params,
        value: None,
        nonce: None,
        metadata: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_contract_config;
    use crate::constants::ZERO_ADDRESS;
    use crate::errors::RelayerClientException;

    const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_create_safe_create_struct_hash() {
        let config = get_contract_config(137).unwrap();
        let struct_hash = create_safe_create_struct_hash(
            &config.safe_factory,
            137,
            &ZERO_ADDRESS,
            "0",
            &ZERO_ADDRESS,
        )
        .unwrap();
        assert_eq!(
            struct_hash,
            "0x563ac315294c5be01ab1f3b04a5abdfa39e8317a9d90679d4e63caf760b126a4"
        );
    }

    #[test]
    fn test_create_safe_create_signature() {
        let signer = Signer::new(PK, 137).unwrap();
        let config = get_contract_config(137).unwrap();
        let sig = create_safe_create_signature(
            &signer,
            &config.safe_factory,
            137,
            &ZERO_ADDRESS,
            "0",
            &ZERO_ADDRESS,
        )
        .unwrap();
        assert_eq!(
            sig,
            "0xe3e791c24134b7bebe93b4771bd07c7fe7bbe115eeb0bf629ac3b7a435e7ac8d05f979729d873f7d0e16205becf48ee450aa382bc28c65eedcd6454e81d81f921b"
        );
    }

    #[test]
    fn invalid_payment_is_rejected() {
        let config = get_contract_config(137).unwrap();
        let err = create_safe_create_struct_hash(
            &config.safe_factory,
            137,
            &ZERO_ADDRESS,
            "1.5",
            &ZERO_ADDRESS,
        )
        .unwrap_err();
        assert!(matches!(err, RelayerClientException::InvalidInput(_)));
    }

    #[test]
    fn builds_safe_create_request() {
        let signer = Signer::new(PK, 137).unwrap();
        let config = get_contract_config(137).unwrap();
        let args = SafeCreateTransactionArgs {
            from_address: signer.address(),
            chain_id: 137,
            payment_token: ZERO_ADDRESS,
            payment: "0".to_string(),
            payment_receiver: ZERO_ADDRESS,
        };

        let request = build_safe_create_transaction_request(&signer, &args, &config).unwrap();
        assert_eq!(request.transaction_type, TransactionType::SafeCreate);
        assert_eq!(request.to, "0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b");
        assert_eq!(
            request.proxy,
            derive(&signer.address(), &config.safe_factory).unwrap().to_string()
        );
        assert_eq!(request.data, "0x");
        assert_eq!(
            request.signature,
            "0xe3e791c24134b7bebe93b4771bd07c7fe7bbe115eeb0bf629ac3b7a435e7ac8d05f979729d873f7d0e16205becf48ee450aa382bc28c65eedcd6454e81d81f921b"
        );
        assert!(request.value.is_none());
        assert!(request.nonce.is_none());
        assert!(request.metadata.is_none());
    }
}
