use crate::builder::derive::derive;
use crate::builder::signature::split_and_pack_sig;
use crate::config::ContractConfig;
use crate::constants::ZERO_ADDRESS;
use crate::encode::safe::create_safe_multisend_transaction;
use crate::errors::{RelayerClientException, Result};
use crate::model::safe_tx::{safe_tx_signing_hash, SafeTx};
use crate::models::{
    OperationType, SafeTransaction, SafeTransactionArgs, SignatureParams, TransactionRequest,
    TransactionType,
};
use crate::signer::Signer;
use crate::utils::{decode_hash, decode_hex, parse_u256, to_hex_string};
use alloy_primitives::Address;

pub fn aggregate_transaction(
    txns: &[SafeTransaction],
    safe_multisend: &Address,
) -> Result<SafeTransaction> {
    match txns {
        [] => Err(RelayerClientException::invalid_input(
            "at least one transaction is required",
        )),
        [single] => Ok(single.clone()),
        _ => create_safe_multisend_transaction(txns, safe_multisend),
    }
}

/// Signs a Safe struct hash with the EIP-191 prefix (Safe `eth_sign` mode).
pub fn create_safe_signature(signer: &Signer, struct_hash: &str) -> Result<String> {
    signer.sign_eip191(&decode_hash(struct_hash)?)
}

#[allow(clippy::too_many_arguments)]
pub fn create_struct_hash(
    chain_id: u64,
    safe: &Address,
    to: &Address,
    value: &str,
    data: &str,
    operation: OperationType,
    safe_tx_gas: &str,
    base_gas: &str,
    gas_price: &str,
    gas_token: &Address,
    refund_receiver: &Address,
    nonce: &str,
) -> Result<String> {
    let safe_tx = SafeTx {
        to: *to,
        value: parse_u256(value, "value")?,
        data: decode_hex(data)?.into(),
        operation: operation.as_u8(),
        safeTxGas: parse_u256(safe_tx_gas, "safe_tx_gas")?,
        baseGas: parse_u256(base_gas, "base_gas")?,
        gasPrice: parse_u256(gas_price, "gas_price")?,
        gasToken: *gas_token,
        refundReceiver: *refund_receiver,
        nonce: parse_u256(nonce, "nonce")?,
    };

    let hash = safe_tx_signing_hash(&safe_tx, chain_id, safe);
    Ok(to_hex_string(hash.as_slice()))
}

pub fn build_safe_transaction_request(
    signer: &Signer,
    args: &SafeTransactionArgs,
    config: &ContractConfig,
    metadata: Option<&str>,
) -> Result<TransactionRequest> {
    let safe_address = derive(&args.from_address, &config.safe_factory)?;
    let transaction = aggregate_transaction(&args.transactions, &config.safe_multisend)?;
    let safe_txn_gas = "0";
    let base_gas = "0";
    let gas_price = "0";
    let gas_token = ZERO_ADDRESS;
    let refund_receiver = ZERO_ADDRESS;

    let struct_hash = create_struct_hash(
        args.chain_id,
        &safe_address,
        &transaction.to,
        &transaction.value,
        &transaction.data,
        transaction.operation,
        safe_txn_gas,
        base_gas,
        gas_price,
        &gas_token,
        &refund_receiver,
        &args.nonce,
    )?;
    log::debug!("safe {} struct hash {}", safe_address, struct_hash);

    let sig = create_safe_signature(signer, &struct_hash)?;
    let packed_sig = split_and_pack_sig(&sig)?;

    let signature_params = SignatureParams::Safe {
        gas_price: gas_price.to_string(),
        operation: transaction.operation.as_u8().to_string(),
        safe_txn_gas: safe_txn_gas.to_string(),
        base_gas: base_gas.to_string(),
        gas_token: gas_token.to_string(),
        refund_receiver: refund_receiver.to_string(),
    };

    Ok(TransactionRequest {
        transaction_type: TransactionType::Safe,
        from_address: args.from_address.to_string(),
        to: transaction.to.to_string(),
        proxy: safe_address.to_string(),
        value: Some(transaction.value),
        data: transaction.data,
        nonce: Some(args.nonce.clone()),
        signature: packed_sig,
        signature_params,
        metadata: Some(metadata.unwrap_or_default().to_string()),
    })
}
