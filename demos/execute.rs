use alloy::sol;
use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256};
use dotenv::dotenv;
use relay_tx_builder::{BuilderConfig, OperationType, RelayClient, SafeTransaction};
use std::env;
use uuid::Uuid;

sol! {
    function approve(address spender, uint256 amount) returns (bool);
}

fn create_usdc_approve_txn(token: Address, spender: Address) -> SafeTransaction {
    let data = approveCall {
        spender,
        amount: U256::MAX,
    }
    .abi_encode();

    SafeTransaction {
        to: token,
        operation: OperationType::Call,
        data: format!("0x{}", hex::encode(data)),
        value: "0".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let relayer_url =
        env::var("RELAYER_URL").unwrap_or_else(|_| "https://relayer-v2.polymarket.com".to_string());
    let chain_id: u64 = env::var("CHAIN_ID")
        .unwrap_or_else(|_| "137".to_string())
        .parse()?;
    let pk = env::var("PK")?;

    let builder_config = BuilderConfig::new(
        Uuid::parse_str(&env::var("BUILDER_API_KEY")?)?,
        env::var("BUILDER_SECRET")?,
        env::var("BUILDER_PASS_PHRASE")?,
    );

    let client = RelayClient::new(&relayer_url, chain_id, Some(&pk), Some(builder_config))?;

    let usdc: Address = "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174".parse()?;
    let ctf: Address = "0x4d97dcd97ec945f40cf65f87097ace5ea0476045".parse()?;
    let txn = create_usdc_approve_txn(usdc, ctf);

    let resp = client.execute(&[txn.clone(), txn], Some("approve USDC on CTF"))?;
    println!("Execute response: {:?}", resp);

    let awaited_txn = resp.wait()?;
    println!("Awaited transaction: {:?}", awaited_txn);

    Ok(())
}
