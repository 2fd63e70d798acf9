use alloy::sol;
use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256};
use dotenv::dotenv;
use relay_tx_builder::{BuilderConfig, OperationType, RelayClient, RelayerTxType, SafeTransaction};
use std::env;
use uuid::Uuid;

sol! {
    function approve(address spender, uint256 amount) returns (bool);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let relayer_url =
        env::var("RELAYER_URL").unwrap_or_else(|_| "https://relayer-v2.polymarket.com".to_string());
    let pk = env::var("PK")?;

    let builder_config = BuilderConfig::new(
        Uuid::parse_str(&env::var("BUILDER_API_KEY")?)?,
        env::var("BUILDER_SECRET")?,
        env::var("BUILDER_PASS_PHRASE")?,
    );

    // Proxy wallets only exist on Polygon mainnet.
    let mut client = RelayClient::new(&relayer_url, 137, Some(&pk), Some(builder_config))?
        .with_tx_type(RelayerTxType::Proxy);
    if let Ok(rpc_url) = env::var("RPC_URL") {
        client = client.with_rpc_url(&rpc_url);
    }
    println!("Proxy wallet: {}", client.get_expected_proxy()?);

    let usdc: Address = "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174".parse()?;
    let exchange: Address = "0x4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E".parse()?;
    let data = approveCall {
        spender: exchange,
        amount: U256::MAX,
    }
    .abi_encode();

    let txn = SafeTransaction {
        to: usdc,
        operation: OperationType::Call,
        data: format!("0x{}", hex::encode(data)),
        value: "0".to_string(),
    };

    let resp = client.execute(&[txn], Some("approve USDC on exchange"))?;
    println!("Execute response: {:?}", resp);

    let awaited_txn = resp.wait()?;
    println!("Awaited transaction: {:?}", awaited_txn);

    Ok(())
}
