use dotenv::dotenv;
use relay_tx_builder::{BuilderConfig, RelayClient};
use std::env;
use uuid::Uuid;

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
    println!("Expected safe: {}", client.get_expected_safe()?);

    let resp = client.deploy()?;
    println!("Deploy response: {:?}", resp);

    let awaited_txn = resp.wait()?;
    println!("Awaited transaction: {:?}", awaited_txn);

    Ok(())
}
