use crate::errors::{RelayerClientException, Result};
use alloy_primitives::{address, Address};

const SAFE_FACTORY: Address = address!("0xaacFeEa03eb1561C4e67d661e40682Bd20E3541b");
const SAFE_MULTISEND: Address = address!("0xA238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761");
const POLYGON_PROXY_FACTORY: Address = address!("0xaB45c5A4B0c941a2F231C04C3f49182e1A254052");
const POLYGON_RELAY_HUB: Address = address!("0xD216153c06E857cD7f72665E0aF1d7D82172F494");

/// Static contract addresses for one chain. Construct once and pass by
/// reference into the request builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub safe_factory: Address,
    pub safe_multisend: Address,
    pub proxy_factory: Option<Address>,
    pub relay_hub: Option<Address>,
}

impl ContractConfig {
    pub fn for_chain(chain_id: u64) -> Result<Self> {
        match chain_id {
            137 => Ok(ContractConfig {
                safe_factory: SAFE_FACTORY,
                safe_multisend: SAFE_MULTISEND,
                proxy_factory: Some(POLYGON_PROXY_FACTORY),
                relay_hub: Some(POLYGON_RELAY_HUB),
            }),
            80002 => Ok(ContractConfig {
                safe_factory: SAFE_FACTORY,
                safe_multisend: SAFE_MULTISEND,
                proxy_factory: None,
                relay_hub: None,
            }),
            _ => Err(RelayerClientException::UnsupportedChain(chain_id)),
        }
    }

    /// Returns `(proxy_factory, relay_hub)` or `UnsupportedFeature` when the
    /// chain has no proxy wallet support.
    pub fn proxy_contracts(&self) -> Result<(Address, Address)> {
        match (self.proxy_factory, self.relay_hub) {
            (Some(factory), Some(hub)) => Ok((factory, hub)),
            _ => Err(RelayerClientException::UnsupportedFeature(
                "proxy_factory and relay_hub are required for PROXY transaction type".to_string(),
            )),
        }
    }
}

pub fn get_contract_config(chain_id: u64) -> Result<ContractConfig> {
    ContractConfig::for_chain(chain_id)
}
