pub const GET_NONCE: &str = "/nonce";
pub const GET_RELAY_PAYLOAD: &str = "/relay-payload";
pub const GET_TRANSACTION: &str = "/transaction";
pub const GET_TRANSACTIONS: &str = "/transactions";
pub const GET_DEPLOYED: &str = "/deployed";
pub const SUBMIT_TRANSACTION: &str = "/submit";
