use serde::{Deserialize, Serialize};

/// Body of `POST /blockchain/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyRequest {
    pub tx_hash: String,
}
