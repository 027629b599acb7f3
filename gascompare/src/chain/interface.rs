use async_trait::async_trait;
use std::error::Error;

// Generic error type for chain submission
pub type ChainError = Box<dyn Error + Send + Sync>;

// Transaction hash as reported by the node
// Using String for simplicity, could be a fixed-size hash type
pub type TxHash = String;

/// One contract invocation to submit on chain.
#[derive(Clone, Debug)]
pub struct ContractCall {
    pub contract_address: String,
    /// Solidity-style signature, e.g. "upload_file(address,uint256,string,string,uint256,uint256)"
    pub function_signature: String,
    pub args: Vec<String>,
}

/// Trait for submitting a transaction and blocking until it is mined.
/// Signing, nonce management and broadcast live behind this seam, which
/// allows mocking in tests and swapping the submission backend.
#[async_trait]
pub trait ChainSubmitter: Send + Sync {
    /// Submits the call and waits (bounded) for its receipt, returning the
    /// transaction hash and the gas actually consumed. The gas value is what
    /// ends up as `gas_used` in the metric logs.
    async fn submit_and_await(&self, call: ContractCall) -> Result<(TxHash, u64), ChainError>;
}
