use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use crate::chain::interface::{ChainError, ChainSubmitter, ContractCall, TxHash};

/// Configuration for the cast-based submitter.
#[derive(Clone, Debug)]
pub struct CastSubmitterConfig {
    // Path to the `cast` executable
    pub cast_path: PathBuf,
    pub rpc_url: String,
    // Private key of the account used to send transactions
    pub private_key: String,
    /// Upper bound on the wait for the transaction to be mined.
    pub confirmation_timeout: Duration,
}

impl CastSubmitterConfig {
    pub fn new(cast_path: PathBuf, rpc_url: String, private_key: String) -> Self {
        CastSubmitterConfig {
            cast_path,
            rpc_url,
            private_key,
            confirmation_timeout: Duration::from_secs(300),
        }
    }
}

/// Submits transactions through foundry's `cast send`, which signs,
/// broadcasts and waits for the receipt before printing it.
#[derive(Debug)]
pub struct CastSubmitter {
    config: CastSubmitterConfig,
    gas_used_re: Regex,
}

impl CastSubmitter {
    pub fn new(config: CastSubmitterConfig) -> Self {
        // Receipt line looks like "gasUsed              21000"
        let gas_used_re = Regex::new(r"gasUsed\s+(\d+)").unwrap();
        CastSubmitter { config, gas_used_re }
    }

    fn parse_transaction_hash(stdout: &str) -> Result<TxHash, ChainError> {
        if let Some(line) = stdout
            .lines()
            .find(|line| line.trim_start().starts_with("transactionHash"))
        {
            if let Some(hash) = line.split_whitespace().last() {
                if hash.starts_with("0x") && hash.len() == 66 {
                    return Ok(hash.to_string());
                }
            }
        }
        Err(format!("failed to parse transaction hash from cast send output: {stdout}").into())
    }

    fn parse_gas_used(&self, stdout: &str) -> Result<u64, ChainError> {
        let captures = self
            .gas_used_re
            .captures(stdout)
            .ok_or_else(|| format!("no gasUsed in cast send output: {stdout}"))?;
        captures[1]
            .parse::<u64>()
            .map_err(|e| format!("failed to parse gasUsed value: {e}").into())
    }
}

#[async_trait]
impl ChainSubmitter for CastSubmitter {
    async fn submit_and_await(&self, call: ContractCall) -> Result<(TxHash, u64), ChainError> {
        let mut cmd = Command::new(&self.config.cast_path);
        cmd.arg("send")
            .arg(&call.contract_address)
            .arg(&call.function_signature)
            .args(&call.args)
            .arg("--private-key")
            .arg(&self.config.private_key)
            .arg("--rpc-url")
            .arg(&self.config.rpc_url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("executing command: {:?}", cmd);

        let output = tokio::time::timeout(self.config.confirmation_timeout, cmd.output())
            .await
            .map_err(|_| {
                format!(
                    "transaction not mined within {:?}",
                    self.config.confirmation_timeout
                )
            })?
            .map_err(|e| format!("failed to execute cast send: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(
                format!("cast send failed: status {}\nstderr: {}", output.status, stderr).into(),
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let tx_hash = Self::parse_transaction_hash(&stdout)?;
        let gas_used = self.parse_gas_used(&stdout)?;
        Ok((tx_hash, gas_used))
    }
}
