use rand::Rng;
use serde_json::json;
use tokio::sync::mpsc;

use crate::chain::interface::{ChainError, ChainSubmitter, ContractCall};
use crate::chain::recorder::RecordedMetric;
use crate::config::MetricKind;

const DEFAULT_FILE_INFO: &str = "Metadata";
const DEFAULT_FILE_ADDRESS: &str = "youtu.be/dQw4w9WgXcQ";

/// Client-side upload instrumentation: submits the upload transaction for a
/// fresh file id and records the gas it consumed as one client upload metric.
pub struct FileUploader<S: ChainSubmitter> {
    submitter: S,
    contract_address: String,
    actor: String,
    metrics: mpsc::Sender<RecordedMetric>,
}

impl<S: ChainSubmitter> FileUploader<S> {
    pub fn new(
        submitter: S,
        contract_address: String,
        actor: String,
        metrics: mpsc::Sender<RecordedMetric>,
    ) -> Self {
        FileUploader {
            submitter,
            contract_address,
            actor,
            metrics,
        }
    }

    pub fn address(&self) -> &str {
        &self.actor
    }

    /// Uploads one file under a random id and returns that id.
    pub async fn upload_file(&self) -> Result<u64, ChainError> {
        let file_id: u64 = rand::thread_rng().gen();

        log::info!("user {:?} uploading file with id: {file_id}", self.address());

        let call = ContractCall {
            contract_address: self.contract_address.clone(),
            function_signature:
                "upload_file(address,uint256,string,string,uint256,uint256)".to_string(),
            args: vec![
                self.actor.clone(),
                file_id.to_string(),
                DEFAULT_FILE_INFO.to_string(),
                DEFAULT_FILE_ADDRESS.to_string(),
                // owner and DPCN accessible symmetric keys; zero for this
                // protocol, the DPCN never needs chain-side key material
                "0".to_string(),
                "0".to_string(),
            ],
        };

        let (tx_hash, gas_used) = self.submitter.submit_and_await(call).await?;

        log::info!(
            "user {:?} finished uploading file {file_id} in tx {tx_hash} | gas used: {gas_used}",
            self.address()
        );

        self.metrics
            .send(RecordedMetric {
                kind: MetricKind::A3ClientFileUpload,
                record: json!({
                    "user": self.actor,
                    "file_id": file_id,
                    "gas_used": gas_used,
                }),
            })
            .await
            .map_err(|e| format!("metric channel closed: {e}"))?;

        Ok(file_id)
    }
}
