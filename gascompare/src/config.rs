use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data_structures::{Operation, Origin, Protocol};

/// The seven persisted metric logs. The (algo_3, upload) network side has no
/// log of its own: that protocol performs no network-side chain writes for
/// uploads, see [`NetworkSide::SynthesizedZero`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    A2ClientFileUpload,
    A2ClientShareRequest,
    A2DpcnServicedRequests,
    A2DpcnShareRequests,
    A3ClientFileUpload,
    A3ClientShareRequest,
    A3DpcnShareRequests,
}

impl MetricKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            MetricKind::A2ClientFileUpload => "a2_client_file_upload.json",
            MetricKind::A2ClientShareRequest => "a2_client_share_request.json",
            MetricKind::A2DpcnServicedRequests => "a2_dpcn_serviced_requests.json",
            MetricKind::A2DpcnShareRequests => "a2_dpcn_share_requests.json",
            MetricKind::A3ClientFileUpload => "a3_client_file_upload.json",
            MetricKind::A3ClientShareRequest => "a3_client_share_request.json",
            MetricKind::A3DpcnShareRequests => "a3_dpcn_share_requests.json",
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            MetricKind::A2ClientFileUpload
            | MetricKind::A2ClientShareRequest
            | MetricKind::A2DpcnServicedRequests
            | MetricKind::A2DpcnShareRequests => Protocol::Algo2,
            MetricKind::A3ClientFileUpload
            | MetricKind::A3ClientShareRequest
            | MetricKind::A3DpcnShareRequests => Protocol::Algo3,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            MetricKind::A2ClientFileUpload
            | MetricKind::A2DpcnServicedRequests
            | MetricKind::A3ClientFileUpload => Operation::Upload,
            MetricKind::A2ClientShareRequest
            | MetricKind::A2DpcnShareRequests
            | MetricKind::A3ClientShareRequest
            | MetricKind::A3DpcnShareRequests => Operation::Share,
        }
    }

    pub fn origin(&self) -> Origin {
        match self {
            MetricKind::A2ClientFileUpload
            | MetricKind::A2ClientShareRequest
            | MetricKind::A3ClientFileUpload
            | MetricKind::A3ClientShareRequest => Origin::Client,
            MetricKind::A2DpcnServicedRequests
            | MetricKind::A2DpcnShareRequests
            | MetricKind::A3DpcnShareRequests => Origin::Network,
        }
    }
}

/// Identifier field declaration for one log schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdField {
    /// Integer id used directly as the local event id.
    Numeric(&'static str),
    /// String request id of shape "X|Y"; the comparable part is the segment
    /// after the delimiter.
    CompositeRequest(&'static str),
}

/// Field layout of one persisted log. The log format is not self-describing,
/// so every (protocol, operation, origin) combination declares its actor and
/// identifier field names here.
#[derive(Clone, Copy, Debug)]
pub struct LogSchema {
    pub kind: MetricKind,
    pub actor_field: &'static str,
    pub id_field: IdField,
}

/// Where the network-side costs for a (protocol, operation) come from.
#[derive(Clone, Copy, Debug)]
pub enum NetworkSide {
    /// Costs recorded by the DPCN in its own log.
    Log(LogSchema),
    /// The protocol performs no network-side chain writes for this
    /// operation. Costs are synthesized as zero over the client mapping's
    /// keys; a missing log file is never silently treated this way.
    SynthesizedZero,
}

/// Client schema plus network side for one (protocol, operation) pair.
#[derive(Clone, Copy, Debug)]
pub struct DatasetConfig {
    pub client: LogSchema,
    pub network: NetworkSide,
}

/// Duplicate-join-key handling while loading a log. Warn keeps the first
/// observation and logs the collision; the original data can never be
/// overwritten silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicatePolicy {
    Fatal,
    Warn,
}

/// Locations of the persisted logs and chart outputs, plus reduction
/// defaults. Passed into the loader explicitly instead of living in process
/// globals.
#[derive(Clone, Debug)]
pub struct DataConfig {
    pub algo2_client_dir: PathBuf,
    pub algo3_client_dir: PathBuf,
    pub dpcn_dir: PathBuf,
    pub figures_dir: PathBuf,
    /// Interleaved experimental passes averaged by the trend reduction.
    pub chunks: usize,
    /// Bin count for compressing long series for display.
    pub display_bins: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            algo2_client_dir: PathBuf::from("./data/algo2_client"),
            algo3_client_dir: PathBuf::from("./data/algo3_client"),
            dpcn_dir: PathBuf::from("./data/dpcn"),
            figures_dir: PathBuf::from("./shared/figures"),
            chunks: 5,
            display_bins: 100,
            duplicate_policy: DuplicatePolicy::Fatal,
        }
    }
}

impl DataConfig {
    /// Resolve the schemas for one (protocol, operation) pair.
    pub fn dataset(&self, protocol: Protocol, operation: Operation) -> DatasetConfig {
        match (protocol, operation) {
            (Protocol::Algo2, Operation::Upload) => DatasetConfig {
                client: LogSchema {
                    kind: MetricKind::A2ClientFileUpload,
                    actor_field: "user",
                    id_field: IdField::Numeric("request_id"),
                },
                network: NetworkSide::Log(LogSchema {
                    kind: MetricKind::A2DpcnServicedRequests,
                    actor_field: "user",
                    id_field: IdField::Numeric("request_id"),
                }),
            },
            (Protocol::Algo3, Operation::Upload) => DatasetConfig {
                client: LogSchema {
                    kind: MetricKind::A3ClientFileUpload,
                    actor_field: "user",
                    id_field: IdField::Numeric("file_id"),
                },
                network: NetworkSide::SynthesizedZero,
            },
            (Protocol::Algo2, Operation::Share) => DatasetConfig {
                client: LogSchema {
                    kind: MetricKind::A2ClientShareRequest,
                    actor_field: "user",
                    id_field: IdField::CompositeRequest("request_id"),
                },
                network: NetworkSide::Log(LogSchema {
                    kind: MetricKind::A2DpcnShareRequests,
                    actor_field: "client",
                    id_field: IdField::Numeric("file_no"),
                }),
            },
            (Protocol::Algo3, Operation::Share) => DatasetConfig {
                client: LogSchema {
                    kind: MetricKind::A3ClientShareRequest,
                    actor_field: "user",
                    id_field: IdField::CompositeRequest("request_id"),
                },
                network: NetworkSide::Log(LogSchema {
                    kind: MetricKind::A3DpcnShareRequests,
                    actor_field: "client",
                    id_field: IdField::Numeric("file_no"),
                }),
            },
        }
    }

    /// Full path of the log a schema reads from.
    pub fn log_path(&self, schema: &LogSchema) -> PathBuf {
        let dir = match (schema.kind.origin(), schema.kind.protocol()) {
            (Origin::Network, _) => &self.dpcn_dir,
            (Origin::Client, Protocol::Algo2) => &self.algo2_client_dir,
            (Origin::Client, Protocol::Algo3) => &self.algo3_client_dir,
        };
        dir.join(schema.kind.file_name())
    }
}
