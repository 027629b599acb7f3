use crate::config::{DataConfig, NetworkSide};
use crate::data_structures::{CostMapping, MergedSeries, Operation, Protocol};
use crate::error::Result;
use crate::{loader, merge};

/// Load the client-side and network-side cost mappings for one
/// (protocol, operation) pair, resolving the schema table and the
/// synthesized-zero override for protocols with no network-side writes.
pub fn load_cost_pair(
    config: &DataConfig,
    protocol: Protocol,
    operation: Operation,
) -> Result<(CostMapping, CostMapping)> {
    let dataset = config.dataset(protocol, operation);

    let client = loader::load_cost_mapping(
        &config.log_path(&dataset.client),
        &dataset.client,
        config.duplicate_policy,
    )?;

    let network = match dataset.network {
        NetworkSide::Log(schema) => loader::load_cost_mapping(
            &config.log_path(&schema),
            &schema,
            config.duplicate_policy,
        )?,
        NetworkSide::SynthesizedZero => {
            log::info!(
                "{} {}: network side performs no chain writes, synthesizing zero costs",
                protocol.slug(),
                operation.slug()
            );
            merge::synthesize_zero_network(&client)
        }
    };

    Ok((client, network))
}

/// Per-event total cost series for one (protocol, operation) pair.
pub fn load_merged_series(
    config: &DataConfig,
    protocol: Protocol,
    operation: Operation,
) -> Result<MergedSeries> {
    let (client, network) = load_cost_pair(config, protocol, operation)?;
    merge::merge(&client, &network)
}

/// Percentage split `[client, network]` of the total gas spent on one
/// (protocol, operation) pair. `[0.0, 0.0]` when nothing was spent at all.
pub fn pie_percentages(client: &CostMapping, network: &CostMapping) -> [f64; 2] {
    let client_sum: u64 = client.values().sum();
    let network_sum: u64 = network.values().sum();
    let total = (client_sum + network_sum) as f64;
    if total == 0.0 {
        return [0.0, 0.0];
    }
    [
        client_sum as f64 * 100.0 / total,
        network_sum as f64 * 100.0 / total,
    ]
}
