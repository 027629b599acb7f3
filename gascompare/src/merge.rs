use crate::data_structures::{CostMapping, MergedSeries};
use crate::error::{PipelineError, Result};

/// Combine client-side and network-side cost mappings into the per-event
/// total series, in client-log order. Every client key must have a network
/// counterpart; a missing one is a data error, not a zero.
pub fn merge(client: &CostMapping, network: &CostMapping) -> Result<MergedSeries> {
    let mut merged = Vec::with_capacity(client.len());
    for (key, client_cost) in client {
        let network_cost = network
            .get(key)
            .ok_or_else(|| PipelineError::UnmatchedEvent { key: key.clone() })?;
        merged.push(client_cost + network_cost);
    }
    Ok(merged)
}

/// Network side for an operation that performs no network-side chain writes:
/// every client event gets an explicit zero-cost counterpart. Only reachable
/// through [`crate::config::NetworkSide::SynthesizedZero`]; a missing log
/// never takes this path.
pub fn synthesize_zero_network(client: &CostMapping) -> CostMapping {
    client.keys().map(|key| (key.clone(), 0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, u64)]) -> CostMapping {
        entries
            .iter()
            .map(|(key, gas)| (key.to_string(), *gas))
            .collect()
    }

    #[test]
    fn test_merge_sums_in_client_order() {
        let client = mapping(&[("A|1", 100), ("B|2", 200), ("A|3", 50)]);
        // network mapping in a different order on purpose
        let network = mapping(&[("A|3", 5), ("A|1", 10), ("B|2", 20)]);

        let merged = merge(&client, &network).unwrap();
        assert_eq!(merged.len(), client.len());
        assert_eq!(merged, vec![110, 220, 55]);
    }

    #[test]
    fn test_unmatched_client_key_is_fatal() {
        let client = mapping(&[("A|1", 100), ("A|2", 100)]);
        let network = mapping(&[("A|1", 10)]);

        let err = merge(&client, &network).unwrap_err();
        match err {
            PipelineError::UnmatchedEvent { key } => assert_eq!(key, "A|2"),
            other => panic!("expected UnmatchedEvent, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_network_keys_are_ignored() {
        let client = mapping(&[("A|1", 100)]);
        let network = mapping(&[("A|1", 10), ("Z|9", 999)]);
        assert_eq!(merge(&client, &network).unwrap(), vec![110]);
    }

    #[test]
    fn test_synthesized_network_side_is_all_zero() {
        let client = mapping(&[("A|1", 100), ("B|2", 200)]);
        let network = synthesize_zero_network(&client);

        assert_eq!(network.len(), 2);
        assert!(network.values().all(|&gas| gas == 0));
        assert_eq!(merge(&client, &network).unwrap(), vec![100, 200]);
    }
}
