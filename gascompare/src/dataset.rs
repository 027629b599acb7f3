use crate::data_structures::{ComparativeObservation, MergedSeries, Operation, Protocol};

/// Label one merged series with its human-readable system and action names,
/// one row per element, in series order.
pub fn annotate(
    protocol: Protocol,
    operation: Operation,
    series: &MergedSeries,
) -> Vec<ComparativeObservation> {
    series
        .iter()
        .map(|&gas_used| ComparativeObservation {
            system: protocol.system_label(),
            action: operation.action_label(),
            gas_used,
        })
        .collect()
}

/// Concatenate every (protocol, operation) pair's observations into one
/// table. Groups stay contiguous and internally in source order; no global
/// ordering is imposed across groups.
pub fn build_table(pairs: &[(Protocol, Operation, MergedSeries)]) -> Vec<ComparativeObservation> {
    let mut table = Vec::with_capacity(pairs.iter().map(|(_, _, series)| series.len()).sum());
    for (protocol, operation, series) in pairs {
        table.extend(annotate(*protocol, *operation, series));
    }
    table
}
