//! Runs the aggregation pipeline over the persisted gas logs and writes the
//! comparison charts. A pair that fails structurally is reported and
//! skipped; the remaining pairs still render.

mod charts;

use std::fs;
use std::process::ExitCode;

use gascompare::config::DataConfig;
use gascompare::data_structures::{MergedSeries, Operation, Protocol};
use gascompare::{dataset, normalize, pipeline, reduce};

const PAIRS: [(Protocol, Operation); 4] = [
    (Protocol::Algo2, Operation::Upload),
    (Protocol::Algo3, Operation::Upload),
    (Protocol::Algo2, Operation::Share),
    (Protocol::Algo3, Operation::Share),
];

fn main() -> ExitCode {
    env_logger::init();

    let config = DataConfig::default();
    if let Err(e) = fs::create_dir_all(&config.figures_dir) {
        log::error!("cannot create {}: {e}", config.figures_dir.display());
        return ExitCode::FAILURE;
    }

    let mut merged_pairs: Vec<(Protocol, Operation, MergedSeries)> = Vec::new();
    let mut failed = 0usize;

    for (protocol, operation) in PAIRS {
        match render_pair(&config, protocol, operation) {
            Ok(series) => merged_pairs.push((protocol, operation, series)),
            Err(e) => {
                log::error!("skipping {} {}: {e}", protocol.slug(), operation.slug());
                failed += 1;
            }
        }
    }

    if merged_pairs.is_empty() {
        log::error!("no (protocol, operation) pair produced data, nothing to compare");
        return ExitCode::FAILURE;
    }

    failed += render_comparisons(&config, &merged_pairs);

    if failed > 0 {
        log::warn!("finished with {failed} failed computation(s)");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Loads one pair, writes its cost-share pie and returns its merged series.
fn render_pair(
    config: &DataConfig,
    protocol: Protocol,
    operation: Operation,
) -> Result<MergedSeries, gascompare::PipelineError> {
    let (client, network) = pipeline::load_cost_pair(config, protocol, operation)?;
    let percentages = pipeline::pie_percentages(&client, &network);
    log::info!(
        "{} {}: {} events, client/DPCN split {:.1}% / {:.1}%",
        protocol.slug(),
        operation.slug(),
        client.len(),
        percentages[0],
        percentages[1]
    );

    let pie = charts::cost_share_pie(protocol, operation, percentages);
    let file = format!(
        "gas_usage_distribution_pie_{}_{}.html",
        protocol.slug(),
        operation.slug()
    );
    pie.write_html(config.figures_dir.join(file));

    // per-pair trend averaged over the interleaved passes; skipped (for this
    // pair only) when the log is too short to stripe
    let client_series: Vec<u64> = client.values().copied().collect();
    let network_series: Vec<u64> = network.values().copied().collect();
    match (
        reduce::chunked_means(&client_series, config.chunks),
        reduce::chunked_means(&network_series, config.chunks),
    ) {
        (Ok(client_means), Ok(network_means)) => {
            let trend =
                charts::chunked_pair_trend(protocol, operation, client_means, network_means);
            let file = format!(
                "gas_usage_trend_{}_{}.html",
                protocol.slug(),
                operation.slug()
            );
            trend.write_html(config.figures_dir.join(file));
        }
        (Err(e), _) | (_, Err(e)) => {
            log::warn!(
                "no chunked trend for {} {}: {e}",
                protocol.slug(),
                operation.slug()
            );
        }
    }

    gascompare::merge::merge(&client, &network)
}

/// Builds the cross-pair comparison artifacts: raw distribution boxes,
/// binned trend lines, normalized distribution and the normalized table
/// dump. Returns the number of computations that failed. The boxes and
/// trends do not depend on normalization, so a partition that cannot be
/// normalized never suppresses them — nor its sibling partitions.
fn render_comparisons(
    config: &DataConfig,
    merged_pairs: &[(Protocol, Operation, MergedSeries)],
) -> usize {
    let mut failed = 0;

    charts::raw_distribution_boxes(merged_pairs)
        .write_html(config.figures_dir.join("raw_gas_usage_boxes.html"));

    let mut binned = Vec::with_capacity(merged_pairs.len());
    for (protocol, operation, series) in merged_pairs {
        match reduce::bin_means(series, config.display_bins) {
            Ok(bins) => binned.push((*protocol, *operation, bins)),
            Err(e) => {
                log::warn!(
                    "no binned trend for {} {}: {e}",
                    protocol.slug(),
                    operation.slug()
                );
                failed += 1;
            }
        }
    }
    charts::binned_trend_lines(&binned)
        .write_html(config.figures_dir.join("systems_gas_usage_vs_requests_no.html"));

    let table = dataset::build_table(merged_pairs);
    let normalized = normalize::normalize(&table);
    for skipped in &normalized.skipped {
        log::error!(
            "no normalized distribution for {} {}: {}",
            skipped.system,
            skipped.action,
            skipped.error
        );
        failed += 1;
    }

    if normalized.rows.is_empty() {
        log::warn!("normalized table is empty, skipping the distribution chart");
        return failed;
    }

    // the exact dataset behind the distribution chart, for reproducibility
    match serde_json::to_string_pretty(&normalized.rows) {
        Ok(body) => {
            if let Err(e) = fs::write(config.figures_dir.join("normalized_gas_table.json"), body) {
                log::warn!("cannot write normalized table: {e}");
            }
        }
        Err(e) => log::warn!("cannot serialize normalized table: {e}"),
    }

    charts::normalized_distribution(&normalized.rows)
        .write_html(config.figures_dir.join("violin_gas_usage_distribution.html"));

    failed
}
