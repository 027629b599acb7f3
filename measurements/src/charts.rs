//! Chart assembly. Everything here is presentation: the numbers fed into
//! each trace come straight out of the pipeline and are reproducible from
//! the logs; only their visual encoding lives in this module.

use gascompare::data_structures::{MergedSeries, NormalizedObservation, Operation, Protocol};
use plotly::common::Mode;
use plotly::layout::{Axis, BoxMode, Layout};
use plotly::{BoxPlot, Pie, Plot, Scatter};

/// Party names for the client slice of a pie, per operation.
fn client_party_label(operation: Operation) -> &'static str {
    match operation {
        Operation::Upload => "File Owner",
        Operation::Share => "Client",
    }
}

/// Client vs DPCN share of the total gas for one (protocol, operation).
pub fn cost_share_pie(
    protocol: Protocol,
    operation: Operation,
    percentages: [f64; 2],
) -> Plot {
    let title = match (protocol, operation) {
        (Protocol::Algo2, Operation::Upload) => "System 2 - File Upload",
        (Protocol::Algo2, Operation::Share) => "System 2 - File Share",
        (Protocol::Algo3, Operation::Upload) => "System 3 - File Upload",
        (Protocol::Algo3, Operation::Share) => "System 3 - File Share",
    };

    let labels = vec![client_party_label(operation), "DPCN"];
    let mut plot = Plot::new();
    plot.add_trace(Pie::new(percentages.to_vec()).labels(labels));
    plot.set_layout(Layout::new().title(title));
    plot
}

/// Normalized gas distribution by action, one grouped box per system. The
/// underlying table is the z-scored comparison dataset.
pub fn normalized_distribution(rows: &[NormalizedObservation]) -> Plot {
    let mut plot = Plot::new();

    let mut systems: Vec<&str> = Vec::new();
    for row in rows {
        if !systems.contains(&row.system) {
            systems.push(row.system);
        }
    }

    for system in systems {
        let (actions, values): (Vec<String>, Vec<f64>) = rows
            .iter()
            .filter(|row| row.system == system)
            .map(|row| (row.action.to_string(), row.normalized_gas_used))
            .unzip();
        plot.add_trace(BoxPlot::new_xy(actions, values).name(system));
    }

    plot.set_layout(
        Layout::new()
            .title("Gas used normalized per action and system")
            .y_axis(Axis::new().title("Normalized Gas Used"))
            .x_axis(Axis::new().title("Action"))
            .box_mode(BoxMode::Group),
    );
    plot
}

/// Binned trend lines, systems side by side: the two series of each system
/// share a subplot so the magnitude gap between systems does not flatten
/// the cheaper one. A pair whose series could not be binned gets no trace
/// at all — an absent line, not a flat zero one.
pub fn binned_trend_lines(binned: &[(Protocol, Operation, Vec<f64>)]) -> Plot {
    let mut plot = Plot::new();

    for (protocol, operation, series) in binned {
        let (x_axis, y_axis) = match protocol {
            Protocol::Algo2 => ("x", "y"),
            Protocol::Algo3 => ("x2", "y2"),
        };
        let name = match (*protocol, *operation) {
            (Protocol::Algo2, Operation::Upload) => "System 2 Upload",
            (Protocol::Algo2, Operation::Share) => "System 2 Share",
            (Protocol::Algo3, Operation::Upload) => "System 3 Upload",
            (Protocol::Algo3, Operation::Share) => "System 3 Share",
        };
        let xs: Vec<usize> = (0..series.len()).collect();
        plot.add_trace(
            Scatter::new(xs, series.clone())
                .name(name)
                .mode(Mode::LinesMarkers)
                .x_axis(x_axis)
                .y_axis(y_axis),
        );
    }

    let layout = Layout::new()
        .title("Gas used per binned request index")
        .height(500)
        .width(1200)
        .show_legend(true)
        .x_axis(Axis::new().title("Binned Requests").domain(&[0.0, 0.48]))
        .y_axis(Axis::new().title("Gas Used").domain(&[0.0, 1.0]))
        .x_axis2(Axis::new().title("Binned Requests").domain(&[0.52, 1.0]))
        .y_axis2(Axis::new().domain(&[0.0, 1.0]));
    plot.set_layout(layout);
    plot
}

/// Client vs DPCN trend for one (protocol, operation), averaged across the
/// interleaved experimental passes.
pub fn chunked_pair_trend(
    protocol: Protocol,
    operation: Operation,
    client_means: Vec<f64>,
    network_means: Vec<f64>,
) -> Plot {
    let xs = |series: &[f64]| -> Vec<usize> { (1..=series.len()).collect() };

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(xs(&client_means), client_means.clone())
            .name(&format!(
                "Gas Used by {} During {}",
                client_party_label(operation),
                operation.action_label()
            ))
            .mode(Mode::LinesMarkers),
    );
    plot.add_trace(
        Scatter::new(xs(&network_means), network_means)
            .name(&format!(
                "Gas Used by DPCN During {}",
                operation.action_label()
            ))
            .mode(Mode::LinesMarkers),
    );

    let title = match protocol {
        Protocol::Algo2 => "System 2 - Gas per chunked request",
        Protocol::Algo3 => "System 3 - Gas per chunked request",
    };
    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("Chunked Request Index"))
            .y_axis(Axis::new().title("Gas Used")),
    );
    plot
}

/// Raw per-event cost distributions, one box per (system, operation).
pub fn raw_distribution_boxes(pairs: &[(Protocol, Operation, MergedSeries)]) -> Plot {
    let mut plot = Plot::new();
    for (protocol, operation, series) in pairs {
        let values: Vec<f64> = series.iter().map(|&gas| gas as f64).collect();
        plot.add_trace(BoxPlot::new(values).name(&format!(
            "{} {}",
            protocol.system_label(),
            operation.action_label()
        )));
    }
    plot.set_layout(
        Layout::new()
            .title("Raw gas usage distribution")
            .y_axis(Axis::new().title("Gas Used")),
    );
    plot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_chart_omits_missing_pairs() {
        // only the System 2 pairs binned successfully
        let binned = vec![
            (Protocol::Algo2, Operation::Upload, vec![1.0, 2.0]),
            (Protocol::Algo2, Operation::Share, vec![3.0, 4.0]),
        ];

        let html = binned_trend_lines(&binned).to_html();
        assert!(html.contains("System 2 Upload"));
        assert!(html.contains("System 2 Share"));
        // a dropped pair has no trace, rather than a flat zero line
        assert!(!html.contains("System 3 Upload"));
        assert!(!html.contains("System 3 Share"));
    }

    #[test]
    fn test_trend_traces_land_on_their_system_subplot() {
        let binned = vec![
            (Protocol::Algo2, Operation::Upload, vec![1.0]),
            (Protocol::Algo3, Operation::Upload, vec![2.0]),
        ];

        let html = binned_trend_lines(&binned).to_html();
        // System 3 draws on the second subplot's axes
        assert!(html.contains("x2"));
        assert!(html.contains("y2"));
    }
}
