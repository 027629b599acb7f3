// End-to-end runs of the aggregation pipeline over real files on disk.

use std::fs;
use std::path::Path;

use gascompare::config::{DataConfig, DuplicatePolicy};
use gascompare::data_structures::{Operation, Protocol};
use gascompare::error::PipelineError;
use gascompare::{dataset, normalize, pipeline, reduce};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> DataConfig {
    let root = dir.path();
    DataConfig {
        algo2_client_dir: root.join("algo2_client"),
        algo3_client_dir: root.join("algo3_client"),
        dpcn_dir: root.join("dpcn"),
        figures_dir: root.join("figures"),
        ..DataConfig::default()
    }
}

fn write_log(dir: &Path, file_name: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(file_name), body).unwrap();
}

#[test]
fn single_upload_with_synthesized_network_side() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write_log(
        &config.algo3_client_dir,
        "a3_client_file_upload.json",
        r#"[{"user": "A", "file_id": 1, "gas_used": 100}]"#,
    );

    let (client, network) =
        pipeline::load_cost_pair(&config, Protocol::Algo3, Operation::Upload).unwrap();
    assert_eq!(client.len(), 1);
    assert_eq!(network["A|1"], 0);

    let merged =
        pipeline::load_merged_series(&config, Protocol::Algo3, Operation::Upload).unwrap();
    assert_eq!(merged, vec![100]);

    assert_eq!(pipeline::pie_percentages(&client, &network), [100.0, 0.0]);
}

#[test]
fn share_logs_join_on_the_composite_key() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write_log(
        &config.algo2_client_dir,
        "a2_client_share_request.json",
        r#"[{"user": "A", "request_id": "r|7", "gas_used": 50}]"#,
    );
    write_log(
        &config.dpcn_dir,
        "a2_dpcn_share_requests.json",
        r#"[{"client": "A", "file_no": 7, "gas_used": 30}]"#,
    );

    let (client, network) =
        pipeline::load_cost_pair(&config, Protocol::Algo2, Operation::Share).unwrap();
    assert_eq!(client.keys().next().map(String::as_str), Some("A|7"));
    assert_eq!(network.keys().next().map(String::as_str), Some("A|7"));

    let merged = pipeline::load_merged_series(&config, Protocol::Algo2, Operation::Share).unwrap();
    assert_eq!(merged, vec![80]);
}

#[test]
fn unmatched_network_side_aborts_the_pair() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write_log(
        &config.algo2_client_dir,
        "a2_client_share_request.json",
        r#"[
            {"user": "A", "request_id": "r|7", "gas_used": 50},
            {"user": "A", "request_id": "r|8", "gas_used": 55}
        ]"#,
    );
    write_log(
        &config.dpcn_dir,
        "a2_dpcn_share_requests.json",
        r#"[{"client": "A", "file_no": 7, "gas_used": 30}]"#,
    );

    let err =
        pipeline::load_merged_series(&config, Protocol::Algo2, Operation::Share).unwrap_err();
    match err {
        PipelineError::UnmatchedEvent { key } => assert_eq!(key, "A|8"),
        other => panic!("expected UnmatchedEvent, got {other:?}"),
    }
}

#[test]
fn missing_network_log_is_an_error_not_a_zero() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    // client log exists, DPCN log does not; only (algo_3, upload) may
    // synthesize zeros, every other pair must fail loudly
    write_log(
        &config.algo2_client_dir,
        "a2_client_file_upload.json",
        r#"[{"user": "A", "request_id": 1, "gas_used": 100}]"#,
    );

    let err =
        pipeline::load_merged_series(&config, Protocol::Algo2, Operation::Upload).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }));
}

#[test]
fn full_comparison_table_across_pairs() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    // algo_2: both operations carry a DPCN side
    write_log(
        &config.algo2_client_dir,
        "a2_client_file_upload.json",
        r#"[
            {"user": "A", "request_id": 1, "gas_used": 1000},
            {"user": "A", "request_id": 2, "gas_used": 1400}
        ]"#,
    );
    write_log(
        &config.dpcn_dir,
        "a2_dpcn_serviced_requests.json",
        r#"[
            {"user": "A", "request_id": 1, "gas_used": 200},
            {"user": "A", "request_id": 2, "gas_used": 100}
        ]"#,
    );
    write_log(
        &config.algo2_client_dir,
        "a2_client_share_request.json",
        r#"[
            {"user": "A", "request_id": "r|1", "gas_used": 500},
            {"user": "B", "request_id": "s|2", "gas_used": 700}
        ]"#,
    );
    write_log(
        &config.dpcn_dir,
        "a2_dpcn_share_requests.json",
        r#"[
            {"client": "A", "file_no": 1, "gas_used": 50},
            {"client": "B", "file_no": 2, "gas_used": 70}
        ]"#,
    );
    // algo_3: upload synthesized, share joined
    write_log(
        &config.algo3_client_dir,
        "a3_client_file_upload.json",
        r#"[
            {"user": "C", "file_id": 10, "gas_used": 30},
            {"user": "C", "file_id": 11, "gas_used": 34}
        ]"#,
    );
    write_log(
        &config.algo3_client_dir,
        "a3_client_share_request.json",
        r#"[
            {"user": "C", "request_id": "t|5", "gas_used": 12},
            {"user": "C", "request_id": "t|6", "gas_used": 16}
        ]"#,
    );
    write_log(
        &config.dpcn_dir,
        "a3_dpcn_share_requests.json",
        r#"[
            {"client": "C", "file_no": 5, "gas_used": 3},
            {"client": "C", "file_no": 6, "gas_used": 5}
        ]"#,
    );

    let pair_tags = [
        (Protocol::Algo2, Operation::Upload),
        (Protocol::Algo3, Operation::Upload),
        (Protocol::Algo2, Operation::Share),
        (Protocol::Algo3, Operation::Share),
    ];
    let mut pairs = Vec::new();
    for (protocol, operation) in pair_tags {
        let series = pipeline::load_merged_series(&config, protocol, operation).unwrap();
        assert_eq!(series.len(), 2);
        pairs.push((protocol, operation, series));
    }
    assert_eq!(pairs[0].2, vec![1200, 1500]);
    assert_eq!(pairs[1].2, vec![30, 34]);
    assert_eq!(pairs[2].2, vec![550, 770]);
    assert_eq!(pairs[3].2, vec![15, 21]);

    let table = dataset::build_table(&pairs);
    assert_eq!(table.len(), 8);

    let normalized = normalize::normalize(&table);
    assert!(normalized.skipped.is_empty());
    assert_eq!(normalized.rows.len(), 8);
    // every two-element group splits symmetrically around its own mean
    for row_pair in normalized.rows.chunks(2) {
        assert!((row_pair[0].normalized_gas_used + row_pair[1].normalized_gas_used).abs() < 1e-12);
    }

    // display reduction over a short series still covers everything
    let binned = reduce::bin_means(&pairs[0].2, config.display_bins).unwrap();
    assert_eq!(binned, vec![1200.0, 1500.0]);
}

#[test]
fn insufficient_samples_in_one_pair_leaves_others_usable() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    write_log(
        &config.algo3_client_dir,
        "a3_client_file_upload.json",
        r#"[
            {"user": "C", "file_id": 1, "gas_used": 30},
            {"user": "C", "file_id": 2, "gas_used": 34},
            {"user": "C", "file_id": 3, "gas_used": 31}
        ]"#,
    );

    let series =
        pipeline::load_merged_series(&config, Protocol::Algo3, Operation::Upload).unwrap();

    // 3 samples cannot feed the 5-chunk trend reduction
    let err = reduce::chunked_means(&series, config.chunks).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientSamples { .. }));

    // but display binning of the same pair still works
    assert_eq!(
        reduce::bin_means(&series, config.display_bins).unwrap(),
        vec![30.0, 34.0, 31.0]
    );
}

#[test]
fn duplicate_policy_override_is_honored_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);

    write_log(
        &config.algo3_client_dir,
        "a3_client_file_upload.json",
        r#"[
            {"user": "C", "file_id": 1, "gas_used": 30},
            {"user": "C", "file_id": 1, "gas_used": 99}
        ]"#,
    );

    let err =
        pipeline::load_merged_series(&config, Protocol::Algo3, Operation::Upload).unwrap_err();
    assert!(matches!(err, PipelineError::DuplicateKey { .. }));

    config.duplicate_policy = DuplicatePolicy::Warn;
    let merged =
        pipeline::load_merged_series(&config, Protocol::Algo3, Operation::Upload).unwrap();
    assert_eq!(merged, vec![30]);
}
