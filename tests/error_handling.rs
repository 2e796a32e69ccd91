// tests/error_handling.rs

use std::io::Write;

use heftmap::config::{load_from_path, EdgeSpec, NodeSpec, SystemConfig, WorkloadSpec};
use heftmap::heft::Problem;
use heftmap::{optimize, HeftError};
use heftmap_test_utils::builders::{diamond_example, SystemBuilder, WorkloadBuilder};
use heftmap_test_utils::init_tracing;
use tempfile::NamedTempFile;

fn cpu_gpu() -> SystemConfig {
    SystemBuilder::new()
        .processor("CPU", 100.0)
        .processor("GPU", 500.0)
        .build()
}

fn expect_malformed(workload: &WorkloadSpec) -> String {
    match optimize(workload, &cpu_gpu()) {
        Err(HeftError::MalformedGraph(msg)) => msg,
        Err(e) => panic!("Expected MalformedGraph error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn two_task_cycle_names_a_member() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .intensity_task("B", 10.0)
        .edge("A", "B", 1.0)
        .edge("B", "A", 1.0)
        .build();

    match optimize(&workload, &cpu_gpu()) {
        Err(HeftError::CycleDetected { task, cycle }) => {
            assert!(task == "A" || task == "B", "unexpected task {task}");
            assert_eq!(cycle, vec!["A".to_string(), "B".to_string()]);
        }
        Err(e) => panic!("Expected CycleDetected error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn cycle_report_skips_tasks_only_downstream_of_the_cycle() {
    init_tracing();

    // "down" is stuck behind the cycle but is not part of it.
    let workload = WorkloadBuilder::new()
        .intensity_task("down", 1.0)
        .intensity_task("entry", 1.0)
        .intensity_task("x", 1.0)
        .intensity_task("y", 1.0)
        .edge("entry", "x", 1.0)
        .edge("x", "y", 1.0)
        .edge("y", "x", 1.0)
        .edge("y", "down", 1.0)
        .build();

    match optimize(&workload, &cpu_gpu()) {
        Err(err @ HeftError::CycleDetected { .. }) => {
            let HeftError::CycleDetected { task, cycle } = &err else {
                unreachable!()
            };
            assert_eq!(task, "x");
            assert_eq!(cycle, &vec!["x".to_string(), "y".to_string()]);
            assert!(err.to_string().contains("x, y"));
            assert_eq!(err.kind(), "CycleDetected");
        }
        Err(e) => panic!("Expected CycleDetected error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn self_loop_is_a_cycle() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .intensity_task("B", 10.0)
        .edge("A", "B", 1.0)
        .edge("B", "B", 1.0)
        .build();

    match optimize(&workload, &cpu_gpu()) {
        Err(HeftError::CycleDetected { task, cycle }) => {
            assert_eq!(task, "B");
            assert_eq!(cycle, vec!["B".to_string()]);
        }
        Err(e) => panic!("Expected CycleDetected error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn edge_to_unknown_task_is_malformed() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .edge("A", "ghost", 1.0)
        .build();

    let msg = expect_malformed(&workload);
    assert!(msg.contains("ghost"));
}

#[test]
fn duplicate_task_id_is_malformed() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .intensity_task("A", 20.0)
        .build();

    let msg = expect_malformed(&workload);
    assert!(msg.contains("more than once"));
}

#[test]
fn duplicate_edge_is_malformed() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .intensity_task("B", 10.0)
        .edge("A", "B", 1.0)
        .edge("A", "B", 2.0)
        .build();

    expect_malformed(&workload);
}

#[test]
fn missing_ids_and_endpoints_are_malformed() {
    init_tracing();

    let no_id = WorkloadBuilder::new()
        .node(NodeSpec {
            workload_intensity_gflops: Some(1.0),
            ..NodeSpec::default()
        })
        .build();
    let msg = expect_malformed(&no_id);
    assert!(msg.contains("'id'"));

    let no_target = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .build();
    let no_target = WorkloadSpec {
        edges: vec![EdgeSpec {
            from: Some("A".to_string()),
            ..EdgeSpec::default()
        }],
        ..no_target
    };
    expect_malformed(&no_target);
}

#[test]
fn negative_data_size_is_malformed() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .intensity_task("B", 10.0)
        .edge("A", "B", -1.0)
        .build();

    expect_malformed(&workload);
}

#[test]
fn empty_workload_is_malformed() {
    init_tracing();

    expect_malformed(&WorkloadSpec::default());
}

#[test]
fn empty_processor_set_is_invalid_config() {
    init_tracing();

    let workload = WorkloadBuilder::new().intensity_task("A", 10.0).build();
    let system = SystemBuilder::new().build();

    let err = optimize(&workload, &system).unwrap_err();
    assert!(matches!(err, HeftError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn non_positive_bandwidth_and_negative_latency_are_invalid_config() {
    init_tracing();

    let workload = WorkloadBuilder::new().intensity_task("A", 10.0).build();

    for bandwidth in [0.0, -5.0, f64::NAN] {
        let system = SystemBuilder::new()
            .processor("CPU", 100.0)
            .bandwidth(bandwidth)
            .build();
        let err = optimize(&workload, &system).unwrap_err();
        assert!(matches!(err, HeftError::InvalidConfig(_)), "bandwidth {bandwidth}: {err:?}");
    }

    let system = SystemBuilder::new()
        .processor("CPU", 100.0)
        .latency(-1.0)
        .build();
    let err = optimize(&workload, &system).unwrap_err();
    assert!(matches!(err, HeftError::InvalidConfig(_)), "got {err:?}");

    // Zero latency is allowed.
    let system = SystemBuilder::new()
        .processor("CPU", 100.0)
        .latency(0.0)
        .build();
    assert!(optimize(&workload, &system).is_ok());
}

#[test]
fn zero_performance_only_matters_for_intensity_tasks() {
    init_tracing();

    let system = SystemBuilder::new()
        .processor("CPU", 100.0)
        .processor("GPU", 0.0)
        .build();

    let intensity = WorkloadBuilder::new().intensity_task("A", 10.0).build();
    let err = optimize(&intensity, &system).unwrap_err();
    match err {
        HeftError::InvalidConfig(msg) => assert!(msg.contains("GPU")),
        e => panic!("Expected InvalidConfig error, got: {:?}", e),
    }

    let table = WorkloadBuilder::new()
        .cost_task("A", &[("CPU", 3.0), ("GPU", 1.0)])
        .build();
    let result = optimize(&table, &system).unwrap();
    assert_eq!(result.mapping["A"], "GPU");
}

#[test]
fn task_without_any_cost_is_incomplete() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .node(NodeSpec {
            id: Some("bare".to_string()),
            ..NodeSpec::default()
        })
        .build();

    match optimize(&workload, &cpu_gpu()) {
        Err(HeftError::IncompleteCostSpec { task, .. }) => assert_eq!(task, "bare"),
        Err(e) => panic!("Expected IncompleteCostSpec error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn task_with_both_cost_forms_is_incomplete() {
    init_tracing();

    let mut node = NodeSpec::with_costs("both", [("CPU", 1.0), ("GPU", 1.0)]);
    node.workload_intensity_gflops = Some(10.0);
    let workload = WorkloadBuilder::new().node(node).build();

    let err = optimize(&workload, &cpu_gpu()).unwrap_err();
    assert!(
        matches!(&err, HeftError::IncompleteCostSpec { task, .. } if task == "both"),
        "got {err:?}"
    );
}

#[test]
fn cost_table_missing_a_processor_is_incomplete() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .cost_task("A", &[("CPU", 1.0)])
        .build();

    match optimize(&workload, &cpu_gpu()) {
        Err(HeftError::IncompleteCostSpec { task, reason }) => {
            assert_eq!(task, "A");
            assert!(reason.contains("GPU"));
        }
        Err(e) => panic!("Expected IncompleteCostSpec error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn negative_table_cost_is_incomplete() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .cost_task("A", &[("CPU", 1.0), ("GPU", -2.0)])
        .build();

    let err = optimize(&workload, &cpu_gpu()).unwrap_err();
    assert_eq!(err.kind(), "IncompleteCostSpec");
}

#[test]
fn extra_cost_table_entries_are_ignored() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .cost_task("A", &[("CPU", 4.0), ("GPU", 8.0), ("FPGA", 0.5)])
        .build();

    let result = optimize(&workload, &cpu_gpu()).unwrap();
    assert_eq!(result.mapping["A"], "CPU");
}

#[test]
fn overflowing_intensity_cost_is_incomplete() {
    init_tracing();

    let workload = WorkloadBuilder::new().intensity_task("A", 1e300).build();
    let system = SystemBuilder::new().processor("CPU", 1e-10).build();

    match optimize(&workload, &system) {
        Err(HeftError::IncompleteCostSpec { task, reason }) => {
            assert_eq!(task, "A");
            assert!(reason.contains("not finite"), "unexpected reason {reason}");
        }
        Err(e) => panic!("Expected IncompleteCostSpec error, got: {:?}", e),
        Ok(result) => panic!("Expected error, got makespan {}", result.makespan_ms),
    }
}

#[test]
fn overflowing_transfer_time_is_rejected() {
    init_tracing();

    // A prefers P1 and B prefers P2, so placing B needs the A -> B transfer.
    let workload = WorkloadBuilder::new()
        .cost_task("A", &[("P1", 1.0), ("P2", 100.0)])
        .cost_task("B", &[("P1", 100.0), ("P2", 1.0)])
        .edge("A", "B", 1e300)
        .build();
    let system = SystemBuilder::new()
        .processor("P1", 100.0)
        .processor("P2", 100.0)
        .bandwidth(1e-10)
        .build();

    match optimize(&workload, &system) {
        Err(HeftError::InvalidConfig(msg)) => {
            assert!(msg.contains("'A' -> 'B'"), "unexpected message {msg}");
        }
        Err(e) => panic!("Expected InvalidConfig error, got: {:?}", e),
        Ok(result) => panic!("Expected error, got makespan {}", result.makespan_ms),
    }
}

#[test]
fn transfer_query_without_an_edge_is_missing_edge_data() {
    init_tracing();

    let (workload, system) = diamond_example();
    let problem = Problem::new(&workload, &system).unwrap();
    let a = problem.graph().task_id("A").unwrap();
    let d = problem.graph().task_id("D").unwrap();

    // Same processor or unassigned parent never needs the edge.
    assert_eq!(problem.costs().communication_cost(a, d, 0, None).unwrap(), 0.0);
    assert_eq!(problem.costs().communication_cost(a, d, 1, Some(1)).unwrap(), 0.0);

    match problem.costs().communication_cost(a, d, 1, Some(0)) {
        Err(HeftError::MissingEdgeData { from, to }) => {
            assert_eq!(from, "A");
            assert_eq!(to, "D");
        }
        other => panic!("Expected MissingEdgeData error, got: {:?}", other),
    }
}

#[test]
fn unparsable_document_is_a_json_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ \"workload\": [ not json").unwrap();

    let err = load_from_path(file.path()).unwrap_err();
    assert!(matches!(err, HeftError::JsonError(_)), "got {err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, HeftError::IoError(_)), "got {err:?}");
}
