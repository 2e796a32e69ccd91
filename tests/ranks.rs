// tests/ranks.rs

use assert_approx_eq::assert_approx_eq;
use heftmap::dag::{topological_order, TaskGraph, ValidatedDag};
use heftmap::heft::priority::{dependency_respecting_order, rank_order};
use heftmap::heft::Problem;
use heftmap_test_utils::builders::{diamond_example, SystemBuilder, WorkloadBuilder};
use heftmap_test_utils::init_tracing;

#[test]
fn diamond_ranks_follow_the_longest_average_path() {
    init_tracing();

    let (workload, system) = diamond_example();
    let problem = Problem::new(&workload, &system).unwrap();
    let ranks = problem.ranks().unwrap();
    let id = |name: &str| problem.graph().task_id(name).unwrap();

    // Averages over CPU/GPU/TPU.
    let avg_a = (100.0 + 20.0 + 100.0 / 3.0) / 3.0;
    let avg_b = (200.0 + 40.0 + 200.0 / 3.0) / 3.0;
    let avg_c = (150.0 + 30.0 + 50.0) / 3.0;
    let avg_d = (250.0 + 50.0 + 250.0 / 3.0) / 3.0;

    assert_approx_eq!(ranks[id("D")], avg_d, 1e-9);
    assert_approx_eq!(ranks[id("B")], avg_b + avg_d, 1e-9);
    assert_approx_eq!(ranks[id("C")], avg_c + avg_d, 1e-9);
    assert_approx_eq!(ranks[id("A")], avg_a + avg_b + avg_d, 1e-9);
}

#[test]
fn exit_rank_is_average_cost_and_others_are_at_least_that() {
    init_tracing();

    let workload = WorkloadBuilder::new()
        .cost_task("src", &[("P1", 4.0), ("P2", 6.0)])
        .cost_task("left", &[("P1", 1.0), ("P2", 1.0)])
        .cost_task("right", &[("P1", 7.0), ("P2", 3.0)])
        .cost_task("sink", &[("P1", 2.0), ("P2", 8.0)])
        .cost_task("lonely", &[("P1", 9.0), ("P2", 11.0)])
        .edge("src", "left", 10.0)
        .edge("src", "right", 10.0)
        .edge("left", "sink", 10.0)
        .edge("right", "sink", 10.0)
        .build();
    let system = SystemBuilder::new()
        .processor("P1", 1.0)
        .processor("P2", 1.0)
        .build();
    let problem = Problem::new(&workload, &system).unwrap();
    let ranks = problem.ranks().unwrap();
    let graph = problem.graph();

    for task in graph.task_ids() {
        let avg = problem.costs().average_computation_cost(task).unwrap();
        if graph.successors(task).is_empty() {
            assert_approx_eq!(ranks[task], avg);
        } else {
            assert!(ranks[task] >= avg, "rank of {} below its own cost", graph.task_name(task));
        }
    }

    assert_approx_eq!(ranks[graph.task_id("sink").unwrap()], 5.0);
    assert_approx_eq!(ranks[graph.task_id("lonely").unwrap()], 10.0);
    assert_approx_eq!(ranks[graph.task_id("right").unwrap()], 10.0);
    assert_approx_eq!(ranks[graph.task_id("src").unwrap()], 15.0);
}

#[test]
fn average_transfer_cost_is_zero_at_rank_time() {
    init_tracing();

    let (workload, system) = diamond_example();
    let problem = Problem::new(&workload, &system).unwrap();
    let a = problem.graph().task_id("A").unwrap();
    let b = problem.graph().task_id("B").unwrap();

    assert_eq!(problem.costs().average_communication_cost(a, b).unwrap(), 0.0);
}

#[test]
fn rank_order_breaks_ties_by_declaration() {
    let ranks = [5.0, 9.0, 5.0, 9.0, 1.0];
    assert_eq!(rank_order(&ranks), vec![1, 3, 0, 2, 4]);
}

#[test]
fn dependency_respecting_order_releases_children_after_parents() {
    init_tracing();

    // c -> a, b independent; pretend priority puts a first.
    let workload = WorkloadBuilder::new()
        .cost_task("a", &[("P", 1.0)])
        .cost_task("b", &[("P", 1.0)])
        .cost_task("c", &[("P", 1.0)])
        .edge("c", "a", 0.0)
        .build();
    let graph = TaskGraph::build(&workload).unwrap();
    let (a, b, c) = (
        graph.task_id("a").unwrap(),
        graph.task_id("b").unwrap(),
        graph.task_id("c").unwrap(),
    );

    let order = dependency_respecting_order(&graph, &[a, b, c]);
    assert_eq!(order, vec![b, c, a]);
}

#[test]
fn topological_order_seeds_entries_in_declaration_order() {
    let workload = WorkloadBuilder::new()
        .cost_task("late", &[("P", 1.0)])
        .cost_task("first", &[("P", 1.0)])
        .cost_task("second", &[("P", 1.0)])
        .edge("first", "late", 1.0)
        .edge("second", "late", 1.0)
        .build();
    let graph = TaskGraph::build(&workload).unwrap();

    let names: Vec<&str> = topological_order(&graph)
        .unwrap()
        .into_iter()
        .map(|task| graph.task_name(task))
        .collect();
    assert_eq!(names, vec!["first", "second", "late"]);

    let dag = ValidatedDag::try_from(graph.clone()).unwrap();
    assert_eq!(dag.topological_order().len(), 3);
    assert_eq!(dag.into_graph().len(), 3);
}

#[test]
fn deep_chain_ranks_do_not_overflow_the_stack() {
    init_tracing();

    let mut builder = WorkloadBuilder::new();
    let depth = 20_000;
    for i in 0..depth {
        builder = builder.cost_task(&format!("t{i}"), &[("P", 1.0)]);
    }
    for i in 1..depth {
        builder = builder.edge(&format!("t{}", i - 1), &format!("t{i}"), 0.0);
    }
    let workload = builder.build();
    let system = SystemBuilder::new().processor("P", 1.0).build();

    let problem = Problem::new(&workload, &system).unwrap();
    let ranks = problem.ranks().unwrap();
    assert_approx_eq!(ranks[0], depth as f64);
    assert_approx_eq!(ranks[depth - 1], 1.0);
}
