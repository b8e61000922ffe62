use std::error::Error;

use schedag::errors::SchedagError;
use schedag::parse::parse;
use schedag::sched::{Schedule, Scheduler};

type TestResult = Result<(), Box<dyn Error>>;

const CHAIN: &str = "digraph { a [Weight=2]; b [Weight=3]; a -> b [Weight=5]; }";

#[test]
fn chain_on_one_processor_packs_sequentially() -> TestResult {
    let graph = parse(CHAIN)?;
    let scheduler = Scheduler::new(&graph, 1)?;
    let schedule = scheduler.list_schedule()?;

    let a = graph.task_id("a").ok_or("missing a")?;
    let b = graph.task_id("b").ok_or("missing b")?;

    let a_slot = schedule.assignment(a).ok_or("a unassigned")?;
    assert_eq!((a_slot.processor, a_slot.start, a_slot.finish), (0, 0, 2));

    let b_slot = schedule.assignment(b).ok_or("b unassigned")?;
    assert_eq!((b_slot.processor, b_slot.start, b_slot.finish), (0, 2, 5));

    assert_eq!(schedule.makespan(), 5);
    Ok(())
}

#[test]
fn dependent_stays_local_when_communication_is_dearer() -> TestResult {
    let graph = parse(CHAIN)?;
    let scheduler = Scheduler::new(&graph, 2)?;
    let schedule = scheduler.list_schedule()?;

    // Starting b on the idle processor would cost 2 + 5 communication;
    // waiting behind a on processor 0 starts at 2.
    let b = graph.task_id("b").ok_or("missing b")?;
    let b_slot = schedule.assignment(b).ok_or("b unassigned")?;
    assert_eq!(b_slot.processor, 0);
    assert_eq!(b_slot.start, 2);
    assert_eq!(schedule.cursor(1), 0);
    Ok(())
}

#[test]
fn earliest_start_time_adds_cross_processor_communication() -> TestResult {
    let graph = parse(CHAIN)?;
    let a = graph.task_id("a").ok_or("missing a")?;
    let b = graph.task_id("b").ok_or("missing b")?;

    let mut schedule = Schedule::new(2);
    schedule.assign(&graph, 1, a, 0);

    assert_eq!(schedule.earliest_start_time(&graph, 1, b), Some(2));
    assert_eq!(schedule.earliest_start_time(&graph, 0, b), Some(7));
    Ok(())
}

#[test]
fn unassigned_predecessor_is_a_sentinel_not_a_time() -> TestResult {
    let graph = parse(CHAIN)?;
    let b = graph.task_id("b").ok_or("missing b")?;

    let mut schedule = Schedule::new(1);
    assert_eq!(schedule.earliest_start_time(&graph, 0, b), None);

    let err = schedule.assign_earliest(&graph, 0, b).unwrap_err();
    assert!(matches!(err, SchedagError::Unschedulable(_)));
    assert!(err.to_string().contains("cannot be scheduled"));
    Ok(())
}

#[test]
fn assign_earliest_commits_at_the_processor_cursor() -> TestResult {
    let graph = parse(CHAIN)?;
    let a = graph.task_id("a").ok_or("missing a")?;
    let b = graph.task_id("b").ok_or("missing b")?;

    let mut schedule = Schedule::new(1);
    schedule.assign_earliest(&graph, 0, a)?;
    schedule.assign_earliest(&graph, 0, b)?;

    let b_slot = schedule.assignment(b).ok_or("b unassigned")?;
    assert_eq!((b_slot.start, b_slot.finish), (2, 5));
    assert_eq!(schedule.cursor(0), 5);
    Ok(())
}

#[test]
fn cyclic_graph_fails_scheduler_construction() -> TestResult {
    let graph = parse("digraph { a; b; a -> b; b -> a; }")?;
    let err = Scheduler::new(&graph, 1).err().ok_or("expected cycle error")?;
    assert!(matches!(err, SchedagError::GraphCycle(_)));
    assert!(err.to_string().contains("cycle detected"));
    assert!(err.to_string().contains("'a'"));

    // Same failure whichever way round the cyclic edges are declared.
    let graph = parse("digraph { a; b; b -> a; a -> b; }")?;
    assert!(Scheduler::new(&graph, 1).is_err());
    Ok(())
}

#[test]
fn cycle_error_names_a_task_on_the_cycle() -> TestResult {
    // `t` is declared first and only hangs off the cycle; the error must
    // name a cycle member, not `t`.
    let graph = parse("digraph { t; a; b; a -> b; b -> a; a -> t; }")?;
    let err = Scheduler::new(&graph, 1).err().ok_or("expected cycle error")?;
    let msg = err.to_string();
    assert!(msg.contains("involving 'a'"));
    assert!(!msg.contains("'t'"));
    Ok(())
}

#[test]
fn zero_processors_is_rejected() -> TestResult {
    let graph = parse(CHAIN)?;
    let err = Scheduler::new(&graph, 0).err().ok_or("expected error")?;
    assert!(matches!(err, SchedagError::InvalidProcessorCount(0)));
    Ok(())
}

#[test]
fn ties_prefer_the_lowest_processor_index() -> TestResult {
    let graph = parse("digraph { a [Weight=4]; b [Weight=4]; c [Weight=1]; }")?;
    let scheduler = Scheduler::new(&graph, 2)?;
    let schedule = scheduler.list_schedule()?;

    let a = graph.task_id("a").ok_or("a")?;
    let b = graph.task_id("b").ok_or("b")?;
    let c = graph.task_id("c").ok_or("c")?;

    let a_slot = schedule.assignment(a).ok_or("a unassigned")?;
    let b_slot = schedule.assignment(b).ok_or("b unassigned")?;
    let c_slot = schedule.assignment(c).ok_or("c unassigned")?;

    assert_eq!((a_slot.processor, a_slot.start), (0, 0));
    assert_eq!((b_slot.processor, b_slot.start), (1, 0));
    assert_eq!((c_slot.processor, c_slot.start), (0, 4));
    Ok(())
}

#[test]
fn independent_branches_spread_across_processors() -> TestResult {
    let src = "digraph {
        a [Weight=1]; b [Weight=2]; c [Weight=2];
        a -> b [Weight=0];
        a -> c [Weight=0];
    }";
    let graph = parse(src)?;
    let scheduler = Scheduler::new(&graph, 2)?;
    let schedule = scheduler.list_schedule()?;

    let b = graph.task_id("b").ok_or("b")?;
    let c = graph.task_id("c").ok_or("c")?;
    let b_slot = schedule.assignment(b).ok_or("b unassigned")?;
    let c_slot = schedule.assignment(c).ok_or("c unassigned")?;

    assert_eq!(b_slot.processor, 0);
    assert_eq!((c_slot.processor, c_slot.start), (1, 1));
    assert_eq!(schedule.makespan(), 3);
    Ok(())
}

#[test]
fn zero_weight_tasks_occupy_no_time() -> TestResult {
    let graph = parse("digraph { a; b [Weight=2]; a -> b; }")?;
    let scheduler = Scheduler::new(&graph, 1)?;
    let schedule = scheduler.list_schedule()?;

    let a = graph.task_id("a").ok_or("a")?;
    let b = graph.task_id("b").ok_or("b")?;

    let a_slot = schedule.assignment(a).ok_or("a unassigned")?;
    assert_eq!((a_slot.start, a_slot.finish), (0, 0));

    let b_slot = schedule.assignment(b).ok_or("b unassigned")?;
    assert_eq!((b_slot.start, b_slot.finish), (0, 2));
    Ok(())
}

#[test]
fn text_rendering_matches_reference_format() -> TestResult {
    let graph = parse(CHAIN)?;
    let scheduler = Scheduler::new(&graph, 1)?;
    let schedule = scheduler.list_schedule()?;

    let expected = "Number of processors: 1\n\
                    a (Weight=2) scheduled on processor 1 at time 0\n\
                    b (Weight=3) scheduled on processor 1 at time 2 [Depends on {a}]\n";
    assert_eq!(schedule.render(&graph), expected);
    Ok(())
}

#[test]
fn rendering_lists_each_incoming_edge() -> TestResult {
    let graph = parse("digraph { a [Weight=1]; b [Weight=1]; a -> b; a -> b; }")?;
    let scheduler = Scheduler::new(&graph, 1)?;
    let schedule = scheduler.list_schedule()?;

    assert!(schedule.render(&graph).contains("[Depends on {a, a}]"));
    Ok(())
}

#[test]
fn report_uses_one_based_processors() -> TestResult {
    let graph = parse("digraph { a [Weight=4]; b [Weight=4]; }")?;
    let scheduler = Scheduler::new(&graph, 2)?;
    let schedule = scheduler.list_schedule()?;

    let report = schedule.report(&graph);
    assert_eq!(report.processors, 2);
    assert_eq!(report.makespan, 4);
    assert_eq!(report.tasks.len(), 2);
    assert_eq!(report.tasks[0].task, "a");
    assert_eq!(report.tasks[0].processor, 1);
    assert_eq!(report.tasks[1].task, "b");
    assert_eq!(report.tasks[1].processor, 2);
    assert!(report.tasks[0].depends_on.is_empty());

    let value = serde_json::to_value(&report)?;
    assert_eq!(value["tasks"][0]["processor"], 1);
    assert_eq!(value["makespan"], 4);
    Ok(())
}

#[test]
fn scheduler_exposes_its_topological_order() -> TestResult {
    let graph = parse("digraph { a; b; c; a -> c; }")?;
    let scheduler = Scheduler::new(&graph, 1)?;
    let names: Vec<&str> = scheduler
        .topological_order()
        .iter()
        .map(|&id| graph.task(id).name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn empty_graph_schedules_trivially() -> TestResult {
    let graph = parse("digraph {}")?;
    let scheduler = Scheduler::new(&graph, 3)?;
    let schedule = scheduler.list_schedule()?;

    assert!(schedule.is_empty());
    assert_eq!(schedule.makespan(), 0);
    assert_eq!(schedule.render(&graph), "Number of processors: 3\n");
    Ok(())
}
