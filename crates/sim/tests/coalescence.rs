//! Integration tests for ancestry tracking and common-ancestor queries.

use gpop_sim::base::ScriptedSource;
use gpop_sim::genealogy::CoalescenceResult;
use gpop_sim::simulation::{RunState, SimulationBuilder, Termination};

#[test]
fn test_single_generation_scenario() {
    let rng = ScriptedSource::from_indices([2, 2, 2, 0]);
    let mut sim = SimulationBuilder::new()
        .population_size(4)
        .generations(1)
        .build_with_source(rng)
        .unwrap();
    sim.step().unwrap();

    let population = sim.population();
    for (id, parent) in [2, 2, 2, 0].into_iter().enumerate() {
        assert_eq!(population.ancestry(id), Some(vec![parent]));
    }
    assert!(!sim.all_identical_by_descent());
    assert_eq!(
        sim.last_common_ancestor(&[0, 3]).unwrap(),
        CoalescenceResult::NotFound
    );
    assert_eq!(
        sim.last_common_ancestor(&[0, 1, 2]).unwrap(),
        CoalescenceResult::Found {
            ancestor_id: 2,
            generations_ago: 1
        }
    );
}

#[test]
fn test_two_generation_scenario() {
    let rng = ScriptedSource::from_indices([1, 1, 3, 3, 0, 0, 2, 2]);
    let mut sim = SimulationBuilder::new()
        .population_size(4)
        .generations(2)
        .build_with_source(rng)
        .unwrap();
    sim.run().unwrap();

    let population = sim.population();
    for id in 0..4 {
        assert_eq!(population.ancestry(id).unwrap().len(), 2);
    }
    assert_eq!(population.ancestry(0), Some(vec![1, 0]));
    assert_eq!(population.ancestry(3), Some(vec![3, 2]));
    assert_eq!(
        sim.last_common_ancestor(&[0, 1, 2, 3]).unwrap(),
        CoalescenceResult::NotFound
    );
    assert!(!sim.all_identical_by_descent());
    assert_eq!(
        sim.last_common_ancestor(&[0, 1]).unwrap(),
        CoalescenceResult::Found {
            ancestor_id: 0,
            generations_ago: 1
        }
    );
}

#[test]
fn test_singleton_group_is_its_own_ancestor() {
    let mut sim = SimulationBuilder::new()
        .population_size(10)
        .generations(10)
        .seed(5)
        .build()
        .unwrap();
    sim.run().unwrap();

    for id in 0..10 {
        assert_eq!(
            sim.last_common_ancestor(&[id]).unwrap(),
            CoalescenceResult::Found {
                ancestor_id: id,
                generations_ago: 0
            }
        );
    }
}

#[test]
fn test_identical_by_descent_implies_found() {
    for seed in 0..5 {
        let mut sim = SimulationBuilder::new()
            .population_size(12)
            .generations(10_000)
            .stop_at_coalescence()
            .seed(seed)
            .build()
            .unwrap();

        let termination = sim.run().unwrap();
        assert!(matches!(termination, Termination::Coalesced { .. }));
        assert!(sim.all_identical_by_descent());

        let everyone: Vec<usize> = (0..12).collect();
        let result = sim.last_common_ancestor(&everyone).unwrap();
        let Termination::Coalesced {
            ancestor_id: Some(ancestor_id),
            generations_ago: Some(generations_ago),
        } = termination
        else {
            panic!("full history must name the ancestor: {termination:?}");
        };
        assert_eq!(
            result,
            CoalescenceResult::Found {
                ancestor_id,
                generations_ago
            }
        );
        assert!(generations_ago <= sim.generation());
    }
}

#[test]
fn test_max_generation_bound_under_coalescence_stop() {
    let mut sim = SimulationBuilder::new()
        .population_size(50)
        .generations(5)
        .stop_at_coalescence()
        .seed(2024)
        .build()
        .unwrap();

    assert_eq!(sim.run().unwrap(), Termination::MaxGenerations);
    assert_eq!(sim.generation(), 5);
    assert_eq!(
        sim.state(),
        RunState::Terminated(Termination::MaxGenerations)
    );
}

#[test]
fn test_retention_window_bounds_history() {
    let mut sim = SimulationBuilder::new()
        .population_size(200)
        .generations(50)
        .retention_window(3)
        .seed(9)
        .build()
        .unwrap();
    sim.run().unwrap();

    let genealogy = sim.population().genealogy();
    assert_eq!(genealogy.retained_depth(), 3);
    assert_eq!(genealogy.horizon(), 47);
    assert_eq!(sim.population().ancestry(0).unwrap().len(), 3);

    // A truncated history can hide who the common ancestor is, never whether
    // there is one.
    let everyone: Vec<usize> = (0..200).collect();
    let result = sim.last_common_ancestor(&everyone).unwrap();
    if sim.all_identical_by_descent() {
        assert!(result.is_found() || result == CoalescenceResult::Unknown);
    } else {
        assert_eq!(result, CoalescenceResult::NotFound);
    }
}

#[test]
fn test_unbounded_window_builds_and_runs() {
    let mut sim = SimulationBuilder::new()
        .population_size(10)
        .generations(5)
        .retention_window(usize::MAX)
        .seed(1)
        .build()
        .unwrap();

    assert_eq!(sim.run().unwrap(), Termination::MaxGenerations);
    assert!(sim.population().genealogy().is_complete());
    assert_eq!(sim.population().ancestry(0).unwrap().len(), 5);
}

#[test]
fn test_windowed_runs_coalesce_with_full_history() {
    for seed in 0..5 {
        let run = |window: Option<usize>| {
            let mut builder = SimulationBuilder::new()
                .population_size(10)
                .generations(10_000)
                .stop_at_coalescence()
                .seed(seed);
            if let Some(window) = window {
                builder = builder.retention_window(window);
            }
            let mut sim = builder.build().unwrap();
            let termination = sim.run().unwrap();
            (sim.generation(), termination, sim.all_identical_by_descent())
        };

        let (full_generation, full, _) = run(None);
        let (windowed_generation, windowed, identical) = run(Some(5));

        assert_eq!(windowed_generation, full_generation);
        assert!(identical);
        let Termination::Coalesced {
            generations_ago: Some(depth),
            ..
        } = full
        else {
            panic!("full history must name the ancestor: {full:?}");
        };
        if depth <= 5 {
            assert_eq!(windowed, full);
        } else {
            assert_eq!(
                windowed,
                Termination::Coalesced {
                    ancestor_id: None,
                    generations_ago: None
                }
            );
        }
    }
}

#[test]
fn test_query_errors_are_reported() {
    let sim = SimulationBuilder::new()
        .population_size(4)
        .generations(1)
        .seed(1)
        .build()
        .unwrap();

    assert!(sim.last_common_ancestor(&[]).is_err());
    assert!(sim.last_common_ancestor(&[4]).is_err());
}
