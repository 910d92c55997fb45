//! Search properties checked on random pathways.
//!
//! Every check runs over several seeds; a failure names the seed so it can
//! be replayed with `RandomPathway::seeded`.

use pax_pattern::GraphAccess;
use pax_tests::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const SEEDS: [u64; 6] = [1, 2, 3, 17, 42, 2024];

/// ER, PE, Complex, member PE, member ER.
fn complex_walk(f: &Fixture) -> Pattern {
    let r = &f.registry;
    let mut p = Pattern::new(r, "EntityReference", "ER").unwrap();
    p.add(presets::er_to_pe(r).unwrap(), &["ER", "PE"]).unwrap();
    p.add(presets::complexes(r).unwrap(), &["PE", "Complex"])
        .unwrap();
    p.add(presets::type_of(r, "Complex").unwrap(), &["Complex"])
        .unwrap();
    p.add(presets::simple_members(r).unwrap(), &["Complex", "member"])
        .unwrap();
    p.add(presets::equal(false), &["PE", "member"]).unwrap();
    p
}

/// Every assignment of nodes to labels that satisfies every step.
fn brute_force(f: &Fixture, pattern: &Pattern) -> HashSet<Vec<NodeId>> {
    let view = f.view();
    let nodes: Vec<NodeId> = f.graph.all_node_ids().collect();
    let anchors = view.all_of_type(pattern.anchor_type());

    let mut rows: Vec<Vec<NodeId>> = anchors.into_iter().map(|a| vec![a]).collect();
    for _ in 1..pattern.labels().len() {
        rows = rows
            .into_iter()
            .flat_map(|row| {
                nodes.iter().map(move |n| {
                    let mut next = row.clone();
                    next.push(*n);
                    next
                })
            })
            .collect();
    }

    rows.into_iter()
        .filter(|row| {
            pattern.steps().iter().all(|step| {
                let tuple: Vec<NodeId> = step.slots.iter().map(|s| row[*s]).collect();
                step.constraint.satisfies(&view, &tuple)
            })
        })
        .collect()
}

fn rows(matches: &MatchSet) -> HashSet<Vec<NodeId>> {
    matches.iter().map(|m| m.nodes().collect()).collect()
}

// ========== TEST: soundness ==========
#[test]
fn test_every_match_satisfies_every_step() {
    for seed in SEEDS {
        // GIVEN
        let f = RandomPathway::new().seeded(seed).unwrap();
        let pattern = library::in_same_complex(&f.registry).unwrap();

        // WHEN
        let found = f.search(&pattern).unwrap();

        // THEN
        let view = f.view();
        for m in &found {
            assert!(m.is_complete(), "seed {seed}: incomplete match");
            for step in pattern.steps() {
                let tuple: Vec<NodeId> = step.slots.iter().filter_map(|s| m.at(*s)).collect();
                assert!(
                    step.constraint.satisfies(&view, &tuple),
                    "seed {seed}: {} rejects {:?}",
                    step.constraint.name(),
                    tuple
                );
            }
        }
    }
}

// ========== TEST: completeness ==========
#[test]
fn test_search_finds_every_satisfying_assignment() {
    for seed in SEEDS {
        // GIVEN a graph small enough to enumerate every assignment
        let f = RandomPathway::tiny().seeded(seed).unwrap();
        let pattern = complex_walk(&f);

        // WHEN
        let found = f.search(&pattern).unwrap();

        // THEN
        assert_eq!(rows(&found), brute_force(&f, &pattern), "seed {seed}");
    }
}

#[test]
fn test_negation_matches_brute_force() {
    for seed in SEEDS {
        let f = RandomPathway::tiny().seeded(seed).unwrap();
        let r = &f.registry;
        let mut pattern = Pattern::new(r, "Conversion", "Conversion").unwrap();
        pattern
            .add(presets::left(r).unwrap(), &["Conversion", "input"])
            .unwrap();
        pattern
            .add(shared(constraint::Not::new(presets::right(r).unwrap())), &["Conversion", "input"])
            .unwrap();

        let found = f.search(&pattern).unwrap();

        assert_eq!(rows(&found), brute_force(&f, &pattern), "seed {seed}");
    }
}

// ========== TEST: idempotence ==========
#[test]
fn test_repeated_search_returns_same_matches_in_same_order() {
    for seed in SEEDS {
        let f = RandomPathway::new().seeded(seed).unwrap();
        let pattern = library::controls_state_change(&f.registry, true).unwrap();

        let first = f.search(&pattern).unwrap();
        let second = f.search(&pattern).unwrap();

        let order = |m: &MatchSet| m.iter().map(|x| x.nodes().collect()).collect::<Vec<Vec<_>>>();
        assert_eq!(order(&first), order(&second), "seed {seed}");
    }
}

#[test]
fn test_parallel_search_equals_sequential() {
    for seed in SEEDS {
        let f = RandomPathway::new().seeded(seed).unwrap();
        let pattern = library::in_same_complex(&f.registry).unwrap();

        let sequential = f.search_with(&pattern, SearchOptions::sequential()).unwrap();
        let parallel = f.search_with(&pattern, SearchOptions::parallel()).unwrap();

        assert!(sequential == parallel, "seed {seed}");
        assert_eq!(sequential.len(), parallel.len(), "seed {seed}");
    }
}

// ========== TEST: equality ==========
#[test]
fn test_distinct_labels_never_share_a_node() {
    for seed in SEEDS {
        let f = RandomPathway::new().seeded(seed).unwrap();
        let pattern = library::in_same_complex(&f.registry).unwrap();

        let found = f.search(&pattern).unwrap();

        for m in &found {
            assert_ne!(m.get("first ER"), m.get("second ER"), "seed {seed}");
        }
    }
}

#[test]
fn test_equal_forces_the_same_node() {
    for seed in SEEDS {
        // GIVEN ER -> PE -> ER' with ER' required to be ER
        let f = RandomPathway::new().seeded(seed).unwrap();
        let r = &f.registry;
        let mut pattern = Pattern::new(r, "EntityReference", "ER").unwrap();
        pattern.add(presets::er_to_pe(r).unwrap(), &["ER", "PE"]).unwrap();
        pattern.add(presets::pe_to_er(r).unwrap(), &["PE", "back"]).unwrap();
        pattern.add(presets::equal(true), &["ER", "back"]).unwrap();

        // WHEN
        let found = f.search(&pattern).unwrap();

        // THEN every protein with a reference is found, and only once
        let proteins = f
            .graph
            .all_node_ids()
            .filter(|n| f.uri(*n).is_some_and(|u| u.starts_with("P:")))
            .count();
        assert_eq!(found.len(), proteins, "seed {seed}");
        for m in &found {
            assert_eq!(m.get("ER"), m.get("back"));
        }
    }
}

// ========== TEST: cycles ==========
#[test]
fn test_cyclic_membership_terminates() {
    // GIVEN two complexes containing each other
    let f = FixtureBuilder::new()
        .protein("a")
        .node("Complex", "C1")
        .node("Complex", "C2")
        .link("C1", "component", "C2")
        .link("C2", "component", "C1")
        .link("C2", "component", "P:a")
        .build()
        .unwrap();
    let r = &f.registry;

    // WHEN
    let mut pattern = Pattern::new(r, "Protein", "PE").unwrap();
    pattern.add(presets::complexes(r).unwrap(), &["PE", "up"]).unwrap();
    let found = f.search(&pattern).unwrap();

    // THEN the protein and both complexes, each once
    assert_eq!(
        f.rows(&found, &["up"]).unwrap(),
        vec![
            vec!["P:a".to_string()],
            vec!["C1".to_string()],
            vec!["C2".to_string()],
        ]
    );
}

#[test]
fn test_random_cyclic_graphs_terminate() {
    let config = RandomPathway {
        cycle_rate: 1.0,
        generic_rate: 0.5,
        ..RandomPathway::new()
    };
    for seed in SEEDS {
        let f = config.seeded(seed).unwrap();
        let found = f
            .search(&library::in_same_complex(&f.registry).unwrap())
            .unwrap();
        assert!(found.iter().all(|m| m.is_complete()), "seed {seed}");
    }
}

// ========== TEST: include ==========
#[test]
fn test_include_equals_inline_registration() {
    for seed in SEEDS {
        // GIVEN the same constraints registered inline and through a sub-pattern
        let f = RandomPathway::new().seeded(seed).unwrap();
        let r = &f.registry;

        let mut inline = Pattern::new(r, "Control", "Control").unwrap();
        inline
            .add(presets::control_to_conv(r).unwrap(), &["Control", "Conv"])
            .unwrap();
        inline
            .add(presets::type_of(r, "Conversion").unwrap(), &["Conv"])
            .unwrap();
        inline.add(presets::left(r).unwrap(), &["Conv", "In"]).unwrap();
        inline.add(presets::right(r).unwrap(), &["Conv", "Out"]).unwrap();

        let mut sub = Pattern::new(r, "Conversion", "c").unwrap();
        sub.add(presets::left(r).unwrap(), &["c", "l"]).unwrap();
        sub.add(presets::right(r).unwrap(), &["c", "r"]).unwrap();
        let mut included = Pattern::new(r, "Control", "Control").unwrap();
        included
            .add(presets::control_to_conv(r).unwrap(), &["Control", "Conv"])
            .unwrap();
        included.include(&sub, &["Conv", "In", "Out"]).unwrap();

        // WHEN
        let a = f.search(&inline).unwrap();
        let b = f.search(&included).unwrap();

        // THEN
        assert_eq!(inline.labels(), included.labels());
        assert_eq!(rows(&a), rows(&b), "seed {seed}");
    }
}

// ========== TEST: limits ==========
#[test]
fn test_max_matches_caps_parallel_and_sequential() {
    let f = RandomPathway::new().seeded(42).unwrap();
    let pattern = complex_walk(&f);
    let all = f.search(&pattern).unwrap();

    for options in [SearchOptions::sequential(), SearchOptions::parallel()] {
        let capped = f.search_with(&pattern, options.with_max_matches(1)).unwrap();
        assert_eq!(capped.len(), all.len().min(1));
    }
}
