//! Pathway library scenarios.
//!
//! Each module builds a small hand-written pathway and checks what one
//! predefined pattern finds in it.

use pax_tests::prelude::*;
use std::collections::{HashMap, HashSet};

fn uris(f: &Fixture, found: &MatchSet, labels: &[&str]) -> Vec<Vec<String>> {
    let mut rows = f.rows(found, labels).unwrap();
    rows.sort();
    rows
}

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// e1 catalyses a -> b, e2 catalyses b -> c.
fn two_step_chain() -> FixtureBuilder {
    FixtureBuilder::new()
        .protein("e1")
        .protein("e2")
        .protein("a")
        .protein("b")
        .protein("c")
        .node("BiochemicalReaction", "R1")
        .link("R1", "left", "P:a")
        .link("R1", "right", "P:b")
        .node("BiochemicalReaction", "R2")
        .link("R2", "left", "P:b")
        .link("R2", "right", "P:c")
        .node("Catalysis", "K1")
        .link("K1", "controller", "P:e1")
        .link("K1", "controlled", "R1")
        .node("Catalysis", "K2")
        .link("K2", "controller", "P:e2")
        .link("K2", "controlled", "R2")
}

mod consecutive_catalysis {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_of_first_feeds_second() {
        // GIVEN
        let f = two_step_chain().build().unwrap();
        let p = library::consecutive_catalysis(&f.registry, None).unwrap();

        // WHEN
        let found = f.search(&p).unwrap();

        // THEN
        assert_eq!(
            uris(&f, &found, &["first ER", "linker PE", "second ER"]),
            vec![row(&["PR:e1", "P:b", "PR:e2"])]
        );
    }

    #[test]
    fn test_ubiquitous_linker_is_skipped() {
        let f = two_step_chain().build().unwrap();
        let ubiques = HashSet::from(["PR:b".to_string()]);
        let p = library::consecutive_catalysis(&f.registry, Some(&ubiques)).unwrap();

        assert!(f.search(&p).unwrap().is_empty());
    }

    #[test]
    fn test_catalysis_direction_reverses_the_chain() {
        // GIVEN the second catalysis runs its reaction right to left
        let f = two_step_chain()
            .attr("K2", "catalysisDirection", "RIGHT_TO_LEFT")
            .build()
            .unwrap();
        let p = library::consecutive_catalysis(&f.registry, None).unwrap();

        // WHEN
        let found = f.search(&p).unwrap();

        // THEN b is no longer consumed by the second step
        assert!(found.is_empty());
    }
}

mod state_change {
    use super::*;
    use pretty_assertions::assert_eq;

    /// k catalyses a -> a-p.
    fn phosphorylation() -> FixtureBuilder {
        FixtureBuilder::new()
            .protein("k")
            .protein("a")
            .form("a", "a-p")
            .node("BiochemicalReaction", "R")
            .link("R", "left", "P:a")
            .link("R", "right", "P:a-p")
            .node("Catalysis", "K")
            .link("K", "controller", "P:k")
            .link("K", "controlled", "R")
    }

    #[test]
    fn test_controls_state_change() {
        let f = phosphorylation().build().unwrap();

        for generics in [true, false] {
            let p = library::controls_state_change(&f.registry, generics).unwrap();
            let found = f.search(&p).unwrap();

            assert_eq!(
                uris(&f, &found, &["controller ER", "changed ER", "input PE", "output PE"]),
                vec![row(&["PR:k", "PR:a", "P:a", "P:a-p"])]
            );
        }
    }

    #[test]
    fn test_controller_as_unchanged_participant() {
        // GIVEN k sits on both sides of the reaction instead of catalysing it
        let f = FixtureBuilder::new()
            .protein("k")
            .protein("a")
            .form("a", "a-p")
            .node("BiochemicalReaction", "R")
            .link("R", "left", "P:a")
            .link("R", "left", "P:k")
            .link("R", "right", "P:a-p")
            .link("R", "right", "P:k")
            .build()
            .unwrap();
        let p = library::controls_state_change_but_is_participant(&f.registry, true).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["controller ER", "changed ER", "input PE", "output PE"]),
            vec![row(&["PR:k", "PR:a", "P:a", "P:a-p"])]
        );
    }

    #[test]
    fn test_modified_pe_simple_both_directions() {
        let f = phosphorylation().build().unwrap();
        let p = library::modified_pe_simple(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["first PE", "second PE"]),
            vec![row(&["P:a", "P:a-p"]), row(&["P:a-p", "P:a"])]
        );
    }

    #[test]
    fn test_indirect_degradation() {
        // GIVEN the phosphorylated form is degraded
        let f = phosphorylation()
            .node("Degradation", "D")
            .link("D", "left", "P:a-p")
            .build()
            .unwrap();
        let p = library::controls_degradation_indirectly(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["controller ER", "changed ER", "degrading Conv"]),
            vec![row(&["PR:k", "PR:a", "D"])]
        );
    }
}

mod act_change {
    use super::*;
    use pretty_assertions::assert_eq;

    fn activation(extra: impl FnOnce(FixtureBuilder) -> FixtureBuilder) -> Fixture {
        let base = FixtureBuilder::new()
            .protein("a")
            .form("a", "a-on")
            .node("BiochemicalReaction", "R")
            .link("R", "left", "P:a")
            .link("R", "right", "P:a-on");
        extra(base).build().unwrap()
    }

    #[test]
    fn test_gaining_control_activates() {
        // GIVEN the new form controls another reaction
        let f = activation(|b| {
            b.node("BiochemicalReaction", "R2")
                .node("Catalysis", "K")
                .link("K", "controller", "P:a-on")
                .link("K", "controlled", "R2")
        });

        // WHEN
        let on = library::act_change(&f.registry, true, HashMap::new(), HashMap::new()).unwrap();
        let off = library::act_change(&f.registry, false, HashMap::new(), HashMap::new()).unwrap();

        // THEN only the gain is found, since a-on is never consumed
        assert_eq!(
            uris(&f, &f.search(&on).unwrap(), &["input simple PE", "output simple PE"]),
            vec![row(&["P:a", "P:a-on"])]
        );
        assert!(f.search(&off).unwrap().is_empty());
    }

    #[test]
    fn test_known_modification_activates() {
        // GIVEN the new form carries a phosphorylation known to activate a
        let f = activation(|b| {
            b.node("ModificationFeature", "F")
                .attr("F", "modificationType", "phosphorylation")
                .link("P:a-on", "feature", "F")
        });
        let pr = f.id("PR:a").unwrap();
        let features = HashMap::from([(pr, HashSet::from(["phosphorylation".to_string()]))]);

        // WHEN
        let p = library::act_change(&f.registry, true, features, HashMap::new()).unwrap();
        let plain = library::act_change(&f.registry, true, HashMap::new(), HashMap::new()).unwrap();

        // THEN
        assert_eq!(
            uris(&f, &f.search(&p).unwrap(), &["input simple PE", "output simple PE"]),
            vec![row(&["P:a", "P:a-on"])]
        );
        assert!(f.search(&plain).unwrap().is_empty());
    }
}

mod effects {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_non_self_effect() {
        let f = two_step_chain().build().unwrap();
        let p = library::has_non_self_effect(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["SPE", "Inter"]),
            vec![row(&["P:e1", "R1"]), row(&["P:e2", "R2"])]
        );
    }

    #[test]
    fn test_self_effect_is_excluded() {
        let f = two_step_chain()
            .link("R1", "left", "P:e1")
            .build()
            .unwrap();
        let p = library::has_non_self_effect(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(uris(&f, &found, &["SPE", "Inter"]), vec![row(&["P:e2", "R2"])]);
    }

    #[test]
    fn test_modifier_conv() {
        let f = two_step_chain().build().unwrap();
        let p = library::modifier_conv(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["ER", "Conversion"]),
            vec![
                row(&["PR:a", "R1"]),
                row(&["PR:b", "R1"]),
                row(&["PR:b", "R2"]),
                row(&["PR:c", "R2"]),
            ]
        );
    }
}

mod expression {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_template_reaction() {
        let f = FixtureBuilder::new()
            .protein("tf")
            .protein("x")
            .node("TemplateReaction", "T")
            .link("T", "product", "P:x")
            .node("TemplateReactionRegulation", "G")
            .link("G", "controller", "P:tf")
            .link("G", "controlled", "T")
            .build()
            .unwrap();
        let p = library::expression_with_temp_reac(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["TF PR", "product PR"]),
            vec![row(&["PR:tf", "PR:x"])]
        );
    }
}

mod interactions {
    use super::*;
    use pretty_assertions::assert_eq;

    /// a and b interact; k regulates the interaction.
    fn binding() -> Fixture {
        FixtureBuilder::new()
            .protein("a")
            .protein("b")
            .protein("k")
            .node("MolecularInteraction", "I")
            .link("I", "participant", "P:a")
            .link("I", "participant", "P:b")
            .node("Modulation", "M")
            .link("M", "controller", "P:k")
            .link("M", "controlled", "I")
            .build()
            .unwrap()
    }

    #[test]
    fn test_physically_interacts() {
        let f = binding();
        let p = library::physically_interacts(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["first PR", "second ER"]),
            vec![row(&["PR:a", "PR:b"]), row(&["PR:b", "PR:a"])]
        );
    }

    #[test]
    fn test_interaction_of_any_kind() {
        let f = binding();
        let p = library::interaction(&f.registry).unwrap();

        let found = f.search(&p).unwrap();

        assert_eq!(
            uris(&f, &found, &["Protein 1", "Protein 2"]),
            vec![row(&["PR:a", "PR:b"]), row(&["PR:b", "PR:a"])]
        );
    }

    #[test]
    fn test_related_protein_refs() {
        let f = binding();

        let any = library::related_protein_ref_of_inter(&f.registry, &[]).unwrap();
        let molecular =
            library::related_protein_ref_of_inter(&f.registry, &["MolecularInteraction"]).unwrap();
        let either = library::related_protein_ref_of_inter(
            &f.registry,
            &["MolecularInteraction", "Catalysis"],
        )
        .unwrap();

        let expected = vec![
            row(&["I", "PR:a"]),
            row(&["I", "PR:b"]),
            row(&["I", "PR:k"]),
        ];
        assert_eq!(
            uris(&f, &f.search(&molecular).unwrap(), &["Interaction", "PR"]),
            expected
        );
        assert_eq!(
            uris(&f, &f.search(&either).unwrap(), &["Interaction", "PR"]),
            expected
        );

        let mut with_modulation = expected.clone();
        with_modulation.push(row(&["M", "PR:k"]));
        assert_eq!(
            uris(&f, &f.search(&any).unwrap(), &["Interaction", "PR"]),
            with_modulation
        );
    }
}
