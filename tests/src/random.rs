//! Random pathway generation

use pax_core::NodeId;
use pax_graph::Graph;
use pax_registry::{biopax, vocab, Registry};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{FixtureError, FixtureResult};
use crate::fixture::Fixture;

/// Sizes and densities of a generated pathway.
#[derive(Debug, Clone)]
pub struct RandomPathway {
    pub references: usize,
    pub proteins: usize,
    pub complexes: usize,
    pub conversions: usize,
    pub controls: usize,
    /// Chance that a complex and an earlier one contain each other.
    pub cycle_rate: f64,
    /// Chance that a protein is a generic member of another.
    pub generic_rate: f64,
}

impl Default for RandomPathway {
    fn default() -> Self {
        Self {
            references: 6,
            proteins: 10,
            complexes: 4,
            conversions: 5,
            controls: 4,
            cycle_rate: 0.1,
            generic_rate: 0.1,
        }
    }
}

impl RandomPathway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small graph, cheap enough for exhaustive checking.
    pub fn tiny() -> Self {
        Self {
            references: 3,
            proteins: 4,
            complexes: 2,
            conversions: 2,
            controls: 2,
            ..Self::default()
        }
    }

    /// Generate from a fixed seed.
    pub fn seeded(&self, seed: u64) -> FixtureResult<Fixture> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    /// Generate a complete pathway graph
    pub fn generate(&self, rng: &mut impl Rng) -> FixtureResult<Fixture> {
        let registry = biopax()?;
        let mut world = World {
            registry: &registry,
            graph: Graph::new(),
        };

        // 1. References and the proteins using them
        let refs = (0..self.references)
            .map(|i| world.add("ProteinReference", format!("PR:{i}")))
            .collect::<FixtureResult<Vec<_>>>()?;
        let mut entities = Vec::with_capacity(self.proteins + self.complexes);
        for i in 0..self.proteins {
            let p = world.add("Protein", format!("P:{i}"))?;
            if let Some(er) = refs.choose(rng) {
                world.link(p, "entityReference", *er)?;
            }
            entities.push(p);
        }
        for i in 0..self.proteins {
            if rng.gen_bool(self.generic_rate) {
                let j = rng.gen_range(0..self.proteins);
                if i != j {
                    world.link(entities[i], "memberPhysicalEntity", entities[j])?;
                }
            }
        }

        // 2. Complexes over earlier entities, nesting allowed
        let mut complexes = Vec::with_capacity(self.complexes);
        for i in 0..self.complexes {
            let c = world.add("Complex", format!("C:{i}"))?;
            let size = rng.gen_range(2..=3);
            for member in entities.choose_multiple(rng, size).copied().collect::<Vec<_>>() {
                world.link(c, "component", member)?;
            }
            if rng.gen_bool(self.cycle_rate) {
                if let Some(other) = complexes.choose(rng) {
                    world.link(c, "component", *other)?;
                    world.link(*other, "component", c)?;
                }
            }
            complexes.push(c);
            entities.push(c);
        }

        // 3. Conversions with random sides and direction
        let directions = [
            vocab::LEFT_TO_RIGHT,
            vocab::RIGHT_TO_LEFT,
            vocab::REVERSIBLE,
        ];
        let mut conversions = Vec::with_capacity(self.conversions);
        for i in 0..self.conversions {
            let conv = world.add("BiochemicalReaction", format!("R:{i}"))?;
            for side in ["left", "right"] {
                let size = rng.gen_range(0..=2);
                for pe in entities.choose_multiple(rng, size).copied().collect::<Vec<_>>() {
                    world.link(conv, side, pe)?;
                }
            }
            if rng.gen_bool(0.5) {
                if let Some(dir) = directions.choose(rng) {
                    world.graph.set_attr(conv, vocab::CONVERSION_DIRECTION, *dir)?;
                }
            }
            conversions.push(conv);
        }

        // 4. Catalyses, sometimes modulated
        let mut controls: Vec<NodeId> = Vec::with_capacity(self.controls);
        for i in 0..self.controls {
            let modulates = !controls.is_empty() && rng.gen_bool(0.25);
            let ctrl = if modulates {
                world.add("Modulation", format!("M:{i}"))?
            } else {
                world.add("Catalysis", format!("K:{i}"))?
            };
            if let Some(pe) = entities.choose(rng) {
                world.link(ctrl, "controller", *pe)?;
            }
            let target = if modulates {
                controls.choose(rng)
            } else {
                conversions.choose(rng)
            };
            if let Some(target) = target {
                world.link(ctrl, "controlled", *target)?;
            }
            controls.push(ctrl);
        }

        let World { graph, .. } = world;
        Ok(Fixture::new(registry, graph))
    }
}

struct World<'r> {
    registry: &'r Registry,
    graph: Graph,
}

impl World<'_> {
    fn add(&mut self, type_name: &str, uri: String) -> FixtureResult<NodeId> {
        let type_id = self
            .registry
            .get_type_id(type_name)
            .ok_or_else(|| FixtureError::unknown_type(type_name))?;
        Ok(self.graph.add_node(type_id, uri)?)
    }

    fn link(&mut self, source: NodeId, property: &str, target: NodeId) -> FixtureResult<()> {
        self.graph.link(self.registry, source, property, target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_graph() {
        let a = RandomPathway::new().seeded(7).unwrap();
        let b = RandomPathway::new().seeded(7).unwrap();

        assert_eq!(a.graph.node_count(), b.graph.node_count());
        assert_eq!(a.graph.link_count(), b.graph.link_count());
        let sorted = |f: &Fixture| {
            let mut links: Vec<_> = f.graph.links().map(|l| (l.source, l.property, l.target)).collect();
            links.sort();
            links
        };
        assert_eq!(sorted(&a), sorted(&b));
    }
}
