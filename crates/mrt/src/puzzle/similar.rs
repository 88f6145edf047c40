//! Cross-family "similar object" distractors.
//!
//! The mapping lists, for every catalog shape, all other shapes in catalog
//! order. Queries shuffle a copy with the general stream; the mapping itself
//! never changes after construction.

use crate::catalog::Catalog;
use crate::cfg::GeneratorCfg;
use crate::difficulty::Difficulty;
use crate::geometry::{shape_vertices, VertexSet};
use crate::retry::until_distinct;
use crate::rng::RandomSources;
use crate::transform::Operation;
use rand::seq::SliceRandom;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct SimilarityMapping {
    neighbours: HashMap<String, Vec<String>>,
}

impl SimilarityMapping {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let neighbours = catalog
            .names()
            .map(|key| {
                let others = catalog
                    .names()
                    .filter(|n| *n != key)
                    .map(str::to_string)
                    .collect();
                (key.to_string(), others)
            })
            .collect();
        Self { neighbours }
    }

    /// Other shapes for `name`, in catalog order; empty when unknown.
    pub fn neighbours(&self, name: &str) -> &[String] {
        self.neighbours
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn shuffled(&self, name: &str, rng: &mut RandomSources) -> Vec<&str> {
        let mut out: Vec<&str> = self.neighbours(name).iter().map(String::as_str).collect();
        out.shuffle(&mut rng.general);
        out
    }
}

/// Accept a candidate unless it has the same vertex count *and* matches the
/// base row for row.
#[inline]
fn differs_from(candidate: &VertexSet, base: &VertexSet, atol: f64) -> bool {
    !candidate.same_len(base) || !candidate.all_close(base, atol)
}

/// First rotated neighbour shape that differs from `base_vertices`.
///
/// `None` when the shape has no neighbours or none is accepted; the caller
/// substitutes another distractor.
pub fn pick_similar(
    catalog: &Catalog,
    mapping: &SimilarityMapping,
    base_name: &str,
    base_vertices: &VertexSet,
    cfg: &GeneratorCfg,
    difficulty: Difficulty,
    rng: &mut RandomSources,
) -> Option<VertexSet> {
    let rotate = Operation::rotate(difficulty);
    for name in mapping.shuffled(base_name, rng) {
        let Ok(shape) = catalog.get(name) else {
            continue;
        };
        let vertices = shape_vertices(shape, cfg.cube_size);
        let candidate = until_distinct(&rotate, &vertices, cfg.max_attempts, cfg.atol, rng);
        if differs_from(&candidate, base_vertices, cfg.atol) {
            return Some(candidate);
        }
        tracing::debug!(base = base_name, similar = name, "similar candidate rejected");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeDefinition;
    use crate::geometry::build_vertices;

    #[test]
    fn mapping_lists_every_other_shape() {
        let catalog = Catalog::standard();
        let m = SimilarityMapping::from_catalog(&catalog);
        for name in catalog.names() {
            let n = m.neighbours(name);
            assert_eq!(n.len(), catalog.len() - 1);
            assert!(n.iter().all(|s| s != name));
        }
        assert!(m.neighbours("Nope").is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation_and_leaves_mapping_intact() {
        let catalog = Catalog::standard();
        let m = SimilarityMapping::from_catalog(&catalog);
        let before = m.neighbours("Snake").to_vec();
        let mut rng = RandomSources::from_seed(4);
        let mut shuffled = m.shuffled("Snake", &mut rng);
        shuffled.sort_unstable();
        let mut sorted: Vec<&str> = before.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        assert_eq!(shuffled, sorted);
        assert_eq!(m.neighbours("Snake"), before.as_slice());
    }

    #[test]
    fn picks_from_the_only_neighbour() {
        let catalog = Catalog::new(
            vec![
                ShapeDefinition::new("Bar", vec![[0, 0, 0], [1, 0, 0], [2, 0, 0]]),
                ShapeDefinition::new("Ell", vec![[0, 0, 0], [1, 0, 0], [1, 1, 0]]),
            ],
            vec!["Bar".into()],
        )
        .unwrap();
        let m = SimilarityMapping::from_catalog(&catalog);
        let cfg = GeneratorCfg::default();
        let base = build_vertices(&catalog, "Bar", cfg.cube_size).unwrap();
        let mut rng = RandomSources::from_seed(2);
        let picked = pick_similar(&catalog, &m, "Bar", &base, &cfg, Difficulty::Easy, &mut rng)
            .expect("neighbour accepted");
        assert_eq!(picked.len(), base.len());
        assert!(!picked.all_close(&base, cfg.atol));
    }

    #[test]
    fn lonely_shape_has_no_similar() {
        let catalog = Catalog::new(
            vec![ShapeDefinition::new("Solo", vec![[0, 0, 0], [0, 0, 1]])],
            vec!["Solo".into()],
        )
        .unwrap();
        let m = SimilarityMapping::from_catalog(&catalog);
        let cfg = GeneratorCfg::default();
        let base = build_vertices(&catalog, "Solo", 1.0).unwrap();
        let mut rng = RandomSources::from_seed(0);
        assert!(pick_similar(&catalog, &m, "Solo", &base, &cfg, Difficulty::Complex, &mut rng).is_none());
    }

    #[test]
    fn size_difference_alone_is_enough() {
        let a = build_vertices(&Catalog::standard(), "TopPlate", 1.0).unwrap();
        let b = build_vertices(&Catalog::standard(), "Snake", 1.0).unwrap();
        assert!(differs_from(&a, &b, 1e-6));
        assert!(!differs_from(&a, &a.clone(), 1e-6));
    }
}
