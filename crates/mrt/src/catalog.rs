//! Named polycube shapes.
//!
//! A shape is an ordered list of integer lattice points, each the origin of a
//! unit cube. The catalog is immutable once built; the similarity mapping and
//! the complex-mode shape list derive from its keys, so adding a shape to
//! `STANDARD_SHAPES` needs no other change.

use crate::difficulty::Difficulty;
use std::collections::HashSet;
use std::fmt;

/// Origin of one unit cube on the integer lattice.
pub type CubeOrigin = [i32; 3];

const STANDARD_SHAPES: &[(&str, &[CubeOrigin])] = &[
    (
        "Snake",
        &[
            [0, 0, 0],
            [1, 0, 0],
            [1, 1, 0],
            [1, 1, 1],
            [1, 2, 1],
            [2, 2, 1],
            [2, 2, 2],
            [2, 3, 2],
        ],
    ),
    (
        "Zigzag",
        &[
            [0, 0, 0],
            [1, 0, 0],
            [1, 1, 0],
            [2, 1, 0],
            [2, 1, 1],
            [2, 2, 1],
            [3, 2, 1],
            [3, 2, 2],
        ],
    ),
    (
        "SnakeComplex1",
        &[
            [0, 0, 0],
            [1, 0, 0],
            [2, 0, 0],
            [2, 1, 0],
            [2, 1, 1],
            [2, 2, 1],
            [1, 2, 1],
            [1, 3, 1],
            [1, 3, 2],
        ],
    ),
    (
        "HookedCorner",
        &[
            [0, 0, 0],
            [1, 0, 0],
            [2, 0, 0],
            [0, 1, 0],
            [0, 2, 0],
            [0, 2, 1],
            [0, 2, 2],
        ],
    ),
    (
        "TopPlate",
        &[
            [0, 0, 0],
            [0, 1, 0],
            [0, 2, 0],
            [0, 2, 1],
            [1, 2, 1],
            [2, 2, 1],
        ],
    ),
    (
        "CornerStaircase",
        &[
            [0, 0, 0],
            [0, 0, 1],
            [0, 0, 2],
            [0, 1, 0],
            [1, 1, 0],
            [2, 1, 0],
            [3, 1, 0],
            [3, 2, 0],
            [3, 3, 0],
        ],
    ),
    (
        "TripleArm",
        &[
            [3, -1, 0],
            [3, -1, 1],
            [3, -1, 2],
            [0, 0, 0],
            [1, 0, 0],
            [2, 0, 0],
            [3, 0, 0],
            [0, 1, 0],
            [0, 2, 0],
        ],
    ),
];

const STANDARD_EASY: &[&str] = &[
    "Snake",
    "HookedCorner",
    "TopPlate",
    "CornerStaircase",
    "TripleArm",
];

/// One named polycube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub name: String,
    pub cubes: Vec<CubeOrigin>,
}

impl ShapeDefinition {
    pub fn new(name: impl Into<String>, cubes: Vec<CubeOrigin>) -> Self {
        Self {
            name: name.into(),
            cubes,
        }
    }
}

/// Lookup of a name the catalog does not contain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownShapeError {
    pub name: String,
}

impl fmt::Display for UnknownShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape {}", self.name)
    }
}

impl std::error::Error for UnknownShapeError {}

/// Rejected custom catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    NoEasyShapes,
    DuplicateShape { name: String },
    EmptyShape { name: String },
    UnknownEasyShape { name: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "catalog has no shapes"),
            Self::NoEasyShapes => write!(f, "catalog has no easy shapes"),
            Self::DuplicateShape { name } => write!(f, "duplicate shape {name}"),
            Self::EmptyShape { name } => write!(f, "shape {name} has no cubes"),
            Self::UnknownEasyShape { name } => {
                write!(f, "easy shape {name} is not in the catalog")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, immutable shape catalog plus the easy-mode subset.
///
/// Invariants:
/// - Names are unique and every shape has at least one cube.
/// - `easy` is a non-empty subset of the catalog names.
/// - Iteration order is insertion order; downstream shuffles depend on it.
#[derive(Clone, Debug)]
pub struct Catalog {
    shapes: Vec<ShapeDefinition>,
    easy: Vec<String>,
}

impl Catalog {
    /// The fixed seven-shape catalog.
    pub fn standard() -> Self {
        Self {
            shapes: STANDARD_SHAPES
                .iter()
                .map(|(name, cubes)| ShapeDefinition::new(*name, cubes.to_vec()))
                .collect(),
            easy: STANDARD_EASY.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn new(shapes: Vec<ShapeDefinition>, easy: Vec<String>) -> Result<Self, CatalogError> {
        if shapes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(shapes.len());
        for s in &shapes {
            if !seen.insert(s.name.as_str()) {
                return Err(CatalogError::DuplicateShape {
                    name: s.name.clone(),
                });
            }
            if s.cubes.is_empty() {
                return Err(CatalogError::EmptyShape {
                    name: s.name.clone(),
                });
            }
        }
        if easy.is_empty() {
            return Err(CatalogError::NoEasyShapes);
        }
        if let Some(missing) = easy.iter().find(|n| !seen.contains(n.as_str())) {
            return Err(CatalogError::UnknownEasyShape {
                name: missing.clone(),
            });
        }
        Ok(Self { shapes, easy })
    }

    pub fn get(&self, name: &str) -> Result<&ShapeDefinition, UnknownShapeError> {
        self.shapes
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| UnknownShapeError {
                name: name.to_string(),
            })
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.iter().any(|s| s.name == name)
    }

    pub fn shapes(&self) -> &[ShapeDefinition] {
        &self.shapes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }

    pub fn easy_shapes(&self) -> &[String] {
        &self.easy
    }

    /// Shapes eligible for the given difficulty (easy subset, or every shape).
    pub fn shapes_for(&self, difficulty: Difficulty) -> Vec<&str> {
        match difficulty {
            Difficulty::Easy => self.easy.iter().map(String::as_str).collect(),
            Difficulty::Complex => self.names().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_shape() {
        let c = Catalog::standard();
        assert_eq!(c.len(), 7);
        assert_eq!(c.shapes_for(Difficulty::Easy).len(), 5);
        assert_eq!(c.shapes_for(Difficulty::Complex).len(), 7);
        assert_eq!(c.get("TopPlate").unwrap().cubes.len(), 6);
        assert_eq!(c.get("TripleArm").unwrap().cubes[0], [3, -1, 0]);
        for name in c.easy_shapes() {
            assert!(c.contains(name));
        }
    }

    #[test]
    fn complex_list_follows_catalog_order() {
        let c = Catalog::standard();
        let names: Vec<&str> = c.names().collect();
        assert_eq!(c.shapes_for(Difficulty::Complex), names);
        assert_eq!(names[0], "Snake");
        assert_eq!(names[6], "TripleArm");
    }

    #[test]
    fn unknown_lookup_errors() {
        let err = Catalog::standard().get("Blob").unwrap_err();
        assert_eq!(err.name, "Blob");
        assert_eq!(err.to_string(), "unknown shape Blob");
    }

    #[test]
    fn custom_catalog_validation() {
        let one = || vec![ShapeDefinition::new("A", vec![[0, 0, 0]])];
        assert_eq!(
            Catalog::new(Vec::new(), vec!["A".into()]).unwrap_err(),
            CatalogError::Empty
        );
        assert_eq!(
            Catalog::new(one(), Vec::new()).unwrap_err(),
            CatalogError::NoEasyShapes
        );
        assert!(matches!(
            Catalog::new(one(), vec!["B".into()]),
            Err(CatalogError::UnknownEasyShape { .. })
        ));
        let mut dup = one();
        dup.push(ShapeDefinition::new("A", vec![[1, 0, 0]]));
        assert!(matches!(
            Catalog::new(dup, vec!["A".into()]),
            Err(CatalogError::DuplicateShape { .. })
        ));
        assert!(matches!(
            Catalog::new(vec![ShapeDefinition::new("E", vec![])], vec!["E".into()]),
            Err(CatalogError::EmptyShape { .. })
        ));
        assert_eq!(Catalog::new(one(), vec!["A".into()]).unwrap().len(), 1);
    }
}
