//! Centroid-anchored rotations and reflections.
//!
//! Every transform: subtract the centroid, apply a linear map, add the
//! centroid back. The result is a new `VertexSet`; the input is untouched.
//!
//! Sampling
//! - Easy rotate: one axis and one angle from {−90°, 90°, 180°}, both from the
//!   general stream.
//! - Complex rotate: one angle per axis from {0°, 60°, 90°, 120°} (numeric
//!   stream), composed as `Rz · Ry · Rx`. All-zero draws are legal no-ops; the
//!   retry wrapper deals with them.
//! - Easy mirror: negate Z. Complex mirror: negate one axis from the general
//!   stream.

use crate::difficulty::Difficulty;
use crate::geometry::VertexSet;
use crate::rng::RandomSources;
use nalgebra::{Matrix3, Rotation3, Vector3};
use rand::Rng;

pub const EASY_ANGLES_DEG: [f64; 3] = [-90.0, 90.0, 180.0];
pub const COMPLEX_ANGLES_DEG: [f64; 4] = [0.0, 60.0, 90.0, 120.0];

/// Coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    pub fn unit(self) -> nalgebra::Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    /// Right-handed rotation matrix about this axis.
    #[inline]
    pub fn rotation(self, angle_rad: f64) -> Matrix3<f64> {
        Rotation3::from_axis_angle(&self.unit(), angle_rad).into_inner()
    }

    fn sample<R: Rng>(rng: &mut R) -> Axis {
        Axis::ALL[rng.gen_range(0..Axis::ALL.len())]
    }
}

/// `Rz(z) · Ry(y) · Rx(x)`, angles in radians.
pub fn euler_zyx(x: f64, y: f64, z: f64) -> Matrix3<f64> {
    Axis::Z.rotation(z) * Axis::Y.rotation(y) * Axis::X.rotation(x)
}

/// Apply `m` about the set's own centroid.
pub fn linear_about_centroid(vertices: &VertexSet, m: &Matrix3<f64>) -> VertexSet {
    let c = vertices.centroid();
    vertices.map(|p| m * (p - c) + c)
}

/// Reflect through the plane orthogonal to `axis` that passes through the centroid.
pub fn reflect_about_centroid(vertices: &VertexSet, axis: Axis) -> VertexSet {
    let c = vertices.centroid();
    let k = axis.index();
    vertices.map(|p| {
        let mut q = *p;
        q[k] = 2.0 * c[k] - p[k];
        q
    })
}

fn sample_rotation(difficulty: Difficulty, rng: &mut RandomSources) -> Matrix3<f64> {
    match difficulty {
        Difficulty::Easy => {
            let axis = Axis::sample(&mut rng.general);
            let deg = EASY_ANGLES_DEG[rng.general.gen_range(0..EASY_ANGLES_DEG.len())];
            axis.rotation(deg.to_radians())
        }
        Difficulty::Complex => {
            let mut draw = || {
                COMPLEX_ANGLES_DEG[rng.numeric.gen_range(0..COMPLEX_ANGLES_DEG.len())].to_radians()
            };
            let ax = draw();
            let ay = draw();
            let az = draw();
            euler_zyx(ax, ay, az)
        }
    }
}

/// Random rigid rotation about the centroid.
pub fn rotate(vertices: &VertexSet, difficulty: Difficulty, rng: &mut RandomSources) -> VertexSet {
    let m = sample_rotation(difficulty, rng);
    linear_about_centroid(vertices, &m)
}

/// Reflection about the centroid (Z at easy difficulty, random axis otherwise).
pub fn mirror(vertices: &VertexSet, difficulty: Difficulty, rng: &mut RandomSources) -> VertexSet {
    let axis = match difficulty {
        Difficulty::Easy => Axis::Z,
        Difficulty::Complex => Axis::sample(&mut rng.general),
    };
    reflect_about_centroid(vertices, axis)
}

/// Something the retry wrapper can re-apply.
pub trait Transform {
    fn apply(&self, vertices: &VertexSet, rng: &mut RandomSources) -> VertexSet;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Rotate,
    Mirror,
    /// Mirror, then rotate the mirrored set (a chiral distractor).
    MirrorRotate,
}

/// A transform family plus its difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub difficulty: Difficulty,
}

impl Operation {
    #[inline]
    pub fn rotate(difficulty: Difficulty) -> Self {
        Self {
            kind: OperationKind::Rotate,
            difficulty,
        }
    }
    #[inline]
    pub fn mirror(difficulty: Difficulty) -> Self {
        Self {
            kind: OperationKind::Mirror,
            difficulty,
        }
    }
    #[inline]
    pub fn mirror_rotate(difficulty: Difficulty) -> Self {
        Self {
            kind: OperationKind::MirrorRotate,
            difficulty,
        }
    }
}

impl Transform for Operation {
    fn apply(&self, vertices: &VertexSet, rng: &mut RandomSources) -> VertexSet {
        match self.kind {
            OperationKind::Rotate => rotate(vertices, self.difficulty, rng),
            OperationKind::Mirror => mirror(vertices, self.difficulty, rng),
            OperationKind::MirrorRotate => {
                let mirrored = mirror(vertices, self.difficulty, rng);
                rotate(&mirrored, self.difficulty, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::geometry::build_vertices;
    use nalgebra::vector;
    use proptest::prelude::*;

    const TOL: f64 = 1e-6;

    fn shape(name: &str) -> VertexSet {
        build_vertices(&Catalog::standard(), name, 1.0).unwrap()
    }

    fn distances_preserved(a: &VertexSet, b: &VertexSet) -> bool {
        let (pa, pb) = (a.points(), b.points());
        (0..pa.len()).all(|i| {
            let j = (i * 7 + 3) % pa.len();
            ((pa[i] - pa[j]).norm() - (pb[i] - pb[j]).norm()).abs() < TOL
        })
    }

    #[test]
    fn axis_rotations_match_textbook_matrices() {
        let th = std::f64::consts::FRAC_PI_2;
        let rx = Axis::X.rotation(th);
        assert!((rx * vector![0.0, 1.0, 0.0] - vector![0.0, 0.0, 1.0]).norm() < 1e-12);
        let ry = Axis::Y.rotation(th);
        assert!((ry * vector![0.0, 0.0, 1.0] - vector![1.0, 0.0, 0.0]).norm() < 1e-12);
        let rz = Axis::Z.rotation(th);
        assert!((rz * vector![1.0, 0.0, 0.0] - vector![0.0, 1.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn euler_order_is_z_y_x() {
        let (x, y, z) = (0.3, -0.7, 1.1);
        let expected = Axis::Z.rotation(z) * Axis::Y.rotation(y) * Axis::X.rotation(x);
        assert!((euler_zyx(x, y, z) - expected).amax() < 1e-12);
        assert!((euler_zyx(0.0, 0.0, 0.0) - Matrix3::identity()).amax() < 1e-12);
    }

    #[test]
    fn easy_mirror_flips_z_about_mid_plane() {
        let v = shape("Snake");
        let mut rng = RandomSources::from_seed(1);
        let m = mirror(&v, Difficulty::Easy, &mut rng);
        let cz = v.centroid().z;
        for (p, q) in v.points().iter().zip(m.points()) {
            assert_eq!(p.xy(), q.xy());
            assert!((q.z - (2.0 * cz - p.z)).abs() < 1e-12);
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        let v = shape("HookedCorner");
        for axis in Axis::ALL {
            let twice = reflect_about_centroid(&reflect_about_centroid(&v, axis), axis);
            assert!(twice.all_close(&v, 1e-12));
        }
    }

    #[test]
    fn mirror_reverses_orientation() {
        // Signed volume of the first cube's corner frame flips sign.
        let v = shape("TopPlate");
        let frame = |s: &VertexSet| {
            let p = s.points();
            Matrix3::from_columns(&[p[1] - p[0], p[3] - p[0], p[4] - p[0]]).determinant()
        };
        let mut rng = RandomSources::from_seed(3);
        let r = rotate(&v, Difficulty::Complex, &mut rng);
        let m = mirror(&v, Difficulty::Complex, &mut rng);
        assert!(frame(&v) > 0.0);
        assert!(frame(&r) > 0.0);
        assert!(frame(&m) < 0.0);
    }

    #[test]
    fn easy_rotation_uses_right_angles() {
        // Signed axis permutations keep corner offsets integral.
        let v = shape("TripleArm");
        let mut rng = RandomSources::from_seed(5);
        for _ in 0..20 {
            let r = rotate(&v, Difficulty::Easy, &mut rng);
            let p0 = r.points()[0];
            for p in r.points() {
                let d = p - p0;
                assert!((d - d.map(f64::round)).amax() < 1e-9);
            }
        }
    }

    #[test]
    fn operation_dispatch_matches_free_functions() {
        let v = shape("Zigzag");
        for d in Difficulty::ALL {
            let mut a = RandomSources::from_seed(11);
            let mut b = RandomSources::from_seed(11);
            let via_op = Operation::mirror_rotate(d).apply(&v, &mut a);
            let direct = rotate(&mirror(&v, d, &mut b), d, &mut b);
            assert!(via_op.all_close(&direct, 0.0));
        }
    }

    proptest! {
        #[test]
        fn transforms_preserve_centroid_and_distances(
            shape_idx in 0usize..7,
            seed in any::<u64>(),
            complex in any::<bool>(),
        ) {
            let catalog = Catalog::standard();
            let v = crate::geometry::shape_vertices(&catalog.shapes()[shape_idx], 1.0);
            let d = if complex { Difficulty::Complex } else { Difficulty::Easy };
            let mut rng = RandomSources::from_seed(seed);
            for op in [Operation::rotate(d), Operation::mirror(d), Operation::mirror_rotate(d)] {
                let out = op.apply(&v, &mut rng);
                prop_assert_eq!(out.len(), v.len());
                prop_assert!((out.centroid() - v.centroid()).amax() < TOL);
                prop_assert!(distances_preserved(&v, &out));
            }
        }
    }
}
