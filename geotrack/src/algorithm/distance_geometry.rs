use crate::algorithm::point_at_fraction::PointAtFraction;
use crate::{CoordinateSystem, Trajectory, TrajectoryPoint};

/// Multilevel normalized chord-length signature of a trajectory.
///
/// At each level `d` in `1..=depth`, `d + 1` control points are sampled at
/// even fractions of the trajectory (fraction 0 is the first sample,
/// fraction 1 the last) and the `d` consecutive chord lengths between them
/// are computed. Every chord is then divided by the largest chord observed
/// across all levels, so values lie in [0, 1] and the longest chord scores
/// exactly 1 — for an open trajectory that is typically the level-1
/// end-to-end chord, while a closed trajectory scores 0 there.
///
/// The result is a flat vector of length `depth · (depth + 1) / 2` in
/// level-major order. When every chord vanishes (empty, single-sample or
/// motionless trajectories), the zero vector of that length is returned.
pub trait DistanceGeometry {
    /// Signature with control points placed at even fractions of arc length.
    fn distance_geometry_by_distance(&self, depth: usize) -> Vec<f64>;

    /// Signature with control points placed at even fractions of the time
    /// span.
    fn distance_geometry_by_time(&self, depth: usize) -> Vec<f64>;
}

impl<Cs: CoordinateSystem> DistanceGeometry for Trajectory<Cs> {
    fn distance_geometry_by_distance(&self, depth: usize) -> Vec<f64> {
        signature(self, depth, |trajectory, fraction| {
            trajectory.point_at_length_fraction(fraction)
        })
    }

    fn distance_geometry_by_time(&self, depth: usize) -> Vec<f64> {
        signature(self, depth, |trajectory, fraction| {
            trajectory.point_at_time_fraction(fraction)
        })
    }
}

fn signature<Cs, F>(trajectory: &Trajectory<Cs>, depth: usize, sample: F) -> Vec<f64>
where
    Cs: CoordinateSystem,
    F: Fn(&Trajectory<Cs>, f64) -> TrajectoryPoint<Cs>,
{
    let expected_len = depth * (depth + 1) / 2;
    if trajectory.len() < 2 {
        return vec![0.0; expected_len];
    }

    let mut chords = Vec::with_capacity(expected_len);
    for level in 1..=depth {
        let controls: Vec<TrajectoryPoint<Cs>> = (0..=level)
            .map(|i| sample(trajectory, i as f64 / level as f64))
            .collect();
        for pair in controls.windows(2) {
            chords.push(pair[0].distance(&pair[1]));
        }
    }

    let longest = chords.iter().cloned().fold(0.0, f64::max);
    if longest > 0.0 {
        for chord in &mut chords {
            *chord /= longest;
        }
    }
    chords
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, Point};
    use chrono::{DateTime, Duration};

    fn track(coords: &[(f64, f64)]) -> Trajectory<Cartesian2d> {
        let start = DateTime::from_timestamp(0, 0).unwrap();
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                TrajectoryPoint::new(
                    "obj",
                    Point::xy(x, y),
                    start + Duration::seconds(i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn unit_square_by_distance() {
        let square = track(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let signature = square.distance_geometry_by_distance(4);
        assert_eq!(signature.len(), 10);

        // Raw chords: level 1 is 0 (the square is closed); level 2 crosses
        // the diagonal twice (√2, the longest chord anywhere); level 3 joins
        // (0,0), (1,1/3), (1/3,1), (0,0); level 4 walks the sides. Everything
        // is scaled by the level-2 diagonal.
        let sqrt5_3 = 5.0_f64.sqrt() / 3.0;
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        assert_relative_eq!(signature[0], 0.0);
        assert_relative_eq!(signature[1], 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(signature[2], 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(signature[3], sqrt5_3, epsilon = 1.0e-12);
        assert_relative_eq!(signature[4], 2.0 / 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(signature[5], sqrt5_3, epsilon = 1.0e-12);
        for value in &signature[6..10] {
            assert_relative_eq!(*value, inv_sqrt2, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn straight_line_levels_shrink_with_depth() {
        // On a straight line the level-d chords are each 1/d of the
        // end-to-end chord, which is the longest and normalizes to 1.
        let line = track(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let expected = [1.0, 0.5, 0.5, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
        let by_distance = line.distance_geometry_by_distance(3);
        let by_time = line.distance_geometry_by_time(3);
        for (value, want) in by_distance.iter().zip(expected) {
            assert_relative_eq!(*value, want, epsilon = 1.0e-12);
        }
        for (value, want) in by_time.iter().zip(expected) {
            assert_relative_eq!(*value, want, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn the_longest_chord_scores_one() {
        let zigzag = track(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0)]);
        for depth in 1..=6 {
            let signature = zigzag.distance_geometry_by_distance(depth);
            let max = signature.iter().cloned().fold(0.0, f64::max);
            assert_relative_eq!(max, 1.0, epsilon = 1.0e-12);
            for value in signature {
                assert!((0.0..=1.0 + 1.0e-12).contains(&value));
            }
        }
    }

    #[test]
    fn degenerate_trajectories_yield_the_zero_vector() {
        let empty = Trajectory::<Cartesian2d>::empty();
        assert_eq!(empty.distance_geometry_by_distance(4), vec![0.0; 10]);
        let single = track(&[(1.0, 1.0)]);
        assert_eq!(single.distance_geometry_by_time(3), vec![0.0; 6]);
        let motionless = track(&[(1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(motionless.distance_geometry_by_distance(2), vec![0.0; 3]);
    }
}
