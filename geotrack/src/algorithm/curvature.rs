use crate::algorithm::turn_angle::{signed_turn_angle, unsigned_turn_angle};
use crate::{CoordinateSystem, Trajectory};

/// Accumulated turning of a trajectory.
pub trait Curvature {
    /// Sum of the signed turn angles at every interior vertex: positive for
    /// a net leftward track, negative for rightward, near zero for straight
    /// or balanced tracks. Degrees for terrestrial trajectories, radians for
    /// cartesian ones.
    fn total_curvature(&self) -> f64;

    /// Number of interior vertices whose unsigned turn angle meets or
    /// exceeds `threshold` (same unit as [`Curvature::total_curvature`]).
    /// A threshold near a half turn counts course reversals.
    fn turn_arounds(&self, threshold: f64) -> usize;
}

impl<Cs: CoordinateSystem> Curvature for Trajectory<Cs> {
    fn total_curvature(&self) -> f64 {
        interior_turns(self).map(|(a, b, c)| signed_turn_angle(a, b, c)).sum()
    }

    fn turn_arounds(&self, threshold: f64) -> usize {
        interior_turns(self)
            .filter(|(a, b, c)| unsigned_turn_angle(a, b, c) >= threshold)
            .count()
    }
}

fn interior_turns<Cs: CoordinateSystem>(
    trajectory: &Trajectory<Cs>,
) -> impl Iterator<Item = (&crate::Point<Cs>, &crate::Point<Cs>, &crate::Point<Cs>)> {
    trajectory
        .points()
        .windows(3)
        .map(|w| (w[0].point(), w[1].point(), w[2].point()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, Point, TrajectoryPoint};
    use chrono::{DateTime, Duration};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn track(coords: &[(f64, f64)]) -> Trajectory<Cartesian2d> {
        let start = DateTime::from_timestamp(0, 0).unwrap();
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                TrajectoryPoint::new("obj", Point::xy(x, y), start + Duration::seconds(i as i64))
            })
            .collect()
    }

    #[test]
    fn square_loop_turns_three_quarters() {
        let square = track(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        // Three interior vertices of a counterclockwise square.
        assert_relative_eq!(square.total_curvature(), 3.0 * FRAC_PI_2, epsilon = 1.0e-12);
    }

    #[test]
    fn out_and_back_has_one_turn_around() {
        let shuttle = track(&[(0.0, 0.0), (5.0, 0.0), (0.1, 0.0)]);
        assert_eq!(shuttle.turn_arounds(0.9 * PI), 1);
        let straight = track(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert_eq!(straight.turn_arounds(0.9 * PI), 0);
    }

    #[test]
    fn short_tracks_have_no_curvature() {
        assert_eq!(track(&[(0.0, 0.0), (1.0, 0.0)]).total_curvature(), 0.0);
        assert_eq!(Trajectory::<Cartesian2d>::empty().total_curvature(), 0.0);
    }
}
