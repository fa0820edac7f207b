use crate::algorithm::centroid::Centroid;
use crate::{CoordinateSystem, Trajectory};

/// Spread of a trajectory's samples around their centroid.
pub trait RadiusOfGyration {
    /// `√(Σ distance(p, centroid)² / (N − 1))` over the sample positions, in
    /// the coordinate system's length unit. Zero for trajectories with fewer
    /// than two samples or no defined centroid.
    fn radius_of_gyration(&self) -> f64;
}

impl<Cs: CoordinateSystem> RadiusOfGyration for Trajectory<Cs> {
    fn radius_of_gyration(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        let Some(centroid) = self.centroid() else {
            return 0.0;
        };
        let sum_of_squares: f64 = self
            .iter()
            .map(|p| {
                let d = Cs::distance(p.point(), &centroid);
                d * d
            })
            .sum();
        (sum_of_squares / (self.len() - 1) as f64).sqrt()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, Point, TrajectoryPoint};
    use chrono::{DateTime, Duration};

    fn square_track() -> Trajectory<Cartesian2d> {
        let start = DateTime::from_timestamp(0, 0).unwrap();
        [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)]
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
    fn unit_cross_has_known_gyration() {
        // Four points at distance 1 from the origin: √(4 / 3).
        let expected = (4.0_f64 / 3.0).sqrt();
        assert_relative_eq!(
            square_track().radius_of_gyration(),
            expected,
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn degenerate_trajectories_have_zero_gyration() {
        assert_eq!(Trajectory::<Cartesian2d>::empty().radius_of_gyration(), 0.0);
        let single: Trajectory<Cartesian2d> = Trajectory::new(vec![TrajectoryPoint::new(
            "obj",
            Point::xy(3.0, 4.0),
            DateTime::from_timestamp(0, 0).unwrap(),
        )]);
        assert_eq!(single.radius_of_gyration(), 0.0);
    }
}
