use chrono::{DateTime, Duration, Utc};

use crate::algorithm::point_at_time::PointAtTime;
use crate::{CoordinateSystem, Trajectory, TrajectoryPoint};

/// Interpolated samples at a fraction of a trajectory's arc length or of its
/// time span.
///
/// Fractions are clamped to [0, 1]; fraction 0 reproduces the first sample
/// and fraction 1 the last. Empty trajectories yield the default sample at
/// the coordinate origin.
pub trait PointAtFraction<Cs: CoordinateSystem> {
    /// The sample the given fraction of the total arc length from the start.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{DateTime, Duration};
    /// use geotrack::algorithm::PointAtFraction;
    /// use geotrack::{Point, Trajectory, TrajectoryPoint};
    ///
    /// let start = DateTime::from_timestamp(0, 0).unwrap();
    /// let trajectory = Trajectory::new(vec![
    ///     TrajectoryPoint::new("car", Point::xy(0.0, 0.0), start),
    ///     TrajectoryPoint::new("car", Point::xy(8.0, 0.0), start + Duration::seconds(10)),
    ///     TrajectoryPoint::new("car", Point::xy(10.0, 0.0), start + Duration::seconds(60)),
    /// ]);
    ///
    /// let mid = trajectory.point_at_length_fraction(0.5);
    /// assert_eq!(mid.point(), &Point::xy(5.0, 0.0));
    /// ```
    fn point_at_length_fraction(&self, fraction: f64) -> TrajectoryPoint<Cs>;

    /// The sample the given fraction of the time span from the start,
    /// equivalent to `point_at_time(time_at_fraction(fraction))`.
    fn point_at_time_fraction(&self, fraction: f64) -> TrajectoryPoint<Cs>;

    /// The instant the given fraction of the way from the first to the last
    /// timestamp, or `None` for an empty trajectory.
    fn time_at_fraction(&self, fraction: f64) -> Option<DateTime<Utc>>;
}

impl<Cs: CoordinateSystem> PointAtFraction<Cs> for Trajectory<Cs> {
    fn point_at_length_fraction(&self, fraction: f64) -> TrajectoryPoint<Cs> {
        let points = self.points();
        if points.is_empty() {
            return TrajectoryPoint::default();
        }
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction == 0.0 || self.length() == 0.0 {
            return points[0].clone();
        }
        if fraction == 1.0 {
            return points[points.len() - 1].clone();
        }

        let target = fraction * self.length();
        let after_idx = points
            .partition_point(|p| p.current_length() <= target)
            .min(points.len() - 1);
        let before = &points[after_idx - 1];
        let after = &points[after_idx];
        let span = after.current_length() - before.current_length();
        if span == 0.0 {
            return after.clone();
        }
        TrajectoryPoint::interpolate(before, after, (target - before.current_length()) / span)
    }

    fn point_at_time_fraction(&self, fraction: f64) -> TrajectoryPoint<Cs> {
        match self.time_at_fraction(fraction) {
            Some(time) => self.point_at_time(time),
            None => TrajectoryPoint::default(),
        }
    }

    fn time_at_fraction(&self, fraction: f64) -> Option<DateTime<Utc>> {
        let start = self.start_time()?;
        let end = self.end_time()?;
        let fraction = fraction.clamp(0.0, 1.0);
        let span = (end - start).num_microseconds().unwrap_or(i64::MAX) as f64;
        Some(start + Duration::microseconds((fraction * span).round() as i64))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, Point};

    fn sample(seconds: i64, x: f64, y: f64) -> TrajectoryPoint<Cartesian2d> {
        TrajectoryPoint::new(
            "obj",
            Point::xy(x, y),
            DateTime::from_timestamp(seconds, 0).unwrap(),
        )
    }

    #[test]
    fn endpoints_are_exact() {
        let trajectory = Trajectory::new(vec![
            sample(0, 0.0, 0.0),
            sample(10, 4.0, 0.0),
            sample(20, 4.0, 4.0),
        ]);
        assert_eq!(&trajectory.point_at_length_fraction(0.0), &trajectory[0]);
        assert_eq!(&trajectory.point_at_length_fraction(1.0), &trajectory[2]);
        assert_eq!(&trajectory.point_at_time_fraction(0.0), &trajectory[0]);
        assert_eq!(&trajectory.point_at_time_fraction(1.0), &trajectory[2]);
    }

    #[test]
    fn length_fraction_walks_the_path() {
        let trajectory = Trajectory::new(vec![
            sample(0, 0.0, 0.0),
            sample(10, 4.0, 0.0),
            sample(20, 4.0, 4.0),
        ]);
        // Total length 8: fraction 0.75 is 6 units along, one third of the
        // way up the second leg.
        let p = trajectory.point_at_length_fraction(0.75);
        assert_relative_eq!(p.point().x(), 4.0);
        assert_relative_eq!(p.point().y(), 2.0);
    }

    #[test]
    fn time_fraction_and_length_fraction_differ_with_uneven_speed() {
        // Fast first leg, slow second leg.
        let trajectory = Trajectory::new(vec![
            sample(0, 0.0, 0.0),
            sample(10, 8.0, 0.0),
            sample(110, 10.0, 0.0),
        ]);
        let by_length = trajectory.point_at_length_fraction(0.5);
        let by_time = trajectory.point_at_time_fraction(0.5);
        assert_relative_eq!(by_length.point().x(), 5.0);
        assert_relative_eq!(by_time.point().x(), 8.9);
    }

    #[test]
    fn time_at_fraction_blends_the_span() {
        let trajectory = Trajectory::new(vec![sample(100, 0.0, 0.0), sample(200, 1.0, 0.0)]);
        assert_eq!(
            trajectory.time_at_fraction(0.25),
            Some(DateTime::from_timestamp(125, 0).unwrap())
        );
        assert!(Trajectory::<Cartesian2d>::empty()
            .time_at_fraction(0.5)
            .is_none());
    }

    #[test]
    fn fractions_are_clamped() {
        let trajectory = Trajectory::new(vec![sample(0, 0.0, 0.0), sample(10, 1.0, 0.0)]);
        assert_eq!(&trajectory.point_at_length_fraction(-3.0), &trajectory[0]);
        assert_eq!(&trajectory.point_at_length_fraction(7.0), &trajectory[1]);
    }
}
