use chrono::{DateTime, Utc};

use crate::{CoordinateSystem, Trajectory, TrajectoryPoint};

/// Interpolated sample of a trajectory at an arbitrary instant.
pub trait PointAtTime<Cs: CoordinateSystem> {
    /// The sample the object would have produced at `time`.
    ///
    /// Instants before the first sample clone the first sample, instants
    /// after the last clone the last, and an instant exactly on a sample
    /// reproduces that sample. Interior instants interpolate between the
    /// bracketing pair: position along the great circle or segment,
    /// timestamp and real properties linearly.
    ///
    /// An empty trajectory yields the default sample at the coordinate
    /// origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{DateTime, Duration};
    /// use geotrack::algorithm::PointAtTime;
    /// use geotrack::{Point, Trajectory, TrajectoryPoint};
    ///
    /// let start = DateTime::from_timestamp(0, 0).unwrap();
    /// let trajectory = Trajectory::new(vec![
    ///     TrajectoryPoint::new("car", Point::xy(0.0, 0.0), start),
    ///     TrajectoryPoint::new(
    ///         "car",
    ///         Point::xy(100.0, 0.0),
    ///         start + Duration::seconds(100),
    ///     ),
    /// ]);
    ///
    /// let sample = trajectory.point_at_time(start + Duration::seconds(30));
    /// assert_eq!(sample.point(), &Point::xy(30.0, 0.0));
    /// assert_eq!(sample.timestamp(), start + Duration::seconds(30));
    /// ```
    fn point_at_time(&self, time: DateTime<Utc>) -> TrajectoryPoint<Cs>;
}

impl<Cs: CoordinateSystem> PointAtTime<Cs> for Trajectory<Cs> {
    fn point_at_time(&self, time: DateTime<Utc>) -> TrajectoryPoint<Cs> {
        let points = self.points();
        if points.is_empty() {
            return TrajectoryPoint::default();
        }
        let first = &points[0];
        let last = &points[points.len() - 1];
        if time <= first.timestamp() {
            return first.clone();
        }
        if time >= last.timestamp() {
            return last.clone();
        }

        // First index with a timestamp strictly after `time`; the guards
        // above pin it to the interior.
        let after_idx = points.partition_point(|p| p.timestamp() <= time);
        let before = &points[after_idx - 1];
        let after = &points[after_idx];
        let span = (after.timestamp() - before.timestamp())
            .num_microseconds()
            .unwrap_or(i64::MAX) as f64;
        let offset = (time - before.timestamp())
            .num_microseconds()
            .unwrap_or(i64::MAX) as f64;
        TrajectoryPoint::interpolate(before, after, offset / span)
    }
}
