use chrono::{DateTime, Utc};
use log::warn;

use crate::algorithm::point_at_time::PointAtTime;
use crate::{CoordinateSystem, Trajectory};

/// The portion of a trajectory inside a closed time interval.
pub trait SubsetDuringInterval<Cs: CoordinateSystem> {
    /// Returns a new trajectory covering `[start, end]`.
    ///
    /// A reversed interval is swapped with a warning. An interval that does
    /// not intersect the trajectory's time span yields an empty trajectory.
    /// Otherwise the interval is clamped to the span, boundary samples are
    /// interpolated where the clamped endpoints do not land on existing
    /// samples, and interior samples are copied verbatim.
    ///
    /// Whether a boundary lands on an existing sample is decided on
    /// timestamps truncated to whole seconds, so sub-second jitter does not
    /// produce a duplicated boundary sample.
    ///
    /// The result carries a fresh UUID and a copy of the source trajectory's
    /// properties.
    fn subset_during_interval(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Trajectory<Cs>;
}

impl<Cs: CoordinateSystem> SubsetDuringInterval<Cs> for Trajectory<Cs> {
    fn subset_during_interval(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Trajectory<Cs> {
        let (mut t0, mut t1) = (start, end);
        if t0 > t1 {
            warn!("time interval runs backwards ({t0} > {t1}); swapping the endpoints");
            std::mem::swap(&mut t0, &mut t1);
        }

        let points = self.points();
        if points.is_empty() {
            return Trajectory::empty();
        }
        let first_ts = points[0].timestamp();
        let last_ts = points[points.len() - 1].timestamp();
        if t1 < first_ts || t0 > last_ts {
            return Trajectory::empty();
        }
        let t0 = t0.max(first_ts);
        let t1 = t1.min(last_ts);

        // First sample at or after t0.
        let start_idx = points.partition_point(|p| p.timestamp() < t0);
        let mut interior_from = start_idx;
        let opening = if start_idx < points.len()
            && points[start_idx].timestamp().timestamp() == t0.timestamp()
        {
            interior_from = start_idx + 1;
            points[start_idx].clone()
        } else {
            self.point_at_time(t0)
        };

        // One past the last sample at or before t1.
        let end_idx = points.partition_point(|p| p.timestamp() <= t1);
        let mut interior_to = end_idx;
        let closing = if end_idx > 0
            && points[end_idx - 1].timestamp().timestamp() == t1.timestamp()
        {
            interior_to = end_idx - 1;
            points[end_idx - 1].clone()
        } else {
            self.point_at_time(t1)
        };

        let mut samples = Vec::new();
        let closing_ts = closing.timestamp();
        samples.push(opening);
        if interior_to > interior_from {
            samples.extend_from_slice(&points[interior_from..interior_to]);
        }
        // A degenerate interval collapses to a single sample.
        if samples[samples.len() - 1].timestamp() != closing_ts {
            samples.push(closing);
        }

        let mut subset = Trajectory::new(samples);
        *subset.properties_mut() = self.properties().clone();
        subset
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, Point, TrajectoryPoint};

    fn sample(seconds: i64, x: f64) -> TrajectoryPoint<Cartesian2d> {
        TrajectoryPoint::new(
            "obj",
            Point::xy(x, 0.0),
            DateTime::from_timestamp(seconds, 0).unwrap(),
        )
    }

    fn ts(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    fn track() -> Trajectory<Cartesian2d> {
        Trajectory::new(vec![
            sample(0, 0.0),
            sample(100, 100.0),
            sample(200, 200.0),
            sample(300, 300.0),
        ])
    }

    #[test]
    fn boundaries_are_interpolated() {
        let subset = track().subset_during_interval(ts(50), ts(250));
        let xs: Vec<f64> = subset.iter().map(|p| p.point().x()).collect();
        assert_eq!(xs, vec![50.0, 100.0, 200.0, 250.0]);
        assert_eq!(subset.start_time(), Some(ts(50)));
        assert_eq!(subset.end_time(), Some(ts(250)));
    }

    #[test]
    fn boundaries_on_samples_are_not_duplicated() {
        let subset = track().subset_during_interval(ts(100), ts(300));
        let xs: Vec<f64> = subset.iter().map(|p| p.point().x()).collect();
        assert_eq!(xs, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn interval_is_clamped_to_the_trajectory() {
        let subset = track().subset_during_interval(ts(-500), ts(150));
        assert_eq!(subset.start_time(), Some(ts(0)));
        assert_eq!(subset.end_time(), Some(ts(150)));
    }

    #[test]
    fn reversed_interval_is_swapped() {
        let forward = track().subset_during_interval(ts(50), ts(250));
        let reversed = track().subset_during_interval(ts(250), ts(50));
        assert_eq!(forward.points(), reversed.points());
    }

    #[test]
    fn disjoint_interval_is_empty() {
        assert!(track().subset_during_interval(ts(400), ts(500)).is_empty());
        assert!(track().subset_during_interval(ts(-100), ts(-1)).is_empty());
    }

    #[test]
    fn degenerate_interval_is_a_single_sample() {
        let subset = track().subset_during_interval(ts(150), ts(150));
        assert_eq!(subset.len(), 1);
        assert_relative_eq!(subset[0].point().x(), 150.0);
    }

    #[test]
    fn subset_re_establishes_cached_lengths() {
        let subset = track().subset_during_interval(ts(50), ts(250));
        assert_eq!(subset[0].current_length(), 0.0);
        assert_relative_eq!(subset.length(), 200.0);
    }
}
