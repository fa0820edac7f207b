use crate::algorithm::speed::speed_between;
use crate::{CoordinateSystem, Trajectory};

/// Derived per-sample scalars, stored as real properties.
///
/// Annotations write into each sample's property map under a caller-chosen
/// key, where downstream analytics (and interpolation, which blends real
/// properties linearly) can pick them up. Annotating does not move any
/// point, so the cached cumulative lengths stay valid.
pub trait Annotate {
    /// Stores each sample's speed: the average speed over the segment
    /// arriving at the sample, with the first sample taking the speed of
    /// the departing segment. A lone sample gets zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{DateTime, Duration};
    /// use geotrack::algorithm::Annotate;
    /// use geotrack::{Point, Trajectory, TrajectoryPoint};
    ///
    /// let start = DateTime::from_timestamp(0, 0).unwrap();
    /// let mut trajectory = Trajectory::new(vec![
    ///     TrajectoryPoint::new("car", Point::xy(0.0, 0.0), start),
    ///     TrajectoryPoint::new("car", Point::xy(10.0, 0.0), start + Duration::seconds(5)),
    /// ]);
    /// trajectory.annotate_speed("speed");
    /// assert_eq!(trajectory[0].properties().get_real("speed"), Ok(2.0));
    /// assert_eq!(trajectory[1].properties().get_real("speed"), Ok(2.0));
    /// ```
    fn annotate_speed(&mut self, key: &str);

    /// Stores each sample's heading: the bearing of the departing segment,
    /// with the last sample keeping the bearing it arrived on. A lone
    /// sample gets zero.
    fn annotate_heading(&mut self, key: &str);

    /// Stores each sample's progress: the fraction of the total duration
    /// elapsed at the sample, in [0, 1]. Zero-duration trajectories are all
    /// at progress zero.
    fn annotate_progress(&mut self, key: &str);
}

impl<Cs: CoordinateSystem> Annotate for Trajectory<Cs> {
    fn annotate_speed(&mut self, key: &str) {
        let speeds: Vec<f64> = (0..self.len())
            .map(|i| match i {
                0 if self.len() > 1 => speed_between(&self[0], &self[1]),
                0 => 0.0,
                _ => speed_between(&self[i - 1], &self[i]),
            })
            .collect();
        store(self, key, speeds);
    }

    fn annotate_heading(&mut self, key: &str) {
        let headings: Vec<f64> = (0..self.len())
            .map(|i| {
                if i + 1 < self.len() {
                    self[i].point().bearing(self[i + 1].point())
                } else if i > 0 {
                    self[i - 1].point().bearing(self[i].point())
                } else {
                    0.0
                }
            })
            .collect();
        store(self, key, headings);
    }

    fn annotate_progress(&mut self, key: &str) {
        let total = self
            .duration()
            .and_then(|d| d.num_microseconds())
            .unwrap_or(0);
        let start = self.start_time();
        let fractions: Vec<f64> = self
            .iter()
            .map(|point| match (start, total) {
                (Some(start), total) if total > 0 => {
                    let elapsed = (point.timestamp() - start)
                        .num_microseconds()
                        .unwrap_or(0);
                    elapsed as f64 / total as f64
                }
                _ => 0.0,
            })
            .collect();
        store(self, key, fractions);
    }
}

fn store<Cs: CoordinateSystem>(trajectory: &mut Trajectory<Cs>, key: &str, values: Vec<f64>) {
    for (point, value) in trajectory.iter_mut().zip(values) {
        point.properties_mut().set(key, value);
    }
}
