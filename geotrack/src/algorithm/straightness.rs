use crate::{CoordinateSystem, Trajectory};

/// How directly a trajectory moves from its start to its end.
pub trait Straightness {
    /// Distance between the first and last sample positions, ignoring the
    /// path taken. Zero for trajectories with fewer than two samples.
    fn end_to_end_distance(&self) -> f64;

    /// `end_to_end_distance / length`, in [0, 1]: 1 for a straight run, near
    /// 0 for a track that returns to its origin. Trajectories of zero length
    /// count as straight.
    fn straightness(&self) -> f64;
}

impl<Cs: CoordinateSystem> Straightness for Trajectory<Cs> {
    fn end_to_end_distance(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.len() > 1 => first.distance(last),
            _ => 0.0,
        }
    }

    fn straightness(&self) -> f64 {
        let length = self.length();
        if length == 0.0 {
            1.0
        } else {
            self.end_to_end_distance() / length
        }
    }
}
