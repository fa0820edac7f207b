use std::ops::Index;
use std::slice;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{BoundingBox, CoordinateSystem, PropertyMap, TrajectoryPoint};

/// An ordered sequence of samples for one moving object.
///
/// # Invariants
///
/// - every point carries the same object id;
/// - timestamps are non-decreasing;
/// - `points[0].current_length() == 0` and each subsequent cached length
///   adds the distance to the previous point.
///
/// The invariants are established by the constructor (which recomputes the
/// cached lengths) and by the
/// [assembler](https://docs.rs/geotrack/latest/geotrack/assemble/), and every
/// operation in `geotrack` preserves them. Code that mutates points in place
/// must call [`Trajectory::update_current_lengths`] afterwards.
///
/// Subset operations produce new trajectories; a trajectory owns its points
/// and is shared by cloning, never by aliasing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Cs::Coords: serde::Serialize",
        deserialize = "Cs::Coords: serde::Deserialize<'de>"
    ))
)]
pub struct Trajectory<Cs: CoordinateSystem> {
    points: Vec<TrajectoryPoint<Cs>>,
    properties: PropertyMap,
    uuid: Uuid,
}

impl<Cs: CoordinateSystem> Trajectory<Cs> {
    /// Builds a trajectory from samples, recomputing the cached cumulative
    /// lengths and assigning a fresh UUID.
    pub fn new(points: Vec<TrajectoryPoint<Cs>>) -> Self {
        let mut trajectory = Trajectory {
            points,
            properties: PropertyMap::new(),
            uuid: Uuid::new_v4(),
        };
        trajectory.update_current_lengths();
        trajectory
    }

    /// An empty trajectory.
    pub fn empty() -> Self {
        Trajectory::new(Vec::new())
    }

    /// Recomputes every point's cached cumulative arc length.
    pub fn update_current_lengths(&mut self) {
        let mut total = 0.0;
        for i in 0..self.points.len() {
            if i > 0 {
                total += self.points[i - 1].distance(&self.points[i]);
            }
            self.points[i].set_current_length(total);
        }
    }

    /// Appends a sample, extending the cached length.
    pub fn push(&mut self, mut point: TrajectoryPoint<Cs>) {
        let length = match self.points.last() {
            Some(last) => last.current_length() + last.distance(&point),
            None => 0.0,
        };
        point.set_current_length(length);
        self.points.push(point);
    }

    pub fn points(&self) -> &[TrajectoryPoint<Cs>] {
        &self.points
    }

    pub fn iter(&self) -> slice::Iter<'_, TrajectoryPoint<Cs>> {
        self.points.iter()
    }

    /// Mutable access to the samples.
    ///
    /// Moving a sample's position invalidates the cached cumulative lengths;
    /// call [`Trajectory::update_current_lengths`] afterwards.
    pub fn points_mut(&mut self) -> &mut [TrajectoryPoint<Cs>] {
        &mut self.points
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, TrajectoryPoint<Cs>> {
        self.points.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint<Cs>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint<Cs>> {
        self.points.last()
    }

    /// The object id shared by all samples, or `None` when empty.
    pub fn object_id(&self) -> Option<&str> {
        self.points.first().map(TrajectoryPoint::object_id)
    }

    /// The opaque 128-bit identity of this trajectory.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn set_uuid(&mut self, uuid: Uuid) {
        self.uuid = uuid;
    }

    /// Trajectory-level metadata.
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Timestamp of the first sample.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(TrajectoryPoint::timestamp)
    }

    /// Timestamp of the last sample.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(TrajectoryPoint::timestamp)
    }

    /// Elapsed time between first and last sample.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Total arc length: the cached cumulative length of the last sample.
    pub fn length(&self) -> f64 {
        self.points
            .last()
            .map(TrajectoryPoint::current_length)
            .unwrap_or(0.0)
    }

    /// The tight axis-aligned box around all sample positions.
    pub fn bounding_box(&self) -> Option<BoundingBox<Cs>> {
        BoundingBox::from_points(self.points.iter().map(TrajectoryPoint::point))
    }

    /// Consumes the trajectory, returning its samples.
    pub fn into_points(self) -> Vec<TrajectoryPoint<Cs>> {
        self.points
    }
}

impl<Cs: CoordinateSystem> Default for Trajectory<Cs> {
    fn default() -> Self {
        Trajectory::empty()
    }
}

impl<Cs: CoordinateSystem> Index<usize> for Trajectory<Cs> {
    type Output = TrajectoryPoint<Cs>;

    fn index(&self, index: usize) -> &TrajectoryPoint<Cs> {
        &self.points[index]
    }
}

impl<Cs: CoordinateSystem> FromIterator<TrajectoryPoint<Cs>> for Trajectory<Cs> {
    fn from_iter<I: IntoIterator<Item = TrajectoryPoint<Cs>>>(iter: I) -> Self {
        Trajectory::new(iter.into_iter().collect())
    }
}

impl<Cs: CoordinateSystem> IntoIterator for Trajectory<Cs> {
    type Item = TrajectoryPoint<Cs>;
    type IntoIter = std::vec::IntoIter<TrajectoryPoint<Cs>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, Cs: CoordinateSystem> IntoIterator for &'a Trajectory<Cs> {
    type Item = &'a TrajectoryPoint<Cs>;
    type IntoIter = slice::Iter<'a, TrajectoryPoint<Cs>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
