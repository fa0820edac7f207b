//! Streaming assembly of raw samples into trajectories.
//!
//! The assembler is a lazy, pull-based iterator adapter: it consumes an
//! iterator of [`TrajectoryPoint`]s in whatever order the ingest produced
//! them, keeps one open run per object id, and yields a [`Trajectory`]
//! whenever a run closes. Nothing is buffered beyond the open runs, and the
//! consumer's pull drives all progress.
//!
//! A run closes between two consecutive samples of the same object when
//!
//! - their time gap exceeds the separation time, or
//! - their distance exceeds the separation distance, or
//! - the timestamp runs backwards (logged and treated as a break rather
//!   than an error).
//!
//! Closed runs shorter than the minimum length are quietly dropped. When
//! the input ends, every remaining run closes, in object-id order.
//!
//! Within one object id, trajectories are emitted in ascending order of
//! their last sample's timestamp.

use std::collections::{BTreeMap, VecDeque};
use std::mem;

use chrono::Duration;
use log::{debug, warn};

use crate::{CoordinateSystem, Trajectory, TrajectoryPoint};

/// Configuration for splitting a sample stream into trajectories.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Duration};
/// use geotrack::assemble::TrajectoryAssembler;
/// use geotrack::{Point, TrajectoryPoint};
///
/// let start = DateTime::from_timestamp(0, 0).unwrap();
/// let sample = |seconds: i64, lon: f64| {
///     TrajectoryPoint::new(
///         "X",
///         Point::lon_lat(lon, 0.0),
///         start + Duration::seconds(seconds),
///     )
/// };
///
/// // A 3400-second silence splits the stream in two.
/// let assembler = TrajectoryAssembler::new()
///     .with_separation_time(Duration::minutes(30))
///     .with_separation_distance(100.0)
///     .with_minimum_length(2);
/// let trajectories: Vec<_> = assembler
///     .assemble(vec![
///         sample(0, 0.0),
///         sample(60, 0.1),
///         sample(4000, 0.2),
///         sample(4060, 0.3),
///     ])
///     .collect();
///
/// assert_eq!(trajectories.len(), 2);
/// assert_eq!(trajectories[0].len(), 2);
/// assert_eq!(trajectories[1].len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TrajectoryAssembler {
    separation_time: Duration,
    separation_distance: f64,
    minimum_length: usize,
}

impl Default for TrajectoryAssembler {
    fn default() -> Self {
        TrajectoryAssembler {
            separation_time: Duration::minutes(30),
            separation_distance: 100.0,
            minimum_length: 2,
        }
    }
}

impl TrajectoryAssembler {
    pub fn new() -> Self {
        TrajectoryAssembler::default()
    }

    /// Maximum silence between consecutive samples of one object.
    pub fn with_separation_time(mut self, separation_time: Duration) -> Self {
        self.separation_time = separation_time;
        self
    }

    /// Maximum jump between consecutive samples of one object, in the
    /// coordinate system's length unit (kilometers for terrestrial data).
    pub fn with_separation_distance(mut self, separation_distance: f64) -> Self {
        self.separation_distance = separation_distance;
        self
    }

    /// Minimum number of samples for a run to become a trajectory; shorter
    /// runs are discarded.
    pub fn with_minimum_length(mut self, minimum_length: usize) -> Self {
        self.minimum_length = minimum_length;
        self
    }

    /// Lazily assembles an input stream into trajectories.
    pub fn assemble<Cs, I>(&self, points: I) -> Assemble<Cs, I::IntoIter>
    where
        Cs: CoordinateSystem,
        I: IntoIterator<Item = TrajectoryPoint<Cs>>,
    {
        Assemble {
            settings: self.clone(),
            input: Some(points.into_iter()),
            runs: BTreeMap::new(),
            ready: VecDeque::new(),
        }
    }
}

/// Iterator returned by [`TrajectoryAssembler::assemble`].
pub struct Assemble<Cs: CoordinateSystem, I> {
    settings: TrajectoryAssembler,
    input: Option<I>,
    runs: BTreeMap<String, Vec<TrajectoryPoint<Cs>>>,
    ready: VecDeque<Trajectory<Cs>>,
}

impl<Cs, I> Assemble<Cs, I>
where
    Cs: CoordinateSystem,
    I: Iterator<Item = TrajectoryPoint<Cs>>,
{
    fn observe(&mut self, point: TrajectoryPoint<Cs>) {
        let run = self
            .runs
            .entry(point.object_id().to_owned())
            .or_default();

        let mut closed = None;
        if let Some(last) = run.last() {
            let gap = point.timestamp() - last.timestamp();
            let split = if gap < Duration::zero() {
                warn!(
                    "object `{}` went back in time ({} after {}); starting a new run",
                    point.object_id(),
                    point.timestamp(),
                    last.timestamp(),
                );
                true
            } else {
                gap > self.settings.separation_time
                    || last.distance(&point) > self.settings.separation_distance
            };
            if split {
                closed = Some(mem::take(run));
            }
        }
        run.push(point);

        if let Some(points) = closed {
            self.close_run(points);
        }
    }

    fn close_run(&mut self, points: Vec<TrajectoryPoint<Cs>>) {
        if points.len() >= self.settings.minimum_length {
            self.ready.push_back(Trajectory::new(points));
        } else {
            debug!(
                "dropping a {}-sample run for object `{}`: below the minimum length {}",
                points.len(),
                points.first().map(|p| p.object_id()).unwrap_or(""),
                self.settings.minimum_length,
            );
        }
    }

    fn close_all(&mut self) {
        let runs = mem::take(&mut self.runs);
        for (_, points) in runs {
            self.close_run(points);
        }
    }
}

impl<Cs, I> Iterator for Assemble<Cs, I>
where
    Cs: CoordinateSystem,
    I: Iterator<Item = TrajectoryPoint<Cs>>,
{
    type Item = Trajectory<Cs>;

    fn next(&mut self) -> Option<Trajectory<Cs>> {
        loop {
            if let Some(trajectory) = self.ready.pop_front() {
                return Some(trajectory);
            }
            let input = self.input.as_mut()?;
            match input.next() {
                Some(point) => self.observe(point),
                None => {
                    self.input = None;
                    self.close_all();
                    if self.ready.is_empty() {
                        return None;
                    }
                }
            }
        }
    }
}
