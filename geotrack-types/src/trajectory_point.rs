use chrono::{DateTime, Duration, Utc};

use crate::{CoordinateSystem, Point, PropertyMap, PropertyValue};

/// A [`Point`] observed for a named object at a UTC instant, with attached
/// metadata.
///
/// `current_length` caches the cumulative arc length from the start of the
/// owning [`Trajectory`](crate::Trajectory); it is zero for a point that does
/// not belong to a trajectory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Cs::Coords: serde::Serialize",
        deserialize = "Cs::Coords: serde::Deserialize<'de>"
    ))
)]
pub struct TrajectoryPoint<Cs: CoordinateSystem> {
    point: Point<Cs>,
    object_id: String,
    timestamp: DateTime<Utc>,
    properties: PropertyMap,
    current_length: f64,
}

impl<Cs: CoordinateSystem> TrajectoryPoint<Cs> {
    /// Creates a trajectory point with an empty property map.
    pub fn new(object_id: impl Into<String>, point: Point<Cs>, timestamp: DateTime<Utc>) -> Self {
        TrajectoryPoint {
            point,
            object_id: object_id.into(),
            timestamp,
            properties: PropertyMap::new(),
            current_length: 0.0,
        }
    }

    /// The position.
    pub fn point(&self) -> &Point<Cs> {
        &self.point
    }

    /// Mutable access to the position.
    ///
    /// Moving a point invalidates the owning trajectory's cached lengths;
    /// callers mutating in place must re-establish them with
    /// [`Trajectory::update_current_lengths`](crate::Trajectory::update_current_lengths).
    pub fn point_mut(&mut self) -> &mut Point<Cs> {
        &mut self.point
    }

    /// The id of the moving object this sample belongs to.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn set_object_id(&mut self, object_id: impl Into<String>) {
        self.object_id = object_id.into();
    }

    /// The UTC instant of the observation, microsecond precision.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = timestamp;
    }

    /// Metadata attached to this sample.
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Cumulative arc length from the start of the owning trajectory, in the
    /// coordinate system's length unit.
    pub fn current_length(&self) -> f64 {
        self.current_length
    }

    /// Overwrites the cached cumulative length. Normally maintained by
    /// [`Trajectory`](crate::Trajectory); exposed for code that assembles
    /// trajectories by hand.
    pub fn set_current_length(&mut self, length: f64) {
        self.current_length = length;
    }

    /// Distance between the positions of two samples.
    pub fn distance(&self, other: &Self) -> f64 {
        Cs::distance(&self.point, &other.point)
    }

    /// The sample a fraction `t` (clamped to [0, 1]) of the way from `a` to
    /// `b`.
    ///
    /// The position follows the coordinate system's interpolation; the
    /// timestamp, the cached length and every real-valued property are
    /// blended linearly. Properties of any other tag (string, integer,
    /// timestamp, null) are copied from the earlier sample, as is the object
    /// id. Keys present only on `b` are dropped.
    pub fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        if t <= 0.0 {
            return a.clone();
        }
        if t >= 1.0 {
            return b.clone();
        }

        let micros = (b.timestamp - a.timestamp)
            .num_microseconds()
            .unwrap_or(i64::MAX);
        let timestamp = a.timestamp + Duration::microseconds((t * micros as f64).round() as i64);

        let mut properties = PropertyMap::new();
        for (key, value) in &a.properties {
            let blended = match (value, b.properties.get(key)) {
                (PropertyValue::Real(x), Some(PropertyValue::Real(y))) => {
                    PropertyValue::Real(x + t * (y - x))
                }
                _ => value.clone(),
            };
            properties.set(key.clone(), blended);
        }

        TrajectoryPoint {
            point: Cs::interpolate_position(&a.point, &b.point, t),
            object_id: a.object_id.clone(),
            timestamp,
            properties,
            current_length: a.current_length + t * (b.current_length - a.current_length),
        }
    }
}

impl<Cs: CoordinateSystem> Default for TrajectoryPoint<Cs> {
    /// An anonymous sample at the coordinate origin and the Unix epoch.
    fn default() -> Self {
        TrajectoryPoint::new("", Point::zero(), DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Cartesian2d;

    fn at(seconds: i64, x: f64, y: f64) -> TrajectoryPoint<Cartesian2d> {
        TrajectoryPoint::new(
            "test",
            Point::xy(x, y),
            DateTime::from_timestamp(seconds, 0).unwrap(),
        )
    }

    #[test]
    fn interpolation_blends_position_and_time() {
        let a = at(0, 0.0, 0.0);
        let b = at(100, 100.0, 0.0);
        let mid = TrajectoryPoint::interpolate(&a, &b, 0.3);
        assert_relative_eq!(mid.point().x(), 30.0);
        assert_relative_eq!(mid.point().y(), 0.0);
        assert_eq!(mid.timestamp().timestamp(), 30);
        assert_eq!(mid.object_id(), "test");
    }

    #[test]
    fn interpolation_blends_real_properties_only() {
        let mut a = at(0, 0.0, 0.0);
        let mut b = at(10, 1.0, 0.0);
        a.properties_mut().set("heading", 90.0);
        b.properties_mut().set("heading", 100.0);
        a.properties_mut().set("carrier", "GT");
        b.properties_mut().set("carrier", "XX");
        a.properties_mut().set("flags", PropertyValue::Null);
        b.properties_mut().set("only_on_b", 7.0);

        let mid = TrajectoryPoint::interpolate(&a, &b, 0.5);
        assert_eq!(mid.properties().get_real("heading"), Ok(95.0));
        assert_eq!(mid.properties().get_string("carrier"), Ok("GT"));
        assert!(mid.properties().is_null("flags"));
        assert!(mid.properties().get("only_on_b").is_none());
    }

    #[test]
    fn interpolation_endpoints_are_clones() {
        let a = at(0, 0.0, 0.0);
        let b = at(10, 1.0, 1.0);
        assert_eq!(TrajectoryPoint::interpolate(&a, &b, 0.0), a);
        assert_eq!(TrajectoryPoint::interpolate(&a, &b, 1.0), b);
    }

    #[test]
    fn blends_cached_length() {
        let mut a = at(0, 0.0, 0.0);
        let mut b = at(10, 10.0, 0.0);
        a.set_current_length(5.0);
        b.set_current_length(15.0);
        let mid = TrajectoryPoint::interpolate(&a, &b, 0.5);
        assert_relative_eq!(mid.current_length(), 10.0);
    }
}
