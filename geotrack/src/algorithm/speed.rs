use crate::{CoordinateSystem, TrajectoryPoint};

/// Average speed between two samples: the distance between their positions
/// over the elapsed time from `a` to `b`.
///
/// # Units
///
/// - terrestrial points: km/h
/// - cartesian points: coordinate units per second
///
/// Returns zero when the timestamps coincide; a negative elapsed time yields
/// a negative speed.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Duration};
/// use geotrack::algorithm::speed_between;
/// use geotrack::{Point, TrajectoryPoint};
///
/// let start = DateTime::from_timestamp(0, 0).unwrap();
/// let a = TrajectoryPoint::new("car", Point::xy(0.0, 0.0), start);
/// let b = TrajectoryPoint::new(
///     "car",
///     Point::xy(30.0, 40.0),
///     start + Duration::seconds(10),
/// );
/// assert_eq!(speed_between(&a, &b), 5.0);
/// ```
pub fn speed_between<Cs: CoordinateSystem>(
    a: &TrajectoryPoint<Cs>,
    b: &TrajectoryPoint<Cs>,
) -> f64 {
    Cs::speed(a.distance(b), b.timestamp() - a.timestamp())
}
