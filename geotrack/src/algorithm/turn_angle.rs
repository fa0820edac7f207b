use crate::{CoordinateSystem, Point};

/// Turn angle at vertex `b` between the incoming edge `ab` and the outgoing
/// edge `bc`, positive for a left turn.
///
/// # Units
///
/// - terrestrial points: degrees in (−180, 180]
/// - cartesian points: radians in (−π, π], measured on the x/y plane
///
/// Degenerate triples (a coincident pair among the edge endpoints) turn by
/// zero.
///
/// # Examples
///
/// ```
/// use geotrack::algorithm::signed_turn_angle;
/// use geotrack::Point;
///
/// let a = Point::lon_lat(0.0, 0.0);
/// let b = Point::lon_lat(1.0, 0.0);
/// let c = Point::lon_lat(1.0, 1.0);
/// // Eastbound, then turning north: a 90° left turn.
/// let turn = signed_turn_angle(&a, &b, &c);
/// assert!((turn - 90.0).abs() < 0.01);
/// ```
pub fn signed_turn_angle<Cs: CoordinateSystem>(
    a: &Point<Cs>,
    b: &Point<Cs>,
    c: &Point<Cs>,
) -> f64 {
    Cs::signed_turn_angle(a, b, c)
}

/// Magnitude of the turn at vertex `b`; see [`signed_turn_angle`].
pub fn unsigned_turn_angle<Cs: CoordinateSystem>(
    a: &Point<Cs>,
    b: &Point<Cs>,
    c: &Point<Cs>,
) -> f64 {
    signed_turn_angle(a, b, c).abs()
}
