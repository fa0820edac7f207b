use std::fmt::Debug;

use chrono::Duration;
use glam::DVec3;

use crate::{Point, EARTH_RADIUS_KM};

/// The dispatch table that gives a coordinate system its geometric semantics.
///
/// A coordinate system is a zero-sized tag type: [`Terrestrial`],
/// [`Cartesian2d`], [`Cartesian3d`] or [`FeatureSpace<D>`](FeatureSpace).
/// All geometry in `geotrack` is parameterized by one of these tags, so the
/// same operation names (`distance`, `bearing`, `interpolate`, …) resolve to
/// per-system implementations at compile time, and mixing systems is a type
/// error rather than a runtime one.
///
/// # Units
///
/// - [`Terrestrial`]: coordinates in degrees, distances in kilometers,
///   bearings in degrees, speeds in km/h
/// - Cartesian systems: dimensionless coordinates and distances, bearings in
///   radians, speeds in units per second
pub trait CoordinateSystem:
    Copy + Clone + Debug + Default + PartialEq + Send + Sync + 'static
{
    /// Number of coordinates per point.
    const DIMENSION: usize;

    /// Short name used in diagnostics.
    const NAME: &'static str;

    /// When true, coordinate 0 is a longitude in [−180, 180] and box
    /// containment wraps across the antimeridian.
    const WRAPS_LONGITUDE: bool = false;

    /// Fixed-size coordinate storage for a point in this system.
    type Coords: Copy
        + Clone
        + Debug
        + PartialEq
        + AsRef<[f64]>
        + AsMut<[f64]>
        + Send
        + Sync
        + 'static;

    /// The all-zero coordinate tuple.
    fn zero_coords() -> Self::Coords;

    /// Distance between two points, in the system's length unit.
    fn distance(a: &Point<Self>, b: &Point<Self>) -> f64;

    /// Direction from `a` to `b`. Zero for coincident points.
    ///
    /// Terrestrial systems report the initial great-circle bearing in degrees
    /// in [0, 360); cartesian systems report `atan2(dy, dx)` in radians.
    fn bearing(a: &Point<Self>, b: &Point<Self>) -> f64;

    /// The point a fraction `t` of the way from `a` to `b`.
    ///
    /// `t` outside [0, 1] is clamped; `t = 0` and `t = 1` return exact copies
    /// of the endpoints.
    fn interpolate_position(a: &Point<Self>, b: &Point<Self>, t: f64) -> Point<Self>;

    /// Turn angle at vertex `b` between the edges `ab` and `bc`, positive
    /// for a left turn. Zero for degenerate triples.
    ///
    /// Terrestrial systems report degrees in (−180, 180]; cartesian systems
    /// report radians in (−π, π], measured on the x/y plane (the z component
    /// of the edge vectors is ignored).
    fn signed_turn_angle(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>) -> f64;

    /// Distance from `p` to the segment joining `a` and `b`.
    fn segment_distance(p: &Point<Self>, a: &Point<Self>, b: &Point<Self>) -> f64;

    /// Speed corresponding to covering `distance` in `elapsed` wall-clock
    /// time. Zero when `elapsed` is zero.
    fn speed(distance: f64, elapsed: Duration) -> f64;

    /// Centroid of a set of positions, or `None` when it is undefined (empty
    /// input, or a terrestrial set whose mean vector vanishes).
    fn position_centroid(points: &[Point<Self>]) -> Option<Point<Self>>;
}

/// Longitude/latitude degrees on a spherical earth of radius
/// [`EARTH_RADIUS_KM`]. Distances in kilometers, speeds in km/h.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Terrestrial;

/// Dimensionless flat 2-D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cartesian2d;

/// Dimensionless flat 3-D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cartesian3d;

/// Dimensionless flat `D`-space for feature vectors, 1 ≤ `D` ≤ 30.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureSpace<const D: usize>;

/// Wraps a longitude in degrees into [−180, 180).
pub fn normalize_longitude(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

const MICROS_PER_SECOND: f64 = 1.0e6;
const MICROS_PER_HOUR: f64 = 3.6e9;

fn elapsed_micros(elapsed: Duration) -> f64 {
    elapsed
        .num_microseconds()
        .map(|us| us as f64)
        .unwrap_or_else(|| elapsed.num_milliseconds() as f64 * 1.0e3)
}

impl Terrestrial {
    /// Central angle between two surface points, in radians.
    ///
    /// Uses the stable form
    /// `acos(cos Δlat − 2·cos lat₁·cos lat₂·sin²(Δlon/2))`.
    pub fn central_angle(a: &Point<Terrestrial>, b: &Point<Terrestrial>) -> f64 {
        let (lon1, lat1) = a.to_radians();
        let (lon2, lat2) = b.to_radians();
        let half_dlon = ((lon2 - lon1) / 2.0).sin();
        let cos_angle =
            (lat2 - lat1).cos() - 2.0 * lat1.cos() * lat2.cos() * half_dlon * half_dlon;
        cos_angle.clamp(-1.0, 1.0).acos()
    }

    /// Initial course from `a` to `b` in radians from north, in (−π, π].
    pub fn initial_course(a: &Point<Terrestrial>, b: &Point<Terrestrial>) -> f64 {
        let (lon1, lat1) = a.to_radians();
        let (lon2, lat2) = b.to_radians();
        let dlon = lon2 - lon1;
        let s = lat2.cos() * dlon.sin();
        let c = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        s.atan2(c)
    }
}

impl CoordinateSystem for Terrestrial {
    const DIMENSION: usize = 2;
    const NAME: &'static str = "terrestrial";
    const WRAPS_LONGITUDE: bool = true;

    type Coords = [f64; 2];

    fn zero_coords() -> [f64; 2] {
        [0.0; 2]
    }

    fn distance(a: &Point<Self>, b: &Point<Self>) -> f64 {
        Self::central_angle(a, b) * EARTH_RADIUS_KM
    }

    fn bearing(a: &Point<Self>, b: &Point<Self>) -> f64 {
        if a == b {
            return 0.0;
        }
        let degrees = Self::initial_course(a, b).to_degrees();
        (degrees + 360.0) % 360.0
    }

    fn interpolate_position(a: &Point<Self>, b: &Point<Self>, t: f64) -> Point<Self> {
        if t <= 0.0 {
            return *a;
        }
        if t >= 1.0 {
            return *b;
        }
        let sigma12 = Self::central_angle(a, b);
        if sigma12 == 0.0 {
            return *a;
        }

        // Parameterize the great circle through `a` and `b` by its ascending
        // node: the longitude at which it crosses the equator, and its
        // bearing there.
        let (lon1, lat1) = a.to_radians();
        let alpha1 = Self::initial_course(a, b);
        let sin_alpha0 = (alpha1.sin() * lat1.cos()).clamp(-1.0, 1.0);
        let alpha0 = sin_alpha0.asin();
        let sigma01 = lat1.sin().atan2(lat1.cos() * alpha1.cos());
        let lon01 = (alpha0.sin() * sigma01.sin()).atan2(sigma01.cos());
        let node_lon = lon1 - lon01;

        let sigma = sigma01 + t * sigma12;
        let lat = (alpha0.cos() * sigma.sin()).clamp(-1.0, 1.0).asin();
        let lon = node_lon + (alpha0.sin() * sigma.sin()).atan2(sigma.cos());
        Point::lon_lat(normalize_longitude(lon.to_degrees()), lat.to_degrees())
    }

    fn signed_turn_angle(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>) -> f64 {
        if a == b || b == c {
            return 0.0;
        }
        // Compass bearings grow clockwise, so a left turn lowers the
        // outgoing bearing.
        let turn = Self::bearing(a, b) - Self::bearing(b, c);
        let mut wrapped = turn % 360.0;
        if wrapped > 180.0 {
            wrapped -= 360.0;
        } else if wrapped <= -180.0 {
            wrapped += 360.0;
        }
        wrapped
    }

    fn segment_distance(p: &Point<Self>, a: &Point<Self>, b: &Point<Self>) -> f64 {
        if a == b {
            return Self::distance(p, a);
        }
        let va = a.to_unit_vector();
        let vb = b.to_unit_vector();
        let vp = p.to_unit_vector();

        let normal = va.cross(vb);
        if normal.length_squared() < 1.0e-24 {
            // Antipodal endpoints define no unique circle; fall back to the
            // nearer endpoint.
            return Self::distance(p, a).min(Self::distance(p, b));
        }
        let normal = normal.normalize();

        let off_plane = vp.dot(normal);
        let foot = vp - normal * off_plane;
        if foot.length_squared() < 1.0e-24 {
            // `p` is a pole of the circle: every point of the arc is a
            // quarter turn away.
            return std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM;
        }
        let foot = foot.normalize();

        let arc = va.angle_between(vb);
        if va.angle_between(foot) <= arc && vb.angle_between(foot) <= arc {
            vp.dot(foot).clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
        } else {
            Self::distance(p, a).min(Self::distance(p, b))
        }
    }

    fn speed(distance: f64, elapsed: Duration) -> f64 {
        let micros = elapsed_micros(elapsed);
        if micros == 0.0 {
            0.0
        } else {
            distance * MICROS_PER_HOUR / micros
        }
    }

    fn position_centroid(points: &[Point<Self>]) -> Option<Point<Self>> {
        if points.is_empty() {
            return None;
        }
        let sum = points
            .iter()
            .fold(DVec3::ZERO, |acc, p| acc + p.to_unit_vector());
        let mean = sum / points.len() as f64;
        if mean.length() < 1.0e-12 {
            return None;
        }
        Some(Point::from_unit_vector(mean.normalize()))
    }
}

fn euclidean_distance<Cs: CoordinateSystem>(a: &Point<Cs>, b: &Point<Cs>) -> f64 {
    a.coords()
        .iter()
        .zip(b.coords())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn lerp_position<Cs: CoordinateSystem>(a: &Point<Cs>, b: &Point<Cs>, t: f64) -> Point<Cs> {
    if t <= 0.0 {
        return *a;
    }
    if t >= 1.0 {
        return *b;
    }
    let mut coords = Cs::zero_coords();
    for ((out, x), y) in coords.as_mut().iter_mut().zip(a.coords()).zip(b.coords()) {
        *out = x + t * (y - x);
    }
    Point::from_coords(coords)
}

fn coord_or_zero<Cs: CoordinateSystem>(p: &Point<Cs>, index: usize) -> f64 {
    if index < Cs::DIMENSION {
        p.coord(index)
    } else {
        0.0
    }
}

fn planar_bearing<Cs: CoordinateSystem>(a: &Point<Cs>, b: &Point<Cs>) -> f64 {
    if a == b {
        return 0.0;
    }
    let dx = coord_or_zero(b, 0) - coord_or_zero(a, 0);
    let dy = coord_or_zero(b, 1) - coord_or_zero(a, 1);
    dy.atan2(dx)
}

// Turn angles project edges onto the x/y plane, so a climbing segment does
// not register as a turn.
fn planar_turn_angle<Cs: CoordinateSystem>(
    a: &Point<Cs>,
    b: &Point<Cs>,
    c: &Point<Cs>,
) -> f64 {
    let ux = coord_or_zero(b, 0) - coord_or_zero(a, 0);
    let uy = coord_or_zero(b, 1) - coord_or_zero(a, 1);
    let vx = coord_or_zero(c, 0) - coord_or_zero(b, 0);
    let vy = coord_or_zero(c, 1) - coord_or_zero(b, 1);
    if (ux == 0.0 && uy == 0.0) || (vx == 0.0 && vy == 0.0) {
        return 0.0;
    }
    let cross = ux * vy - uy * vx;
    let dot = ux * vx + uy * vy;
    cross.atan2(dot)
}

fn euclidean_segment_distance<Cs: CoordinateSystem>(
    p: &Point<Cs>,
    a: &Point<Cs>,
    b: &Point<Cs>,
) -> f64 {
    let mut length_sq = 0.0;
    let mut offset_dot = 0.0;
    for i in 0..Cs::DIMENSION {
        let edge = b.coord(i) - a.coord(i);
        length_sq += edge * edge;
        offset_dot += (p.coord(i) - a.coord(i)) * edge;
    }
    if length_sq == 0.0 {
        return euclidean_distance(p, a);
    }
    let t = (offset_dot / length_sq).clamp(0.0, 1.0);
    let foot = lerp_position(a, b, t);
    euclidean_distance(p, &foot)
}

fn mean_centroid<Cs: CoordinateSystem>(points: &[Point<Cs>]) -> Option<Point<Cs>> {
    if points.is_empty() {
        return None;
    }
    let mut sums = Cs::zero_coords();
    for p in points {
        for (sum, c) in sums.as_mut().iter_mut().zip(p.coords()) {
            *sum += c;
        }
    }
    let n = points.len() as f64;
    for sum in sums.as_mut() {
        *sum /= n;
    }
    Some(Point::from_coords(sums))
}

fn per_second_speed(distance: f64, elapsed: Duration) -> f64 {
    let micros = elapsed_micros(elapsed);
    if micros == 0.0 {
        0.0
    } else {
        distance * MICROS_PER_SECOND / micros
    }
}

macro_rules! cartesian_coordinate_system {
    ($system:ty, $dimension:expr, $name:expr) => {
        impl CoordinateSystem for $system {
            const DIMENSION: usize = $dimension;
            const NAME: &'static str = $name;

            type Coords = [f64; $dimension];

            fn zero_coords() -> Self::Coords {
                [0.0; $dimension]
            }

            fn distance(a: &Point<Self>, b: &Point<Self>) -> f64 {
                euclidean_distance(a, b)
            }

            fn bearing(a: &Point<Self>, b: &Point<Self>) -> f64 {
                planar_bearing(a, b)
            }

            fn interpolate_position(
                a: &Point<Self>,
                b: &Point<Self>,
                t: f64,
            ) -> Point<Self> {
                lerp_position(a, b, t)
            }

            fn signed_turn_angle(
                a: &Point<Self>,
                b: &Point<Self>,
                c: &Point<Self>,
            ) -> f64 {
                planar_turn_angle(a, b, c)
            }

            fn segment_distance(
                p: &Point<Self>,
                a: &Point<Self>,
                b: &Point<Self>,
            ) -> f64 {
                euclidean_segment_distance(p, a, b)
            }

            fn speed(distance: f64, elapsed: Duration) -> f64 {
                per_second_speed(distance, elapsed)
            }

            fn position_centroid(points: &[Point<Self>]) -> Option<Point<Self>> {
                mean_centroid(points)
            }
        }
    };
}

cartesian_coordinate_system!(Cartesian2d, 2, "cartesian2d");
cartesian_coordinate_system!(Cartesian3d, 3, "cartesian3d");

impl<const D: usize> CoordinateSystem for FeatureSpace<D> {
    const DIMENSION: usize = {
        assert!(D >= 1 && D <= 30, "feature space dimension must lie in 1..=30");
        D
    };
    const NAME: &'static str = "feature-space";

    type Coords = [f64; D];

    fn zero_coords() -> [f64; D] {
        [0.0; D]
    }

    fn distance(a: &Point<Self>, b: &Point<Self>) -> f64 {
        euclidean_distance(a, b)
    }

    fn bearing(a: &Point<Self>, b: &Point<Self>) -> f64 {
        planar_bearing(a, b)
    }

    fn interpolate_position(a: &Point<Self>, b: &Point<Self>, t: f64) -> Point<Self> {
        lerp_position(a, b, t)
    }

    fn signed_turn_angle(a: &Point<Self>, b: &Point<Self>, c: &Point<Self>) -> f64 {
        planar_turn_angle(a, b, c)
    }

    fn segment_distance(p: &Point<Self>, a: &Point<Self>, b: &Point<Self>) -> f64 {
        euclidean_segment_distance(p, a, b)
    }

    fn speed(distance: f64, elapsed: Duration) -> f64 {
        per_second_speed(distance, elapsed)
    }

    fn position_centroid(points: &[Point<Self>]) -> Option<Point<Self>> {
        mean_centroid(points)
    }
}
