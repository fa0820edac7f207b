use std::marker::PhantomData;

#[cfg(any(feature = "approx", test))]
use approx::{AbsDiffEq, RelativeEq};
use glam::DVec3;

use crate::{Cartesian2d, Cartesian3d, CoordinateSystem, FeatureSpace, Terrestrial};

/// A position with `Cs::DIMENSION` real coordinates.
///
/// Coordinate 0 is the longitude/x axis, coordinate 1 the latitude/y axis
/// and coordinate 2 (where present) the z axis. Terrestrial coordinates are
/// in degrees; conversions to radians are explicit.
///
/// Points are cheap value types. The coordinate system is part of the type,
/// so a terrestrial point can never be passed where a cartesian one is
/// expected.
///
/// # Examples
///
/// ```
/// use geotrack_types::Point;
///
/// let abq = Point::lon_lat(-106.6100, 35.1107);
/// let nyc = Point::lon_lat(-74.0059, 40.7127);
/// assert!((abq.distance(&nyc) - 2909.0).abs() < 1.0);
///
/// let origin = Point::xy(0.0, 0.0);
/// let unit = Point::xy(3.0, 4.0);
/// assert_eq!(origin.distance(&unit), 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Cs::Coords: serde::Serialize",
        deserialize = "Cs::Coords: serde::Deserialize<'de>"
    ))
)]
pub struct Point<Cs: CoordinateSystem> {
    coords: Cs::Coords,
    system: PhantomData<Cs>,
}

impl<Cs: CoordinateSystem> Point<Cs> {
    /// Creates a point from its raw coordinate tuple.
    pub fn from_coords(coords: Cs::Coords) -> Self {
        Point {
            coords,
            system: PhantomData,
        }
    }

    /// The origin of the coordinate system.
    pub fn zero() -> Self {
        Point::from_coords(Cs::zero_coords())
    }

    /// Coordinates as a slice of length `Cs::DIMENSION`.
    pub fn coords(&self) -> &[f64] {
        self.coords.as_ref()
    }

    /// Mutable coordinate access.
    pub fn coords_mut(&mut self) -> &mut [f64] {
        self.coords.as_mut()
    }

    /// The coordinate at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Cs::DIMENSION`.
    pub fn coord(&self, index: usize) -> f64 {
        self.coords.as_ref()[index]
    }

    /// Replaces the coordinate at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Cs::DIMENSION`.
    pub fn set_coord(&mut self, index: usize, value: f64) {
        self.coords.as_mut()[index] = value;
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        Cs::DIMENSION
    }

    /// Distance to `other` in the system's length unit (kilometers for
    /// terrestrial points).
    pub fn distance(&self, other: &Self) -> f64 {
        Cs::distance(self, other)
    }

    /// Direction towards `other`: initial great-circle bearing in degrees
    /// for terrestrial points, `atan2(dy, dx)` in radians for cartesian
    /// ones. Zero for coincident points.
    pub fn bearing(&self, other: &Self) -> f64 {
        Cs::bearing(self, other)
    }

    /// The point a fraction `t` (clamped to [0, 1]) of the way to `other`,
    /// along the great circle for terrestrial points and the straight
    /// segment otherwise.
    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        Cs::interpolate_position(self, other, t)
    }
}

impl<Cs: CoordinateSystem> Default for Point<Cs> {
    fn default() -> Self {
        Point::zero()
    }
}

impl Point<Terrestrial> {
    /// Creates a terrestrial point from a longitude and latitude in degrees.
    ///
    /// The constructors are named by convention (`lon_lat`, `xy`, `xyz`) so
    /// the coordinate system of a bare call is never in doubt.
    pub fn lon_lat(lon: f64, lat: f64) -> Self {
        Point::from_coords([lon, lat])
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.coord(0)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.coord(1)
    }

    /// Sets the longitude in degrees.
    pub fn set_lon(&mut self, lon: f64) {
        self.set_coord(0, lon);
    }

    /// Sets the latitude in degrees.
    pub fn set_lat(&mut self, lat: f64) {
        self.set_coord(1, lat);
    }

    /// `(longitude, latitude)` in radians.
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lon().to_radians(), self.lat().to_radians())
    }

    /// The unit vector from the sphere's center through this point, with x
    /// towards (0°E, 0°N), y towards (90°E, 0°N) and z towards the north
    /// pole.
    pub fn to_unit_vector(&self) -> DVec3 {
        let (lon, lat) = self.to_radians();
        DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    /// The surface point under a direction vector. The vector need not be
    /// normalized, but must not be zero.
    pub fn from_unit_vector(v: DVec3) -> Self {
        let lon = v.y.atan2(v.x);
        let lat = (v.z / v.length()).clamp(-1.0, 1.0).asin();
        Point::lon_lat(lon.to_degrees(), lat.to_degrees())
    }
}

impl Point<Cartesian2d> {
    /// Creates a flat 2-D point.
    pub fn xy(x: f64, y: f64) -> Self {
        Point::from_coords([x, y])
    }

    pub fn x(&self) -> f64 {
        self.coord(0)
    }

    pub fn y(&self) -> f64 {
        self.coord(1)
    }
}

impl Point<Cartesian3d> {
    /// Creates a flat 3-D point.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Point::from_coords([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.coord(0)
    }

    pub fn y(&self) -> f64 {
        self.coord(1)
    }

    pub fn z(&self) -> f64 {
        self.coord(2)
    }
}

impl<const D: usize> Point<FeatureSpace<D>> {
    /// Creates a feature vector from its components.
    pub fn new(coords: [f64; D]) -> Self {
        Point::from_coords(coords)
    }
}

impl From<(f64, f64)> for Point<Terrestrial> {
    fn from(lon_lat: (f64, f64)) -> Self {
        Point::lon_lat(lon_lat.0, lon_lat.1)
    }
}

impl From<(f64, f64)> for Point<Cartesian2d> {
    fn from(xy: (f64, f64)) -> Self {
        Point::xy(xy.0, xy.1)
    }
}

impl From<(f64, f64, f64)> for Point<Cartesian3d> {
    fn from(xyz: (f64, f64, f64)) -> Self {
        Point::xyz(xyz.0, xyz.1, xyz.2)
    }
}

impl<const D: usize> From<[f64; D]> for Point<FeatureSpace<D>> {
    fn from(coords: [f64; D]) -> Self {
        Point::new(coords)
    }
}

#[cfg(any(feature = "approx", test))]
impl<Cs: CoordinateSystem> AbsDiffEq for Point<Cs> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.coords()
            .iter()
            .zip(other.coords())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

#[cfg(any(feature = "approx", test))]
impl<Cs: CoordinateSystem> RelativeEq for Point<Cs> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.coords()
            .iter()
            .zip(other.coords())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
