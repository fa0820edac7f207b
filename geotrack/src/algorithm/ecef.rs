use glam::DVec3;

use crate::{Error, Point, Terrestrial, TrajectoryPoint};

/// WGS-84 semi-major axis in kilometers.
pub const WGS84_SEMI_MAJOR_AXIS_KM: f64 = 6378.137;

/// WGS-84 first eccentricity.
pub const WGS84_ECCENTRICITY: f64 = 8.181_919_084_262_2e-2;

/// Kilometers per international foot.
pub const KM_PER_FOOT: f64 = 1.0 / 3280.839_895_013_123;

/// Kilometers per meter.
pub const KM_PER_METER: f64 = 1.0e-3;

/// Unit of an altitude property, used when lifting surface points into
/// earth-centered coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AltitudeUnits {
    Kilometers,
    #[default]
    Meters,
    Feet,
}

impl AltitudeUnits {
    /// Converts an altitude in this unit to kilometers.
    pub fn to_km(self, altitude: f64) -> f64 {
        match self {
            AltitudeUnits::Kilometers => altitude,
            AltitudeUnits::Meters => altitude * KM_PER_METER,
            AltitudeUnits::Feet => altitude * KM_PER_FOOT,
        }
    }
}

/// Earth-centered earth-fixed coordinates, in kilometers, of a geodetic
/// position on the WGS-84 ellipsoid.
///
/// Longitude and latitude are in radians here; use [`ecef`] for points
/// carrying degrees.
pub fn ecef_from_km(lon_rad: f64, lat_rad: f64, altitude_km: f64) -> DVec3 {
    let e2 = WGS84_ECCENTRICITY * WGS84_ECCENTRICITY;
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let prime_vertical = WGS84_SEMI_MAJOR_AXIS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    DVec3::new(
        (prime_vertical + altitude_km) * cos_lat * lon_rad.cos(),
        (prime_vertical + altitude_km) * cos_lat * lon_rad.sin(),
        (prime_vertical * (1.0 - e2) + altitude_km) * sin_lat,
    )
}

/// Earth-centered coordinates of a terrestrial point at the given altitude
/// in kilometers.
pub fn ecef(point: &Point<Terrestrial>, altitude_km: f64) -> DVec3 {
    let (lon, lat) = point.to_radians();
    ecef_from_km(lon, lat, altitude_km)
}

/// Earth-centered coordinates of a sample whose altitude lives in a real
/// property.
///
/// Fails with [`Error::PropertyDoesNotExist`] when the property is absent
/// and [`Error::PropertyTypeMismatch`] when it is not a real value.
pub fn point_ecef(
    point: &TrajectoryPoint<Terrestrial>,
    altitude_property: &str,
    units: AltitudeUnits,
) -> Result<DVec3, Error> {
    let altitude = point.properties().get_real(altitude_property)?;
    Ok(ecef(point.point(), units.to_km(altitude)))
}

/// [`point_ecef`] with the altitude property in feet.
pub fn ecef_from_feet(
    point: &TrajectoryPoint<Terrestrial>,
    altitude_property: &str,
) -> Result<DVec3, Error> {
    point_ecef(point, altitude_property, AltitudeUnits::Feet)
}

/// [`point_ecef`] with the altitude property in meters.
pub fn ecef_from_meters(
    point: &TrajectoryPoint<Terrestrial>,
    altitude_property: &str,
) -> Result<DVec3, Error> {
    point_ecef(point, altitude_property, AltitudeUnits::Meters)
}

/// Longitude and latitude under an earth-centered position, discarding
/// altitude.
///
/// Geodetic latitude has no closed form; a few fixed-point rounds converge
/// well below the microdegree for any position near the ellipsoid.
pub fn geodetic_from_ecef(position: DVec3) -> Point<Terrestrial> {
    let e2 = WGS84_ECCENTRICITY * WGS84_ECCENTRICITY;
    let lon = position.y.atan2(position.x);
    let equatorial = (position.x * position.x + position.y * position.y).sqrt();
    if equatorial == 0.0 {
        let lat = if position.z >= 0.0 { 90.0 } else { -90.0 };
        return Point::lon_lat(lon.to_degrees(), lat);
    }
    let mut lat = position.z.atan2(equatorial * (1.0 - e2));
    for _ in 0..5 {
        let sin_lat = lat.sin();
        let prime_vertical =
            WGS84_SEMI_MAJOR_AXIS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        lat = (position.z + e2 * prime_vertical * sin_lat).atan2(equatorial);
    }
    Point::lon_lat(lon.to_degrees(), lat.to_degrees())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn equator_prime_meridian() {
        let position = ecef_from_km(0.0, 0.0, 0.0);
        assert_relative_eq!(position.x, WGS84_SEMI_MAJOR_AXIS_KM);
        assert_relative_eq!(position.y, 0.0);
        assert_relative_eq!(position.z, 0.0);
    }

    #[test]
    fn pole_uses_the_polar_radius() {
        let position = ecef_from_km(0.0, std::f64::consts::FRAC_PI_2, 0.0);
        let e2 = WGS84_ECCENTRICITY * WGS84_ECCENTRICITY;
        let polar = WGS84_SEMI_MAJOR_AXIS_KM / (1.0 - e2).sqrt() * (1.0 - e2);
        assert!(position.x.abs() < 1.0e-9);
        assert_relative_eq!(position.z, polar, epsilon = 1.0e-9);
    }

    #[test]
    fn altitude_extends_along_the_normal() {
        let ground = ecef(&Point::lon_lat(45.0, 45.0), 0.0);
        let aloft = ecef(&Point::lon_lat(45.0, 45.0), 10.0);
        assert_relative_eq!((aloft - ground).length(), 10.0, epsilon = 1.0e-9);
    }

    #[test]
    fn geodetic_round_trip() {
        for &(lon, lat, alt) in &[
            (0.0, 0.0, 0.0),
            (-106.61, 35.11, 0.0),
            (150.0, -80.0, 0.0),
            (10.0, 50.0, 0.0),
        ] {
            let back = geodetic_from_ecef(ecef(&Point::lon_lat(lon, lat), alt));
            assert_relative_eq!(back.lon(), lon, epsilon = 1.0e-9);
            assert_relative_eq!(back.lat(), lat, epsilon = 1.0e-6);
        }
    }

    #[test]
    fn altitude_property_units() {
        let mut sample = TrajectoryPoint::new(
            "plane",
            Point::lon_lat(0.0, 0.0),
            DateTime::from_timestamp(0, 0).unwrap(),
        );
        sample.properties_mut().set("altitude", 32808.398_950_131_23);

        let feet = ecef_from_feet(&sample, "altitude").unwrap();
        assert_relative_eq!(feet.x, WGS84_SEMI_MAJOR_AXIS_KM + 10.0, epsilon = 1.0e-9);

        let meters = ecef_from_meters(&sample, "altitude").unwrap();
        assert_relative_eq!(
            meters.x,
            WGS84_SEMI_MAJOR_AXIS_KM + 32.808_398_950_131_23,
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn missing_altitude_is_an_error() {
        let sample = TrajectoryPoint::new(
            "plane",
            Point::lon_lat(0.0, 0.0),
            DateTime::from_timestamp(0, 0).unwrap(),
        );
        assert_eq!(
            ecef_from_feet(&sample, "altitude"),
            Err(Error::PropertyDoesNotExist("altitude".to_owned()))
        );
    }
}
