use crate::algorithm::convex_hull::monotone::monotone_chain_indices;
use crate::{normalize_longitude, CoordinateSystem, Error, LineString, Point, Terrestrial};

// One step of the colatitude rotation in lon/lat form: a rotation in the
// plane through the pole and the (rotated) center, by the colatitude of the
// center. Passing (sin θ, −cos θ) applies the inverse rotation.
fn colatitude_rotate(lon: f64, lat: f64, sin_t: f64, cos_t: f64) -> (f64, f64) {
    let new_lat = (lat.sin() * sin_t + lon.cos() * lat.cos() * cos_t)
        .clamp(-1.0, 1.0)
        .asin();
    let new_lon = (lon.sin() * lat.cos()).atan2(lon.cos() * lat.cos() * sin_t - lat.sin() * cos_t);
    (new_lon, new_lat)
}

/// Convex hull of terrestrial points, as a closed ring in counterclockwise
/// order around the points' spherical centroid.
///
/// Only defined for inputs spanning strictly less than a hemisphere; wider
/// inputs have no usable centroid direction and fail with
/// [`Error::TooLargeHemisphere`].
pub(super) fn spherical_hull(
    points: &[Point<Terrestrial>],
) -> Result<LineString<Terrestrial>, Error> {
    if points.is_empty() {
        return Ok(LineString::new(Vec::new()));
    }
    let center = Terrestrial::position_centroid(points).ok_or(Error::TooLargeHemisphere)?;
    let center_lon = center.lon();
    let theta = center.lat().to_radians();
    let (sin_t, cos_t) = theta.sin_cos();

    // Rotate the centroid to the north pole and project every point onto the
    // equatorial plane, where an ordinary planar hull applies.
    let projected: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            let lon = (p.lon() - center_lon).to_radians();
            let lat = p.lat().to_radians();
            let (lon, lat) = colatitude_rotate(lon, lat, sin_t, cos_t);
            (lat.cos() * lon.cos(), lat.cos() * lon.sin())
        })
        .collect();

    let hull = monotone_chain_indices(&projected);

    // Lift the hull vertices back to the sphere and undo both rotations.
    let mut ring: LineString<Terrestrial> = hull
        .into_iter()
        .map(|i| {
            let (x, y) = projected[i];
            let radial = (x * x + y * y).sqrt().clamp(0.0, 1.0);
            let lat = radial.acos();
            let lon = y.atan2(x);
            let (lon, lat) = colatitude_rotate(lon, lat, sin_t, -cos_t);
            Point::lon_lat(
                normalize_longitude(lon.to_degrees() + center_lon),
                lat.to_degrees(),
            )
        })
        .collect();
    ring.close();
    Ok(ring)
}
