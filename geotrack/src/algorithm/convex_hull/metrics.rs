use glam::DVec3;

use crate::algorithm::convex_hull::ConvexHull;
use crate::{
    CoordinateSystem, Error, LineString, Point, Terrestrial, Trajectory, EARTH_RADIUS_KM,
};

/// Area of the spherical convex hull.
pub trait HullArea {
    /// Hull area in km² (the spherical polygon's solid angle scaled by the
    /// earth radius squared). Degenerate hulls of fewer than three vertices
    /// have zero area.
    fn hull_area(&self) -> Result<f64, Error>;
}

/// Center of mass of the spherical convex hull.
pub trait HullCentroid {
    /// Area-weighted mean of the hull's triangle centers, projected back to
    /// the sphere.
    fn hull_centroid(&self) -> Result<Point<Terrestrial>, Error>;
}

/// How round the spherical convex hull is.
pub trait HullAspectRatio {
    /// Minimum distance from the hull centroid to the hull boundary over the
    /// maximum distance from the centroid to a hull vertex, in [0, 1]. Zero
    /// for hulls whose short axis collapses below 10 meters.
    fn hull_aspect_ratio(&self) -> Result<f64, Error>;
}

// Interior angle at the vertex opposite side `a` of a spherical triangle
// with central-angle sides (a, b, c), by the spherical law of cosines.
fn interior_angle(a: f64, b: f64, c: f64) -> f64 {
    let denominator = b.sin() * c.sin();
    if denominator == 0.0 {
        return 0.0;
    }
    ((a.cos() - b.cos() * c.cos()) / denominator)
        .clamp(-1.0, 1.0)
        .acos()
}

// Solid angle of the triangle (center, a, b) in steradians, by the
// spherical excess.
fn triangle_excess(center: &Point<Terrestrial>, a: &Point<Terrestrial>, b: &Point<Terrestrial>) -> f64 {
    let side_ab = Terrestrial::central_angle(a, b);
    let side_ca = Terrestrial::central_angle(center, a);
    let side_cb = Terrestrial::central_angle(center, b);
    if side_ab == 0.0 || side_ca == 0.0 || side_cb == 0.0 {
        return 0.0;
    }
    let angle_c = interior_angle(side_ab, side_ca, side_cb);
    let angle_a = interior_angle(side_cb, side_ab, side_ca);
    let angle_b = interior_angle(side_ca, side_cb, side_ab);
    (angle_a + angle_b + angle_c - std::f64::consts::PI).max(0.0)
}

// Hull vertices without the closing duplicate, plus the fan center.
fn fan(hull: &LineString<Terrestrial>) -> Option<(Vec<Point<Terrestrial>>, Point<Terrestrial>)> {
    if hull.len() < 4 {
        // A closed ring needs at least three distinct vertices.
        return None;
    }
    let vertices = hull.points()[..hull.len() - 1].to_vec();
    let center = Terrestrial::position_centroid(&vertices)?;
    Some((vertices, center))
}

fn hull_area_km2(hull: &LineString<Terrestrial>) -> f64 {
    let Some((vertices, center)) = fan(hull) else {
        return 0.0;
    };
    let steradians: f64 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| triangle_excess(&center, a, b))
        .sum();
    steradians * EARTH_RADIUS_KM * EARTH_RADIUS_KM
}

fn hull_centroid_point(hull: &LineString<Terrestrial>) -> Result<Point<Terrestrial>, Error> {
    let Some((vertices, center)) = fan(hull) else {
        // Degenerate hulls fall back to the vertex centroid.
        let open = if hull.is_closed() {
            &hull.points()[..hull.len() - 1]
        } else {
            hull.points()
        };
        return Terrestrial::position_centroid(open).ok_or(Error::TooLargeHemisphere);
    };

    let center_vector = center.to_unit_vector();
    let mut weighted = DVec3::ZERO;
    for (a, b) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
        let weight = triangle_excess(&center, a, b);
        let mass_center = center_vector + a.to_unit_vector() + b.to_unit_vector();
        if mass_center.length_squared() > 0.0 {
            weighted += weight * mass_center.normalize();
        }
    }
    if weighted.length() < 1.0e-12 {
        // Zero-area fan: every triangle degenerate.
        return Ok(center);
    }
    Ok(Point::from_unit_vector(weighted.normalize()))
}

const MINIMUM_SHORT_AXIS_KM: f64 = 1.0e-5;

fn hull_aspect_ratio_value(hull: &LineString<Terrestrial>) -> Result<f64, Error> {
    let Some((vertices, _)) = fan(hull) else {
        return Ok(0.0);
    };
    let centroid = hull_centroid_point(hull)?;

    let mut short_axis = f64::INFINITY;
    for (a, b) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
        short_axis = short_axis.min(Terrestrial::segment_distance(&centroid, a, b));
    }
    let mut long_axis = 0.0_f64;
    for vertex in &vertices {
        long_axis = long_axis.max(Terrestrial::distance(&centroid, vertex));
    }

    if short_axis < MINIMUM_SHORT_AXIS_KM || long_axis == 0.0 {
        return Ok(0.0);
    }
    Ok(short_axis / long_axis)
}

macro_rules! hull_metrics_via_convex_hull {
    ($target:ty) => {
        impl HullArea for $target {
            fn hull_area(&self) -> Result<f64, Error> {
                Ok(hull_area_km2(&self.convex_hull()?))
            }
        }

        impl HullCentroid for $target {
            fn hull_centroid(&self) -> Result<Point<Terrestrial>, Error> {
                hull_centroid_point(&self.convex_hull()?)
            }
        }

        impl HullAspectRatio for $target {
            fn hull_aspect_ratio(&self) -> Result<f64, Error> {
                hull_aspect_ratio_value(&self.convex_hull()?)
            }
        }
    };
}

hull_metrics_via_convex_hull!(Trajectory<Terrestrial>);
hull_metrics_via_convex_hull!(LineString<Terrestrial>);
hull_metrics_via_convex_hull!(Vec<Point<Terrestrial>>);
hull_metrics_via_convex_hull!([Point<Terrestrial>]);

#[cfg(test)]
mod test {
    use super::*;

    fn polar_ring() -> Vec<Point<Terrestrial>> {
        [0.0_f64, 90.0, 180.0, -90.0]
            .iter()
            .map(|&lon| Point::lon_lat(lon, 80.0))
            .collect()
    }

    #[test]
    fn polar_cap_area_and_centroid() {
        let points = polar_ring();
        let area = points.hull_area().unwrap();
        assert!(area > 0.0);
        // Smaller than the lat-80 polar cap that circumscribes it.
        let cap = 2.0 * std::f64::consts::PI
            * (1.0 - (80.0_f64).to_radians().sin())
            * EARTH_RADIUS_KM
            * EARTH_RADIUS_KM;
        assert!(area < cap);

        let centroid = points.hull_centroid().unwrap();
        assert!(centroid.lat() > 89.0, "centroid {centroid:?}");
    }

    #[test]
    fn symmetric_hull_is_round() {
        let ratio = polar_ring().hull_aspect_ratio().unwrap();
        // A square's incircle-to-circumradius ratio is 1/√2.
        assert_relative_eq!(ratio, 1.0 / 2.0_f64.sqrt(), epsilon = 0.05);
    }

    #[test]
    fn elongated_hull_is_not_round() {
        let strip = vec![
            Point::lon_lat(0.0, 0.0),
            Point::lon_lat(10.0, 0.0),
            Point::lon_lat(10.0, 0.2),
            Point::lon_lat(0.0, 0.2),
        ];
        let ratio = strip.hull_aspect_ratio().unwrap();
        assert!(ratio < 0.05, "ratio {ratio}");
    }

    #[test]
    fn degenerate_hulls_have_no_area() {
        let pair = vec![Point::lon_lat(0.0, 0.0), Point::lon_lat(1.0, 0.0)];
        assert_eq!(pair.hull_area().unwrap(), 0.0);
        assert_eq!(pair.hull_aspect_ratio().unwrap(), 0.0);
    }

    #[test]
    fn area_scales_like_the_planar_limit() {
        // A 1°×1° quad near the equator is close to (111.19 km)².
        let degree_km = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        let quad = vec![
            Point::lon_lat(0.0, -0.5),
            Point::lon_lat(1.0, -0.5),
            Point::lon_lat(1.0, 0.5),
            Point::lon_lat(0.0, 0.5),
        ];
        let area = quad.hull_area().unwrap();
        assert_relative_eq!(area, degree_km * degree_km, max_relative = 1.0e-3);
    }
}
