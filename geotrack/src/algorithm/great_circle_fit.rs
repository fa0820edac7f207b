use glam::DVec3;

use crate::algorithm::ecef::{ecef, geodetic_from_ecef, point_ecef, AltitudeUnits};
use crate::{Error, Terrestrial, Trajectory, TrajectoryPoint};

// Probe radius of the local search.
const PROBE_STEP: f64 = 5.0e-8;

/// Unit normal of the plane through the earth's center that best fits a
/// trajectory, with every sample at altitude zero.
///
/// A trajectory that follows a great circle lies in such a plane exactly;
/// the returned normal minimizes `Σ |n · p̂|` over the unit earth-centered
/// sample directions `p̂`. Fails with [`Error::TooFewPoints`] for fewer than
/// two samples and [`Error::IdenticalPositions`] when every sample sits at
/// the same position.
pub fn find_best_fit_plane(trajectory: &Trajectory<Terrestrial>) -> Result<DVec3, Error> {
    best_fit_normal(&positions(trajectory, None)?)
}

/// [`find_best_fit_plane`] with per-sample altitudes read from a real
/// property.
pub fn find_best_fit_plane_with_altitude(
    trajectory: &Trajectory<Terrestrial>,
    altitude_property: &str,
    units: AltitudeUnits,
) -> Result<DVec3, Error> {
    best_fit_normal(&positions(trajectory, Some((altitude_property, units)))?)
}

/// Projects every sample onto the plane through the earth's center with the
/// given normal, returning a new trajectory with the recovered longitudes
/// and latitudes. Timestamps, ids and properties are untouched, and any
/// altitude property keeps its original value.
///
/// Fails with [`Error::TooFewPoints`] on an empty trajectory and
/// [`Error::ZeroNorm`] when `normal` has zero magnitude.
pub fn project_onto_plane(
    trajectory: &Trajectory<Terrestrial>,
    normal: DVec3,
) -> Result<Trajectory<Terrestrial>, Error> {
    project(trajectory, normal, None)
}

/// [`project_onto_plane`] with per-sample altitudes read from a real
/// property before projecting.
pub fn project_onto_plane_with_altitude(
    trajectory: &Trajectory<Terrestrial>,
    normal: DVec3,
    altitude_property: &str,
    units: AltitudeUnits,
) -> Result<Trajectory<Terrestrial>, Error> {
    project(trajectory, normal, Some((altitude_property, units)))
}

fn sample_position(
    point: &TrajectoryPoint<Terrestrial>,
    altitude: Option<(&str, AltitudeUnits)>,
) -> Result<DVec3, Error> {
    match altitude {
        Some((property, units)) => point_ecef(point, property, units),
        None => Ok(ecef(point.point(), 0.0)),
    }
}

fn positions(
    trajectory: &Trajectory<Terrestrial>,
    altitude: Option<(&str, AltitudeUnits)>,
) -> Result<Vec<DVec3>, Error> {
    trajectory
        .iter()
        .map(|point| sample_position(point, altitude))
        .collect()
}

fn best_fit_normal(positions: &[DVec3]) -> Result<DVec3, Error> {
    if positions.len() < 2 {
        return Err(Error::TooFewPoints {
            required: 2,
            actual: positions.len(),
        });
    }
    let first = positions[0];
    if positions
        .iter()
        .all(|p| (*p - first).length_squared() < 1.0e-18)
    {
        return Err(Error::IdenticalPositions);
    }

    // Seed with the plane through the first and last distinct positions.
    let mut seed = None;
    for position in positions.iter().rev() {
        let cross = first.cross(*position);
        if cross.length_squared() > 1.0e-18 {
            seed = Some(cross.normalize());
            break;
        }
    }
    // Every position parallel to the first: any plane containing that axis
    // fits perfectly.
    let mut normal = match seed {
        Some(seed) => seed,
        None => first.normalize().any_orthonormal_vector(),
    };

    let directions: Vec<DVec3> = positions.iter().map(|p| p.normalize()).collect();
    let misfit = |normal: &DVec3| -> f64 {
        directions.iter().map(|d| normal.dot(*d).abs()).sum()
    };

    // Greedy descent: probe eight tangent offsets around the current normal
    // and move to the first that strictly improves the misfit. The misfit
    // strictly decreases on every move, so the walk terminates.
    let mut current_misfit = misfit(&normal);
    loop {
        let (u, v) = normal.any_orthonormal_pair();
        let mut improved = false;
        for step in 0..8 {
            let angle = step as f64 * std::f64::consts::FRAC_PI_4;
            let candidate =
                (normal + PROBE_STEP * (angle.cos() * u + angle.sin() * v)).normalize();
            let candidate_misfit = misfit(&candidate);
            if candidate_misfit < current_misfit {
                normal = candidate;
                current_misfit = candidate_misfit;
                improved = true;
                break;
            }
        }
        if !improved {
            return Ok(normal);
        }
    }
}

fn project(
    trajectory: &Trajectory<Terrestrial>,
    normal: DVec3,
    altitude: Option<(&str, AltitudeUnits)>,
) -> Result<Trajectory<Terrestrial>, Error> {
    if trajectory.is_empty() {
        return Err(Error::TooFewPoints {
            required: 1,
            actual: 0,
        });
    }
    if normal.length_squared() == 0.0 {
        return Err(Error::ZeroNorm);
    }
    let normal = normal.normalize();

    let mut projected = Vec::with_capacity(trajectory.len());
    for point in trajectory.iter() {
        let position = sample_position(point, altitude)?;
        let in_plane = position - normal * position.dot(normal);
        let surface = geodetic_from_ecef(in_plane);
        let mut moved = point.clone();
        moved.point_mut().set_lon(surface.lon());
        moved.point_mut().set_lat(surface.lat());
        projected.push(moved);
    }

    let mut result = Trajectory::new(projected);
    result.set_uuid(trajectory.uuid());
    *result.properties_mut() = trajectory.properties().clone();
    Ok(result)
}
