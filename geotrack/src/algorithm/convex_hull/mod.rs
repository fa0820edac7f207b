//! Convex hulls of point sets, trajectories and linestrings.
//!
//! Cartesian hulls use Andrew's monotone chain with robust orientation
//! predicates. Terrestrial hulls rotate the points' spherical centroid to
//! the north pole, project onto the equatorial plane, hull there and lift
//! the result back; they are defined only for inputs spanning strictly less
//! than a hemisphere.

mod metrics;
mod monotone;
mod spherical;

pub use metrics::{HullArea, HullAspectRatio, HullCentroid};

use crate::{Cartesian2d, Error, LineString, Point, Terrestrial, Trajectory, TrajectoryPoint};

/// Convex hull as a closed counterclockwise ring.
///
/// Fewer than three distinct input points produce a degenerate ring over
/// the surviving points. Terrestrial inputs spanning a hemisphere or more
/// fail with [`Error::TooLargeHemisphere`]; cartesian hulls cannot fail.
///
/// # Examples
///
/// ```
/// use geotrack::algorithm::ConvexHull;
/// use geotrack::Point;
///
/// let points = vec![
///     Point::xy(0.0, 0.0),
///     Point::xy(4.0, 0.0),
///     Point::xy(4.0, 4.0),
///     Point::xy(0.0, 4.0),
///     Point::xy(2.0, 2.0),
/// ];
/// let hull = points.convex_hull().unwrap();
/// assert!(hull.is_closed());
/// assert_eq!(hull.len(), 5);
/// ```
pub trait ConvexHull<Cs: crate::CoordinateSystem> {
    fn convex_hull(&self) -> Result<LineString<Cs>, Error>;
}

fn planar_hull(points: &[Point<Cartesian2d>]) -> LineString<Cartesian2d> {
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x(), p.y())).collect();
    let mut ring: LineString<Cartesian2d> = monotone::monotone_chain_indices(&coords)
        .into_iter()
        .map(|i| points[i])
        .collect();
    ring.close();
    ring
}

impl ConvexHull<Cartesian2d> for [Point<Cartesian2d>] {
    fn convex_hull(&self) -> Result<LineString<Cartesian2d>, Error> {
        Ok(planar_hull(self))
    }
}

impl ConvexHull<Cartesian2d> for Vec<Point<Cartesian2d>> {
    fn convex_hull(&self) -> Result<LineString<Cartesian2d>, Error> {
        Ok(planar_hull(self))
    }
}

impl ConvexHull<Cartesian2d> for LineString<Cartesian2d> {
    fn convex_hull(&self) -> Result<LineString<Cartesian2d>, Error> {
        Ok(planar_hull(self.points()))
    }
}

impl ConvexHull<Cartesian2d> for Trajectory<Cartesian2d> {
    fn convex_hull(&self) -> Result<LineString<Cartesian2d>, Error> {
        let positions: Vec<Point<Cartesian2d>> =
            self.iter().map(TrajectoryPoint::point).copied().collect();
        Ok(planar_hull(&positions))
    }
}

impl ConvexHull<Terrestrial> for [Point<Terrestrial>] {
    fn convex_hull(&self) -> Result<LineString<Terrestrial>, Error> {
        spherical::spherical_hull(self)
    }
}

impl ConvexHull<Terrestrial> for Vec<Point<Terrestrial>> {
    fn convex_hull(&self) -> Result<LineString<Terrestrial>, Error> {
        spherical::spherical_hull(self)
    }
}

impl ConvexHull<Terrestrial> for LineString<Terrestrial> {
    fn convex_hull(&self) -> Result<LineString<Terrestrial>, Error> {
        spherical::spherical_hull(self.points())
    }
}

impl ConvexHull<Terrestrial> for Trajectory<Terrestrial> {
    fn convex_hull(&self) -> Result<LineString<Terrestrial>, Error> {
        let positions: Vec<Point<Terrestrial>> =
            self.iter().map(TrajectoryPoint::point).copied().collect();
        spherical::spherical_hull(&positions)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn planar_hull_is_closed_and_ccw() {
        let points = vec![
            Point::xy(0.0, 0.0),
            Point::xy(4.0, 0.0),
            Point::xy(4.0, 1.0),
            Point::xy(1.0, 1.0),
            Point::xy(1.0, 4.0),
            Point::xy(0.0, 4.0),
        ];
        let hull = points.convex_hull().unwrap();
        assert!(hull.is_closed());
        let expected = vec![
            Point::xy(0.0, 0.0),
            Point::xy(4.0, 0.0),
            Point::xy(4.0, 1.0),
            Point::xy(1.0, 4.0),
            Point::xy(0.0, 4.0),
            Point::xy(0.0, 0.0),
        ];
        assert_eq!(hull.points(), expected.as_slice());
    }

    #[test]
    fn degenerate_planar_hulls() {
        let empty: Vec<Point<Cartesian2d>> = vec![];
        assert!(empty.convex_hull().unwrap().is_empty());
        let pair = vec![Point::xy(0.0, 0.0), Point::xy(1.0, 1.0)];
        let hull = pair.convex_hull().unwrap();
        assert!(hull.is_closed());
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn trajectory_hull_uses_sample_positions() {
        use chrono::{DateTime, Duration};
        let start = DateTime::from_timestamp(0, 0).unwrap();
        let trajectory: Trajectory<Cartesian2d> =
            [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1.0, 1.0)]
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| {
                    TrajectoryPoint::new(
                        "obj",
                        Point::xy(x, y),
                        start + Duration::seconds(i as i64),
                    )
                })
                .collect();
        let hull = trajectory.convex_hull().unwrap();
        assert_eq!(hull.len(), 4);
    }
}
