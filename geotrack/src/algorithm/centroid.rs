use crate::{CoordinateSystem, LineString, Point, Trajectory, TrajectoryPoint};

/// Mean position of a point set.
///
/// Terrestrial centroids average the points' unit vectors and project the
/// mean back onto the sphere; cartesian centroids average coordinates.
/// `None` when the input is empty, or when a terrestrial mean vector
/// vanishes (points spread over the whole sphere) and no direction is
/// defined.
pub trait Centroid<Cs: CoordinateSystem> {
    /// # Examples
    ///
    /// ```
    /// use geotrack::algorithm::Centroid;
    /// use geotrack::Point;
    ///
    /// let corners = vec![
    ///     Point::xy(0.0, 0.0),
    ///     Point::xy(2.0, 0.0),
    ///     Point::xy(2.0, 2.0),
    ///     Point::xy(0.0, 2.0),
    /// ];
    /// assert_eq!(corners.centroid(), Some(Point::xy(1.0, 1.0)));
    /// ```
    fn centroid(&self) -> Option<Point<Cs>>;
}

impl<Cs: CoordinateSystem> Centroid<Cs> for [Point<Cs>] {
    fn centroid(&self) -> Option<Point<Cs>> {
        Cs::position_centroid(self)
    }
}

impl<Cs: CoordinateSystem> Centroid<Cs> for Vec<Point<Cs>> {
    fn centroid(&self) -> Option<Point<Cs>> {
        Cs::position_centroid(self)
    }
}

impl<Cs: CoordinateSystem> Centroid<Cs> for LineString<Cs> {
    fn centroid(&self) -> Option<Point<Cs>> {
        Cs::position_centroid(self.points())
    }
}

impl<Cs: CoordinateSystem> Centroid<Cs> for Trajectory<Cs> {
    fn centroid(&self) -> Option<Point<Cs>> {
        let positions: Vec<Point<Cs>> = self.iter().map(TrajectoryPoint::point).copied().collect();
        Cs::position_centroid(&positions)
    }
}
