use crate::{CoordinateSystem, LineString, Trajectory};

/// Total arc length: the sum of the segment distances between consecutive
/// points, in the coordinate system's length unit.
pub trait Length {
    /// # Examples
    ///
    /// ```
    /// use geotrack::algorithm::Length;
    /// use geotrack::{LineString, Point};
    ///
    /// let path = LineString::new(vec![
    ///     Point::xy(0.0, 0.0),
    ///     Point::xy(3.0, 4.0),
    ///     Point::xy(3.0, 14.0),
    /// ]);
    /// assert_eq!(path.length(), 15.0);
    /// ```
    fn length(&self) -> f64;
}

impl<Cs: CoordinateSystem> Length for Trajectory<Cs> {
    /// Equal to the cached cumulative length of the last sample.
    fn length(&self) -> f64 {
        Trajectory::length(self)
    }
}

impl<Cs: CoordinateSystem> Length for LineString<Cs> {
    fn length(&self) -> f64 {
        self.points()
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}
