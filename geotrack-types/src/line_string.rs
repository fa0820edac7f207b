use std::slice;

use crate::{CoordinateSystem, Point};

/// An ordered sequence of bare positions, with no timestamps or object ids.
///
/// Convex hulls are returned as closed linestrings (last point equal to the
/// first).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Cs::Coords: serde::Serialize",
        deserialize = "Cs::Coords: serde::Deserialize<'de>"
    ))
)]
pub struct LineString<Cs: CoordinateSystem>(pub Vec<Point<Cs>>);

impl<Cs: CoordinateSystem> LineString<Cs> {
    pub fn new(points: Vec<Point<Cs>>) -> Self {
        LineString(points)
    }

    pub fn points(&self) -> &[Point<Cs>] {
        &self.0
    }

    pub fn iter(&self) -> slice::Iter<'_, Point<Cs>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the first and last points coincide and there are at least
    /// two points.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Appends a copy of the first point unless the ring is already closed.
    pub fn close(&mut self) {
        if !self.is_empty() && !self.is_closed() {
            self.0.push(self.0[0]);
        }
    }
}

impl<Cs: CoordinateSystem> From<Vec<Point<Cs>>> for LineString<Cs> {
    fn from(points: Vec<Point<Cs>>) -> Self {
        LineString(points)
    }
}

impl<Cs: CoordinateSystem> FromIterator<Point<Cs>> for LineString<Cs> {
    fn from_iter<I: IntoIterator<Item = Point<Cs>>>(iter: I) -> Self {
        LineString(iter.into_iter().collect())
    }
}

impl<'a, Cs: CoordinateSystem> IntoIterator for &'a LineString<Cs> {
    type Item = &'a Point<Cs>;
    type IntoIter = slice::Iter<'a, Point<Cs>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<Cs: CoordinateSystem> IntoIterator for LineString<Cs> {
    type Item = Point<Cs>;
    type IntoIter = std::vec::IntoIter<Point<Cs>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Cartesian2d;

    #[test]
    fn close_is_idempotent() {
        let mut ring = LineString::new(vec![
            Point::xy(0.0, 0.0),
            Point::xy(1.0, 0.0),
            Point::xy(1.0, 1.0),
        ]);
        assert!(!ring.is_closed());
        ring.close();
        assert!(ring.is_closed());
        let len = ring.len();
        ring.close();
        assert_eq!(ring.len(), len);
    }

    #[test]
    fn single_point_is_not_closed() {
        let mut ls = LineString::new(vec![Point::xy(0.0, 0.0)]);
        assert!(!ls.is_closed());
        ls.close();
        // One point plus its copy form a degenerate ring.
        assert_eq!(ls.len(), 2);
        assert!(ls.is_closed());
    }
}
