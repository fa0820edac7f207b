use crate::{CoordinateSystem, Point};

/// An axis-aligned box defined by two corner points.
///
/// For terrestrial boxes the longitude axis lives on the circle [−180, 180]:
/// a box whose minimum longitude exceeds its maximum is taken to wrap across
/// the antimeridian, and containment tests honor the wrap. All other axes
/// are ordinary closed intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Cs::Coords: serde::Serialize",
        deserialize = "Cs::Coords: serde::Deserialize<'de>"
    ))
)]
pub struct BoundingBox<Cs: CoordinateSystem> {
    min: Point<Cs>,
    max: Point<Cs>,
}

impl<Cs: CoordinateSystem> BoundingBox<Cs> {
    /// Creates a box from two corners, given as (min, max).
    ///
    /// The corners are stored as supplied; a terrestrial box with
    /// `min.lon() > max.lon()` spans the antimeridian.
    pub fn new(min: Point<Cs>, max: Point<Cs>) -> Self {
        BoundingBox { min, max }
    }

    /// The tight box around a sequence of points, or `None` for an empty
    /// sequence.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point<Cs>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = *first;
        let mut max = *first;
        for point in iter {
            for i in 0..Cs::DIMENSION {
                let c = point.coord(i);
                if c < min.coord(i) {
                    min.set_coord(i, c);
                }
                if c > max.coord(i) {
                    max.set_coord(i, c);
                }
            }
        }
        Some(BoundingBox { min, max })
    }

    pub fn min(&self) -> &Point<Cs> {
        &self.min
    }

    pub fn max(&self) -> &Point<Cs> {
        &self.max
    }

    /// Componentwise containment. Boundary points are inside; a wrapping
    /// terrestrial box treats the longitude axis as an arc through ±180.
    pub fn contains(&self, point: &Point<Cs>) -> bool {
        for i in 0..Cs::DIMENSION {
            let c = point.coord(i);
            let lo = self.min.coord(i);
            let hi = self.max.coord(i);
            if Cs::WRAPS_LONGITUDE && i == 0 && lo > hi {
                if c < lo && c > hi {
                    return false;
                }
            } else if c < lo || c > hi {
                return false;
            }
        }
        true
    }

    /// Grows the box to cover `point`.
    pub fn expand_to(&mut self, point: &Point<Cs>) {
        for i in 0..Cs::DIMENSION {
            let c = point.coord(i);
            if c < self.min.coord(i) {
                self.min.set_coord(i, c);
            }
            if c > self.max.coord(i) {
                self.max.set_coord(i, c);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, Terrestrial};

    #[test]
    fn from_points_is_tight() {
        let points = vec![
            Point::xy(1.0, 5.0),
            Point::xy(-2.0, 3.0),
            Point::xy(4.0, -1.0),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.min(), &Point::xy(-2.0, -1.0));
        assert_eq!(bbox.max(), &Point::xy(4.0, 5.0));
        assert!(BoundingBox::<Cartesian2d>::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn containment_is_closed() {
        let bbox = BoundingBox::new(
            Point::xy(0.0, 0.0),
            Point::xy(10.0, 10.0),
        );
        assert!(bbox.contains(&Point::xy(0.0, 10.0)));
        assert!(bbox.contains(&Point::xy(5.0, 5.0)));
        assert!(!bbox.contains(&Point::xy(10.1, 5.0)));
    }

    #[test]
    fn terrestrial_box_wraps_the_antimeridian() {
        let bbox = BoundingBox::new(
            Point::lon_lat(170.0, -10.0),
            Point::lon_lat(-170.0, 10.0),
        );
        assert!(bbox.contains(&Point::lon_lat(179.0, 0.0)));
        assert!(bbox.contains(&Point::lon_lat(-179.0, 0.0)));
        assert!(!bbox.contains(&Point::lon_lat(0.0, 0.0)));
    }

    #[test]
    fn expand_to_covers_new_points() {
        let mut bbox = BoundingBox::new(
            Point::xy(0.0, 0.0),
            Point::xy(1.0, 1.0),
        );
        bbox.expand_to(&Point::xy(-3.0, 2.0));
        assert_eq!(bbox.min(), &Point::xy(-3.0, 0.0));
        assert_eq!(bbox.max(), &Point::xy(1.0, 2.0));
    }
}
