use crate::{CoordinateSystem, LineString, Point, Trajectory};

// The RDP recursion works on (index, position) pairs so that retained
// trajectory samples can be copied over whole, property maps included.
#[derive(Clone, Copy)]
struct RdpIndex<Cs: CoordinateSystem> {
    index: usize,
    point: Point<Cs>,
}

// Ramer–Douglas–Peucker on a polyline of at least two vertices.
fn compute_rdp<Cs: CoordinateSystem>(
    points: &[RdpIndex<Cs>],
    epsilon: f64,
) -> Vec<RdpIndex<Cs>> {
    let mut dmax = 0.0;
    let mut index = 0;
    let head = &points[0];
    let tail = &points[points.len() - 1];

    for (i, candidate) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let distance = Cs::segment_distance(&candidate.point, &head.point, &tail.point);
        if distance > dmax {
            index = i;
            dmax = distance;
        }
    }

    if dmax > epsilon {
        let mut intermediate = compute_rdp(&points[..=index], epsilon);
        intermediate.pop();
        intermediate.extend_from_slice(&compute_rdp(&points[index..], epsilon));
        intermediate
    } else {
        vec![*head, *tail]
    }
}

fn rdp_indices<Cs: CoordinateSystem>(
    points: impl Iterator<Item = Point<Cs>>,
    epsilon: f64,
) -> Vec<usize> {
    let indexed: Vec<RdpIndex<Cs>> = points
        .enumerate()
        .map(|(index, point)| RdpIndex { index, point })
        .collect();
    compute_rdp(&indexed, epsilon)
        .into_iter()
        .map(|entry| entry.index)
        .collect()
}

/// Geometry reduction with the [Ramer–Douglas–Peucker
/// algorithm](https://en.wikipedia.org/wiki/Ramer–Douglas–Peucker_algorithm).
pub trait Simplify {
    /// Returns a reduced copy in which every dropped vertex was within
    /// `epsilon` of the segment joining its retained neighbors, measured
    /// with the coordinate system's distance (kilometers for terrestrial
    /// geometry).
    ///
    /// Endpoints are always retained, and retained trajectory samples keep
    /// their property maps. An epsilon of zero or less returns an unaltered
    /// copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use geotrack::algorithm::Simplify;
    /// use geotrack::{LineString, Point};
    ///
    /// let path = LineString::new(vec![
    ///     Point::xy(0.0, 0.0),
    ///     Point::xy(5.0, 0.01),
    ///     Point::xy(10.0, 0.0),
    ///     Point::xy(10.0, 10.0),
    /// ]);
    /// let simplified = path.simplify(1.0);
    /// assert_eq!(
    ///     simplified.points(),
    ///     &[
    ///         Point::xy(0.0, 0.0),
    ///         Point::xy(10.0, 0.0),
    ///         Point::xy(10.0, 10.0),
    ///     ]
    /// );
    /// ```
    fn simplify(&self, epsilon: f64) -> Self;
}

impl<Cs: CoordinateSystem> Simplify for Trajectory<Cs> {
    fn simplify(&self, epsilon: f64) -> Trajectory<Cs> {
        if epsilon <= 0.0 || self.len() < 3 {
            return self.clone();
        }
        let retained = rdp_indices(self.iter().map(|p| *p.point()), epsilon);
        let mut simplified: Trajectory<Cs> =
            retained.into_iter().map(|i| self[i].clone()).collect();
        simplified.set_uuid(self.uuid());
        *simplified.properties_mut() = self.properties().clone();
        simplified
    }
}

impl<Cs: CoordinateSystem> Simplify for LineString<Cs> {
    fn simplify(&self, epsilon: f64) -> LineString<Cs> {
        if epsilon <= 0.0 || self.len() < 3 {
            return self.clone();
        }
        rdp_indices(self.iter().copied(), epsilon)
            .into_iter()
            .map(|i| self.0[i])
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cartesian2d, TrajectoryPoint};
    use chrono::{DateTime, Duration};

    fn wiggly() -> Trajectory<Cartesian2d> {
        let start = DateTime::from_timestamp(0, 0).unwrap();
        let coords = [
            (0.0, 0.0),
            (5.0, 4.0),
            (11.0, 5.5),
            (17.3, 3.2),
            (27.8, 0.1),
        ];
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                TrajectoryPoint::new(
                    "obj",
                    Point::xy(x, y),
                    start + Duration::seconds(10 * i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn drops_low_deviation_vertices() {
        let simplified = wiggly().simplify(1.0);
        let xs: Vec<f64> = simplified.iter().map(|p| p.point().x()).collect();
        assert_eq!(xs, vec![0.0, 5.0, 11.0, 27.8]);
    }

    #[test]
    fn keeps_endpoints_and_properties() {
        let mut trajectory = wiggly();
        let first_ts = trajectory.start_time().unwrap();
        trajectory.properties_mut().set("source", "radar");
        let simplified = trajectory.simplify(1.0);
        assert_eq!(simplified.start_time(), Some(first_ts));
        assert_eq!(simplified.end_time(), trajectory.end_time());
        assert_eq!(simplified.properties().get_string("source"), Ok("radar"));
        assert_eq!(simplified.uuid(), trajectory.uuid());
    }

    #[test]
    fn non_positive_epsilon_is_identity() {
        let trajectory = wiggly();
        assert_eq!(trajectory.simplify(0.0).points(), trajectory.points());
        assert_eq!(trajectory.simplify(-2.0).len(), trajectory.len());
    }

    #[test]
    fn simplification_re_establishes_lengths() {
        let simplified = wiggly().simplify(1.0);
        let mut expected = 0.0;
        for pair in simplified.points().windows(2) {
            expected += pair[0].distance(&pair[1]);
        }
        assert_relative_eq!(simplified.length(), expected);
        assert_eq!(simplified[0].current_length(), 0.0);
    }
}
