use std::cmp::Ordering;

use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};

use crate::{CoordinateSystem, Point};

/// An immutable spatial index over points with attached payloads.
///
/// Built once in bulk over `(point, payload)` pairs; rebuild to change the
/// contents. Typically used over [`FeatureVector`](crate::FeatureVector)s
/// with trajectory identifiers as payloads, to answer "which trajectories
/// look like this one" queries.
///
/// # Examples
///
/// ```
/// use geotrack::algorithm::PointIndex;
/// use geotrack::FeatureVector;
///
/// let index = PointIndex::bulk_build(vec![
///     (FeatureVector::<2>::new([0.0, 0.0]), "a"),
///     (FeatureVector::new([1.0, 0.0]), "b"),
///     (FeatureVector::new([5.0, 5.0]), "c"),
/// ]);
///
/// let near_origin = index.find_points_in_box(
///     &FeatureVector::new([-0.5, -0.5]),
///     &FeatureVector::new([1.5, 0.5]),
/// );
/// assert_eq!(near_origin, vec![&"a", &"b"]);
///
/// let nearest = index.find_nearest_neighbors(&FeatureVector::new([4.0, 4.0]), 1);
/// assert_eq!(nearest, vec![&"c"]);
/// ```
pub struct PointIndex<Cs: CoordinateSystem, P> {
    tree: RTree<GeomWithData<Point<Cs>, usize>>,
    payloads: Vec<P>,
}

impl<Cs: CoordinateSystem, P> PointIndex<Cs, P> {
    /// Bulk-builds the index. Insertion order defines the tie-breaking order
    /// of [`PointIndex::find_nearest_neighbors`].
    pub fn bulk_build(entries: impl IntoIterator<Item = (Point<Cs>, P)>) -> Self {
        let mut payloads = Vec::new();
        let mut geometries = Vec::new();
        for (index, (point, payload)) in entries.into_iter().enumerate() {
            geometries.push(GeomWithData::new(point, index));
            payloads.push(payload);
        }
        PointIndex {
            tree: RTree::bulk_load(geometries),
            payloads,
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Payloads of every point lying componentwise inside the closed box
    /// `[min, max]`, in insertion order.
    pub fn find_points_in_box(&self, min: &Point<Cs>, max: &Point<Cs>) -> Vec<&P> {
        let envelope = AABB::from_corners(*min, *max);
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.data)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|i| &self.payloads[i]).collect()
    }

    /// Payloads of the `k` points nearest to `query` by Euclidean distance,
    /// nearest first; equal distances are broken by insertion order.
    pub fn find_nearest_neighbors(&self, query: &Point<Cs>, k: usize) -> Vec<&P> {
        if k == 0 {
            return Vec::new();
        }
        // Pull candidates in ascending distance order, keeping everything
        // tied with the k-th before re-ranking ties by insertion order.
        let mut candidates: Vec<(f64, usize)> = Vec::new();
        let mut kth_distance = f64::INFINITY;
        for (entry, distance) in self.tree.nearest_neighbor_iter_with_distance_2(query) {
            if candidates.len() >= k && distance > kth_distance {
                break;
            }
            candidates.push((distance, entry.data));
            if candidates.len() == k {
                kth_distance = distance;
            }
        }
        candidates.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        candidates.truncate(k);
        candidates.into_iter().map(|(_, i)| &self.payloads[i]).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::FeatureVector;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grid() -> PointIndex<crate::FeatureSpace<2>, usize> {
        let mut entries = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                entries.push((
                    FeatureVector::<2>::new([x as f64, y as f64]),
                    entries.len(),
                ));
            }
        }
        PointIndex::bulk_build(entries)
    }

    #[test]
    fn box_query_matches_a_linear_scan() {
        let mut rng = StdRng::seed_from_u64(42);
        let points: Vec<FeatureVector<3>> = (0..200)
            .map(|_| {
                FeatureVector::new([
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                ])
            })
            .collect();
        let index =
            PointIndex::bulk_build(points.iter().enumerate().map(|(i, p)| (*p, i)));

        let min = FeatureVector::new([-5.0, -2.0, -8.0]);
        let max = FeatureVector::new([4.0, 9.0, 1.0]);
        let from_index: Vec<usize> = index
            .find_points_in_box(&min, &max)
            .into_iter()
            .copied()
            .collect();
        let from_scan: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                (0..3).all(|d| p.coord(d) >= min.coord(d) && p.coord(d) <= max.coord(d))
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(from_index, from_scan);
    }

    #[test]
    fn box_boundaries_are_inclusive() {
        let index = grid();
        let hits = index.find_points_in_box(
            &FeatureVector::new([1.0, 1.0]),
            &FeatureVector::new([2.0, 2.0]),
        );
        assert_eq!(hits, vec![&5, &6, &9, &10]);
    }

    #[test]
    fn nearest_neighbors_are_sorted_by_distance() {
        let index = grid();
        let neighbors =
            index.find_nearest_neighbors(&FeatureVector::new([0.1, 0.1]), 3);
        assert_eq!(neighbors[0], &0);
        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let index = PointIndex::bulk_build(vec![
            (FeatureVector::<2>::new([1.0, 0.0]), "east"),
            (FeatureVector::new([0.0, 1.0]), "north"),
            (FeatureVector::new([-1.0, 0.0]), "west"),
            (FeatureVector::new([0.0, -1.0]), "south"),
        ]);
        let neighbors = index.find_nearest_neighbors(&FeatureVector::new([0.0, 0.0]), 2);
        assert_eq!(neighbors, vec![&"east", &"north"]);
    }

    #[test]
    fn more_neighbors_than_points() {
        let index = grid();
        let all = index.find_nearest_neighbors(&FeatureVector::new([0.0, 0.0]), 100);
        assert_eq!(all.len(), 16);
        assert!(index.find_nearest_neighbors(&FeatureVector::new([0.0, 0.0]), 0).is_empty());
    }

    #[test]
    fn empty_index() {
        let index: PointIndex<crate::FeatureSpace<2>, u32> = PointIndex::bulk_build(vec![]);
        assert!(index.is_empty());
        assert!(index
            .find_points_in_box(
                &FeatureVector::new([0.0, 0.0]),
                &FeatureVector::new([1.0, 1.0])
            )
            .is_empty());
    }
}
