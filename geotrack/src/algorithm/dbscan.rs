use std::collections::VecDeque;

use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};

use crate::{CoordinateSystem, Error, Point};

/// Cluster label of a point that belongs to no cluster.
pub const NOISE: i32 = -1;

/// DBSCAN density clustering with an anisotropic box neighborhood.
///
/// A point's neighborhood is the closed axis-aligned box reaching
/// `epsilon_box[d]` out from it along every axis `d` (not a Euclidean
/// ball), queried through an R-tree. A point with at least `min_points`
/// neighbors (itself included) is a core point; clusters grow through
/// transitive connectivity between core points, non-core points reached
/// from a core become border points, and everything else is noise.
///
/// Returns one label per input point, in input order: [`NOISE`] (−1) for
/// noise, otherwise a cluster id counting up from 0 in the order clusters
/// are first discovered by the linear scan. Fails with
/// [`Error::DimensionMismatch`] when `epsilon_box` does not have one extent
/// per coordinate.
///
/// # Examples
///
/// ```
/// use geotrack::algorithm::cluster_labels;
/// use geotrack::FeatureVector;
///
/// let points = vec![
///     FeatureVector::<2>::new([0.0, 0.0]),
///     FeatureVector::new([0.5, 0.0]),
///     FeatureVector::new([0.0, 0.5]),
///     FeatureVector::new([10.0, 10.0]),
///     FeatureVector::new([10.5, 10.0]),
///     FeatureVector::new([50.0, 50.0]),
/// ];
///
/// let labels = cluster_labels(&points, &[1.0, 1.0], 2).unwrap();
/// assert_eq!(labels, vec![0, 0, 0, 1, 1, -1]);
/// ```
pub fn cluster_labels<Cs: CoordinateSystem>(
    points: &[Point<Cs>],
    epsilon_box: &[f64],
    min_points: usize,
) -> Result<Vec<i32>, Error> {
    if epsilon_box.len() != Cs::DIMENSION {
        return Err(Error::DimensionMismatch {
            expected: Cs::DIMENSION,
            actual: epsilon_box.len(),
        });
    }
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let tree = RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .map(|(index, point)| GeomWithData::new(*point, index))
            .collect(),
    );
    let neighborhood = |index: usize| -> Vec<usize> {
        let center = &points[index];
        let mut low = *center;
        let mut high = *center;
        for d in 0..Cs::DIMENSION {
            let extent = epsilon_box[d].abs();
            low.set_coord(d, center.coord(d) - extent);
            high.set_coord(d, center.coord(d) + extent);
        }
        let mut hits: Vec<usize> = tree
            .locate_in_envelope(&AABB::from_corners(low, high))
            .map(|entry| entry.data)
            .collect();
        hits.sort_unstable();
        hits
    };

    let mut labels: Vec<Option<i32>> = vec![None; points.len()];
    let mut next_cluster = 0;

    for index in 0..points.len() {
        if labels[index].is_some() {
            continue;
        }
        let neighbors = neighborhood(index);
        if neighbors.len() < min_points {
            labels[index] = Some(NOISE);
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        labels[index] = Some(cluster);

        // Breadth-first expansion through core points.
        let mut queue: VecDeque<usize> =
            neighbors.into_iter().filter(|&n| n != index).collect();
        while let Some(candidate) = queue.pop_front() {
            match labels[candidate] {
                Some(NOISE) => {
                    // Border point: reachable from a core point, itself not
                    // dense enough to expand.
                    labels[candidate] = Some(cluster);
                }
                Some(_) => {}
                None => {
                    labels[candidate] = Some(cluster);
                    let reachable = neighborhood(candidate);
                    if reachable.len() >= min_points {
                        queue.extend(reachable.into_iter().filter(|&n| {
                            labels[n].is_none() || labels[n] == Some(NOISE)
                        }));
                    }
                }
            }
        }
    }

    Ok(labels.into_iter().map(|label| label.unwrap_or(NOISE)).collect())
}

/// [`cluster_labels`] as a method on point collections.
pub trait Dbscan<Cs: CoordinateSystem> {
    fn dbscan(&self, epsilon_box: &[f64], min_points: usize) -> Result<Vec<i32>, Error>;
}

impl<Cs: CoordinateSystem> Dbscan<Cs> for [Point<Cs>] {
    fn dbscan(&self, epsilon_box: &[f64], min_points: usize) -> Result<Vec<i32>, Error> {
        cluster_labels(self, epsilon_box, min_points)
    }
}

impl<Cs: CoordinateSystem> Dbscan<Cs> for Vec<Point<Cs>> {
    fn dbscan(&self, epsilon_box: &[f64], min_points: usize) -> Result<Vec<i32>, Error> {
        cluster_labels(self, epsilon_box, min_points)
    }
}
