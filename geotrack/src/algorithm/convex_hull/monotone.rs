use std::cmp::Ordering;

use robust::{orient2d, Coord};

fn orientation(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    orient2d(
        Coord { x: o.0, y: o.1 },
        Coord { x: a.0, y: a.1 },
        Coord { x: b.0, y: b.1 },
    )
}

/// Andrew's monotone chain over planar coordinates.
///
/// Returns the indices of the strictly convex hull vertices in
/// counterclockwise order, starting at the lexicographically smallest point
/// and without repeating the first vertex at the end. Inputs with fewer than
/// three distinct points come back as-is (deduplicated, sorted).
pub(super) fn monotone_chain_indices(points: &[(f64, f64)]) -> Vec<usize> {
    let mut sorted: Vec<usize> = (0..points.len()).collect();
    sorted.sort_by(|&i, &j| {
        points[i]
            .partial_cmp(&points[j])
            .unwrap_or(Ordering::Equal)
    });
    sorted.dedup_by(|&mut i, &mut j| points[i] == points[j]);

    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(sorted.len() + 1);

    // Lower chain, west to east.
    for &i in &sorted {
        while hull.len() >= 2
            && orientation(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // Upper chain, east to west.
    let lower_len = hull.len() + 1;
    for &i in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && orientation(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // The upper chain ends back at the starting vertex.
    hull.pop();
    hull
}
