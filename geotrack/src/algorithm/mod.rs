/// Derived per-sample scalars (speed, heading, progress) stored as
/// properties.
pub mod annotate;
/// Mean position of a set of points.
pub mod centroid;
/// Convex hulls on the plane and on the sphere, with derived metrics.
pub mod convex_hull;
/// Accumulated turning of a trajectory and turn-around detection.
pub mod curvature;
/// DBSCAN density clustering over feature vectors.
pub mod dbscan;
/// Multilevel normalized chord-length signatures of a trajectory.
pub mod distance_geometry;
/// WGS-84 earth-centered earth-fixed coordinate conversions.
pub mod ecef;
/// Best-fit great-circle plane of a trajectory and projection onto it.
pub mod great_circle_fit;
/// Arc length of trajectories and linestrings.
pub mod length;
/// Interpolated sample at a fraction of arc length or of the time span.
pub mod point_at_fraction;
/// Interpolated sample of a trajectory at an arbitrary instant.
pub mod point_at_time;
/// Spread of a trajectory around its centroid.
pub mod radius_of_gyration;
/// Immutable R-tree index over feature vectors.
pub mod rtree;
/// Ramer–Douglas–Peucker reduction preserving endpoints and properties.
pub mod simplify;
/// Average speed between two samples.
pub mod speed;
/// End-to-end distance over traveled length.
pub mod straightness;
/// The portion of a trajectory inside a time interval.
pub mod subset_during_interval;
/// Turn angle at a vertex between two edges.
pub mod turn_angle;

pub use annotate::Annotate;
pub use centroid::Centroid;
pub use convex_hull::{ConvexHull, HullArea, HullAspectRatio, HullCentroid};
pub use curvature::Curvature;
pub use dbscan::{cluster_labels, Dbscan, NOISE};
pub use distance_geometry::DistanceGeometry;
pub use ecef::AltitudeUnits;
pub use great_circle_fit::{
    find_best_fit_plane, find_best_fit_plane_with_altitude, project_onto_plane,
    project_onto_plane_with_altitude,
};
pub use length::Length;
pub use point_at_fraction::PointAtFraction;
pub use point_at_time::PointAtTime;
pub use radius_of_gyration::RadiusOfGyration;
pub use rtree::PointIndex;
pub use simplify::Simplify;
pub use speed::speed_between;
pub use straightness::Straightness;
pub use subset_during_interval::SubsetDuringInterval;
pub use turn_angle::{signed_turn_angle, unsigned_turn_angle};
