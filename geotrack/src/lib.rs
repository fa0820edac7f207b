//! The `geotrack` crate analyzes trajectories of moving objects: aircraft,
//! vessel and vehicle tracks, or any other timestamped point sequence.
//!
//! # Types
//!
//! The data model lives in [`geotrack-types`](geotrack_types) and is
//! re-exported here: [`Point`], [`TrajectoryPoint`], [`Trajectory`],
//! [`LineString`], [`BoundingBox`] and [`PropertyMap`], all parameterized by
//! a [`CoordinateSystem`] ([`Terrestrial`], [`Cartesian2d`], [`Cartesian3d`]
//! or [`FeatureSpace`]).
//!
//! # Assembly
//!
//! - **[`TrajectoryAssembler`](assemble::TrajectoryAssembler)**: lazily
//!   groups a stream of raw samples into trajectories, splitting at
//!   configurable temporal and spatial gaps
//!
//! # Algorithms
//!
//! ## Measures
//!
//! - **[`Length`](algorithm::Length)**: total arc length of a trajectory or
//!   linestring
//! - **[`signed_turn_angle`](algorithm::signed_turn_angle)** /
//!   **[`unsigned_turn_angle`](algorithm::unsigned_turn_angle)**: turn at a
//!   vertex between two edges
//! - **[`speed_between`](algorithm::speed_between)**: average speed between
//!   two samples
//! - **[`Centroid`](algorithm::Centroid)**: mean position of a point set
//! - **[`RadiusOfGyration`](algorithm::RadiusOfGyration)**: spread of a
//!   trajectory around its centroid
//! - **[`Straightness`](algorithm::Straightness)**: end-to-end distance over
//!   traveled length
//! - **[`Curvature`](algorithm::Curvature)**: accumulated turning and
//!   turn-around detection
//! - **[`Annotate`](algorithm::Annotate)**: store per-sample speed, heading
//!   or progress as properties
//!
//! ## Sampling
//!
//! - **[`PointAtTime`](algorithm::PointAtTime)**: interpolated sample at an
//!   arbitrary instant
//! - **[`PointAtFraction`](algorithm::PointAtFraction)**: interpolated sample
//!   at a fraction of the arc length or of the time span
//! - **[`SubsetDuringInterval`](algorithm::SubsetDuringInterval)**: the
//!   portion of a trajectory inside a time interval
//! - **[`Simplify`](algorithm::Simplify)**: Ramer–Douglas–Peucker reduction
//! - **[`DistanceGeometry`](algorithm::DistanceGeometry)**: multilevel
//!   normalized chord-length signature
//!
//! ## Hulls
//!
//! - **[`ConvexHull`](algorithm::ConvexHull)**: planar or spherical convex
//!   hull as a closed ring
//! - **[`HullArea`](algorithm::HullArea)**,
//!   **[`HullCentroid`](algorithm::HullCentroid)**,
//!   **[`HullAspectRatio`](algorithm::HullAspectRatio)**: metrics of the
//!   spherical hull
//!
//! ## Earth geometry
//!
//! - **[`ecef`](algorithm::ecef)**: WGS-84 earth-centered earth-fixed
//!   conversions
//! - **[`find_best_fit_plane`](algorithm::find_best_fit_plane)** /
//!   **[`project_onto_plane`](algorithm::project_onto_plane)**: best-fit
//!   great-circle plane of a trajectory and projection onto it
//!
//! ## Indexing and clustering
//!
//! - **[`PointIndex`](algorithm::PointIndex)**: immutable R-tree over
//!   feature vectors with box and k-nearest-neighbor queries
//! - **[`cluster_labels`](algorithm::cluster_labels)**: DBSCAN with an
//!   anisotropic box neighborhood
//!
//! # Example
//!
//! ```
//! use chrono::{DateTime, Duration};
//! use geotrack::assemble::TrajectoryAssembler;
//! use geotrack::{Point, TrajectoryPoint};
//!
//! let start = DateTime::from_timestamp(1_500_000_000, 0).unwrap();
//! let samples = (0..5).map(|i| {
//!     TrajectoryPoint::new(
//!         "N123GT",
//!         Point::lon_lat(-106.61 + 0.01 * i as f64, 35.11),
//!         start + Duration::seconds(60 * i),
//!     )
//! });
//!
//! let assembler = TrajectoryAssembler::new()
//!     .with_separation_time(Duration::minutes(30))
//!     .with_separation_distance(100.0)
//!     .with_minimum_length(2);
//! let trajectories: Vec<_> = assembler.assemble(samples).collect();
//!
//! assert_eq!(trajectories.len(), 1);
//! assert_eq!(trajectories[0].len(), 5);
//! assert_eq!(trajectories[0].object_id(), Some("N123GT"));
//! ```

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod algorithm;
pub mod assemble;

pub use crate::algorithm::*;
pub use geotrack_types::{
    normalize_longitude, BoundingBox, Cartesian2d, Cartesian3d, CoordinateSystem, Error,
    FeatureSpace, FeatureVector, LineString, Point, PropertyMap, PropertyValue, Terrestrial,
    Trajectory, TrajectoryPoint, EARTH_RADIUS_KM,
};

/// A prelude importing the trait surface in one line.
pub mod prelude {
    pub use crate::algorithm::{
        Annotate, Centroid, ConvexHull, Curvature, Dbscan, DistanceGeometry, HullArea,
        HullAspectRatio, HullCentroid, Length, PointAtFraction, PointAtTime, RadiusOfGyration,
        Simplify, Straightness, SubsetDuringInterval,
    };
}
