//! The `geotrack-types` crate provides the data model shared by the
//! `geotrack` trajectory-analysis algorithms.
//!
//! # Types
//!
//! - **[`Point`]**: a position with a fixed number of `f64` coordinates,
//!   parameterized by its [`CoordinateSystem`]
//! - **[`TrajectoryPoint`]**: a [`Point`] enriched with an object id, a UTC
//!   timestamp and a [`PropertyMap`]
//! - **[`Trajectory`]**: an ordered, invariant-preserving sequence of
//!   [`TrajectoryPoint`]s belonging to a single moving object
//! - **[`LineString`]**: an ordered sequence of bare [`Point`]s
//! - **[`BoundingBox`]**: an axis-aligned box defined by two corner points
//! - **[`PropertyMap`]**: per-point/per-trajectory metadata keyed by string,
//!   with a first-class null variant
//!
//! # Coordinate systems
//!
//! Every geometric type carries its coordinate system in its type: mixing
//! points from different systems in one operation is a compile error. Four
//! systems are provided:
//!
//! - **[`Terrestrial`]**: longitude/latitude in degrees on a spherical earth;
//!   distances in kilometers, speeds in km/h
//! - **[`Cartesian2d`]** and **[`Cartesian3d`]**: dimensionless flat space
//! - **[`FeatureSpace`]**: `D`-dimensional flat space for 1 ≤ D ≤ 30, used
//!   for feature-vector fingerprints
//!
//! The [`CoordinateSystem`] trait is the dispatch table that gives each
//! system its distance, bearing, interpolation and speed semantics.
//!
//! # Features
//!
//! - `use-rstar`: implements [`rstar::Point`] for [`Point`] so geometries can
//!   be indexed by an R-tree
//! - `serde`: serialization support for all types
//! - `approx`: approximate-equality comparisons for [`Point`]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(test)]
#[macro_use]
extern crate approx;

mod bounding_box;
mod coordinate_system;
mod error;
mod line_string;
mod point;
mod properties;
mod trajectory;
mod trajectory_point;

#[cfg(feature = "use-rstar")]
mod track_rstar;

pub use crate::bounding_box::BoundingBox;
pub use crate::coordinate_system::{
    normalize_longitude, Cartesian2d, Cartesian3d, CoordinateSystem, FeatureSpace, Terrestrial,
};
pub use crate::error::Error;
pub use crate::line_string::LineString;
pub use crate::point::Point;
pub use crate::properties::{PropertyMap, PropertyValue};
pub use crate::trajectory::Trajectory;
pub use crate::trajectory_point::TrajectoryPoint;

/// A point in a `D`-dimensional feature space, used as an opaque fingerprint
/// of a trajectory.
pub type FeatureVector<const D: usize> = Point<FeatureSpace<D>>;

/// Mean earth radius in kilometers.
///
/// Scales great-circle central angles into kilometers and spherical hull
/// areas into km².
pub const EARTH_RADIUS_KM: f64 = 6371.0;
