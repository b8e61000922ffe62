// src/graph/mod.rs

//! Task graph model.
//!
//! - [`attrs`] is the string-keyed attribute store with typed `Weight`
//!   accessors.
//! - [`model`] holds the resolved graph arena and topological ordering.

pub mod attrs;
pub mod model;

pub use attrs::AttrMap;
pub use model::{DepId, TaskGraph, TaskId, TaskNode};
