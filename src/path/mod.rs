/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!
//! # Path assembly
//!
//! Mirrors `flo_curves::bezier::path`: the input/output path plumbing (`event`,
//! `builder`), the pieces the orchestrator (`stroke`) is built from (`join_cap`), the
//! dash generator collaborator (`dash`), and the driver (`driver`) that ties them
//! together behind the crate's single public entry point, [`stroke()`].
//!

pub mod builder;
pub mod dash;
pub mod driver;
pub mod event;
pub mod join_cap;
pub mod stroke;

pub use builder::{BezPath, PathBuilder};
pub use dash::DashedContour;
pub use driver::stroke;
pub use event::{ContourSource, PathEvent};
pub use join_cap::{LineCap, LineJoin};
pub use stroke::StrokeOptions;
