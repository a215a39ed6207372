// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Snapshot diffing and animation scheduling for ant-colony replays.
//!
//! A replay is a sequence of world snapshots (teams, nodes, edges, ants on
//! nodes and in transit). For every pair of consecutive snapshots this
//! crate works out what changed and produces tweens that carry the scene
//! from one snapshot to the next under a single progress value.
//!
//! # Key entry points
//!
//! - [`world::WorldSnapshot`] - normalized, validated snapshot
//! - [`animation::Scheduler`] - drives every generator of a step
//! - [`scene::StepScene`] - visual entities plus draw commands for a step
//! - [`replay::ReplayPlayer`] - host-facing step driver
//! - [`options::Options`] - playback, display, geometry and easing settings
//!
//! # Pipeline
//!
//! raw snapshot → [`world::WorldSnapshot::build`] →
//! [`world::WorldSnapshot::with_next`] → [`scene::StepScene::build`] →
//! `advance(progress)` → [`scene::StepScene::draw_list`].

pub mod animation;
pub mod error;
pub mod options;
pub mod replay;
pub mod scene;
pub mod util;
pub mod world;
