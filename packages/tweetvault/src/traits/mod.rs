//! Core trait abstractions.
//!
//! The pipeline only talks to these seams, so tests can swap in the mocks from
//! [`crate::testing`].

pub mod ai;
pub mod source;
