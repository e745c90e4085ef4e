//! Participants domain module (registry of people sharing expenses).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod registry;

pub use registry::{Participant, ParticipantRegistry};
