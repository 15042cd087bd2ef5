//! Resona background worker library.
//!
//! The worker binary polls the jobs table, claims pending jobs one at a
//! time, and executes the audio processing tasks. The library split
//! exists so task execution can be driven directly from integration
//! tests.

pub mod runtime;
pub mod tasks;

pub use runtime::WorkerRuntime;
