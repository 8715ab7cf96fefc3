//! Background Tasks Module
//!
//! Contains the long-lived tasks that run during service operation.
//!
//! # Tasks
//! - Periodic sweep: deletes expired PDF artifacts at a configured interval

mod janitor;

pub use janitor::{JanitorStatus, PdfJanitor, SweepTaskId};
