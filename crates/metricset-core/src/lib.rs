//! metricset core: in-memory metric model and text exposition codec.
//!
//! A [`Collection`] holds named metrics in insertion order. It is mutated
//! through declarative calls (declare, rename, merge), rendered to the
//! Prometheus text exposition format and parsed back from it.
//!
//! # Permissive validation
//! Invalid metric names, label keys and types are never rejected: the value
//! is stored as given and the problem is reported through [`Diagnostics`].
//! Panics, `unwrap`, and `expect` are compile-denied here.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod codec;
pub mod diag;
pub mod error;
pub mod model;

pub use diag::{Diagnostic, DiagnosticSink, Diagnostics, Recorder, Severity, TracingSink};
/// Shared result type.
pub use error::{ErrorCode, MetricSetError, Result};
pub use model::{Collection, Declare, Instance, Labels, Metric, MetricType, Value};
