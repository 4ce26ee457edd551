//! metricset: Prometheus text exposition as an editable metric collection.
//!
//! - [`core`]: the `Collection` / `Metric` / `Instance` model, the exposition
//!   codec (`Collection::serialize`, `Collection::load`), diagnostics and the
//!   shared error type.
//! - [`tool`]: the YAML rule config (declare / rename / merge), logging setup
//!   and the pipeline behind the `metricset-tool` binary.
//!
//! Depend on this crate to get both under one name.

pub mod core {
    pub use metricset_core::*;
}

pub mod tool {
    pub use metricset_tool::*;
}
