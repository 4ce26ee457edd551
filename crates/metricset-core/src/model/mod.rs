//! In-memory metric model.
//!
//! - `Instance`: one sample (name, value, labels).
//! - `Metric`: instances sharing a name, with type, help text and comments.
//! - `Collection`: ordered name -> metric mapping; the mutation entry point.

pub mod collection;
pub mod instance;
pub mod kind;
pub mod labels;
pub mod metric;
pub mod names;
pub mod repr;
pub mod value;

pub use collection::{Collection, Declare};
pub use instance::Instance;
pub use kind::MetricType;
pub use labels::Labels;
pub use metric::Metric;
pub use repr::{MetricRepr, Representation};
pub use value::{InvalidValue, Value};
