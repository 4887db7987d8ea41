//! Data shapes accepted by widget data fields.

#[cfg(feature = "polars")]
pub mod frame;
pub mod input;
pub mod record;
pub mod table;

pub use input::{DataInput, json_type_name};
pub use record::{DataSet, Record};
pub use table::Table;
