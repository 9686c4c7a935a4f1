// Output module
pub mod table;

pub use table::{OutputFormat, PatternRow, SampleReport, SampleRow, format_temperature};
