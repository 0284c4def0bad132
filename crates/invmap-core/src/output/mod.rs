//! Record assembly and tabular output.

mod assembler;
pub mod sink;

pub use assembler::{RecordAssembler, CASE_UNIT};
pub use sink::{write_csv, write_json, write_table, write_table_as, OutputFormat};
