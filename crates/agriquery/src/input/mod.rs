//! Raw tabular input: CSV parsing and JSON record decoding.

mod parser;
mod records;
mod table;

pub use parser::Parser;
pub use records::parse_records;
pub use table::RawTable;
