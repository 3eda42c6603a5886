//! Reading and writing tables as csv.

pub mod dialect;
pub mod reader;
pub mod source;
pub mod writer;

pub use dialect::DialectOptions;
pub use reader::CsvReader;
pub use source::TableSource;
pub use writer::CsvWriter;
