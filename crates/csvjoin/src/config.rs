use std::path::PathBuf;

use csvjoin_csv::DialectOptions;

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "joining_result.csv";

/// Where and how a join result is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinConfig {
    /// File name of the output csv.
    pub output_file_name: String,
    /// Directory to write the output to. Defaults to the directory of the left
    /// input.
    pub output_dir: Option<PathBuf>,
    /// Dialect used for reading both inputs and writing the output.
    pub dialect: DialectOptions,
}

impl Default for JoinConfig {
    fn default() -> Self {
        JoinConfig {
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            output_dir: None,
            dialect: DialectOptions::default(),
        }
    }
}
