use std::io;
use std::path::{Path, PathBuf};

use csvjoin_core::join::{JoinColumn, JoinType, join_tables};
use csvjoin_core::table::Table;
use csvjoin_csv::{CsvReader, CsvWriter, TableSource};
use csvjoin_error::{JoinError, Result};
use tracing::info;

use crate::config::JoinConfig;

/// Result of a successful `join_files`.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Absolute path of the written csv.
    pub path: PathBuf,
    /// The joined table as written.
    pub table: Table,
}

impl JoinOutcome {
    /// Directory the output was written to.
    pub fn output_dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    pub fn num_rows(&self) -> usize {
        self.table.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.table.num_columns()
    }
}

/// Join two csv inputs and write the result.
///
/// Both inputs are loaded, the column is resolved in both (ignoring case),
/// then the join type is parsed. Any failure returns before the output is
/// touched. The output goes to a temporary file in the output directory that's
/// renamed into place once fully written.
pub fn join_files(
    left: impl Into<TableSource>,
    right: impl Into<TableSource>,
    column_name: &str,
    join_type: &str,
    config: &JoinConfig,
) -> Result<JoinOutcome> {
    let left = left.into();
    let right = right.into();

    let output_dir = match (&config.output_dir, left.parent_dir()) {
        (Some(dir), _) => dir.clone(),
        (None, Some(dir)) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        (None, _) => PathBuf::from("."),
    };
    let output_path = std::path::absolute(output_dir.join(&config.output_file_name))?;

    let reader = CsvReader::new(config.dialect);
    let left = left.load(&reader)?;
    let right = right.load(&reader)?;

    let column_name = column_name.to_uppercase();
    let column = JoinColumn::resolve(&column_name, &left, &right)?;
    let join_type: JoinType = join_type.parse()?;

    info!(column = %column_name, %join_type, "joining inputs");

    let table = join_tables(&left, &right, &column, join_type)?;

    write_atomic(&table, &output_path, &mut CsvWriter::new(config.dialect))?;

    info!(
        path = %output_path.display(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "joining result written"
    );

    Ok(JoinOutcome {
        path: output_path,
        table,
    })
}

/// Write to a sibling temp file, then rename it over `path`.
fn write_atomic(table: &Table, path: &Path, writer: &mut CsvWriter) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = tempfile::Builder::new()
        .prefix(".csvjoin-")
        .suffix(".csv.tmp")
        .tempfile_in(dir)
        .map_err(|e| JoinError::write(path, e))?;

    writer.write(table, path, io::BufWriter::new(tmp.as_file()))?;

    tmp.persist(path)
        .map_err(|e| JoinError::write(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use csvjoin_core::column::Column;
    use csvjoin_core::scalar::ScalarValue;

    use super::*;

    const LEFT: &str = "ID,NAME\n1,a\n2,b\n";
    const RIGHT: &str = "ID,CITY\n2,X\n3,Y\n";

    struct Fixture {
        dir: tempfile::TempDir,
        left: PathBuf,
        right: PathBuf,
    }

    fn fixture() -> Fixture {
        logutil::init_test();
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.csv");
        let right = dir.path().join("right.csv");
        fs::write(&left, LEFT).unwrap();
        fs::write(&right, RIGHT).unwrap();
        Fixture { dir, left, right }
    }

    fn output_path(fx: &Fixture) -> PathBuf {
        fx.dir.path().join("joining_result.csv")
    }

    #[test]
    fn writes_next_to_left_input() {
        let fx = fixture();

        let outcome = join_files(
            fx.left.as_path(),
            fx.right.as_path(),
            "ID",
            "inner",
            &JoinConfig::default(),
        )
        .unwrap();

        assert_eq!(std::path::absolute(output_path(&fx)).unwrap(), outcome.path);
        assert_eq!((1, 3), (outcome.num_rows(), outcome.num_columns()));
        assert_eq!(
            "ID,NAME,CITY\n2,b,X\n",
            fs::read_to_string(&outcome.path).unwrap()
        );
    }

    #[test]
    fn left_and_right_joins() {
        struct TestCase {
            join_type: &'static str,
            expected: &'static str,
        }

        let test_cases = [
            TestCase {
                join_type: "left",
                expected: "ID,NAME,CITY\n1,a,\n2,b,X\n",
            },
            TestCase {
                join_type: "RIGHT",
                expected: "ID,CITY,NAME\n2,X,b\n3,Y,\n",
            },
        ];

        for tc in test_cases {
            let fx = fixture();
            let outcome = join_files(
                fx.left.as_path(),
                fx.right.as_path(),
                "id",
                tc.join_type,
                &JoinConfig::default(),
            )
            .unwrap();
            assert_eq!(
                tc.expected,
                fs::read_to_string(&outcome.path).unwrap(),
                "join type: {}",
                tc.join_type
            );
        }
    }

    #[test]
    fn invalid_column_writes_nothing() {
        let fx = fixture();

        let err = join_files(
            fx.left.as_path(),
            fx.right.as_path(),
            "missing",
            "inner",
            &JoinConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, JoinError::InvalidColumn { .. }));
        assert!(!output_path(&fx).exists());
    }

    #[test]
    fn column_checked_before_join_type() {
        let fx = fixture();

        let err = join_files(
            fx.left.as_path(),
            fx.right.as_path(),
            "missing",
            "outer",
            &JoinConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, JoinError::InvalidColumn { .. }));
    }

    #[test]
    fn invalid_join_type_writes_nothing() {
        let fx = fixture();

        let err = join_files(
            fx.left.as_path(),
            fx.right.as_path(),
            "id",
            "outer",
            &JoinConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, JoinError::InvalidJoinType(_)));
        assert!(!output_path(&fx).exists());
    }

    #[test]
    fn missing_input() {
        let fx = fixture();
        let missing = fx.dir.path().join("nope.csv");

        let err = join_files(
            fx.left.as_path(),
            missing.as_path(),
            "id",
            "inner",
            &JoinConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, JoinError::FileNotFound { .. }));
        assert!(!output_path(&fx).exists());
    }

    #[test]
    fn configured_output_location() {
        let fx = fixture();
        let out_dir = tempfile::tempdir().unwrap();
        let config = JoinConfig {
            output_file_name: "out.csv".to_string(),
            output_dir: Some(out_dir.path().to_path_buf()),
            ..Default::default()
        };

        let outcome = join_files(
            fx.left.as_path(),
            fx.right.as_path(),
            "id",
            "inner",
            &config,
        )
        .unwrap();

        assert!(out_dir.path().join("out.csv").exists());
        assert!(!output_path(&fx).exists());
        assert_eq!(
            std::path::absolute(out_dir.path()).unwrap(),
            outcome.output_dir()
        );
    }

    #[test]
    fn overwrites_previous_result() {
        let fx = fixture();
        fs::write(output_path(&fx), "stale").unwrap();

        join_files(
            fx.left.as_path(),
            fx.right.as_path(),
            "id",
            "inner",
            &JoinConfig::default(),
        )
        .unwrap();

        assert_eq!(
            "ID,NAME,CITY\n2,b,X\n",
            fs::read_to_string(output_path(&fx)).unwrap()
        );
    }

    #[test]
    fn keys_kept_exactly() {
        struct TestCase {
            left: &'static str,
            right: &'static str,
            expected: &'static str,
        }

        let test_cases = [
            // Distinct ids that round to the same float.
            TestCase {
                left: "id,a\n12345678901234567890,x\n",
                right: "id,b\n12345678901234567891,y\n",
                expected: "id,a,b\n",
            },
            TestCase {
                left: "id,a\n12345678901234567890,x\n",
                right: "id,b\n12345678901234567890,y\n",
                expected: "id,a,b\n12345678901234567890,x,y\n",
            },
            TestCase {
                left: "id,a\nNAN,x\n",
                right: "id,b\nNAN,y\n",
                expected: "id,a,b\nNAN,x,y\n",
            },
        ];

        for tc in test_cases {
            let dir = tempfile::tempdir().unwrap();
            let left = dir.path().join("left.csv");
            let right = dir.path().join("right.csv");
            fs::write(&left, tc.left).unwrap();
            fs::write(&right, tc.right).unwrap();

            let outcome = join_files(
                left.as_path(),
                right.as_path(),
                "id",
                "inner",
                &JoinConfig::default(),
            )
            .unwrap();
            assert_eq!(
                tc.expected,
                fs::read_to_string(&outcome.path).unwrap(),
                "left: {:?}",
                tc.left
            );
        }
    }

    #[test]
    fn in_memory_inputs() {
        let out_dir = tempfile::tempdir().unwrap();
        let left = Table::try_new([
            Column::from_values("k", ["b", "a"]),
            Column::from_values("v", [1_i64, 2]),
        ])
        .unwrap();
        let right = Table::try_new([
            Column::from_values("K", ["a"]),
            Column::from_values("w", [true]),
        ])
        .unwrap();
        let config = JoinConfig {
            output_dir: Some(out_dir.path().to_path_buf()),
            ..Default::default()
        };

        let outcome = join_files(left, right, "k", "left", &config).unwrap();

        assert_eq!(
            &[ScalarValue::Boolean(true), ScalarValue::Null],
            outcome.table.column(2).unwrap().values()
        );
        assert_eq!(
            "k,v,w\na,2,true\nb,1,\n",
            fs::read_to_string(&outcome.path).unwrap()
        );
    }
}
