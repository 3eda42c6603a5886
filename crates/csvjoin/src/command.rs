use std::fmt;
use std::str::FromStr;

use csvjoin_error::JoinError;

/// A command entered at the prompt.
///
/// The only command is `join <left> <right> <column> <type>`, arguments
/// separated by whitespace. The join type is validated when the join runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join {
        left: String,
        right: String,
        column: String,
        join_type: String,
    },
}

impl FromStr for Command {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        if parts.next() != Some("join") {
            return Err(JoinError::InvalidCommand(s.trim().to_string()));
        }

        let args: Vec<_> = parts.collect();
        match args.as_slice() {
            [left, right, column, join_type] => Ok(Command::Join {
                left: left.to_string(),
                right: right.to_string(),
                column: column.to_string(),
                join_type: join_type.to_string(),
            }),
            _ => Err(JoinError::InvalidCommand(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Join {
                left,
                right,
                column,
                join_type,
            } => write!(f, "join {left} {right} {column} {join_type}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        struct TestCase {
            input: &'static str,
            expected: Option<Command>,
        }

        let join = |l: &str, r: &str, c: &str, t: &str| Command::Join {
            left: l.to_string(),
            right: r.to_string(),
            column: c.to_string(),
            join_type: t.to_string(),
        };

        let test_cases = [
            TestCase {
                input: "join a.csv b.csv id inner",
                expected: Some(join("a.csv", "b.csv", "id", "inner")),
            },
            TestCase {
                input: "  join   a.csv\tb.csv ID LEFT \n",
                expected: Some(join("a.csv", "b.csv", "ID", "LEFT")),
            },
            // Join type is checked later.
            TestCase {
                input: "join a.csv b.csv id outer",
                expected: Some(join("a.csv", "b.csv", "id", "outer")),
            },
            TestCase {
                input: "join",
                expected: None,
            },
            TestCase {
                input: "join a.csv b.csv id",
                expected: None,
            },
            TestCase {
                input: "join a.csv b.csv id inner extra",
                expected: None,
            },
            TestCase {
                input: "joined a.csv b.csv id inner",
                expected: None,
            },
            TestCase {
                input: "",
                expected: None,
            },
        ];

        for tc in test_cases {
            let got = tc.input.parse::<Command>().ok();
            assert_eq!(tc.expected, got, "input: {:?}", tc.input);
        }
    }

    #[test]
    fn invalid_command_error() {
        let err = "select 1".parse::<Command>().unwrap_err();
        assert_eq!(
            "wrong joining command 'select 1', expected: join <left> <right> <column> <type>",
            err.to_string()
        );
    }

    #[test]
    fn display_round_trips() {
        let cmd: Command = "join a b c right".parse().unwrap();
        assert_eq!("join a b c right", cmd.to_string());
    }
}
