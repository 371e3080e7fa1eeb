use std::error::Error;
use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use tracing::warn;

use crate::infra::Position;

#[derive(Debug)]
pub enum ProtocolError {
    Io(io::Error),
    UnexpectedEof { expected: &'static str },
    InvalidNumber { line: String, value: String },
    WrongFieldCount { line: String, expected: usize, found: usize },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProtocolError::Io(err) => write!(formatter, "I/O error: {}", err),
            ProtocolError::UnexpectedEof { expected } => {
                write!(formatter, "Input ended while reading {}", expected)
            }
            ProtocolError::InvalidNumber { line, value } => {
                write!(formatter, "Invalid number '{}' in line '{}'", value, line)
            }
            ProtocolError::WrongFieldCount {
                line,
                expected,
                found,
            } => write!(
                formatter,
                "Expected {} fields but found {} in line '{}'",
                expected, found, line
            ),
        }
    }
}

impl Error for ProtocolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProtocolError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(err: io::Error) -> Self {
        ProtocolError::Io(err)
    }
}

/// Session header: grid size and alarm countdown length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub rows: i32,
    pub columns: i32,
    pub alarm_rounds: i32,
}

impl GameSettings {
    /// Read the header line. `Ok(None)` means the input was empty.
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Option<Self>, ProtocolError> {
        match read_line(reader)? {
            Some(line) => line.parse().map(Some),
            None => Ok(None),
        }
    }
}

impl FromStr for GameSettings {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let [rows, columns, alarm_rounds] = parse_numbers::<3>(line)?;
        Ok(GameSettings {
            rows,
            columns,
            alarm_rounds,
        })
    }
}

impl fmt::Display for GameSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.rows, self.columns, self.alarm_rounds)
    }
}

/// One turn of input: Rick's position and the visible grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    pub rick_pos: Position,
    pub rows: Vec<String>,
}

impl TurnInput {
    /// Read the next turn. `Ok(None)` means the session ended cleanly.
    pub fn read<R: BufRead>(
        reader: &mut R,
        settings: &GameSettings,
    ) -> Result<Option<Self>, ProtocolError> {
        let Some(line) = read_line(reader)? else {
            return Ok(None);
        };
        let [row, col] = parse_numbers::<2>(&line)?;

        let columns = settings.columns.max(0) as usize;
        let mut rows = Vec::with_capacity(settings.rows.max(0) as usize);
        for _ in 0..settings.rows {
            let mut row_line = read_line(reader)?.ok_or(ProtocolError::UnexpectedEof {
                expected: "grid row",
            })?;
            if row_line.chars().count() > columns {
                warn!(
                    "Grid row '{}' longer than {} columns, truncating",
                    row_line, columns
                );
                row_line = row_line.chars().take(columns).collect();
            }
            rows.push(row_line);
        }

        Ok(Some(TurnInput {
            rick_pos: Position::from_row_col(row, col),
            rows,
        }))
    }
}

impl fmt::Display for TurnInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.rick_pos.y, self.rick_pos.x)?;
        for row in &self.rows {
            write!(f, "\n{}", row)?;
        }
        Ok(())
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

fn parse_numbers<const N: usize>(line: &str) -> Result<[i32; N], ProtocolError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != N {
        return Err(ProtocolError::WrongFieldCount {
            line: line.to_string(),
            expected: N,
            found: fields.len(),
        });
    }

    let mut numbers = [0; N];
    for (number, field) in numbers.iter_mut().zip(fields) {
        *number = field.parse().map_err(|_| ProtocolError::InvalidNumber {
            line: line.to_string(),
            value: field.to_string(),
        })?;
    }
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_settings() {
        let mut input = Cursor::new("15 30 52\n");
        let settings = GameSettings::read(&mut input).unwrap().unwrap();
        assert_eq!(
            settings,
            GameSettings {
                rows: 15,
                columns: 30,
                alarm_rounds: 52
            }
        );
        assert_eq!(settings.to_string(), "15 30 52");
        assert!(GameSettings::read(&mut input).unwrap().is_none());
    }

    #[test]
    fn test_parse_settings_errors() {
        assert!(matches!(
            "15 x 52".parse::<GameSettings>(),
            Err(ProtocolError::InvalidNumber { value, .. }) if value == "x"
        ));
        assert!(matches!(
            "15 30".parse::<GameSettings>(),
            Err(ProtocolError::WrongFieldCount {
                expected: 3,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_read_turn_maps_row_col() {
        let settings = GameSettings {
            rows: 2,
            columns: 3,
            alarm_rounds: 1,
        };
        let mut input = Cursor::new("1 2\r\n#T?\n..C\n");
        let turn = TurnInput::read(&mut input, &settings).unwrap().unwrap();
        assert_eq!(turn.rick_pos, Position::new(2, 1));
        assert_eq!(turn.rows, vec!["#T?".to_string(), "..C".to_string()]);
        assert_eq!(turn.to_string(), "1 2\n#T?\n..C");
        assert!(TurnInput::read(&mut input, &settings).unwrap().is_none());
    }

    #[test]
    fn test_read_turn_truncated_grid() {
        let settings = GameSettings {
            rows: 3,
            columns: 3,
            alarm_rounds: 1,
        };
        let mut input = Cursor::new("0 0\nT..\n");
        let err = TurnInput::read(&mut input, &settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { .. }));
        assert_eq!(err.to_string(), "Input ended while reading grid row");
    }

    #[test]
    fn test_read_turn_trims_long_rows() {
        let settings = GameSettings {
            rows: 1,
            columns: 2,
            alarm_rounds: 1,
        };
        let mut input = Cursor::new("0 0\nT.#\n");
        let turn = TurnInput::read(&mut input, &settings).unwrap().unwrap();
        assert_eq!(turn.rows, vec!["T.".to_string()]);
    }
}
