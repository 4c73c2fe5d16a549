//! Parameter tokenizers for G-code words like `S220` or `P500`

use thiserror::Error;

/// Why a parameter could not be read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("no '{0}' parameter")]
    Missing(char),

    #[error("'{letter}' parameter has no value")]
    MissingValue { letter: char },

    #[error("'{letter}' parameter value {value:?} is not a valid number")]
    InvalidValue { letter: char, value: String },
}

/// Text following the first occurrence of `letter`
fn after_letter(command: &str, letter: char) -> Result<&str, ParamError> {
    command
        .find(letter)
        .map(|pos| &command[pos + letter.len_utf8()..])
        .ok_or(ParamError::Missing(letter))
}

/// Integer following the first `letter`, up to the next whitespace
///
/// `integer_after("M104 S220 T0", 'S')` is `Ok(220)`.
pub fn integer_after(command: &str, letter: char) -> Result<i32, ParamError> {
    let value = after_letter(command, letter)?
        .split_whitespace()
        .next()
        .ok_or(ParamError::MissingValue { letter })?;

    value.parse().map_err(|_| ParamError::InvalidValue {
        letter,
        value: value.to_string(),
    })
}

/// Decimal number following the first `letter`
///
/// Leading whitespace is skipped and the number ends at the first character
/// that cannot be part of it, so `G4 P500;comment` reads 500.
pub fn number_after(command: &str, letter: char) -> Result<f64, ParamError> {
    let rest = after_letter(command, letter)?.trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(rest.len());
    let value = &rest[..end];

    if value.is_empty() {
        return Err(ParamError::MissingValue { letter });
    }

    value.parse().map_err(|_| ParamError::InvalidValue {
        letter,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_after() {
        assert_eq!(integer_after("M104 S220", 'S'), Ok(220));
        assert_eq!(integer_after("M140 S60 ; bed", 'S'), Ok(60));
        assert_eq!(integer_after("M104 S-5", 'S'), Ok(-5));
        assert_eq!(integer_after("M104 S 215", 'S'), Ok(215));
    }

    #[test]
    fn test_integer_after_failures() {
        assert_eq!(integer_after("M104", 'S'), Err(ParamError::Missing('S')));
        assert_eq!(
            integer_after("M104 S", 'S'),
            Err(ParamError::MissingValue { letter: 'S' })
        );
        assert_eq!(
            integer_after("M104 Sabc", 'S'),
            Err(ParamError::InvalidValue {
                letter: 'S',
                value: "abc".into()
            })
        );
        assert!(integer_after("M104 S220.5", 'S').is_err());
    }

    #[test]
    fn test_number_after() {
        assert_eq!(number_after("G4 S1.5", 'S'), Ok(1.5));
        assert_eq!(number_after("G4 P500;wait", 'P'), Ok(500.0));
        assert_eq!(number_after("G4 P 250", 'P'), Ok(250.0));
        assert_eq!(number_after("G4", 'P'), Err(ParamError::Missing('P')));
        assert_eq!(
            number_after("G4 Px", 'P'),
            Err(ParamError::MissingValue { letter: 'P' })
        );
        assert!(matches!(
            number_after("G4 P1-2", 'P'),
            Err(ParamError::InvalidValue { .. })
        ));
    }
}
