//! Parser for the canonical value text grammar.
//!
//! The grammar is the one every evaluation tool emits and consumes:
//!
//! ```text
//! value   := bits | tuple | array
//! bits    := "bits" "[" width "]" ":" literal
//! literal := ["-"] ("0x" hex-digits | "0b" bin-digits | dec-digits)
//! tuple   := "(" [value {"," value}] ")"
//! array   := "[" [value {"," value}] "]"
//! ```
//!
//! Digits may contain `_` separators. Literals wider than the declared
//! width are truncated to it, matching the leniency of the constructors in
//! [`crate::value`].

use crate::value::{word_count, Bits, Value};

/// Errors produced while parsing value text.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueParseError {
    /// Input ended in the middle of a value.
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    /// A required token was not found.
    #[error("expected {expected} at offset {offset}")]
    Expected {
        /// Description of the expected token.
        expected: &'static str,
        /// Byte offset where parsing stopped.
        offset: usize,
    },

    /// A literal contained no digits.
    #[error("literal has no digits at offset {0}")]
    EmptyLiteral(usize),

    /// Input continued past a complete value.
    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    /// A line of a line-delimited sequence failed to parse.
    #[error("line {line}: {error}")]
    Line {
        /// 1-based line number within the input.
        line: usize,
        /// The underlying parse error.
        error: Box<ValueParseError>,
    },
}

/// Parses a single value in canonical text form.
pub fn parse_value(s: &str) -> Result<Value, ValueParseError> {
    let mut parser = Parser::new(s);
    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos != parser.bytes.len() {
        return Err(ValueParseError::TrailingInput(parser.pos));
    }
    Ok(value)
}

/// Parses a line-delimited sequence of values. Blank lines are ignored.
pub fn parse_values(s: &str) -> Result<Vec<Value>, ValueParseError> {
    s.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_value(line.trim()).map_err(|error| ValueParseError::Line {
                line: i + 1,
                error: Box::new(error),
            })
        })
        .collect()
}

/// Renders a sequence of values in the line-delimited text form.
pub fn values_to_text(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ValueParseError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ValueParseError::Expected {
                expected,
                offset: self.pos,
            }),
            None => Err(ValueParseError::UnexpectedEnd(self.pos)),
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.bytes[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Result<Value, ValueParseError> {
        self.skip_ws();
        match self.peek() {
            Some(b'(') => self.tuple(),
            Some(b'[') => self.array(),
            Some(b'b') => self.bits(),
            Some(_) => Err(ValueParseError::Expected {
                expected: "a value",
                offset: self.pos,
            }),
            None => Err(ValueParseError::UnexpectedEnd(self.pos)),
        }
    }

    fn bits(&mut self) -> Result<Value, ValueParseError> {
        if !self.eat("bits") {
            return Err(ValueParseError::Expected {
                expected: "`bits`",
                offset: self.pos,
            });
        }
        self.expect(b'[', "`[`")?;
        let width = self.width()?;
        self.expect(b']', "`]`")?;
        self.expect(b':', "`:`")?;
        let bits = self.literal(width)?;
        Ok(Value::Bits(bits))
    }

    fn width(&mut self) -> Result<u32, ValueParseError> {
        let start = self.pos;
        let mut width: u64 = 0;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            width = width.saturating_mul(10).saturating_add(u64::from(b - b'0'));
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ValueParseError::Expected {
                expected: "a bit width",
                offset: start,
            });
        }
        u32::try_from(width).map_err(|_| ValueParseError::Expected {
            expected: "a bit width that fits in 32 bits",
            offset: start,
        })
    }

    fn literal(&mut self, width: u32) -> Result<Bits, ValueParseError> {
        let negative = self.eat("-");
        let radix: u64 = if self.eat("0x") {
            16
        } else if self.eat("0b") {
            2
        } else {
            10
        };
        let start = self.pos;
        let mut words = vec![0u64];
        let mut saw_digit = false;
        while let Some(b) = self.peek() {
            if b == b'_' {
                self.pos += 1;
                continue;
            }
            let Some(digit) = (b as char).to_digit(radix as u32) else {
                break;
            };
            mul_add(&mut words, radix, u64::from(digit));
            saw_digit = true;
            self.pos += 1;
        }
        if !saw_digit {
            return Err(ValueParseError::EmptyLiteral(start));
        }
        // Truncate or pad to the declared width, then negate in place for
        // two's complement literals. Bits::from_words masks the top word.
        words.resize(word_count(width), 0);
        if negative {
            negate(&mut words);
        }
        Ok(Bits::from_words(width, words))
    }

    fn tuple(&mut self) -> Result<Value, ValueParseError> {
        let elements = self.elements(b'(', b')', "`)`")?;
        Ok(Value::Tuple(elements))
    }

    fn array(&mut self) -> Result<Value, ValueParseError> {
        let elements = self.elements(b'[', b']', "`]`")?;
        Ok(Value::Array(elements))
    }

    fn elements(
        &mut self,
        open: u8,
        close: u8,
        close_name: &'static str,
    ) -> Result<Vec<Value>, ValueParseError> {
        self.expect(open, "an opening delimiter")?;
        self.skip_ws();
        let mut elements = Vec::new();
        if self.peek() == Some(close) {
            self.pos += 1;
            return Ok(elements);
        }
        loop {
            elements.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b) if b == close => {
                    self.pos += 1;
                    return Ok(elements);
                }
                Some(_) => {
                    return Err(ValueParseError::Expected {
                        expected: close_name,
                        offset: self.pos,
                    })
                }
                None => return Err(ValueParseError::UnexpectedEnd(self.pos)),
            }
        }
    }
}

/// Computes `words = words * mul + add`, growing the vector on carry-out.
fn mul_add(words: &mut Vec<u64>, mul: u64, add: u64) {
    let mut carry = u128::from(add);
    for word in words.iter_mut() {
        let v = u128::from(*word) * u128::from(mul) + carry;
        *word = v as u64;
        carry = v >> 64;
    }
    if carry != 0 {
        words.push(carry as u64);
    }
}

/// Two's-complement negation over a little-endian word array.
fn negate(words: &mut [u64]) {
    let mut carry = true;
    for word in words.iter_mut() {
        let (sum, overflow) = (!*word).overflowing_add(u64::from(carry));
        *word = sum;
        carry = overflow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_literal() {
        assert_eq!(parse_value("bits[32]:0x2a").unwrap(), Value::ubits(32, 42));
    }

    #[test]
    fn parse_decimal_literal() {
        assert_eq!(parse_value("bits[8]:5").unwrap(), Value::ubits(8, 5));
    }

    #[test]
    fn parse_binary_literal() {
        assert_eq!(
            parse_value("bits[4]:0b1010").unwrap(),
            Value::ubits(4, 0b1010)
        );
    }

    #[test]
    fn parse_negative_literal_is_twos_complement() {
        assert_eq!(parse_value("bits[8]:-1").unwrap(), Value::ubits(8, 0xff));
        assert_eq!(parse_value("bits[8]:-128").unwrap(), Value::ubits(8, 0x80));
    }

    #[test]
    fn parse_literal_with_separators() {
        assert_eq!(
            parse_value("bits[32]:0xdead_beef").unwrap(),
            Value::ubits(32, 0xdead_beef)
        );
    }

    #[test]
    fn oversized_literal_truncates_to_width() {
        assert_eq!(parse_value("bits[4]:0xff").unwrap(), Value::ubits(4, 0xf));
    }

    #[test]
    fn parse_wide_literal() {
        let value = parse_value("bits[128]:0x1_0000_0000_0000_0000").unwrap();
        let Value::Bits(bits) = &value else {
            panic!("expected bits");
        };
        assert_eq!(bits.words(), &[0, 1]);
    }

    #[test]
    fn parse_tuple() {
        assert_eq!(
            parse_value("(bits[1]:0x1, bits[2]:0x2)").unwrap(),
            Value::tuple(vec![Value::ubits(1, 1), Value::ubits(2, 2)])
        );
    }

    #[test]
    fn parse_empty_tuple() {
        assert_eq!(parse_value("()").unwrap(), Value::tuple(vec![]));
    }

    #[test]
    fn parse_array() {
        assert_eq!(
            parse_value("[bits[8]:0x1, bits[8]:0x2]").unwrap(),
            Value::array(vec![Value::ubits(8, 1), Value::ubits(8, 2)])
        );
    }

    #[test]
    fn parse_nested() {
        let text = "(bits[1]:0x0, [(bits[4]:0xa, bits[4]:0xb)])";
        let value = parse_value(text).unwrap();
        assert_eq!(value.to_string(), text);
    }

    #[test]
    fn display_round_trips() {
        for text in [
            "bits[32]:0x2a",
            "bits[0]:0x0",
            "(bits[8]:0x1, bits[8]:0x2)",
            "[bits[16]:0xffff, bits[16]:0x0]",
        ] {
            assert_eq!(parse_value(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn trailing_input_rejected() {
        assert_eq!(
            parse_value("bits[8]:5 junk").unwrap_err(),
            ValueParseError::TrailingInput(10)
        );
    }

    #[test]
    fn missing_digits_rejected() {
        assert!(matches!(
            parse_value("bits[8]:0x").unwrap_err(),
            ValueParseError::EmptyLiteral(_)
        ));
    }

    #[test]
    fn unknown_keyword_rejected() {
        assert!(matches!(
            parse_value("bats[8]:5").unwrap_err(),
            ValueParseError::Expected { .. }
        ));
    }

    #[test]
    fn truncated_input_rejected() {
        assert!(matches!(
            parse_value("(bits[8]:5,").unwrap_err(),
            ValueParseError::UnexpectedEnd(_)
        ));
    }

    #[test]
    fn parse_values_skips_blank_lines() {
        let text = "bits[32]:0x42\n\n  \nbits[32]:0x123\n";
        assert_eq!(
            parse_values(text).unwrap(),
            vec![Value::ubits(32, 0x42), Value::ubits(32, 0x123)]
        );
    }

    #[test]
    fn parse_values_reports_line_numbers() {
        let err = parse_values("bits[8]:1\nbogus\n").unwrap_err();
        let ValueParseError::Line { line, .. } = err else {
            panic!("expected a line error, got {err:?}");
        };
        assert_eq!(line, 2);
    }

    #[test]
    fn values_to_text_joins_lines() {
        let values = vec![Value::ubits(8, 1), Value::ubits(8, 2)];
        assert_eq!(values_to_text(&values), "bits[8]:0x1\nbits[8]:0x2");
    }
}
