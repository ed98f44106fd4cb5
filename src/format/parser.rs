/*!
 * Format String Parser
 * Splits a printf format into literal runs and `%` directives
 */

use super::types::{Conversion, Count, Directive, Flags, FormatError, Segment};
use crate::core::encoding::decode_leading;
use crate::core::hints::likely;

/// Largest width, precision or argument index accepted in a directive
pub const MAX_COUNT: usize = i32::MAX as usize;

/// Lazy parser over a format string
///
/// Yields segments in order; stops after the first error.
pub struct Parser<'f> {
    fmt: &'f [u8],
    pos: usize,
    failed: bool,
}

impl<'f> Parser<'f> {
    pub fn new(fmt: &'f str) -> Self {
        Self {
            fmt: fmt.as_bytes(),
            pos: 0,
            failed: false,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.fmt.get(self.pos).copied()
    }

    fn literal(&mut self) -> Segment<'f> {
        let start = self.pos;
        let len = self.fmt[start..]
            .iter()
            .position(|&b| b == b'%')
            .unwrap_or(self.fmt.len() - start);
        self.pos += len;
        Segment::Literal(&self.fmt[start..self.pos])
    }

    fn number(&mut self, position: usize) -> Result<usize, FormatError> {
        let mut n: usize = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add(usize::from(b - b'0')))
                .filter(|&n| n <= MAX_COUNT)
                .ok_or(FormatError::WidthOverflow { position })?;
            self.pos += 1;
        }
        Ok(n)
    }

    /// `*` or `*N$` (the `*` is already consumed)
    fn star(&mut self, position: usize) -> Result<Count, FormatError> {
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Ok(Count::Next);
        }

        let n = self.number(position)?;
        if self.peek() != Some(b'$') {
            return Err(FormatError::InvalidArgumentIndex { position });
        }
        self.pos += 1;
        if n == 0 {
            return Err(FormatError::InvalidArgumentIndex { position });
        }
        Ok(Count::Numbered(n))
    }

    fn directive(&mut self) -> Result<Segment<'f>, FormatError> {
        let position = self.pos;
        self.pos += 1;

        match self.peek() {
            None => return Err(FormatError::Incomplete { position }),
            Some(b'%') => {
                self.pos += 1;
                return Ok(Segment::Literal(b"%"));
            }
            // A bare % before a line break or NUL is printed as-is
            Some(b'\n') | Some(b'\0') => return Ok(Segment::Literal(b"%")),
            Some(_) => {}
        }

        let mut flags = Flags::default();
        let mut width = None;
        let mut precision = None;
        let mut argument = None;

        loop {
            let Some(b) = self.peek() else {
                return Err(FormatError::Incomplete { position });
            };

            match b {
                b' ' => flags.space = true,
                b'#' => flags.alternate = true,
                b'+' => flags.plus = true,
                b'-' => flags.left = true,
                b'0' => flags.zero = true,
                b'1'..=b'9' => {
                    let n = self.number(position)?;
                    if self.peek() == Some(b'$') {
                        if argument.replace(n).is_some() {
                            return Err(repeated("value", position));
                        }
                    } else if width.replace(Count::Literal(n)).is_some() {
                        return Err(repeated("width", position));
                    }
                    // number() already advanced past the digits
                    if self.peek() == Some(b'$') {
                        self.pos += 1;
                    }
                    continue;
                }
                b'*' => {
                    self.pos += 1;
                    let count = self.star(position)?;
                    if width.replace(count).is_some() {
                        return Err(repeated("width", position));
                    }
                    continue;
                }
                b'.' => {
                    self.pos += 1;
                    let count = if self.peek() == Some(b'*') {
                        self.pos += 1;
                        self.star(position)?
                    } else {
                        Count::Literal(self.number(position)?)
                    };
                    if precision.replace(count).is_some() {
                        return Err(repeated("precision", position));
                    }
                    continue;
                }
                _ => {
                    let letter = match decode_leading(&self.fmt[self.pos..]) {
                        Some((Some(c), _)) => c,
                        _ => char::from(b),
                    };
                    let conversion = Conversion::from_char(letter).ok_or(
                        FormatError::UnknownConversion {
                            conversion: letter,
                            position,
                        },
                    )?;
                    self.pos += 1;

                    return Ok(Segment::Directive(Directive {
                        position,
                        flags,
                        width,
                        precision,
                        argument,
                        conversion,
                        letter,
                    }));
                }
            }
            self.pos += 1;
        }
    }
}

fn repeated(what: &str, position: usize) -> FormatError {
    FormatError::Repeated {
        what: what.into(),
        position,
    }
}

impl<'f> Iterator for Parser<'f> {
    type Item = Result<Segment<'f>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.fmt.len() {
            return None;
        }

        if likely(self.fmt[self.pos] != b'%') {
            return Some(Ok(self.literal()));
        }

        let result = self.directive();
        self.failed = result.is_err();
        Some(result)
    }
}
