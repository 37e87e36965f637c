// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Extraction of candidate `key=value` lines from a configuration buffer

use crate::MAX_NAME;

/// Error reported when a line does not fit the bounded line buffer
///
/// The capacity is derived from the caller's output size, so a line that
/// exceeds it could never be decoded into the output anyway. This aborts
/// the whole lookup rather than truncating.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Line exceeds the {0} byte line capacity")]
pub struct LineTooLong(pub usize);

/// Iterator over candidate lines of one section (or of the whole buffer)
///
/// Lines are split on `\n` and yielded as subslices of the configuration
/// buffer. Comment lines (first byte `#` or `;`) and empty lines are
/// skipped. A line starting with `[` is the next section header: a scoped
/// iterator stops there, an unscoped one skips it and keeps going.
pub struct Lines<'a> {
    config: &'a [u8],
    pos: usize,
    scoped: bool,
    capacity: usize,
}

impl<'a> Lines<'a> {
    /// Return a line iterator starting at `pos`
    ///
    /// `out_size` is the caller's output buffer size; the line capacity is
    /// [`MAX_NAME`] plus that size. `scoped` selects whether iteration ends
    /// at the next section header.
    #[must_use]
    pub const fn new(config: &'a [u8], pos: usize, scoped: bool, out_size: usize) -> Self {
        Self {
            config,
            pos,
            scoped,
            capacity: MAX_NAME + out_size,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<&'a [u8], LineTooLong>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.config.len() {
            let rest = &self.config[self.pos..];
            let length = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
            let line = &rest[..length];
            self.pos += length + 1;

            match line.first() {
                None | Some(b'#' | b';') => continue,
                Some(b'[') if self.scoped => return None,
                Some(b'[') => continue,
                Some(_) => {}
            }
            if line.len() >= self.capacity {
                return Some(Err(LineTooLong(self.capacity)));
            }
            return Some(Ok(line));
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect(config: &[u8], scoped: bool) -> Vec<&[u8]> {
        Lines::new(config, 0, scoped, 64)
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn plain_lines() {
        let lines = collect(b"one=1\ntwo=2\nthree=3", false);
        assert_eq!(lines, [b"one=1".as_slice(), b"two=2", b"three=3"]);
    }

    #[test]
    fn comments_and_blanks_skipped() {
        let config = b"# leading comment\n\none=1\n; another\n\n\ntwo=2\n";
        let lines = collect(config, false);
        assert_eq!(lines, [b"one=1".as_slice(), b"two=2"]);
    }

    #[test]
    fn comment_marker_only_at_line_start() {
        let lines = collect(b"one=1 # trailing\n", false);
        assert_eq!(lines, [b"one=1 # trailing".as_slice()]);
    }

    #[test]
    fn scoped_stops_at_next_header() {
        let config = b"one=1\n[next]\ntwo=2\n";
        assert_eq!(collect(config, true), [b"one=1".as_slice()]);
    }

    #[test]
    fn unscoped_skips_headers() {
        let config = b"one=1\n[next]\ntwo=2\n";
        assert_eq!(collect(config, false), [b"one=1".as_slice(), b"two=2"]);
    }

    #[test]
    fn starts_at_offset() {
        let config = b"zero=0\none=1\n";
        let lines: Vec<_> = Lines::new(config, 7, true, 64)
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, [b"one=1".as_slice()]);
    }

    #[test]
    fn missing_final_newline() {
        assert_eq!(collect(b"last=1", false), [b"last=1".as_slice()]);
    }

    #[test]
    fn line_over_capacity_fails() {
        let mut config = vec![b'k'; MAX_NAME + 8];
        config.extend_from_slice(b"=v\n");
        let mut lines = Lines::new(&config, 0, false, 8);
        assert_eq!(lines.next(), Some(Err(LineTooLong(MAX_NAME + 8))));
    }

    #[test]
    fn overlong_comment_is_still_skipped() {
        // comment detection happens before the capacity check
        let mut config = b"# ".to_vec();
        config.extend_from_slice(&[b'x'; 500]);
        config.extend_from_slice(b"\nkey=1\n");
        let lines: Vec<_> = Lines::new(&config, 0, false, 8)
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, [b"key=1".as_slice()]);
    }
}
