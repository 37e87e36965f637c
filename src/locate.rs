// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Search for a `[section]` header in a configuration buffer

use crate::MAX_NAME;

/// Find the body of the named section
///
/// Scans the buffer for `[` and compares the bytes up to the matching `]`
/// against `section`. Both names are truncated to [`MAX_NAME`] bytes before
/// the comparison, so an overlong header can still produce a correct
/// "no match". Sections are not required to be unique; the first match wins.
///
/// Returns the offset just past the closing `]`, where the section body
/// starts, or `None` if no matching header exists. A `[` with no closing `]`
/// before the end of the buffer terminates the search.
#[must_use]
pub fn locate_section(section: &[u8], config: &[u8]) -> Option<usize> {
    let wanted = &section[..section.len().min(MAX_NAME)];

    let mut pos = 0;
    while pos < config.len() {
        if config[pos] != b'[' {
            pos += 1;
            continue;
        }
        let header = &config[pos + 1..];
        let close = header.iter().position(|&b| b == b']')?;
        let name = &header[..close.min(MAX_NAME)];
        // offset of the byte just past `]`
        let body = pos + 1 + close + 1;
        if name == wanted {
            return Some(body);
        }
        pos = body;
    }
    None
}
