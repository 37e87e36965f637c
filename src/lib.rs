// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! INI lookup library with simple API and minimal dependencies
//!
//! Looks up a single `key=value` entry in a caller-resident byte buffer,
//! optionally scoped to a `[section]`, and decodes the value as a string,
//! a signed 32-bit integer or a boolean. The buffer is re-scanned on every
//! lookup; no heap allocation takes place.

pub mod extract;
pub mod locate;
pub mod parse;

pub use locate::locate_section;
pub use parse::{Error, ValueType, get_key};

/// Upper bound on section and key names, in bytes
///
/// Section header names longer than this are silently truncated before
/// comparison; keys longer than this never match.
pub const MAX_NAME: usize = 50;
