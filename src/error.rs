/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! Error taxonomy shared by every engine operation.
//!
//! Setup-time errors abort the whole call-site; per-row errors are confined
//! to the row that raised them. [`Error::setup_message`] renders the bounded
//! message the host's setup contract expects.

use displaydoc::Display;
use thiserror::Error;

/// Upper bound on the rendered setup message, in bytes.
///
/// Hosts commonly recommend 80 bytes or less and hard-cap the buffer at 255;
/// 128 leaves room for backend-reported syntax errors without risking either
/// limit.
pub const MAX_SETUP_MESSAGE_LEN: usize = 128;

/// {message}
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub struct CompileError {
  /* Covers both the delimiter/modifier parse and the backend's own syntax
   * diagnostics. */
  pub message: String,
}

#[derive(Debug, Display, Error)]
pub enum Error {
  /// Empty pattern
  EmptyPattern,
  /// NULL pattern
  NullPattern,
  /// {0}
  Compile(#[from] CompileError),
  /// out of memory
  OutOfMemory,
  /// pattern execution failed: {0}
  Exec(#[source] pcre2::Error),
}

impl Error {
  /// Render this error for the host's setup message buffer, truncated to
  /// [`MAX_SETUP_MESSAGE_LEN`] bytes on a character boundary.
  ///
  ///```
  /// let e = preg::error::Error::EmptyPattern;
  /// assert_eq!(e.setup_message(), "Empty pattern");
  /// ```
  pub fn setup_message(&self) -> String {
    let mut msg = self.to_string();
    if msg.len() > MAX_SETUP_MESSAGE_LEN {
      let mut end = MAX_SETUP_MESSAGE_LEN;
      while !msg.is_char_boundary(end) {
        end -= 1;
      }
      msg.truncate(end);
    }
    msg
  }
}
