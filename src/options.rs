/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! Modifier flags accepted after the closing pattern delimiter.
//!
//! These are the PHP-style trailing modifiers (`/pattern/ims`), mapped onto
//! the backend's compile options. Whitespace between modifier letters is
//! ignored; any other unrecognized byte is a compile error.

use crate::error::CompileError;

use pcre2::bytes::RegexBuilder;

/// Parsed trailing modifiers for one pattern argument.
///
///```
/// use preg::options::Flags;
///
/// let f = Flags::parse(b"im").unwrap();
/// assert!(f.caseless);
/// assert!(f.multi_line);
/// assert!(!f.dot_all);
/// assert_eq!(Flags::parse(b"").unwrap(), Flags::default());
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Flags {
  /// `i`: letters match regardless of case.
  pub caseless: bool,
  /// `m`: `^` and `$` also match at internal line boundaries.
  pub multi_line: bool,
  /// `s`: `.` also matches newline.
  pub dot_all: bool,
  /// `x`: unescaped whitespace in the pattern is ignored.
  pub extended: bool,
  /// `u`: UTF mode with Unicode character properties.
  pub unicode: bool,
}

impl Flags {
  ///```
  /// use preg::options::Flags;
  ///
  /// let e = Flags::parse(b"iz").err().unwrap();
  /// assert_eq!(e.to_string(), "Unknown modifier 'z'");
  /// ```
  pub fn parse(modifiers: &[u8]) -> Result<Self, CompileError> {
    let mut flags = Self::default();
    for &b in modifiers {
      match b {
        b'i' => flags.caseless = true,
        b'm' => flags.multi_line = true,
        b's' => flags.dot_all = true,
        b'x' => flags.extended = true,
        b'u' => flags.unicode = true,
        b' ' | b'\t' | b'\r' | b'\n' => (),
        _ => {
          return Err(CompileError {
            message: format!("Unknown modifier '{}'", b as char),
          })
        },
      }
    }
    Ok(flags)
  }

  pub(crate) fn apply(&self, builder: &mut RegexBuilder) {
    builder.caseless(self.caseless);
    builder.multi_line(self.multi_line);
    builder.dotall(self.dot_all);
    builder.extended(self.extended);
    if self.unicode {
      builder.utf(true);
      builder.ucp(true);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn every_supported_modifier() {
    let f = Flags::parse(b"imsxu").unwrap();
    assert_eq!(f, Flags {
      caseless: true,
      multi_line: true,
      dot_all: true,
      extended: true,
      unicode: true,
    });
  }

  #[test]
  fn interior_whitespace_is_ignored() {
    assert_eq!(Flags::parse(b"i m").unwrap(), Flags::parse(b"im").unwrap());
  }

  #[test]
  fn unknown_modifier_names_the_byte() {
    let e = Flags::parse(b"e").err().unwrap();
    assert_eq!(e.message, "Unknown modifier 'e'");
  }
}
