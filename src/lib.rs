/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! Execution engine shared by Perl-compatible regex UDFs.
//!
//! A host query processor installs one call-site per query, drives it once
//! per row, and tears it down when the query ends. The engine compiles
//! delimiter-wrapped patterns (`/body/modifiers`), caches the compiled
//! handle when the pattern argument is constant, locates the Nth occurrence
//! of a match in a subject, resolves capture groups by number or name, and
//! returns extracted bytes through a reusable growable buffer.
//!
//!```
//! # fn main() -> Result<(), preg::error::Error> {
//! use preg::{
//!   args::{Arg, ArgList, Value},
//!   state::{Config, InvocationState},
//! };
//!
//! /* Setup: the pattern is a constant, so it is compiled exactly once. */
//! let setup = ArgList::new(vec![
//!   Arg::constant_str(b"/(?P<word>[a-z]+)/i"),
//!   Arg::per_row(None),
//! ]);
//! let mut site = InvocationState::setup(&setup, Config::default())?;
//! assert!(site.is_constant_pattern());
//!
//! /* Per-row: extract the whole match from this row's subject. */
//! let row = ArgList::new(vec![
//!   Arg::constant_str(b"/(?P<word>[a-z]+)/i"),
//!   Arg::per_row(Some(Value::Str(b"Hello World"))),
//! ]);
//! let value = site.capture_row(&row);
//! assert!(!value.error);
//! assert_eq!(site.result_bytes(value), Some(&b"Hello"[..]));
//! # Ok(())
//! # }
//!```
//!
//! Pattern execution is delegated to the `pcre2` backend; this crate owns
//! the lifecycle and buffer discipline around it, not the matching
//! algorithm.

#![warn(rustdoc::missing_crate_level_docs)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]

pub mod args;
pub mod buffer;
pub mod error;
pub mod exec;
pub mod offsets;
pub mod options;
pub mod state;

use crate::{
  args::ArgList,
  error::{CompileError, Error},
  options::Flags,
};

use indexmap::IndexMap;
use pcre2::bytes::{Regex, RegexBuilder};

use std::{fmt, str};

/// A compiled pattern handle.
///
/// Owns the backend regex plus a name table index; dropped handles release
/// the backend resources on every exit path. Compiling the same text twice
/// yields independently destroyable handles.
pub struct Pattern {
  re: Regex,
  names: IndexMap<String, usize>,
}

impl Pattern {
  /// Compile a raw delimiter-wrapped pattern argument.
  ///
  /// The argument must look like `<delim>body<delim>[modifiers]`; the
  /// modifier set is documented at [`Flags`]. An empty argument is a
  /// failure distinct from a malformed pattern.
  ///
  ///```
  /// # fn main() -> Result<(), preg::error::Error> {
  /// use preg::Pattern;
  ///
  /// let p = Pattern::compile(b"/abc/i")?;
  /// assert_eq!(p.capture_count(), 1);
  ///
  /// assert_eq!(
  ///   Pattern::compile(b"").err().unwrap().to_string(),
  ///   "Empty pattern",
  /// );
  /// # Ok(())
  /// # }
  /// ```
  pub fn compile(raw: &[u8]) -> Result<Self, Error> {
    if raw.is_empty() {
      return Err(Error::EmptyPattern);
    }
    let (body, modifiers) = split_delimited(raw)?;
    let flags = Flags::parse(modifiers)?;

    /* The backend compiles from UTF-8 text even in no-utf mode. */
    let body = str::from_utf8(body).map_err(|_| CompileError {
      message: "Pattern is not valid UTF-8".to_string(),
    })?;

    let mut builder = RegexBuilder::new();
    flags.apply(&mut builder);
    builder.jit_if_available(true);
    let re = builder.build(body).map_err(|e| CompileError {
      message: e.to_string(),
    })?;

    let mut names = IndexMap::new();
    for (i, group) in re.capture_names().iter().enumerate() {
      if let Some(name) = group {
        names.insert(name.clone(), i);
      }
    }
    Ok(Self { re, names })
  }

  /// Compile the pattern argument (argument 0) of an argument vector.
  ///
  /// An absent or NULL argument fails the same way an empty one does.
  pub fn from_args(args: &ArgList<'_>) -> Result<Self, Error> {
    match args.bytes(0) {
      Some(raw) => Self::compile(raw),
      None => Err(Error::EmptyPattern),
    }
  }

  /// The number of capture groups, *including* slot 0 (the whole match).
  ///
  ///```
  /// # fn main() -> Result<(), preg::error::Error> {
  /// use preg::Pattern;
  ///
  /// assert_eq!(Pattern::compile(b"/a.c/")?.capture_count(), 1);
  /// assert_eq!(Pattern::compile(b"/a(.)(c)/")?.capture_count(), 3);
  /// # Ok(())
  /// # }
  /// ```
  #[inline]
  pub fn capture_count(&self) -> usize { self.re.captures_len() }

  /// Translate a capture-group name into its group number.
  ///
  ///```
  /// # fn main() -> Result<(), preg::error::Error> {
  /// use preg::Pattern;
  ///
  /// let p = Pattern::compile(br"/(?P<year>\d{4})-(?P<month>\d{2})/")?;
  /// assert_eq!(p.group_number("month"), Some(2));
  /// assert_eq!(p.group_number("day"), None);
  /// # Ok(())
  /// # }
  /// ```
  #[inline]
  pub fn group_number(&self, name: &str) -> Option<usize> { self.names.get(name).copied() }

  /// The pattern body as handed to the backend, delimiters stripped.
  #[inline]
  pub fn as_str(&self) -> &str { self.re.as_str() }

  #[inline]
  pub(crate) fn regex(&self) -> &Regex { &self.re }
}

impl fmt::Debug for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Pattern({:?})", self.as_str())
  }
}

/// Split `<delim>body<delim>[modifiers]` into body and modifier bytes.
///
/// Bracket-style delimiters pair up; for all others the closing delimiter is
/// the last occurrence of the opening byte.
fn split_delimited(raw: &[u8]) -> Result<(&[u8], &[u8]), CompileError> {
  let delim = raw[0];
  if delim.is_ascii_alphanumeric() || delim == b'\\' || delim.is_ascii_whitespace() {
    return Err(CompileError {
      message: "Delimiter must not be alphanumeric or backslash".to_string(),
    });
  }
  let close = match delim {
    b'(' => b')',
    b'{' => b'}',
    b'[' => b']',
    b'<' => b'>',
    d => d,
  };
  let rest = &raw[1..];
  let end = rest
    .iter()
    .rposition(|&b| b == close)
    .ok_or_else(|| CompileError {
      message: format!("No ending delimiter '{}' found", close as char),
    })?;
  Ok((&rest[..end], &rest[end + 1..]))
}
