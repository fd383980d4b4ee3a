/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! The host's argument vector, as seen by the engine.
//!
//! Argument 0 is always the pattern and argument 1 (when present) the
//! subject; trailing arguments are operation-specific and may be omitted.
//! Values are borrowed for the duration of a single call only, which is the
//! engine's ownership contract with the host expressed as lifetimes.

/// One typed argument value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value<'a> {
  Str(&'a [u8]),
  Int(i64),
  Real(f64),
}

/// One slot of the argument vector.
///
/// `constant` marks arguments whose value cannot change between rows; a
/// constant slot with no value is the host's constant `NULL`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arg<'a> {
  pub value: Option<Value<'a>>,
  pub constant: bool,
}

impl<'a> Arg<'a> {
  /// A constant string argument, known at setup time.
  pub const fn constant_str(b: &'a [u8]) -> Self {
    Self {
      value: Some(Value::Str(b)),
      constant: true,
    }
  }

  /// A constant integer argument, known at setup time.
  pub const fn constant_int(n: i64) -> Self {
    Self {
      value: Some(Value::Int(n)),
      constant: true,
    }
  }

  /// The host's constant `NULL`.
  pub const fn constant_null() -> Self {
    Self {
      value: None,
      constant: true,
    }
  }

  /// A per-row argument; `None` at setup time, the row's value afterwards.
  pub const fn per_row(value: Option<Value<'a>>) -> Self {
    Self {
      value,
      constant: false,
    }
  }
}

/// The ordered argument vector for one call.
///
///```
/// use preg::args::{Arg, ArgList, Value};
///
/// let args = ArgList::new(vec![
///   Arg::constant_str(b"/a/"),
///   Arg::per_row(Some(Value::Str(b"subject"))),
///   Arg::constant_int(2),
/// ]);
/// assert_eq!(args.len(), 3);
/// assert!(args.is_constant(0));
/// assert_eq!(args.bytes(0), Some(&b"/a/"[..]));
/// assert_eq!(args.int(2), Some(2));
/// assert_eq!(args.bytes(3), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgList<'a> {
  args: Vec<Arg<'a>>,
}

impl<'a> ArgList<'a> {
  pub fn new(args: Vec<Arg<'a>>) -> Self { Self { args } }

  pub fn len(&self) -> usize { self.args.len() }

  pub fn is_empty(&self) -> bool { self.args.is_empty() }

  pub fn get(&self, i: usize) -> Option<&Arg<'a>> { self.args.get(i) }

  /// The value of argument `i`, if the argument exists and is non-NULL.
  pub fn value(&self, i: usize) -> Option<&Value<'a>> {
    self.args.get(i).and_then(|a| a.value.as_ref())
  }

  /// The bytes of argument `i`, if it is a non-NULL string.
  pub fn bytes(&self, i: usize) -> Option<&'a [u8]> {
    match self.value(i) {
      Some(Value::Str(b)) => Some(b),
      _ => None,
    }
  }

  /// The value of argument `i`, if it is a non-NULL integer.
  pub fn int(&self, i: usize) -> Option<i64> {
    match self.value(i) {
      Some(Value::Int(n)) => Some(*n),
      _ => None,
    }
  }

  pub fn is_constant(&self, i: usize) -> bool {
    self.args.get(i).map(|a| a.constant).unwrap_or(false)
  }

  /// Whether argument `i` is the host's constant `NULL`.
  ///
  ///```
  /// use preg::args::{Arg, ArgList};
  ///
  /// let args = ArgList::new(vec![Arg::constant_null(), Arg::per_row(None)]);
  /// assert!(args.is_constant_null(0));
  /// assert!(!args.is_constant_null(1));
  /// assert!(!args.is_constant_null(2));
  /// ```
  pub fn is_constant_null(&self, i: usize) -> bool {
    self
      .args
      .get(i)
      .map(|a| a.constant && a.value.is_none())
      .unwrap_or(false)
  }
}

impl<'a> From<Vec<Arg<'a>>> for ArgList<'a> {
  fn from(args: Vec<Arg<'a>>) -> Self { Self::new(args) }
}
