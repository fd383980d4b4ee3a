/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! Per-call-site lifecycle: setup, per-row execution, teardown.
//!
//! One [`InvocationState`] lives for the whole call-site. When the pattern
//! argument is constant it is compiled exactly once at setup and reused for
//! every row; otherwise each row compiles fresh and the handle drops at end
//! of row. Teardown is `Drop`: single ownership makes double teardown
//! unrepresentable, and access through `&mut self` is what makes the cached
//! pattern and return buffer safe without a lock (the host drives one
//! call-site from one execution context at a time).

use crate::{
  args::ArgList,
  buffer::{ReturnBuffer, RowValue, DEFAULT_CAPACITY},
  error::Error,
  exec::{resolve_group, skip_to_occurrence},
  offsets::OffsetVector,
  Pattern,
};

use log::debug;

use std::ops;

/// How a NULL pattern argument is treated.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum NullHandling {
  /// A constant NULL pattern fails setup; no rows are processed.
  Strict,
  /// A NULL pattern is detected per row, and that row yields no match
  /// instead of failing the query.
  #[default]
  Permissive,
}

/// Deployment-selected configuration for one call-site.
#[derive(Debug, Default, Copy, Clone)]
pub struct Config {
  pub null_handling: NullHandling,
  /// The host's declared maximum output length, when it declares one; the
  /// return buffer is sized to this bound at setup.
  pub max_result_len: Option<usize>,
  /// Whether the host allows this operation to produce NULL.
  pub nullable: bool,
}

/// The pattern to use for one row: cached or freshly compiled.
///
/// A fresh handle drops (releasing the backend resources) when the row's
/// scope ends; a cached one merely borrows the call-site's compiled
/// pattern.
pub enum RowPattern<'s> {
  Cached(&'s Pattern),
  Fresh(Pattern),
}

impl ops::Deref for RowPattern<'_> {
  type Target = Pattern;

  fn deref(&self) -> &Pattern {
    match self {
      Self::Cached(p) => p,
      Self::Fresh(p) => p,
    }
  }
}

/// Mutable per-call-site state: the constant-pattern cache and the owned
/// return buffer.
#[derive(Debug)]
pub struct InvocationState {
  /* Present iff the pattern is constant and compiled successfully. */
  pattern: Option<Pattern>,
  constant_pattern: bool,
  null_handling: NullHandling,
  nullable: bool,
  buffer: ReturnBuffer,
}

impl InvocationState {
  /// Build the call-site state from the setup-time argument vector.
  ///
  /// A constant pattern argument is compiled here; failure fails the whole
  /// call-site. Setup errors are rendered for the host's message buffer by
  /// [`Error::setup_message`].
  ///
  ///```
  /// use preg::{
  ///   args::{Arg, ArgList},
  ///   state::{Config, InvocationState, NullHandling},
  /// };
  ///
  /// let args = ArgList::new(vec![Arg::constant_str(b"/nope")]);
  /// let err = InvocationState::setup(&args, Config::default()).err().unwrap();
  /// assert_eq!(err.setup_message(), "No ending delimiter '/' found");
  ///
  /// let args = ArgList::new(vec![Arg::constant_null()]);
  /// let strict = Config {
  ///   null_handling: NullHandling::Strict,
  ///   ..Config::default()
  /// };
  /// assert!(InvocationState::setup(&args, strict).is_err());
  /// assert!(InvocationState::setup(&args, Config::default()).is_ok());
  /// ```
  pub fn setup(args: &ArgList<'_>, config: Config) -> Result<Self, Error> {
    let mut pattern = None;
    let mut constant_pattern = false;

    if args.is_constant_null(0) {
      if config.null_handling == NullHandling::Strict {
        return Err(Error::NullPattern);
      }
      /* Permissive: remember the pattern is constant so rows short-circuit
       * without attempting to recompile. */
      constant_pattern = true;
    } else if args.is_constant(0) && args.bytes(0).is_some() {
      pattern = Some(Pattern::from_args(args)?);
      constant_pattern = true;
    }

    let capacity = match config.max_result_len {
      Some(l) => l + 1,
      None => DEFAULT_CAPACITY,
    };
    Ok(Self {
      pattern,
      constant_pattern,
      null_handling: config.null_handling,
      nullable: config.nullable,
      buffer: ReturnBuffer::with_capacity(capacity)?,
    })
  }

  /// Whether the call-site reuses one compiled pattern for every row.
  #[inline]
  pub fn is_constant_pattern(&self) -> bool { self.constant_pattern }

  #[inline]
  pub fn buffer(&self) -> &ReturnBuffer { &self.buffer }

  /// Resolve the pattern to execute for the current row.
  ///
  /// `Ok(None)` is the permissive NULL-pattern row: no compilation, no
  /// match. A per-row compilation failure is an error for this row only.
  pub fn row_pattern<'s>(&'s self, args: &ArgList<'_>) -> Result<Option<RowPattern<'s>>, Error> {
    if self.constant_pattern {
      match self.pattern.as_ref() {
        Some(p) => Ok(Some(RowPattern::Cached(p))),
        None => Ok(None),
      }
    } else if args.bytes(0).is_none() && self.null_handling == NullHandling::Permissive {
      Ok(None)
    } else {
      debug!("preg: compiling per-row pattern");
      Pattern::from_args(args).map(|p| Some(RowPattern::Fresh(p)))
    }
  }

  /// Execute the full capture pipeline for one row and populate the return
  /// buffer.
  ///
  /// Argument layout: 0 pattern, 1 subject, 2 group selector (default 0,
  /// the whole match), 3 occurrence (default 1). NULL subjects, missing
  /// occurrences, and unresolvable groups yield the empty non-error result;
  /// only compilation failures and backend faults set the error flag.
  pub fn capture_row(&mut self, args: &ArgList<'_>) -> RowValue {
    let result = self.capture_result(args);
    self.buffer.move_to_return_values(self.nullable, result)
  }

  /// The row's result bytes, or `None` when the null flag ended up set.
  pub fn result_bytes(&self, value: RowValue) -> Option<&[u8]> {
    if value.is_null {
      None
    } else {
      Some(self.buffer.contents())
    }
  }

  fn capture_result(&self, args: &ArgList<'_>) -> Result<Option<Vec<u8>>, Error> {
    let pattern = match self.row_pattern(args)? {
      Some(p) => p,
      None => return Ok(None),
    };
    let subject = match args.bytes(1) {
      Some(s) => s,
      None => return Ok(None),
    };
    let group = match resolve_group(&pattern, args.value(2)) {
      Some(g) => g,
      None => return Ok(None),
    };
    let occurrence = match args.int(3) {
      Some(n) => n.max(1) as usize,
      None => 1,
    };

    let mut offsets = OffsetVector::for_pattern(&pattern);
    if skip_to_occurrence(&pattern, subject, &mut offsets, occurrence)?.is_none() {
      return Ok(None);
    }
    match offsets.get(group) {
      Some((start, end)) => Ok(Some(subject[start..end].to_vec())),
      None => Ok(None),
    }
  }
}
