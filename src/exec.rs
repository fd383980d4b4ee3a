/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! Occurrence scanning and capture-group selection.

use crate::{args::Value, error::Error, offsets::OffsetVector, Pattern};

use std::{cmp, str};

/// Boundaries of one located occurrence within the subject.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Match {
  pub start: usize,
  pub end: usize,
}

/// Locate the Nth occurrence of `pattern` in `subject`.
///
/// `occurrence` is 1-based; `0` behaves like `1`, so the first occurrence
/// always costs exactly one execution. The scan advances to the *end* of
/// each match, so occurrence 2 is the next match strictly after occurrence
/// 1 ends; zero-length matches advance by one byte to guarantee progress.
///
/// Returns `Ok(None)` when fewer than N matches exist. A backend execution
/// fault aborts the scan immediately and propagates. On success the offset
/// vector holds the Nth match's capture boundaries for extraction.
///
///```
/// # fn main() -> Result<(), preg::error::Error> {
/// use preg::{exec::skip_to_occurrence, offsets::OffsetVector, Pattern};
///
/// let p = Pattern::compile(b"/a/")?;
/// let mut ovec = OffsetVector::for_pattern(&p);
///
/// let m = skip_to_occurrence(&p, b"a,a,a", &mut ovec, 3)?.unwrap();
/// assert_eq!((m.start, m.end), (4, 5));
/// assert!(skip_to_occurrence(&p, b"a,a,a", &mut ovec, 4)?.is_none());
/// # Ok(())
/// # }
/// ```
pub fn skip_to_occurrence(
  pattern: &Pattern,
  subject: &[u8],
  offsets: &mut OffsetVector,
  occurrence: usize,
) -> Result<Option<Match>, Error> {
  let wanted = cmp::max(occurrence, 1);
  let mut at = 0usize;
  let mut found = None;

  for _ in 0..wanted {
    if at > subject.len() {
      return Ok(None);
    }
    let m = match pattern
      .regex()
      .captures_read_at(offsets.locations_mut(), subject, at)
      .map_err(Error::Exec)?
    {
      Some(m) => m,
      None => return Ok(None),
    };
    found = Some(Match {
      start: m.start(),
      end: m.end(),
    });
    at = if m.end() == m.start() {
      m.end() + 1
    } else {
      m.end()
    };
  }
  Ok(found)
}

/// Resolve a caller-supplied group selector to a capture-group number.
///
/// No selector defaults to group 0 (the whole match). Numeric selectors
/// pass through verbatim; bounds are enforced by extraction, not here.
/// String selectors go through the pattern's name table. Unresolvable
/// selectors (negative numbers, unknown or non-UTF-8 names, non-integer
/// numerics) yield `None`.
///
///```
/// # fn main() -> Result<(), preg::error::Error> {
/// use preg::{args::Value, exec::resolve_group, Pattern};
///
/// let p = Pattern::compile(br"/(?P<year>\d{4})-(?P<month>\d{2})/")?;
/// assert_eq!(resolve_group(&p, None), Some(0));
/// assert_eq!(resolve_group(&p, Some(&Value::Int(1))), Some(1));
/// assert_eq!(resolve_group(&p, Some(&Value::Str(b"month"))), Some(2));
/// assert_eq!(resolve_group(&p, Some(&Value::Str(b"day"))), None);
/// assert_eq!(resolve_group(&p, Some(&Value::Int(-1))), None);
/// # Ok(())
/// # }
/// ```
pub fn resolve_group(pattern: &Pattern, selector: Option<&Value<'_>>) -> Option<usize> {
  match selector {
    None => Some(0),
    Some(Value::Int(n)) => usize::try_from(*n).ok(),
    Some(Value::Real(_)) => None,
    Some(Value::Str(name)) => {
      let name = str::from_utf8(name).ok()?;
      pattern.group_number(name)
    },
  }
}
