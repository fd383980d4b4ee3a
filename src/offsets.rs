/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! Scratch storage for match and capture boundaries.
//!
//! The backend sizes its match-data block from the pattern's capture-group
//! count: slot 0 holds the whole-match boundary pair, slots `1..=g` the
//! capture pairs, and the backend keeps additional per-slot workspace for
//! its own bookkeeping during matching. This engine treats everything
//! beyond the boundary pairs as opaque.

use crate::Pattern;

use pcre2::bytes::CaptureLocations;

/// One call's offset vector, sized for a specific pattern.
///
/// Allocate it once per row and reuse it across the occurrence scan; the
/// boundaries of the most recent successful execution stay readable until
/// the next one.
///
///```
/// # fn main() -> Result<(), preg::error::Error> {
/// use preg::{offsets::OffsetVector, Pattern};
///
/// let p = Pattern::compile(b"/a(.)(c)/")?;
/// let ovec = OffsetVector::for_pattern(&p);
/// assert_eq!(ovec.group_count(), 3);
/// # Ok(())
/// # }
/// ```
pub struct OffsetVector {
  locs: CaptureLocations,
  groups: usize,
}

impl OffsetVector {
  /// Allocate scratch sized for `pattern`'s capture-group count.
  pub fn for_pattern(pattern: &Pattern) -> Self {
    Self {
      locs: pattern.regex().capture_locations(),
      groups: pattern.capture_count(),
    }
  }

  /// The logical capture count, including slot 0 for the whole match.
  #[inline]
  pub fn group_count(&self) -> usize { self.groups }

  /// Boundary pair of group `i` from the last successful execution.
  ///
  /// `None` for out-of-range groups and for groups that did not
  /// participate in the match.
  #[inline]
  pub fn get(&self, i: usize) -> Option<(usize, usize)> { self.locs.get(i) }

  #[inline]
  pub(crate) fn locations_mut(&mut self) -> &mut CaptureLocations { &mut self.locs }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::exec::skip_to_occurrence;

  #[test]
  fn sized_from_capture_count() {
    let p = Pattern::compile(br"/(\d)(\d)(\d)/").unwrap();
    let ovec = OffsetVector::for_pattern(&p);
    assert_eq!(ovec.group_count(), 4);
  }

  #[test]
  fn records_capture_boundaries() {
    let p = Pattern::compile(br"/a(b)(c)?/").unwrap();
    let mut ovec = OffsetVector::for_pattern(&p);
    let m = skip_to_occurrence(&p, b"xabx", &mut ovec, 1).unwrap().unwrap();
    assert_eq!((m.start, m.end), (1, 3));
    assert_eq!(ovec.get(0), Some((1, 3)));
    assert_eq!(ovec.get(1), Some((2, 3)));
    /* Optional group that did not participate. */
    assert_eq!(ovec.get(2), None);
    /* Out of range. */
    assert_eq!(ovec.get(9), None);
  }
}
