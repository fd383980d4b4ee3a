/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! The growable return buffer every string-producing operation writes
//! through.
//!
//! One buffer lives for the whole call-site and is reused across millions
//! of rows: it only ever grows, every write leaves it NUL-terminated, and
//! growth is all-or-nothing so the old contents stay valid when an
//! allocation fails.

use crate::error::Error;

use log::error;

/// Initial capacity when the host declares no maximum result length.
///
/// Large enough to amortize reallocation across a typical query;
/// reallocation is still possible for oversized rows.
pub const DEFAULT_CAPACITY: usize = 1_024_000;

/// The outward-facing result triple for one row.
///
/// `error` and `is_null` are mutually exclusive signaling channels from the
/// host's point of view; when a row faults, `error` is authoritative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowValue {
  pub is_null: bool,
  pub error: bool,
  pub length: usize,
}

/// Exclusively owned byte buffer with monotonic growth.
#[derive(Debug)]
pub struct ReturnBuffer {
  buf: Vec<u8>,
  len: usize,
}

impl ReturnBuffer {
  /// Allocate with `capacity` bytes up front.
  pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
    let mut buf = Vec::new();
    buf
      .try_reserve_exact(capacity.max(1))
      .map_err(|_| Error::OutOfMemory)?;
    Ok(Self { buf, len: 0 })
  }

  /// Bytes of allocated storage, tracked separately from content length.
  #[inline]
  pub fn capacity(&self) -> usize { self.buf.capacity() }

  /// Logical content length, excluding the NUL terminator.
  #[inline]
  pub fn len(&self) -> usize { self.len }

  #[inline]
  pub fn is_empty(&self) -> bool { self.len == 0 }

  /// The logical contents of the last successful write.
  #[inline]
  pub fn contents(&self) -> &[u8] { &self.buf[..self.len] }

  pub fn clear(&mut self) {
    self.buf.clear();
    self.len = 0;
  }

  /// Copy `data` into the buffer, growing it if the current capacity cannot
  /// hold `data` plus a NUL terminator.
  ///
  /// Growth allocates a fresh buffer of exactly the needed size; if that
  /// allocation fails the existing buffer (and its contents) remain valid.
  /// The buffer never shrinks.
  ///
  ///```
  /// # fn main() -> Result<(), preg::error::Error> {
  /// use preg::buffer::ReturnBuffer;
  ///
  /// let mut buf = ReturnBuffer::with_capacity(10)?;
  /// assert_eq!(buf.write(b"abc")?, 3);
  /// assert_eq!(buf.contents(), b"abc");
  ///
  /// /* An oversized result grows the buffer to exactly length + 1. */
  /// let big = vec![b'x'; 500];
  /// buf.write(&big)?;
  /// assert_eq!(buf.capacity(), 501);
  /// assert_eq!(buf.len(), 500);
  /// # Ok(())
  /// # }
  /// ```
  pub fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
    if data.len() + 1 > self.buf.capacity() {
      let mut grown: Vec<u8> = Vec::new();
      grown
        .try_reserve_exact(data.len() + 1)
        .map_err(|_| Error::OutOfMemory)?;
      self.buf = grown;
    }
    self.buf.clear();
    self.buf.extend_from_slice(data);
    self.buf.push(0);
    self.len = data.len();
    Ok(data.len())
  }

  /// Consume a transient result and populate the row's output triple.
  ///
  /// The transient is consumed exactly once on every path. Defaults are
  /// applied first (error set, length 0, content cleared, null set iff the
  /// operation is nullable); then:
  ///
  /// - `Err(_)` is a backend fault: the reason is logged and the default
  ///   error outputs stand.
  /// - `Ok(Some(bytes))` is copied into the owned buffer; on success the
  ///   error and null flags clear and the length is set. An allocation
  ///   failure during the copy leaves only the error flag different.
  /// - `Ok(None)` is a valid empty result, not an error.
  pub fn move_to_return_values(
    &mut self,
    nullable: bool,
    result: Result<Option<Vec<u8>>, Error>,
  ) -> RowValue {
    let mut out = RowValue {
      is_null: nullable,
      error: true,
      length: 0,
    };
    self.clear();

    match result {
      Err(e) => {
        error!("preg: {}", e);
      },
      Ok(Some(bytes)) => match self.write(&bytes) {
        Ok(l) => {
          out.is_null = false;
          out.error = false;
          out.length = l;
        },
        Err(e) => {
          error!("preg: {} while copying row result", e);
        },
      },
      Ok(None) => {
        out.is_null = false;
        out.error = false;
      },
    }
    out
  }
}
