/* Copyright 2022-2023 Danny McClanahan */
/* SPDX-License-Identifier: BSD-3-Clause */

//! End-to-end coverage of the engine: setup, per-row capture, teardown.

use preg::{
  args::{Arg, ArgList, Value},
  error::Error,
  exec::skip_to_occurrence,
  offsets::OffsetVector,
  state::{Config, InvocationState, NullHandling},
  Pattern,
};

fn constant_site(pattern: &[u8], config: Config) -> InvocationState {
  let setup = ArgList::new(vec![Arg::constant_str(pattern), Arg::per_row(None)]);
  InvocationState::setup(&setup, config).unwrap()
}

fn capture<'s>(
  site: &'s mut InvocationState,
  pattern: &[u8],
  subject: &[u8],
  trailing: Vec<Arg<'_>>,
) -> Option<&'s [u8]> {
  let mut args = vec![
    Arg::per_row(Some(Value::Str(pattern))),
    Arg::per_row(Some(Value::Str(subject))),
  ];
  args.extend(trailing);
  let args = ArgList::new(args);
  let value = site.capture_row(&args);
  assert!(!value.error, "row unexpectedly faulted");
  site.result_bytes(value)
}

#[test]
fn case_insensitive_whole_match() {
  let mut site = constant_site(b"/abc/i", Config::default());
  let out = capture(&mut site, b"/abc/i", b"XABCY", vec![]);
  assert_eq!(out, Some(&b"ABC"[..]));
}

#[test]
fn empty_pattern_fails_setup() {
  let setup = ArgList::new(vec![Arg::constant_str(b""), Arg::per_row(None)]);
  let err = InvocationState::setup(&setup, Config::default()).err().unwrap();
  assert_eq!(err.setup_message(), "Empty pattern");
  match err {
    Error::EmptyPattern => (),
    other => panic!("expected EmptyPattern, got {:?}", other),
  }
}

#[test]
fn named_group_extraction() {
  let pattern = &br"/(?P<year>\d{4})-(?P<month>\d{2})/"[..];
  let mut site = constant_site(pattern, Config::default());
  let out = capture(
    &mut site,
    pattern,
    b"released 2026-08-30",
    vec![Arg::per_row(Some(Value::Str(b"month")))],
  );
  assert_eq!(out, Some(&b"08"[..]));
}

#[test]
fn occurrence_selection() {
  let pattern = &br"/(\d+)/"[..];
  let mut site = constant_site(pattern, Config::default());

  let group_and_occurrence =
    |n| vec![Arg::per_row(Some(Value::Int(1))), Arg::constant_int(n)];
  let out = capture(
    &mut site,
    pattern,
    b"a1 b22 c333",
    group_and_occurrence(2),
  );
  assert_eq!(out, Some(&b"22"[..]));
  let out = capture(
    &mut site,
    pattern,
    b"a1 b22 c333",
    group_and_occurrence(3),
  );
  assert_eq!(out, Some(&b"333"[..]));
  /* Too few occurrences: empty, not an error. */
  let out = capture(
    &mut site,
    pattern,
    b"a1 b22 c333",
    group_and_occurrence(4),
  );
  assert_eq!(out, Some(&b""[..]));
}

#[test]
fn third_occurrence_is_the_last_a() {
  let p = Pattern::compile(b"/a/").unwrap();
  let mut ovec = OffsetVector::for_pattern(&p);
  let m = skip_to_occurrence(&p, b"a,a,a", &mut ovec, 3)
    .unwrap()
    .unwrap();
  assert_eq!((m.start, m.end), (4, 5));
  assert!(skip_to_occurrence(&p, b"a,a,a", &mut ovec, 4)
    .unwrap()
    .is_none());
}

#[test]
fn oversized_row_grows_the_return_buffer_exactly() {
  let config = Config {
    max_result_len: Some(9),
    ..Config::default()
  };
  let mut site = constant_site(b"/x+/", config);
  assert_eq!(site.buffer().capacity(), 10);

  let subject = vec![b'x'; 500];
  let out = capture(&mut site, b"/x+/", &subject, vec![]).unwrap();
  assert_eq!(out.len(), 500);
  assert_eq!(site.buffer().capacity(), 501);
}

#[test]
fn buffer_is_reused_across_rows() {
  let mut site = constant_site(b"/[a-z]+/", Config::default());
  let before = site.buffer().capacity();
  for subject in [&b"one"[..], b"twotwo", b"three three"] {
    capture(&mut site, b"/[a-z]+/", subject, vec![]);
    assert_eq!(site.buffer().capacity(), before);
  }
  let out = capture(&mut site, b"/[a-z]+/", b"last", vec![]);
  assert_eq!(out, Some(&b"last"[..]));
}

#[test]
fn null_subject_is_a_miss() {
  let mut site = constant_site(b"/a/", Config::default());
  let args = ArgList::new(vec![
    Arg::per_row(Some(Value::Str(b"/a/"))),
    Arg::per_row(None),
  ]);
  let v = site.capture_row(&args);
  assert!(!v.error);
  assert_eq!(v.length, 0);
}

#[test]
fn strict_mode_rejects_constant_null_pattern() {
  let setup = ArgList::new(vec![Arg::constant_null(), Arg::per_row(None)]);
  let strict = Config {
    null_handling: NullHandling::Strict,
    ..Config::default()
  };
  let err = InvocationState::setup(&setup, strict).err().unwrap();
  assert_eq!(err.setup_message(), "NULL pattern");
}

#[test]
fn nullable_operation_reports_null_on_fault() {
  let setup = ArgList::new(vec![Arg::per_row(None), Arg::per_row(None)]);
  let config = Config {
    nullable: true,
    ..Config::default()
  };
  let mut site = InvocationState::setup(&setup, config).unwrap();

  let args = ArgList::new(vec![
    Arg::per_row(Some(Value::Str(b"/bad(/"))),
    Arg::per_row(Some(Value::Str(b"subject"))),
  ]);
  let v = site.capture_row(&args);
  assert!(v.error);
  assert_eq!(site.result_bytes(v), None);
}

#[test]
fn per_row_patterns_can_vary() {
  let setup = ArgList::new(vec![Arg::per_row(None), Arg::per_row(None)]);
  let mut site = InvocationState::setup(&setup, Config::default()).unwrap();
  assert!(!site.is_constant_pattern());

  let out = capture(&mut site, b"/b+/", b"abbba", vec![]);
  assert_eq!(out, Some(&b"bbb"[..]));
  let out = capture(&mut site, b"{c+}i", b"aCCa", vec![]);
  assert_eq!(out, Some(&b"CC"[..]));
}

#[test]
fn unresolvable_group_is_a_miss_not_a_fault() {
  let pattern = &b"/a(b)/"[..];
  let mut site = constant_site(pattern, Config::default());
  let out = capture(
    &mut site,
    pattern,
    b"ab",
    vec![Arg::per_row(Some(Value::Str(b"nosuchgroup")))],
  );
  assert_eq!(out, Some(&b""[..]));
}
