//! Repeated-call timer behavior.

use std::cell::Cell;
use std::io;

use monkey_timer::{Bench, MeasureError, Pass};
use regex::Regex;

#[test]
fn invokes_exactly_cycles_times() {
    let calls = Cell::new(0u64);
    Bench::new()
        .cycles(1_000)
        .function_timer(io::sink(), "counter", || calls.set(calls.get() + 1))
        .unwrap();
    assert_eq!(calls.get(), 1_000);
}

#[test]
fn default_cycle_count() {
    let mut calls = 0u64;
    Bench::new()
        .function_timer(io::sink(), "default", || calls += 1)
        .unwrap();
    assert_eq!(calls, 100_000);
}

#[test]
fn warmup_runs_before_timing() {
    let mut calls = 0u64;
    Bench::quick()
        .warmup(250)
        .function_timer(io::sink(), "warm", || calls += 1)
        .unwrap();
    assert_eq!(calls, 1_250);
}

#[test]
fn writes_single_report_line() {
    let mut out = Vec::new();
    Bench::quick()
        .function_timer(&mut out, "clamp(3, 1, 2)", || std::hint::black_box(3).clamp(1, 2))
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let re = Regex::new(r"^clamp\(3, 1, 2\): (\d+ nano|[\d.]+ seconds)\n$").unwrap();
    assert!(re.is_match(&text), "got {:?}", text);
}

#[test]
fn slow_callable_reports_seconds() {
    let mut out = Vec::new();
    Bench::new()
        .cycles(2)
        .function_timer(&mut out, "sleepy", || {
            std::thread::sleep(std::time::Duration::from_millis(2))
        })
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let re = Regex::new(r"^sleepy: 0\.\d+ seconds\n$").unwrap();
    assert!(re.is_match(&text), "got {:?}", text);
}

#[test]
fn failure_still_reports_timing() {
    let mut out = Vec::new();
    let mut calls = 0u64;
    let err = Bench::quick()
        .function_timer(&mut out, "fragile", || {
            calls += 1;
            if calls == 10 {
                panic!("snapped");
            }
        })
        .unwrap_err();

    match err {
        MeasureError::CallablePanicked {
            ref label,
            pass,
            invocation,
            ref message,
        } => {
            assert_eq!(label, "fragile");
            assert_eq!(pass, Pass::Timing);
            assert_eq!(invocation, 10);
            assert_eq!(message, "snapped");
        }
        other => panic!("unexpected error: {}", other),
    }

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "got {:?}", text);
    assert!(lines[0].starts_with("fragile: "));
    assert_eq!(lines[1], "fragile: timing pass aborted on invocation 10: snapped");
}

fn reported_nanos(text: &str, label: &str) -> u128 {
    let re = Regex::new(&format!(r"(?m)^{}: (\d+) nano$", regex::escape(label))).unwrap();
    let caps = re
        .captures(text)
        .unwrap_or_else(|| panic!("no nano report for {:?} in {:?}", label, text));
    caps[1].parse().unwrap()
}

fn busy() -> u64 {
    (0..64u64).map(std::hint::black_box).sum()
}

#[test]
fn failure_average_excludes_the_unwind() {
    let bench = Bench::quick();

    let mut clean = Vec::new();
    bench.function_timer(&mut clean, "busy", busy).unwrap();
    let clean = reported_nanos(&String::from_utf8(clean).unwrap(), "busy");

    for panic_at in [2u64, 601] {
        let mut out = Vec::new();
        let mut calls = 0u64;
        bench
            .function_timer(&mut out, "busy", || {
                calls += 1;
                if calls == panic_at {
                    panic!("stopped at {}", panic_at);
                }
                busy()
            })
            .unwrap_err();

        let interrupted = reported_nanos(&String::from_utf8(out).unwrap(), "busy");
        assert!(
            interrupted <= clean * 20 + 2_000,
            "panic at {}: interrupted average {} ns vs clean {} ns",
            panic_at,
            interrupted,
            clean
        );
    }
}

#[test]
fn broken_sink_is_not_fatal() {
    struct Closed;
    impl io::Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // timer reports are best-effort; the measurement itself succeeds
    Bench::quick().function_timer(Closed, "closed", || 1).unwrap();
}

#[test]
fn distribution_write_error_surfaces() {
    struct Closed;
    impl io::Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let err = Bench::quick()
        .distribution_timer(Closed, "closed", || 1)
        .unwrap_err();
    assert!(matches!(err, MeasureError::Io(_)), "got {:?}", err);
}
