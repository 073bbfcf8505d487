//! ScopeTimer reporting through the public API.

use std::num::NonZeroU64;
use std::time::Duration;

use monkey_timer::{AverageDuration, ScopeTimer, NANO_THRESHOLD_NS};

#[test]
fn nano_seconds_boundary() {
    assert_eq!(NANO_THRESHOLD_NS, 1_000_000);
    assert!(matches!(
        AverageDuration::from_nanos(NANO_THRESHOLD_NS - 1),
        AverageDuration::Nanos(999_999)
    ));
    assert!(matches!(
        AverageDuration::from_nanos(NANO_THRESHOLD_NS),
        AverageDuration::Seconds(_)
    ));
    assert_eq!(AverageDuration::from_nanos(0).to_string(), "0 nano");
}

#[test]
fn average_divides_by_cycles() {
    let cycles = NonZeroU64::new(4).unwrap();
    let avg = AverageDuration::per_cycle(Duration::from_millis(8), cycles);
    assert_eq!(avg.to_string(), "0.002 seconds");

    let avg = AverageDuration::per_cycle(Duration::from_micros(8), cycles);
    assert_eq!(avg.to_string(), "2000 nano");
}

#[test]
fn cycles_shrink_the_reported_average() {
    let mut out = Vec::new();
    {
        let _t = ScopeTimer::with_cycles(&mut out, "spread", NonZeroU64::new(1_000).unwrap());
        std::thread::sleep(Duration::from_millis(5));
    }
    // 5ms over 1,000 cycles is a few microseconds, reported in nanoseconds
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("spread: "), "got {:?}", text);
    assert!(text.ends_with(" nano\n"), "got {:?}", text);
}

#[test]
fn nested_timers_report_inner_first() {
    let mut outer_out = Vec::new();
    let mut inner_out = Vec::new();
    {
        let outer = ScopeTimer::new(&mut outer_out, "Total Time");
        {
            let inner = ScopeTimer::new(&mut inner_out, "inner");
            assert_eq!(inner.label(), "inner");
        }
        assert!(!inner_out.is_empty());
        assert_eq!(outer.cycles().get(), 1);
    }
    let text = String::from_utf8(outer_out).unwrap();
    assert!(text.starts_with("Total Time: "), "got {:?}", text);
}
