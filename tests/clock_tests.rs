/// Clock ticker tests
///
/// Run with: cargo test --test clock_tests
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, TimeZone};
use lab_signin::{Clock, FieldId, MemorySurface, PageSurface, TimeSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Advances one second on every reading, so ticker progress is observable
/// without real wall-clock seconds.
struct SteppingTimeSource {
    base: DateTime<FixedOffset>,
    reads: AtomicI64,
}

impl SteppingTimeSource {
    fn new() -> Self {
        Self {
            base: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2025, 6, 1, 10, 0, 0)
                .unwrap(),
            reads: AtomicI64::new(0),
        }
    }
}

impl TimeSource for SteppingTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        let step = self.reads.fetch_add(1, Ordering::SeqCst);
        self.base + ChronoDuration::seconds(step)
    }
}

#[tokio::test]
async fn test_ticker_keeps_fields_fresh() {
    let surface: Arc<MemorySurface> = Arc::new(MemorySurface::new());
    let clock = Clock::new(Arc::new(SteppingTimeSource::new()));

    clock.spawn(surface.clone(), Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(60)).await;

    let in_time = surface.field_value(FieldId::InTime);
    assert_ne!(in_time, "");
    // the first reading was 10:00:00; later ticks moved past it
    assert_ne!(in_time, "10:00:00");
    assert_eq!(surface.field_value(FieldId::InDate), "2025-06-01");
    assert_eq!(surface.display_time(), Some(in_time));
}

#[tokio::test]
async fn test_ticker_writes_immediately() {
    let surface: Arc<MemorySurface> = Arc::new(MemorySurface::new());
    let clock = Clock::new(Arc::new(SteppingTimeSource::new()));

    // long period: only the immediate first tick can have fired
    clock.spawn(surface.clone(), Duration::from_secs(3600));
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(surface.field_value(FieldId::InTime), "10:00:00");
    assert_eq!(surface.field_value(FieldId::InDate), "2025-06-01");
}
