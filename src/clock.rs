//! Periodic time/date updates for the registration form.
//!
//! The sign-in time and date sent with a registration are the values the
//! clock last wrote into the two hidden form fields, so the server always
//! receives what the user saw. The wall clock sits behind [`TimeSource`] so
//! tests can pin time instead of sleeping.

use crate::core::FieldId;
use crate::surface::PageSurface;
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default refresh period of the page clock.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Source of "now" with a known local offset.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Time source pinned to a single instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    instant: DateTime<FixedOffset>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// One formatted reading of the clock.
///
/// Both parts come from the same instant: the time in the local timezone,
/// the date in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockStamp {
    /// Local time, `HH:MM:SS`
    pub time: String,
    /// UTC date, `YYYY-MM-DD`
    pub date: String,
}

impl ClockStamp {
    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self {
            time: instant.format("%H:%M:%S").to_string(),
            date: instant.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        }
    }
}

/// Writes clock readings into the page.
#[derive(Clone)]
pub struct Clock {
    source: Arc<dyn TimeSource>,
}

impl Clock {
    pub fn new(source: Arc<dyn TimeSource>) -> Self {
        Self { source }
    }

    /// Clock backed by the system wall clock.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemTimeSource))
    }

    /// Read and format the current instant.
    pub fn stamp(&self) -> ClockStamp {
        ClockStamp::at(self.source.now())
    }

    /// Write the current reading into the two form fields and mirror it into
    /// the optional display elements.
    pub fn tick(&self, surface: &dyn PageSurface) {
        let stamp = self.stamp();
        surface.set_field_value(FieldId::InTime, &stamp.time);
        surface.set_field_value(FieldId::InDate, &stamp.date);
        surface.set_display_time(&stamp.time);
        surface.set_display_date(&stamp.date);
    }

    /// Spawn the ticker task: one immediate tick, then one every `period`.
    ///
    /// The task runs for the page's lifetime; the returned handle is
    /// informational and the page never cancels it.
    pub fn spawn(&self, surface: Arc<dyn PageSurface>, period: Duration) -> JoinHandle<()> {
        let clock = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                clock.tick(surface.as_ref());
            }
        })
    }
}
