//! Abstraction over the registration page.
//!
//! The controller never touches a document tree directly; everything it does
//! to the page goes through [`PageSurface`]. A browser embedding implements
//! the trait against real elements, while [`MemorySurface`] backs tests and
//! the terminal client.

use crate::core::{Alert, FieldId, FieldState, Result, SignInError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Element identifiers the page markup must provide.
///
/// Absence of any of these is a fatal initialization error. The two display
/// mirrors (`displayTime`, `displayDate`) are deliberately not listed; they
/// are optional and tolerated when missing.
pub const REQUIRED_ELEMENT_IDS: [&str; 12] = [
    "registrationForm",
    "submitBtn",
    "errorAlert",
    "successAlert",
    "errorMessage",
    "successMessage",
    "register_no",
    "name",
    "department",
    "system_no",
    "in_time",
    "in_date",
];

/// Side-effect surface of the registration page.
///
/// Implementations use interior mutability: the clock task and the controller
/// share one surface through an `Arc`, so every method takes `&self`.
pub trait PageSurface: Send + Sync {
    /// Verify that every required element exists.
    ///
    /// Called once during controller construction; the default assumes a
    /// complete page.
    fn check_required(&self) -> Result<()> {
        Ok(())
    }

    /// Current raw content of a field.
    fn field_value(&self, field: FieldId) -> String;

    /// Overwrite a field's content (clock writes, input normalization).
    fn set_field_value(&self, field: FieldId, value: &str);

    /// Apply the visual validation marker for a field.
    fn set_field_state(&self, field: FieldId, state: FieldState);

    /// Show the error alert and hide the success alert.
    fn show_error(&self, message: &str);

    /// Show the success alert and hide the error alert.
    fn show_success(&self, message: &str);

    /// Hide both alerts.
    fn hide_alerts(&self);

    /// Enable or disable the submit control.
    fn set_submit_enabled(&self, enabled: bool);

    /// Toggle the loading marker on the submit control.
    fn set_submit_loading(&self, loading: bool);

    /// Mirror the clock time into the optional display element.
    fn set_display_time(&self, _text: &str) {}

    /// Mirror the clock date into the optional display element.
    fn set_display_date(&self, _text: &str) {}

    /// Attempt to close the browsing context.
    ///
    /// Returns `true` only if the context actually went away. Browsers are
    /// free to refuse a programmatic close, in which case the caller falls
    /// back to telling the user to close the window manually.
    fn request_close(&self) -> bool;
}

#[derive(Debug, Default)]
struct SurfaceInner {
    fields: HashMap<FieldId, String>,
    states: HashMap<FieldId, FieldState>,
    alert: Option<Alert>,
    submit_disabled: bool,
    submit_loading: bool,
    display_time: Option<String>,
    display_date: Option<String>,
    close_requests: usize,
}

/// In-memory [`PageSurface`] with full state inspection.
///
/// Used by the test suite and the terminal client. Construction options model
/// the two page-level variations that matter: a missing required element and
/// a browser that refuses programmatic close.
pub struct MemorySurface {
    inner: Mutex<SurfaceInner>,
    missing_element: Option<String>,
    allow_close: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SurfaceInner::default()),
            missing_element: None,
            allow_close: true,
        }
    }

    /// Simulate a page where `element_id` is absent from the markup.
    pub fn with_missing_element(element_id: &str) -> Self {
        Self {
            missing_element: Some(element_id.to_string()),
            ..Self::new()
        }
    }

    /// Simulate a browser that refuses `window.close()`.
    pub fn deny_close(mut self) -> Self {
        self.allow_close = false;
        self
    }

    fn inner(&self) -> MutexGuard<'_, SurfaceInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current visual marker of a field.
    pub fn field_state(&self, field: FieldId) -> FieldState {
        self.inner().states.get(&field).copied().unwrap_or_default()
    }

    /// Currently shown alert, if any.
    pub fn alert(&self) -> Option<Alert> {
        self.inner().alert.clone()
    }

    pub fn submit_enabled(&self) -> bool {
        !self.inner().submit_disabled
    }

    pub fn submit_loading(&self) -> bool {
        self.inner().submit_loading
    }

    pub fn display_time(&self) -> Option<String> {
        self.inner().display_time.clone()
    }

    pub fn display_date(&self) -> Option<String> {
        self.inner().display_date.clone()
    }

    /// Number of times a close was attempted.
    pub fn close_requests(&self) -> usize {
        self.inner().close_requests
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface for MemorySurface {
    fn check_required(&self) -> Result<()> {
        if let Some(id) = &self.missing_element {
            return Err(SignInError::ElementNotFound(id.clone()));
        }
        Ok(())
    }

    fn field_value(&self, field: FieldId) -> String {
        self.inner().fields.get(&field).cloned().unwrap_or_default()
    }

    fn set_field_value(&self, field: FieldId, value: &str) {
        self.inner().fields.insert(field, value.to_string());
    }

    fn set_field_state(&self, field: FieldId, state: FieldState) {
        self.inner().states.insert(field, state);
    }

    fn show_error(&self, message: &str) {
        self.inner().alert = Some(Alert::Error(message.to_string()));
    }

    fn show_success(&self, message: &str) {
        self.inner().alert = Some(Alert::Success(message.to_string()));
    }

    fn hide_alerts(&self) {
        self.inner().alert = None;
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.inner().submit_disabled = !enabled;
    }

    fn set_submit_loading(&self, loading: bool) {
        self.inner().submit_loading = loading;
    }

    fn set_display_time(&self, text: &str) {
        self.inner().display_time = Some(text.to_string());
    }

    fn set_display_date(&self, text: &str) {
        self.inner().display_date = Some(text.to_string());
    }

    fn request_close(&self) -> bool {
        self.inner().close_requests += 1;
        self.allow_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_are_mutually_exclusive() {
        let surface = MemorySurface::new();

        surface.show_error("bad input");
        assert_eq!(surface.alert(), Some(Alert::Error("bad input".to_string())));

        surface.show_success("welcome");
        assert_eq!(surface.alert(), Some(Alert::Success("welcome".to_string())));

        surface.hide_alerts();
        assert_eq!(surface.alert(), None);
    }

    #[test]
    fn test_fields_default_empty_and_neutral() {
        let surface = MemorySurface::new();
        assert_eq!(surface.field_value(FieldId::Name), "");
        assert_eq!(surface.field_state(FieldId::Name), FieldState::Neutral);
        assert!(surface.submit_enabled());
        assert!(!surface.submit_loading());
    }

    #[test]
    fn test_missing_element_fails_check() {
        let surface = MemorySurface::with_missing_element("submitBtn");
        assert!(surface.check_required().is_err());
        assert!(MemorySurface::new().check_required().is_ok());
    }

    #[test]
    fn test_deny_close_counts_attempts() {
        let surface = MemorySurface::new().deny_close();
        assert!(!surface.request_close());
        assert!(!surface.request_close());
        assert_eq!(surface.close_requests(), 2);
    }
}
