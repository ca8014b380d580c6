//! Shared types for the sign-in page controller.

use std::fmt;

/// Identifies one of the six form fields on the registration page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Student register number (12 alphanumeric characters)
    RegisterNo,
    /// Student name
    Name,
    /// Department selection
    Department,
    /// Workstation number
    SystemNo,
    /// Sign-in time, written by the clock (HH:MM:SS)
    InTime,
    /// Sign-in date, written by the clock (YYYY-MM-DD)
    InDate,
}

impl FieldId {
    /// The three fields a submission is gated on.
    pub const REQUIRED: [FieldId; 3] = [FieldId::RegisterNo, FieldId::Name, FieldId::Department];

    /// Element identifier used in the page markup and the wire payload.
    pub const fn id(&self) -> &'static str {
        match self {
            FieldId::RegisterNo => "register_no",
            FieldId::Name => "name",
            FieldId::Department => "department",
            FieldId::SystemNo => "system_no",
            FieldId::InTime => "in_time",
            FieldId::InDate => "in_date",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Visual validation marker of a field.
///
/// A field with empty trimmed content carries no marker at all; otherwise it
/// carries exactly one of `Valid`/`Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

/// Submission flow state.
///
/// `Done` is terminal: a successful registration keeps the submit control
/// disabled and never returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Done,
}

/// A transient page message. Showing one kind hides the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success(String),
    Error(String),
}

impl Alert {
    pub fn message(&self) -> &str {
        match self {
            Alert::Success(message) | Alert::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Alert::Error(_))
    }
}

/// What the page should do when the user tries to leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadDecision {
    /// Let the page unload without interference.
    Proceed,
    /// Ask for confirmation before losing in-progress input. Modern engines
    /// may show their own wording instead of the supplied prompt.
    Confirm(&'static str),
}

/// Whether an intercepted input event is passed through or swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Allow,
    Suppress,
}

/// A pressed key together with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F12,
    Char(char),
}

impl KeyChord {
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            shift: false,
        }
    }

    pub const fn ctrl_shift(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            shift: true,
        }
    }

    /// True for the shortcuts conventionally bound to developer tools or
    /// view-source: F12, Ctrl+Shift+I, Ctrl+Shift+J and Ctrl+U.
    ///
    /// Suppressing these is a deterrent only. Nothing running inside the page
    /// can actually stop an operator from inspecting it.
    pub fn opens_devtools(&self) -> bool {
        match self.key {
            Key::F12 => true,
            Key::Char(c) => {
                let c = c.to_ascii_uppercase();
                (self.ctrl && self.shift && (c == 'I' || c == 'J')) || (self.ctrl && c == 'U')
            }
        }
    }
}

/// The finite set of page events the controller handles synchronously.
///
/// Form submission is deliberately not part of this set; it is the single
/// asynchronous operation and lives on the controller as `submit()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Input(FieldId),
    Blur(FieldId),
    Change(FieldId),
    ContextMenu,
    KeyDown(KeyChord),
    BeforeUnload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ids_match_markup() {
        assert_eq!(FieldId::RegisterNo.id(), "register_no");
        assert_eq!(FieldId::SystemNo.id(), "system_no");
        assert_eq!(FieldId::InTime.id(), "in_time");
    }

    #[test]
    fn test_devtools_chords_suppressed() {
        assert!(KeyChord::plain(Key::F12).opens_devtools());
        assert!(KeyChord::ctrl_shift('I').opens_devtools());
        assert!(KeyChord::ctrl_shift('i').opens_devtools());
        assert!(KeyChord::ctrl_shift('J').opens_devtools());
        assert!(KeyChord::ctrl('U').opens_devtools());
        assert!(KeyChord::ctrl('u').opens_devtools());
        // shift does not matter for the view-source chord
        assert!(KeyChord::ctrl_shift('U').opens_devtools());
    }

    #[test]
    fn test_ordinary_chords_allowed() {
        assert!(!KeyChord::plain(Key::Char('a')).opens_devtools());
        assert!(!KeyChord::ctrl('I').opens_devtools());
        assert!(!KeyChord::ctrl('c').opens_devtools());
    }

    #[test]
    fn test_alert_accessors() {
        let err = Alert::Error("boom".to_string());
        assert!(err.is_error());
        assert_eq!(err.message(), "boom");

        let ok = Alert::Success("done".to_string());
        assert!(!ok.is_error());
    }
}
