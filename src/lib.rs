// ============================================================================
// Lab Sign-In Library
// ============================================================================

pub mod clock;
pub mod config;
pub mod controller;
pub mod core;
pub mod session;
pub mod surface;
pub mod transport;
pub mod validate;

// Re-export main types for convenience
pub use clock::{Clock, ClockStamp, FixedTimeSource, SystemTimeSource, TimeSource};
pub use config::ControllerConfig;
pub use controller::{EventOutcome, SignInController, SignOutOutcome, SubmitOutcome};
pub use core::{
    Alert, EventDisposition, FieldId, FieldState, Key, KeyChord, Result, SignInError,
    SubmitState, UiEvent, UnloadDecision,
};
pub use session::{MemorySessionStore, SESSION_STORAGE_KEY, SessionStore};
pub use surface::{MemorySurface, PageSurface};
pub use transport::{
    HttpRegisterApi, RegisterApi, RegisterRequest, RegisterResponse, SignOutRequest,
    SignOutResponse,
};
