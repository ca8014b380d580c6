pub mod error;
pub mod types;

pub use error::{Result, SignInError};
pub use types::{
    Alert, EventDisposition, FieldId, FieldState, Key, KeyChord, SubmitState, UiEvent,
    UnloadDecision,
};
