//! One-shot terminal client for the registration backend.
//!
//! Drives the same controller the page uses, against an in-memory surface:
//! field values go in through the normal input/blur events, submission goes
//! through the normal submit path, and the resulting alert is printed.

use clap::Parser;
use lab_signin::transport::{HttpRegisterApi, RegisterApi};
use lab_signin::{
    Alert, Clock, ControllerConfig, FieldId, MemorySessionStore, MemorySurface, PageSurface,
    SignInController, SignInError, SignOutRequest, SubmitOutcome, UiEvent,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "lab-signin", about = "Terminal client for the lab sign-in backend")]
pub struct Args {
    /// Base URL of the registration backend
    #[arg(long, default_value = "http://localhost:5000")]
    pub endpoint: String,

    /// Register number (12 alphanumeric characters)
    #[arg(long)]
    pub register_no: Option<String>,

    /// Student name
    #[arg(long)]
    pub name: Option<String>,

    /// Department
    #[arg(long)]
    pub department: Option<String>,

    /// Workstation number reported with the registration
    #[arg(long, default_value = "1")]
    pub system_no: String,

    /// Sign out the given session instead of signing in
    #[arg(long, value_name = "SESSION_ID")]
    pub sign_out: Option<String>,
}

pub struct App {
    args: Args,
}

impl App {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    pub async fn run(&self) -> lab_signin::Result<ExitCode> {
        if let Some(session_id) = &self.args.sign_out {
            return self.sign_out(session_id).await;
        }
        self.sign_in().await
    }

    async fn sign_in(&self) -> lab_signin::Result<ExitCode> {
        let (register_no, name, department) = self.required_fields()?;

        let surface = Arc::new(MemorySurface::new());
        let controller = SignInController::new(
            // No window to close in a terminal; skip the 3-second wait.
            ControllerConfig::new(&self.args.endpoint).close_delay(Duration::ZERO),
            surface.clone(),
            Arc::new(HttpRegisterApi::new(&self.args.endpoint)),
            Arc::new(MemorySessionStore::new()),
            Clock::system(),
        )?;

        surface.set_field_value(FieldId::RegisterNo, register_no);
        controller.handle_event(UiEvent::Input(FieldId::RegisterNo));
        surface.set_field_value(FieldId::Name, name);
        controller.handle_event(UiEvent::Blur(FieldId::Name));
        surface.set_field_value(FieldId::Department, department);
        controller.handle_event(UiEvent::Change(FieldId::Department));
        surface.set_field_value(FieldId::SystemNo, &self.args.system_no);

        let outcome = controller.submit().await;
        if let Some(task) = controller.take_close_task() {
            let _ = task.await;
        }

        match surface.alert() {
            Some(Alert::Success(message)) => println!("{message}"),
            Some(Alert::Error(message)) => eprintln!("{message}"),
            None => {}
        }

        match outcome {
            SubmitOutcome::SignedIn => {
                if let Some(session_id) = controller.session_id() {
                    println!("session id: {session_id}");
                }
                Ok(ExitCode::SUCCESS)
            }
            _ => Ok(ExitCode::FAILURE),
        }
    }

    async fn sign_out(&self, session_id: &str) -> lab_signin::Result<ExitCode> {
        let api = HttpRegisterApi::new(&self.args.endpoint);
        let request = SignOutRequest {
            session_id: session_id.to_string(),
        };

        let response = api.sign_out(&request).await?;
        if response.success {
            println!("{}", response.message.as_deref().unwrap_or("Signed out."));
            Ok(ExitCode::SUCCESS)
        } else {
            eprintln!(
                "{}",
                response.error.as_deref().unwrap_or("Sign-out failed.")
            );
            Ok(ExitCode::FAILURE)
        }
    }

    fn required_fields(&self) -> lab_signin::Result<(&str, &str, &str)> {
        match (&self.args.register_no, &self.args.name, &self.args.department) {
            (Some(register_no), Some(name), Some(department)) => {
                Ok((register_no.as_str(), name.as_str(), department.as_str()))
            }
            _ => Err(SignInError::ValidationError(
                "--register-no, --name and --department are required to sign in".into(),
            )),
        }
    }
}
