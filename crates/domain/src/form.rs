//! New-process form: the input state behind the "new process" dialog.

use crate::error::{TiAdminError, ValidationError};
use crate::id::MachId;
use crate::process::NewProcess;
use crate::service::{Service, default_args_for};

/// Where the dialog was opened from, which decides what must be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogScope {
    /// Opened on a host page: the host is fixed, only a service is needed.
    OnHost(MachId),
    /// Opened on the services page: both service and host must be chosen.
    AnyHost,
}

/// Split raw argument text on whitespace.
#[must_use]
pub fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(ToString::to_string).collect()
}

/// Editable state of the new-process dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProcessForm {
    scope: DialogScope,
    service: Option<String>,
    host: Option<MachId>,
    args: String,
}

impl NewProcessForm {
    #[must_use]
    pub fn new(scope: DialogScope) -> Self {
        Self {
            scope,
            service: None,
            host: None,
            args: String::new(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> &DialogScope {
        &self.scope
    }

    /// Whether the dialog shows a host picker.
    #[must_use]
    pub fn needs_host(&self) -> bool {
        matches!(self.scope, DialogScope::AnyHost)
    }

    /// Choose a service and pre-fill its default arguments.
    ///
    /// An empty name clears the selection.
    pub fn select_service(&mut self, svc_name: &str, services: &[Service]) {
        if svc_name.is_empty() {
            self.service = None;
            return;
        }
        self.service = Some(svc_name.to_string());
        self.args = default_args_for(services, svc_name);
    }

    /// Choose the target host. Ignored when the scope fixes the host.
    pub fn select_host(&mut self, mach_id: &str) {
        self.host = (!mach_id.is_empty()).then(|| MachId::new(mach_id));
    }

    pub fn set_args(&mut self, raw: impl Into<String>) {
        self.args = raw.into();
    }

    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    #[must_use]
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Validate the selections and build the create request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingService`] when no service is chosen,
    /// or [`ValidationError::MissingHost`] when the scope needs a host and
    /// none is chosen.
    pub fn submit(&self) -> Result<NewProcess, ValidationError> {
        let svc_name = self
            .service
            .as_deref()
            .ok_or(ValidationError::MissingService)?;
        let mach_id = match &self.scope {
            DialogScope::OnHost(mach_id) => mach_id.clone(),
            DialogScope::AnyHost => self.host.clone().ok_or(ValidationError::MissingHost)?,
        };
        Ok(NewProcess::started(
            svc_name,
            mach_id,
            split_args(&self.args),
        ))
    }
}

/// What the dialog does once a submission has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSubmit {
    /// The process was created: close and discard the input.
    Close,
    /// A selection is missing: raise the blocking alert and stay open.
    AlertInvalidSelection,
    /// The backend rejected the request: stay open so the input survives.
    StayOpen,
}

impl AfterSubmit {
    #[must_use]
    pub fn of<T>(result: &Result<T, TiAdminError>) -> Self {
        match result {
            Ok(_) => Self::Close,
            Err(TiAdminError::Validation(_)) => Self::AlertInvalidSelection,
            Err(TiAdminError::Api(_)) => Self::StayOpen,
        }
    }
}
