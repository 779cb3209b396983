//! The registration workflow shown in the modal over the upload form.

use crate::domain::{validate_registration, MessageCatalog, Registration, RegistrationInput, ValidationErrors};
use crate::domain::messages::{GENERIC_ERROR, REGISTERED};
use crate::infrastructure::{ApiError, ApiResponse, PromoApi, RegisterData, RegisterRequest};

use super::field::TextField;
use super::state::server_error_message;
use super::toasts::{route_validation_errors, Toasts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFocus {
    Name,
    Agreement,
    Submit,
}

impl RegistrationFocus {
    pub fn next(self) -> Self {
        match self {
            RegistrationFocus::Name => RegistrationFocus::Agreement,
            RegistrationFocus::Agreement => RegistrationFocus::Submit,
            RegistrationFocus::Submit => RegistrationFocus::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            RegistrationFocus::Name => RegistrationFocus::Submit,
            RegistrationFocus::Agreement => RegistrationFocus::Name,
            RegistrationFocus::Submit => RegistrationFocus::Agreement,
        }
    }
}

/// State of the registration modal. Created fresh each time the modal opens.
#[derive(Debug)]
pub struct RegistrationForm {
    /// Pre-filled from the upload form, read-only here
    pub email: String,
    pub name: TextField,
    pub agreement: bool,
    pub processing: bool,
    pub focus: RegistrationFocus,
    pub field_errors: ValidationErrors,
}

impl RegistrationForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: TextField::new(),
            agreement: false,
            processing: false,
            focus: RegistrationFocus::Name,
            field_errors: ValidationErrors::new(),
        }
    }

    pub fn input(&self) -> RegistrationInput {
        RegistrationInput {
            email: self.email.clone(),
            name: self.name.value().to_string(),
            agreement: self.agreement,
        }
    }

    pub fn toggle_agreement(&mut self) {
        self.agreement = !self.agreement;
    }

    /// Validates the form and marks it as processing.
    ///
    /// Returns the registration to send, or `None` when validation failed
    /// (every failure is shown as a warning) or a request is already in flight.
    pub fn prepare(&mut self, toasts: &mut Toasts) -> Option<Registration> {
        if self.processing {
            tracing::debug!("registration already in flight");
            return None;
        }

        match validate_registration(&self.input()) {
            Ok(registration) => {
                self.field_errors.clear();
                self.processing = true;
                Some(registration)
            }
            Err(errors) => {
                route_validation_errors(&errors, toasts);
                self.field_errors = errors;
                None
            }
        }
    }

    /// Sends a prepared registration and reports the outcome.
    ///
    /// `on_registered` runs when the server confirms the registration.
    /// Processing is cleared whatever happens.
    pub fn send<F: FnOnce()>(
        &mut self,
        registration: &Registration,
        api: &dyn PromoApi,
        catalog: &MessageCatalog,
        toasts: &mut Toasts,
        on_registered: F,
    ) {
        let result = api.register_user(&RegisterRequest::from(registration));
        self.apply_response(result, catalog, toasts, on_registered);
        self.processing = false;
    }

    fn apply_response<F: FnOnce()>(
        &self,
        result: Result<ApiResponse<RegisterData>, ApiError>,
        catalog: &MessageCatalog,
        toasts: &mut Toasts,
        on_registered: F,
    ) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, email = %self.email, "registration request failed");
                toasts.error(GENERIC_ERROR);
                return;
            }
        };

        if let Some(errors) = response.errors {
            for error in &errors {
                toasts.warn(server_error_message(catalog.registration_error(&error.code), &error.code));
            }
            return;
        }

        if response.data.is_some_and(|data| data.success) {
            tracing::info!(email = %self.email, "registration succeeded");
            on_registered();
            toasts.success(REGISTERED);
        }
    }
}
