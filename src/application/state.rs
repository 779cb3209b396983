//! Application state for the code upload form.
//!
//! `App` owns the upload workflow: the form fields, the processing flag,
//! the registration modal and the toast queue.

use std::time::Instant;

use chrono::NaiveDateTime;

use crate::domain::messages::{EMAIL_NOT_FOUND, GENERIC_ERROR, NOT_REGISTERED, NOT_WON, WON};
use crate::domain::{
    unknown_server_error, validate_submission, CampaignWindow, DayOption, MessageCatalog, Registration,
    UploadInput, ValidationErrors,
};
use crate::infrastructure::{ApiError, ApiResponse, PromoApi, UploadData, UploadRequest};

use super::field::TextField;
use super::registration::{RegistrationFocus, RegistrationForm};
use super::toasts::{self, Toasts};

/// Number of selectable hours (0-23).
pub const HOURS: u32 = 24;
/// Number of selectable minutes (0-59).
pub const MINUTES: u32 = 60;

/// The focused control of the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Email,
    Code,
    Day,
    Hour,
    Minute,
    Submit,
}

impl FormFocus {
    pub fn next(self) -> Self {
        match self {
            FormFocus::Email => FormFocus::Code,
            FormFocus::Code => FormFocus::Day,
            FormFocus::Day => FormFocus::Hour,
            FormFocus::Hour => FormFocus::Minute,
            FormFocus::Minute => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Email,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormFocus::Email => FormFocus::Submit,
            FormFocus::Code => FormFocus::Email,
            FormFocus::Day => FormFocus::Code,
            FormFocus::Hour => FormFocus::Day,
            FormFocus::Minute => FormFocus::Hour,
            FormFocus::Submit => FormFocus::Minute,
        }
    }
}

/// A request that has passed validation and waits for the main loop to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Upload(UploadRequest),
    Register(Registration),
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use promo_upload::application::{App, FormFocus};
/// use promo_upload::domain::CampaignWindow;
///
/// let now = NaiveDate::from_ymd_opt(2022, 7, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let app = App::new(CampaignWindow::default(), now);
/// assert_eq!(app.focus, FormFocus::Email);
/// assert!(!app.processing);
/// assert!(!app.is_popup_open());
/// ```
#[derive(Debug)]
pub struct App {
    pub email: TextField,
    pub code: TextField,
    /// Days the purchase can be reported for
    pub day_options: Vec<DayOption>,
    /// Index into `day_options`
    pub day_index: Option<usize>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub focus: FormFocus,
    /// Set while an upload is in flight; disables the submit button
    pub processing: bool,
    /// The registration modal, present while it is open
    pub registration: Option<RegistrationForm>,
    pub toasts: Toasts,
    /// Messages shown under the fields after a failed submit
    pub field_errors: ValidationErrors,
    pub window: CampaignWindow,
    pub should_quit: bool,
    catalog: MessageCatalog,
    pending: Option<PendingRequest>,
}

impl App {
    /// Creates the form with the most recent selectable day preselected.
    pub fn new(window: CampaignWindow, now: NaiveDateTime) -> Self {
        let day_options = window.day_options(now);
        let day_index = day_options.len().checked_sub(1);

        Self {
            email: TextField::new(),
            code: TextField::new(),
            day_options,
            day_index,
            hour: None,
            minute: None,
            focus: FormFocus::Email,
            processing: false,
            registration: None,
            toasts: Toasts::new(),
            field_errors: ValidationErrors::new(),
            window,
            should_quit: false,
            catalog: MessageCatalog::new(),
            pending: None,
        }
    }

    pub fn selected_day(&self) -> Option<&DayOption> {
        self.day_index.and_then(|index| self.day_options.get(index))
    }

    pub fn upload_input(&self) -> UploadInput {
        UploadInput {
            email: self.email.value().to_string(),
            code: self.code.value().to_string(),
            day: self.selected_day().map(|option| option.date),
            hour: self.hour,
            minute: self.minute,
        }
    }

    pub fn is_popup_open(&self) -> bool {
        self.registration.is_some()
    }

    /// Whether any request is in flight, in the form or in the modal.
    pub fn is_busy(&self) -> bool {
        self.processing || self.registration.as_ref().is_some_and(|form| form.processing)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// Validates the upload form and queues the upload.
    ///
    /// On failure every broken field is reported and nothing is sent.
    /// Ignored while a previous upload is still in flight.
    pub fn submit_upload(&mut self, now: NaiveDateTime) {
        if self.processing {
            tracing::debug!("upload already in flight, submit ignored");
            return;
        }

        match validate_submission(&self.upload_input(), &self.window, now) {
            Ok(submission) => {
                tracing::debug!(email = %submission.email, "code upload submitted");
                self.field_errors.clear();
                self.processing = true;
                self.pending = Some(PendingRequest::Upload(UploadRequest::from(&submission)));
            }
            Err(errors) => {
                self.route_validation_errors(&errors);
                self.field_errors = errors;
            }
        }
    }

    /// Validates the registration modal and queues the registration.
    pub fn submit_registration(&mut self) {
        if let Some(form) = self.registration.as_mut() {
            if let Some(registration) = form.prepare(&mut self.toasts) {
                self.pending = Some(PendingRequest::Register(registration));
            }
        }
    }

    /// Shows each validation failure as its own warning toast.
    pub fn route_validation_errors(&mut self, errors: &ValidationErrors) {
        toasts::route_validation_errors(errors, &mut self.toasts);
    }

    /// Sends the queued request, if any, and applies its outcome.
    pub fn run_pending(&mut self, api: &dyn PromoApi, now: NaiveDateTime) {
        match self.pending.take() {
            None => {}
            Some(PendingRequest::Upload(request)) => {
                let result = api.upload_code(&request);
                self.apply_upload_response(&request, result);
                self.processing = false;
            }
            Some(PendingRequest::Register(registration)) => {
                let mut registered = false;
                if let Some(form) = self.registration.as_mut() {
                    form.send(&registration, api, &self.catalog, &mut self.toasts, || registered = true);
                }
                if registered {
                    self.on_registered(now);
                }
            }
        }
    }

    fn apply_upload_response(
        &mut self,
        request: &UploadRequest,
        result: Result<ApiResponse<UploadData>, ApiError>,
    ) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, email = %request.email, "code upload failed");
                self.toasts.error(GENERIC_ERROR);
                return;
            }
        };

        if let Some(errors) = &response.errors {
            if response.has_error(EMAIL_NOT_FOUND) {
                tracing::info!(email = %request.email, "email not registered, opening registration");
                self.toasts.warn(NOT_REGISTERED);
                self.open_registration();
                return;
            }

            for error in errors {
                self.toasts
                    .warn(server_error_message(self.catalog.upload_error(&error.code), &error.code));
            }
        }

        if let Some(data) = response.data {
            tracing::info!(email = %request.email, code = %request.code, won = data.won, "code upload accepted");
            if data.won {
                self.toasts.success(WON);
            } else {
                self.toasts.info(NOT_WON);
            }
        }
    }

    /// Opens the registration modal for the email currently in the form.
    pub fn open_registration(&mut self) {
        self.registration = Some(RegistrationForm::new(self.email.value()));
    }

    /// Closes the modal without resubmitting.
    pub fn close_registration(&mut self) {
        self.registration = None;
    }

    /// Continuation run once the server confirms a registration: close the
    /// modal and send the original upload again.
    fn on_registered(&mut self, now: NaiveDateTime) {
        self.close_registration();
        tracing::info!("registration complete, resubmitting code upload");
        self.submit_upload(now);
    }

    pub fn focus_next(&mut self) {
        match self.registration.as_mut() {
            Some(form) => form.focus = form.focus.next(),
            None => self.focus = self.focus.next(),
        }
    }

    pub fn focus_previous(&mut self) {
        match self.registration.as_mut() {
            Some(form) => form.focus = form.focus.previous(),
            None => self.focus = self.focus.previous(),
        }
    }

    /// The text field under the cursor, in the modal when it is open.
    pub fn focused_text_field(&mut self) -> Option<&mut TextField> {
        match self.registration.as_mut() {
            Some(form) if form.focus == RegistrationFocus::Name => Some(&mut form.name),
            Some(_) => None,
            None => match self.focus {
                FormFocus::Email => Some(&mut self.email),
                FormFocus::Code => Some(&mut self.code),
                _ => None,
            },
        }
    }

    /// Inserts pasted text into the focused text field.
    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused_text_field() {
            field.insert_str(text);
        }
    }

    /// Moves the selection of the focused day, hour or minute selector by `delta`.
    pub fn step_selector(&mut self, delta: i32) {
        match self.focus {
            FormFocus::Day => {
                if self.day_options.is_empty() {
                    return;
                }
                let last = self.day_options.len() as i64 - 1;
                let current = self.day_index.map_or(0, |index| index as i64);
                self.day_index = Some((current + delta as i64).clamp(0, last) as usize);
            }
            FormFocus::Hour => self.hour = step_clock(self.hour, HOURS, delta),
            FormFocus::Minute => self.minute = step_clock(self.minute, MINUTES, delta),
            _ => {}
        }
    }

    /// Regenerates the day options for `now`, keeping the selected date while it
    /// is still listed. A form left open past midnight gains the new day.
    pub fn refresh_day_options(&mut self, now: NaiveDateTime) {
        let options = self.window.day_options(now);
        if options == self.day_options {
            return;
        }

        let selected = self.selected_day().map(|option| option.date);
        self.day_index = selected
            .and_then(|date| options.iter().position(|option| option.date == date))
            .or_else(|| options.len().checked_sub(1));
        self.day_options = options;
    }

    /// Drops expired toasts.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.expire(now);
    }
}

/// Steps through a clock selector whose first entry is blank (`None`).
fn step_clock(value: Option<u32>, count: u32, delta: i32) -> Option<u32> {
    let position = value.map_or(0, |v| v as i64 + 1) + delta as i64;
    match position.clamp(0, count as i64) {
        0 => None,
        p => Some(p as u32 - 1),
    }
}

/// Display text for a server error code; unmapped codes get a fallback naming the code.
pub(crate) fn server_error_message(mapped: Option<&'static str>, code: &str) -> String {
    match mapped {
        Some(message) => message.to_string(),
        None => {
            tracing::warn!(code, "server returned an unmapped error code");
            unknown_server_error(code)
        }
    }
}
