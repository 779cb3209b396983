//! Scripted [`PromoApi`] used by the workflow tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::infrastructure::{
    ApiError, ApiResponse, PromoApi, RegisterData, RegisterRequest, UploadData, UploadRequest,
};

type UploadResult = Result<ApiResponse<UploadData>, ApiError>;
type RegisterResult = Result<ApiResponse<RegisterData>, ApiError>;

/// Replays queued responses in order and records every request.
/// An unscripted call fails like a broken connection.
#[derive(Default)]
pub struct FakeApi {
    upload_responses: RefCell<VecDeque<UploadResult>>,
    register_responses: RefCell<VecDeque<RegisterResult>>,
    upload_requests: RefCell<Vec<UploadRequest>>,
    register_requests: RefCell<Vec<RegisterRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport_error() -> ApiError {
        match serde_json::from_str::<serde_json::Value>("{") {
            Err(e) => ApiError::Decode(e),
            Ok(_) => unreachable!("truncated JSON never parses"),
        }
    }

    pub fn push_upload(&self, response: UploadResult) {
        self.upload_responses.borrow_mut().push_back(response);
    }

    pub fn push_register(&self, response: RegisterResult) {
        self.register_responses.borrow_mut().push_back(response);
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_requests.borrow().len()
    }

    pub fn register_calls(&self) -> usize {
        self.register_requests.borrow().len()
    }

    pub fn upload_requests(&self) -> Vec<UploadRequest> {
        self.upload_requests.borrow().clone()
    }

    pub fn register_requests(&self) -> Vec<RegisterRequest> {
        self.register_requests.borrow().clone()
    }
}

impl PromoApi for FakeApi {
    fn upload_code(&self, request: &UploadRequest) -> UploadResult {
        self.upload_requests.borrow_mut().push(request.clone());
        self.upload_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Self::transport_error()))
    }

    fn register_user(&self, request: &RegisterRequest) -> RegisterResult {
        self.register_requests.borrow_mut().push(request.clone());
        self.register_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Self::transport_error()))
    }
}
