// src/api/mod.rs
//! Typed wrappers around the BNPL backend REST API.

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;

pub use client::{BnplApi, LoginResponse};
pub use error::ApiError;
pub use retry::RetryPolicy;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
