// src/api/client.rs

use crate::api::error::extract_message;
use crate::api::{ApiError, ApiRequest, ApiResponse, Method, RetryPolicy, Transport};
use crate::auth::{Role, Session};
use crate::domain::{
    ApplicationLink, ApplicationRecord, BankConnection, BankType, MerchantRecord,
    NewBankConnection, Outlet, PublicBankOffer,
};
use crate::forms::{LoginForm, RegistrationRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Token issued by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
    #[serde(default)]
    pub merchant_slug: Option<String>,
}

pub struct BnplApi {
    transport: Box<dyn Transport>,
}

impl BnplApi {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    pub fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, ["auth", "login"]).json(to_json(form)?);
        self.fetch(&request)
    }

    pub fn register(&self, body: &RegistrationRequest) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Post, ["auth", "register"]).json(to_json(body)?);
        self.send(&request).map(|_| ())
    }

    pub fn bank_connections(&self, session: &Session) -> Result<Vec<BankConnection>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["merchant", "banks"]).bearer(session.bearer()?);
        self.fetch(&request)
    }

    pub fn create_bank_connection(
        &self,
        session: &Session,
        body: &NewBankConnection,
    ) -> Result<BankConnection, ApiError> {
        let request = ApiRequest::new(Method::Post, ["merchant", "banks"])
            .bearer(session.bearer()?)
            .json(to_json(body)?);
        self.fetch(&request)
    }

    pub fn delete_bank_connection(&self, session: &Session, id: i64) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["merchant".to_string(), "banks".to_string(), id.to_string()])
            .bearer(session.bearer()?);
        self.send(&request).map(|_| ())
    }

    pub fn delete_bank_connection_by_type(
        &self,
        session: &Session,
        bank_type: BankType,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["merchant", "banks", bank_type.code()])
            .bearer(session.bearer()?);
        self.send(&request).map(|_| ())
    }

    /// Offers on a merchant's public page. `ApiError::NotFound` means the
    /// slug does not belong to any merchant.
    pub fn public_banks(&self, merchant_slug: &str) -> Result<Vec<PublicBankOffer>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["public", merchant_slug, "banks"]);
        self.fetch(&request)
    }

    pub fn create_application_link(
        &self,
        merchant_slug: &str,
        outlet_index: u32,
    ) -> Result<ApplicationLink, ApiError> {
        let request = ApiRequest::new(Method::Post, ["public", merchant_slug, "applications"])
            .json(json!({ "outletIndex": outlet_index }));
        self.fetch(&request)
    }

    /// Application-link creation under a retry policy.
    pub fn create_application_link_with_retry(
        &self,
        policy: &RetryPolicy,
        merchant_slug: &str,
        outlet_index: u32,
    ) -> Result<ApplicationLink, ApiError> {
        policy.run(|_| self.create_application_link(merchant_slug, outlet_index))
    }

    pub fn applications(&self, session: &Session) -> Result<Vec<ApplicationRecord>, ApiError> {
        let request =
            ApiRequest::new(Method::Get, ["merchant", "applications"]).bearer(session.bearer()?);
        self.fetch(&request)
    }

    pub fn outlets(&self, session: &Session) -> Result<Vec<Outlet>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["merchant", "outlets"]).bearer(session.bearer()?);
        self.fetch(&request)
    }

    pub fn merchants(&self, session: &Session) -> Result<Vec<MerchantRecord>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["admin", "merchants"]).bearer(session.bearer()?);
        self.fetch(&request)
    }

    fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request)?;
        serde_json::from_slice(&response.body).map_err(|e| {
            tracing::warn!(path = %request.path(), error = %e, "backend payload did not match contract");
            ApiError::Decode(e.to_string())
        })
    }

    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        match response.status {
            200..=299 => Ok(response),
            401 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound),
            status => Err(ApiError::Status {
                status,
                message: extract_message(&response.body),
            }),
        }
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
