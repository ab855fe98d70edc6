use std::time::Duration;

use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    AttendanceMark, BearerToken, DateRange, EmployeeCredentials, EmployeeUpload, HrCredentials,
    LoginResponse, NewCompany, NewEmployee, QrPayload, XLSX_MIME,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the attendance backend.
///
/// Calls scoped to HR or an employee take that actor's [`BearerToken`];
/// there is no way to issue them without one.
#[derive(Debug, Clone)]
pub struct AttendanceClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl AttendanceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // Endpoints are joined relative to the base, so a path prefix such
        // as `/api` must end in a slash to survive the join.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn authorized(&self, request: RequestBuilder, token: &BearerToken) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, token.authorization_header())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "request failed");
            if e.is_timeout() {
                ApiError::Network(format!(
                    "Request timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "received response");

        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            let body = response.text().await.unwrap_or_default();
            warn!(%method, %url, status = status.as_u16(), "backend returned error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // Some endpoints answer 201 with no body at all.
        let text = if text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            ApiError::Parsing(format!("Failed to parse response as JSON: {}", e))
        })
    }

    async fn fetch_text(&self, request: RequestBuilder) -> Result<String, ApiError> {
        self.send(request)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn login(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<BearerToken, ApiError> {
        let response: LoginResponse = self
            .fetch(self.client.post(self.endpoint(path)?).json(body))
            .await?;

        response
            .into_token()
            .ok_or(ApiError::MissingField("access_token"))
    }

    pub async fn register_hr(&self, name: &str, password: &str) -> Result<Value, ApiError> {
        self.fetch(
            self.client
                .post(self.endpoint("/auth/hr/register")?)
                .json(&HrCredentials { name, password }),
        )
        .await
    }

    pub async fn login_hr(&self, name: &str, password: &str) -> Result<BearerToken, ApiError> {
        self.login("/auth/hr/login", &HrCredentials { name, password })
            .await
    }

    pub async fn login_employee(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BearerToken, ApiError> {
        self.login("/auth/employee/login", &EmployeeCredentials { email, password })
            .await
    }

    pub async fn create_company(
        &self,
        token: &BearerToken,
        company: &NewCompany,
    ) -> Result<Value, ApiError> {
        let request = self
            .client
            .post(self.endpoint("/company/create")?)
            .json(company);
        self.fetch(self.authorized(request, token)).await
    }

    pub async fn add_employee(
        &self,
        token: &BearerToken,
        employee: &NewEmployee,
    ) -> Result<Value, ApiError> {
        let request = self
            .client
            .post(self.endpoint("/employee/add")?)
            .json(employee);
        self.fetch(self.authorized(request, token)).await
    }

    pub async fn upload_employees(
        &self,
        token: &BearerToken,
        upload: EmployeeUpload,
    ) -> Result<Value, ApiError> {
        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(XLSX_MIME)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .client
            .post(self.endpoint("/employee/upload_excel")?)
            .multipart(form);
        self.fetch(self.authorized(request, token)).await
    }

    pub async fn list_employees(&self, token: &BearerToken) -> Result<Value, ApiError> {
        let request = self.client.get(self.endpoint("/employee/list")?);
        self.fetch(self.authorized(request, token)).await
    }

    pub async fn company_attendance(
        &self,
        token: &BearerToken,
        range: DateRange,
    ) -> Result<Value, ApiError> {
        let request = self
            .client
            .get(self.endpoint("/attendance/company")?)
            .query(&range.as_query());
        self.fetch(self.authorized(request, token)).await
    }

    /// Raw CSV export; see [`crate::report`] for the reshaping.
    pub async fn export_attendance(
        &self,
        token: &BearerToken,
        range: DateRange,
    ) -> Result<String, ApiError> {
        let request = self
            .client
            .get(self.endpoint("/export/attendance")?)
            .query(&range.as_query());
        self.fetch_text(self.authorized(request, token)).await
    }

    pub async fn regenerate_qr(&self, token: &BearerToken) -> Result<Value, ApiError> {
        let request = self.client.post(self.endpoint("/qr/regenerate")?);
        self.fetch(self.authorized(request, token)).await
    }

    /// The QR display is public; no credential is attached.
    pub async fn current_qr(&self, company_id: i64) -> Result<QrPayload, ApiError> {
        let path = format!("/qr/current/{}", company_id);
        let payload: Option<QrPayload> = self.fetch(self.client.get(self.endpoint(&path)?)).await?;
        Ok(payload.unwrap_or_default())
    }

    pub async fn check_in(
        &self,
        token: &BearerToken,
        mark: &AttendanceMark<'_>,
    ) -> Result<Value, ApiError> {
        let request = self
            .client
            .post(self.endpoint("/attendance/checkin")?)
            .json(mark);
        self.fetch(self.authorized(request, token)).await
    }

    pub async fn check_out(
        &self,
        token: &BearerToken,
        mark: &AttendanceMark<'_>,
    ) -> Result<Value, ApiError> {
        let request = self
            .client
            .post(self.endpoint("/attendance/checkout")?)
            .json(mark);
        self.fetch(self.authorized(request, token)).await
    }

    pub async fn my_attendance(
        &self,
        token: &BearerToken,
        range: DateRange,
    ) -> Result<Value, ApiError> {
        let request = self
            .client
            .get(self.endpoint("/attendance/my")?)
            .query(&range.as_query());
        self.fetch(self.authorized(request, token)).await
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Response is missing `{0}`")]
    MissingField(&'static str),
    #[error("{0}")]
    Parsing(String),
    #[error("Invalid URL {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
