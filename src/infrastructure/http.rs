use crate::config::ClientConfig;
use crate::domain::payment::{
    PaymentOrder, PaymentOrderRequest, PaymentVerification, VerificationReceipt,
};
use crate::domain::ports::{AdminApi, RegistrationApi};
use crate::domain::registration::{Registration, RegistrationForm, RegistrationReceipt};
use crate::domain::session::{AccessToken, AdminCredentials, LoginResponse};
use crate::domain::stats::RegistrationStats;
use crate::error::{NeuronError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Backend REST client.
///
/// Non-2xx responses become `BackendError` carrying the body's `detail`
/// message; 401 becomes `Unauthorized` so the session can react to it.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_base: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("neuron/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config.api_base()))
    }

    pub fn with_client(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
        debug!(path, "POST");
        self.client.post(self.url(path)).json(body)
    }

    fn get_authorized(&self, path: &str, token: &AccessToken) -> Result<RequestBuilder> {
        debug!(path, "GET");
        let value = HeaderValue::from_str(&token.bearer())
            .map_err(|_| NeuronError::Unauthorized(Some("Malformed access token".to_string())))?;
        Ok(self.client.get(self.url(path)).header(AUTHORIZATION, value))
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail").and_then(Value::as_str).map(str::to_string));
        debug!(status = status.as_u16(), ?detail, "backend returned an error");

        if status == StatusCode::UNAUTHORIZED {
            Err(NeuronError::Unauthorized(detail))
        } else {
            Err(NeuronError::BackendError {
                status: status.as_u16(),
                detail,
            })
        }
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Ok(Self::send(request).await?.json::<T>().await?)
    }
}

#[async_trait]
impl RegistrationApi for HttpBackend {
    async fn create_registration(&self, form: &RegistrationForm) -> Result<RegistrationReceipt> {
        Self::send_json(self.post("/registrations", form)).await
    }

    async fn create_order(&self, request: &PaymentOrderRequest) -> Result<PaymentOrder> {
        Self::send_json(self.post("/payment/create-order", request)).await
    }

    async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<VerificationReceipt> {
        Self::send_json(self.post("/payment/verify", verification)).await
    }
}

#[async_trait]
impl AdminApi for HttpBackend {
    async fn login(&self, credentials: &AdminCredentials) -> Result<AccessToken> {
        let response: LoginResponse =
            Self::send_json(self.post("/auth/admin-login", credentials)).await?;
        Ok(response.access_token)
    }

    async fn registrations(&self, token: &AccessToken) -> Result<Vec<Registration>> {
        Self::send_json(self.get_authorized("/registrations", token)?).await
    }

    async fn stats(&self, token: &AccessToken) -> Result<RegistrationStats> {
        Self::send_json(self.get_authorized("/registrations/stats", token)?).await
    }

    async fn export(&self, token: &AccessToken) -> Result<Vec<u8>> {
        let response = Self::send(self.get_authorized("/registrations/export", token)?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
