use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    address: String,
    client: Client,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    Unauthorized,
    UnexpectedStatusCode(StatusCode),
}
pub type APIResponse<T> = Result<T, APIError>;

/// How a caller proves it may trigger a notifications run
#[derive(Debug, Clone)]
pub enum TriggerAuth {
    None,
    /// Sent as `Authorization: Bearer <secret>`
    Header(String),
    /// Sent as the `secret` query parameter
    Query(String),
    /// Identify as a trusted scheduler
    UserAgent(String),
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
        }
    }

    fn get_client(&self, method: Method, path: String, auth: &TriggerAuth) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        let builder = self.client.request(method, &url);

        match auth {
            TriggerAuth::None => builder,
            TriggerAuth::Header(secret) => {
                builder.header(header::AUTHORIZATION, format!("Bearer {}", secret))
            }
            TriggerAuth::Query(secret) => builder.query(&[("secret", secret)]),
            TriggerAuth::UserAgent(user_agent) => {
                builder.header(header::USER_AGENT, user_agent.clone())
            }
        }
    }

    fn check_status_code(
        &self,
        res: &Response,
        expected_status_code: StatusCode,
    ) -> Result<(), APIError> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(APIError::Unauthorized);
        }
        Err(APIError::UnexpectedStatusCode(status))
    }

    async fn get_json_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> APIResponse<T> {
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.check_status_code(&res, expected_status_code)?;
        self.get_json_response(res).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        auth: &TriggerAuth,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match self.get_client(Method::GET, path, auth).send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        auth: &TriggerAuth,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match self
            .get_client(Method::POST, path, auth)
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }
}
