use crate::error::NotifierError;
use actix_web::{http::header, web, HttpRequest};
use salon_notifier_api_structs::send_notifications::QueryParams;
use salon_notifier_infra::Config;
use std::fmt::Display;

/// How a caller of the notifications trigger was let through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// No secret is configured
    Open,
    /// The request came from a trusted scheduler user agent
    Scheduler,
    HeaderSecret,
    QuerySecret,
}

impl Display for TriggerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self {
            Self::Open => "open",
            Self::Scheduler => "scheduler",
            Self::HeaderSecret => "header secret",
            Self::QuerySecret => "query secret",
        };
        write!(f, "{}", source)
    }
}

/// Strips a leading `Bearer` scheme, in any case, from the header value
fn parse_authtoken_header(token_header_value: &str) -> String {
    let value = token_header_value.trim();
    let token = match value.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => &value[7..],
        _ => value,
    };
    token.trim().to_string()
}

fn is_trusted_scheduler(req: &HttpRequest, config: &Config) -> bool {
    let user_agent = match req.headers().get(header::USER_AGENT) {
        Some(user_agent) => match user_agent.to_str() {
            Ok(user_agent) => user_agent.to_lowercase(),
            Err(_) => return false,
        },
        None => return false,
    };

    config
        .scheduler_user_agents
        .iter()
        .any(|agent| user_agent.contains(agent.as_str()))
}

fn header_secret(req: &HttpRequest) -> Option<String> {
    let token = req.headers().get(header::AUTHORIZATION)?;
    match token.to_str() {
        Ok(token) => Some(parse_authtoken_header(token)),
        Err(_) => None,
    }
}

fn query_secret(req: &HttpRequest) -> Option<String> {
    web::Query::<QueryParams>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().secret)
}

/// Authorizes a call to the notifications trigger.
///
/// Any one of these lets the caller through: no configured secret, a trusted
/// scheduler user agent, the secret in the `Authorization` header or the
/// secret in the `secret` query parameter.
pub fn protect_trigger_route(
    req: &HttpRequest,
    config: &Config,
) -> Result<TriggerSource, NotifierError> {
    let secret = match &config.cron_secret {
        Some(secret) => secret,
        None => return Ok(TriggerSource::Open),
    };

    if is_trusted_scheduler(req, config) {
        return Ok(TriggerSource::Scheduler);
    }
    if header_secret(req).as_deref() == Some(secret.as_str()) {
        return Ok(TriggerSource::HeaderSecret);
    }
    if query_secret(req).as_deref() == Some(secret.as_str()) {
        return Ok(TriggerSource::QuerySecret);
    }

    Err(NotifierError::Unauthorized(
        "Missing or invalid notifications trigger secret".into(),
    ))
}
