use chrono_tz::Tz;
use std::time::Duration;
use tracing::{info, warn};

/// Credentials for the transactional email HTTP API
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    /// Sender address, e.g. `Barbershop <bookings@example.com>`
    pub from: String,
}

/// Credentials for the Twilio messaging API
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

/// VAPID signing material for Web Push
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub vapid_private_key_pem: String,
    /// Contact of the application server, e.g. `mailto:admin@example.com`
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret a caller of the notifications trigger must present.
    /// When absent the trigger is open.
    pub cron_secret: Option<String>,
    /// User agents of schedulers that are trusted to call the trigger
    /// without presenting the secret. Matched as case insensitive substrings.
    pub scheduler_user_agents: Vec<String>,
    /// Timezone in which appointment dates and times are entered
    pub timezone: Tz,
    /// Base url used for deep links in push notifications
    pub app_url: String,
    /// Upper bound for every call to an email, SMS or push provider
    pub provider_timeout: Duration,
    /// How often the in-process reminders job runs. `0` disables it and
    /// leaves triggering to an external scheduler.
    pub reminder_job_interval_minutes: u64,
    pub email: Option<EmailConfig>,
    pub sms: Option<SmsConfig>,
    pub push: Option<PushConfig>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                5000
            }
        };

        let cron_secret = non_empty_var("CRON_SECRET");
        if cron_secret.is_none() {
            warn!("Did not find CRON_SECRET environment variable. The notifications trigger is open to anyone.");
        }

        let scheduler_user_agents = match non_empty_var("CRON_USER_AGENTS") {
            Some(agents) => agents
                .split(',')
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
            None => vec!["vercel-cron".to_string()],
        };

        let timezone = match non_empty_var("APP_TIMEZONE") {
            Some(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given APP_TIMEZONE: {} is not valid, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            None => Tz::UTC,
        };

        let app_url = non_empty_var("APP_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let provider_timeout =
            Duration::from_secs(parse_var("PROVIDER_TIMEOUT_SECS").unwrap_or(10));
        let reminder_job_interval_minutes =
            parse_var("REMINDER_JOB_INTERVAL_MINUTES").unwrap_or(0);

        let email = match (
            non_empty_var("EMAIL_API_URL"),
            non_empty_var("EMAIL_API_KEY"),
            non_empty_var("EMAIL_FROM"),
        ) {
            (Some(api_url), Some(api_key), Some(from)) => Some(EmailConfig {
                api_url,
                api_key,
                from,
            }),
            _ => {
                info!("Email provider is not configured, emails will be skipped.");
                None
            }
        };

        let sms = match (
            non_empty_var("TWILIO_ACCOUNT_SID"),
            non_empty_var("TWILIO_AUTH_TOKEN"),
            non_empty_var("TWILIO_FROM_NUMBER"),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(SmsConfig {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => {
                info!("Twilio is not configured, SMS will be skipped.");
                None
            }
        };

        let push = match (
            non_empty_var("VAPID_PRIVATE_KEY_PEM"),
            non_empty_var("VAPID_SUBJECT"),
        ) {
            (Some(vapid_private_key_pem), Some(subject)) => Some(PushConfig {
                // Allows passing the PEM on a single line
                vapid_private_key_pem: vapid_private_key_pem.replace("\\n", "\n"),
                subject,
            }),
            _ => {
                info!("VAPID keys are not configured, push notifications will be skipped.");
                None
            }
        };

        Self {
            port,
            cron_secret,
            scheduler_user_agents,
            timezone,
            app_url,
            provider_timeout,
            reminder_job_interval_minutes,
            email,
            sms,
            push,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let val = non_empty_var(key)?;
    match val.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("The given {}: {} is not valid, using the default.", key, val);
            None
        }
    }
}
