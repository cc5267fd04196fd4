use std::sync::{Arc, RwLock};
use std::time::Instant;

use tracing::warn;

use quiz_store::store::QuizStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<QuizStore>>,
    pub env_vars: EnvVars,
    pub started_at: Instant,
}

#[derive(Debug, Clone)]
pub struct EnvVars {
    pub port: u16,
    pub reset_password: String,
    pub request_body_size_limit: usize,
    pub request_timeout_in_ms: u64,
}

impl EnvVars {
    pub fn new() -> Self {
        let port = match std::env::var("PORT") {
            Ok(port_string) => port_string.parse().expect("PORT to be parseable as u16"),
            Err(_e) => {
                let default_port = 3000;
                warn!("PORT not set. Defaulting to {default_port}");
                default_port
            }
        };

        let default_reset_password = "RESET_ALL_DATA".to_string();
        let reset_password = match std::env::var("RESET_PASSWORD") {
            Ok(s) => {
                if s.is_empty() {
                    warn!("RESET_PASSWORD not set. Defaulting to {default_reset_password}");
                    default_reset_password
                } else {
                    s
                }
            }
            Err(_e) => {
                warn!("RESET_PASSWORD not set. Defaulting to {default_reset_password}");
                default_reset_password
            }
        };

        let request_timeout_in_ms = match std::env::var("REQUEST_TIMEOUT_IN_MS") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_TIMEOUT_IN_MS to be valid unsigned integer"),
            Err(_e) => {
                let default_request_timeout = 30_000;
                warn!("REQUEST_TIMEOUT_IN_MS not set. Defaulting to {default_request_timeout}");
                default_request_timeout
            }
        };

        // Media payloads arrive inline as base64, so the default is generous.
        let request_body_size_limit = match std::env::var("REQUEST_BODY_SIZE_LIMIT") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_BODY_SIZE_LIMIT to be valid unsigned integer"),
            Err(_e) => {
                let default_request_body_size_limit = 50 * 1024 * 1024;
                warn!(
                    "REQUEST_BODY_SIZE_LIMIT not set. Defaulting to {default_request_body_size_limit}"
                );
                default_request_body_size_limit
            }
        };

        EnvVars {
            port,
            reset_password,
            request_body_size_limit,
            request_timeout_in_ms,
        }
    }
}
