use authware::{AuthwareApplication, ClientConfig};
use wiremock::MockServer;

pub const APP_ID: &str = "11111111-1111-1111-1111-111111111111";

/// Route SDK tracing to the test harness output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authware_client=debug,authware_app=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// An application client pointed at `server`.
pub fn app(server: &MockServer) -> AuthwareApplication {
    init_tracing();
    let config = ClientConfig::builder()
        .with_base_url(server.uri())
        .with_app_version("9.9.9")
        .build()
        .expect("mock server URI should be a valid base URL");
    AuthwareApplication::with_config(APP_ID, config).expect("APP_ID is a GUID")
}

pub fn application_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Integration",
        "id": APP_ID,
        "version": "9.9.9",
        "date_created": "2023-06-01T12:00:00Z",
        "is_hwid_checking_enabled": true,
        "apis": [],
        "user_count": 3,
        "request_count": 42
    })
}
