use serde::Serialize;
use tracing::instrument;

use authware_client::{Credential, Request, Result};

use crate::responses::{BaseResponse, UpdatedDataResponse};
use crate::types::UserVariable;
use crate::validate;

#[derive(Serialize)]
struct CreatePayload<'a> {
    key: &'a str,
    value: &'a str,
    can_user_edit: bool,
}

#[derive(Serialize)]
struct UpdatePayload<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct DeletePayload<'a> {
    key: &'a str,
}

impl super::AuthwareApplication {
    /// Create a variable on the authenticated user.
    #[instrument(skip(self, credential, value))]
    pub async fn create_user_variable(
        &self,
        credential: &Credential,
        key: &str,
        value: &str,
        can_user_edit: bool,
    ) -> Result<UpdatedDataResponse<UserVariable>> {
        let payload = CreatePayload {
            key: validate::required("key", key)?,
            value: validate::required("value", value)?,
            can_user_edit,
        };
        self.requester
            .send(
                Request::post("/user/variables")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }

    /// Change the value of one of the authenticated user's variables.
    #[instrument(skip(self, credential, new_value))]
    pub async fn update_user_variable(
        &self,
        credential: &Credential,
        key: &str,
        new_value: &str,
    ) -> Result<UpdatedDataResponse<UserVariable>> {
        let payload = UpdatePayload {
            key: validate::required("key", key)?,
            value: validate::required("new value", new_value)?,
        };
        self.requester
            .send(
                Request::put("/user/variables")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }

    /// Delete one of the authenticated user's variables.
    #[instrument(skip(self, credential))]
    pub async fn delete_user_variable(
        &self,
        credential: &Credential,
        key: &str,
    ) -> Result<BaseResponse> {
        let payload = DeletePayload {
            key: validate::required("key", key)?,
        };
        self.requester
            .send(
                Request::delete("/user/variables")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::AuthwareApplication;
    use authware_client::{ClientConfig, Credential};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(server: &MockServer) -> AuthwareApplication {
        let config = ClientConfig::builder()
            .with_base_url(server.uri())
            .with_app_version("1.0.0")
            .build()
            .unwrap();
        AuthwareApplication::with_config("11111111-1111-1111-1111-111111111111", config).unwrap()
    }

    #[tokio::test]
    async fn test_create_user_variable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/variables"))
            .and(header("Authorization", "Bearer T"))
            .and(body_json(json!({"key": "theme", "value": "dark", "can_user_edit": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "message": "Created",
                "new_data": {"key": "theme", "value": "dark", "can_user_edit": false}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = app(&mock_server)
            .create_user_variable(&Credential::bearer("T"), "theme", "dark", false)
            .await
            .unwrap();
        assert_eq!(response.new_data.value, "dark");
        assert!(!response.new_data.can_user_edit);
    }

    #[tokio::test]
    async fn test_update_user_variable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/variables"))
            .and(header("Authorization", "K"))
            .and(body_json(json!({"key": "theme", "value": "light"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "new_data": {"key": "theme", "value": "light", "can_user_edit": true}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = app(&mock_server)
            .update_user_variable(&Credential::api_key("K"), "theme", "light")
            .await
            .unwrap();
        assert_eq!(response.new_data.value, "light");
    }

    #[tokio::test]
    async fn test_delete_user_variable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/user/variables"))
            .and(body_json(json!({"key": "theme"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "Deleted"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = app(&mock_server)
            .delete_user_variable(&Credential::bearer("T"), "theme")
            .await
            .unwrap();
        assert_eq!(response.message.as_deref(), Some("Deleted"));
    }

    #[tokio::test]
    async fn test_empty_key_is_rejected_locally() {
        let mock_server = MockServer::start().await;
        let err = app(&mock_server)
            .delete_user_variable(&Credential::bearer("T"), "")
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}
