use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use authware_client::{Credential, Request, Result};

use crate::responses::ApiResponse;
use crate::validate;

#[derive(Serialize)]
struct ExecutePayload<'a> {
    api_id: &'a str,
    parameters: &'a HashMap<String, serde_json::Value>,
}

impl super::AuthwareApplication {
    /// Execute one of the application's server-side APIs as the
    /// authenticated user.
    #[instrument(skip(self, credential, parameters))]
    pub async fn execute_api(
        &self,
        credential: &Credential,
        api_id: &str,
        parameters: &HashMap<String, serde_json::Value>,
    ) -> Result<ApiResponse> {
        let payload = ExecutePayload {
            api_id: validate::required("api id", api_id)?,
            parameters,
        };
        self.requester
            .send(
                Request::post("/api/execute")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }
}
