use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use authware_client::{Credential, Error, Request, Result};

use crate::types::{Application, Variable};

#[derive(Serialize)]
struct AppIdPayload {
    app_id: Uuid,
}

impl super::AuthwareApplication {
    /// Fetch the application record.
    ///
    /// The first successful result is cached; later calls, including
    /// concurrent ones, return it without another request. Failures are not
    /// cached.
    #[instrument(skip(self), fields(app_id = %self.app_id))]
    pub async fn initialize_application(&self) -> Result<&Application> {
        self.application
            .get_or_try_init(|| async {
                let request = Request::post("/app").json(&AppIdPayload {
                    app_id: self.app_id,
                })?;
                let application: Application = self.requester.send(request).await?;
                debug!(
                    name = %application.name,
                    version = %application.version,
                    "Application initialized"
                );
                Ok::<_, Error>(application)
            })
            .await
    }

    /// Fetch the application's variables.
    ///
    /// Without a credential only public variables are returned. With one,
    /// the variables visible to that user are returned.
    #[instrument(skip(self, credential))]
    pub async fn application_variables(
        &self,
        credential: Option<&Credential>,
    ) -> Result<Vec<Variable>> {
        let request = match credential {
            None => Request::get("/app/variables"),
            Some(credential) => Request::post("/app/variables")
                .json(&AppIdPayload {
                    app_id: self.app_id,
                })?
                .credential(credential.clone()),
        };
        self.requester.send(request).await
    }
}
