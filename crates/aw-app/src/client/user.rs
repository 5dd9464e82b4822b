use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use authware_client::{Credential, Request, Result};

use crate::profile::Profile;
use crate::responses::{AuthResponse, BaseResponse};
use crate::validate;

#[derive(Serialize)]
struct RegisterPayload<'a> {
    app_id: Uuid,
    username: &'a str,
    password: &'a str,
    email_address: &'a str,
    token: Uuid,
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    app_id: Uuid,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RedeemPayload<'a> {
    app_id: Uuid,
    username: &'a str,
    token: Uuid,
}

#[derive(Serialize)]
struct ChangeEmailPayload<'a> {
    password: &'a str,
    new_email_address: &'a str,
}

#[derive(Serialize)]
struct ChangePasswordPayload<'a> {
    old_password: &'a str,
    password: &'a str,
    repeat_password: &'a str,
}

#[derive(Serialize)]
struct PasswordPayload<'a> {
    password: &'a str,
}

impl super::AuthwareApplication {
    /// Register a new user with a license token.
    #[instrument(skip(self, password, token))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        token: &str,
    ) -> Result<BaseResponse> {
        let payload = RegisterPayload {
            app_id: self.app_id,
            username: validate::required("username", username)?,
            password: validate::required("password", password)?,
            email_address: validate::required("email", email)?,
            token: validate::guid("token", token)?,
        };
        self.requester
            .send(Request::post("/user/register").json(&payload)?)
            .await
    }

    /// Log in and fetch the user's profile with the issued session token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(AuthResponse, Profile)> {
        let payload = LoginPayload {
            app_id: self.app_id,
            username: validate::required("username", username)?,
            password: validate::required("password", password)?,
        };
        let auth: AuthResponse = self
            .requester
            .send(Request::post("/user/auth").json(&payload)?)
            .await?;
        debug!("Session token issued");

        let profile = self
            .profile(&Credential::bearer(auth.auth_token.clone()))
            .await?;
        Ok((auth, profile))
    }

    /// Extend a user's plan with a license token.
    #[instrument(skip(self, token))]
    pub async fn redeem_token(&self, username: &str, token: &str) -> Result<BaseResponse> {
        let payload = RedeemPayload {
            app_id: self.app_id,
            username: validate::required("username", username)?,
            token: validate::guid("token", token)?,
        };
        self.requester
            .send(Request::post("/user/renew").json(&payload)?)
            .await
    }

    /// Fetch the profile of the authenticated user.
    #[instrument(skip(self, credential))]
    pub async fn profile(&self, credential: &Credential) -> Result<Profile> {
        self.requester
            .send(Request::get("user/profile").credential(credential.clone()))
            .await
    }

    /// Change the authenticated user's email address.
    #[instrument(skip(self, credential, password))]
    pub async fn change_email(
        &self,
        credential: &Credential,
        password: &str,
        new_email: &str,
    ) -> Result<BaseResponse> {
        let payload = ChangeEmailPayload {
            password: validate::required("password", password)?,
            new_email_address: validate::required("new email", new_email)?,
        };
        self.requester
            .send(
                Request::put("/user/change-email")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }

    /// Change the authenticated user's password.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        credential: &Credential,
        current_password: &str,
        new_password: &str,
    ) -> Result<BaseResponse> {
        let new_password = validate::required("new password", new_password)?;
        let payload = ChangePasswordPayload {
            old_password: validate::required("current password", current_password)?,
            password: new_password,
            repeat_password: new_password,
        };
        self.requester
            .send(
                Request::put("/user/change-password")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }

    /// Issue a new API key for the authenticated user.
    ///
    /// The new key is not returned; it is available from the Authware
    /// dashboard.
    #[instrument(skip_all)]
    pub async fn regenerate_api_key(
        &self,
        credential: &Credential,
        password: &str,
    ) -> Result<BaseResponse> {
        let payload = PasswordPayload {
            password: validate::required("password", password)?,
        };
        self.requester
            .send(
                Request::put("/user/regenerate-key")
                    .json(&payload)?
                    .credential(credential.clone()),
            )
            .await
    }
}
