//! Identity Toolkit accounts API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skillorbit::{
    backend::{AuthProvider, BackendError},
    users::{AuthUser, ProviderCredential, UserId},
};
use tracing::debug;

use super::{FirebaseClient, FirebaseError, IdSession};

/// Redirect URI reported for token-based provider sign-in.
const IDP_REQUEST_URI: &str = "http://localhost";

/// Translate an Identity Toolkit error code (e.g. `WEAK_PASSWORD : Password
/// should be at least 6 characters`) into the message shown to users.
pub(super) fn describe_error(raw: &str) -> String {
    let (code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };

    let message = match code {
        "EMAIL_EXISTS" => "The email address is already in use by another account.",
        "INVALID_EMAIL" => "The email address is badly formatted.",
        "WEAK_PASSWORD" => detail.unwrap_or("Password should be at least 6 characters"),
        "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => {
            "There is no user record corresponding to this identifier. The user may have been deleted."
        }
        "INVALID_PASSWORD" => "The password is invalid or the user does not have a password.",
        "INVALID_LOGIN_CREDENTIALS" => {
            "The supplied auth credential is incorrect, malformed or has expired."
        }
        "USER_DISABLED" => "The user account has been disabled by an administrator.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Access to this account has been temporarily disabled due to many failed login attempts. Try again later."
        }
        "INVALID_IDP_RESPONSE" => "Invalid IdP response/credential.",
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" => {
            "This user's credential isn't valid for this project. Sign in again."
        }
        _ => raw.trim(),
    };

    message.to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest {
    post_body: String,
    request_uri: &'static str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

/// Account fields shared by the sign-up, sign-in and update responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    display_name: Option<String>,

    #[serde(default)]
    photo_url: Option<String>,

    #[serde(default)]
    id_token: Option<String>,
}

impl AccountResponse {
    fn into_user(self) -> (AuthUser, Option<String>) {
        let user = AuthUser {
            uid: UserId::from(self.local_id),
            email: self.email,
            display_name: self.display_name.filter(|name| !name.is_empty()),
            photo_url: self.photo_url,
        };

        (user, self.id_token)
    }
}

impl FirebaseClient {
    async fn accounts_call<B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<AccountResponse, FirebaseError> {
        let request = self
            .http
            .post(self.config.accounts_url(method))
            .query(&[("key", self.config.api_key.as_str())])
            .json(body);

        self.send(request).await
    }

    /// Remember the account returned by a sign-in style call.
    fn start_session(&self, response: AccountResponse) -> Result<AuthUser, FirebaseError> {
        let (user, id_token) = response.into_user();
        let id_token = id_token.ok_or_else(|| {
            FirebaseError::UnexpectedResponse("sign-in response without an ID token".to_string())
        })?;

        debug!(uid = %user.uid, "signed in");

        *self.session() = Some(IdSession {
            user: user.clone(),
            id_token,
        });

        Ok(user)
    }

    async fn password_sign_in(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, FirebaseError> {
        let response = self
            .accounts_call(
                method,
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        self.start_session(response)
    }

    async fn try_update_display_name(&self, display_name: &str) -> Result<AuthUser, FirebaseError> {
        let session = self.session().clone().ok_or(FirebaseError::NotSignedIn)?;

        let response = self
            .accounts_call(
                "update",
                &UpdateRequest {
                    id_token: &session.id_token,
                    display_name,
                    return_secure_token: true,
                },
            )
            .await?;

        let (mut user, id_token) = response.into_user();
        user.photo_url = user.photo_url.or(session.user.photo_url);

        *self.session() = Some(IdSession {
            user: user.clone(),
            id_token: id_token.unwrap_or(session.id_token),
        });

        Ok(user)
    }
}

// TODO: refresh the ID token through securetoken.googleapis.com once it
// expires (one hour after sign-in); long-lived sessions currently need a new
// sign-in.
#[async_trait]
impl AuthProvider for FirebaseClient {
    async fn create_user(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        Ok(self.password_sign_in("signUp", email, password).await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        Ok(self
            .password_sign_in("signInWithPassword", email, password)
            .await?)
    }

    async fn sign_in_with_provider(
        &self,
        credential: &ProviderCredential,
    ) -> Result<AuthUser, BackendError> {
        let response = self
            .accounts_call("signInWithIdp", &idp_request(credential))
            .await?;

        Ok(self.start_session(response)?)
    }

    async fn update_display_name(&self, display_name: &str) -> Result<AuthUser, BackendError> {
        Ok(self.try_update_display_name(display_name).await?)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        *self.session() = None;

        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError> {
        let request = self
            .http
            .post(self.config.accounts_url("sendOobCode"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&OobCodeRequest {
                request_type: "PASSWORD_RESET",
                email,
            });

        self.send::<serde_json::Value>(request).await?;

        Ok(())
    }
}

fn idp_request(credential: &ProviderCredential) -> IdpRequest {
    IdpRequest {
        post_body: format!(
            "id_token={}&providerId={}",
            credential.id_token,
            credential.provider.provider_id()
        ),
        request_uri: IDP_REQUEST_URI,
        return_secure_token: true,
        return_idp_credential: true,
    }
}
