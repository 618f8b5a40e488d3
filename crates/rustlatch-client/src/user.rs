//! Latch User API client.
//!
//! The User API manages a developer account's subscription and applications.
//! Calls are signed with the user ID and user secret instead of an
//! application's credentials.

use rustlatch_auth::{Credential, FormParams, HttpMethod};
use rustlatch_core::LatchConfig;
use rustlatch_core::protocol::{action, param};
use rustlatch_model::{
    AddApplicationResponse, ApplicationInfo, ResponseKind, ShowApplicationsResponse,
    SubscriptionResponse,
};

use crate::error::ClientResult;
use crate::path::action_path;
use crate::transport::Transport;

/// Client for the Latch User API.
#[derive(Debug, Clone)]
pub struct LatchUserClient {
    credential: Credential,
    transport: Transport,
}

impl LatchUserClient {
    /// Create a client for `user_id` using `transport`.
    pub fn new(user_id: impl Into<String>, user_secret: impl Into<String>, transport: Transport) -> Self {
        Self {
            credential: Credential::new(user_id, user_secret),
            transport,
        }
    }

    /// Create a client from the user credentials in `config`.
    ///
    /// # Errors
    ///
    /// Fails if the credentials are missing or the transport cannot be built.
    pub fn from_config(config: LatchConfig) -> ClientResult<Self> {
        let (user_id, secret) = config.user_credentials()?;
        let credential = Credential::new(user_id, secret);
        Ok(Self {
            credential,
            transport: Transport::new(config)?,
        })
    }

    /// The signing credential.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Subscription plan and usage.
    pub async fn subscription(&self) -> ClientResult<SubscriptionResponse> {
        let response = self
            .transport
            .call(
                &self.credential,
                HttpMethod::Get,
                action::SUBSCRIPTION,
                FormParams::new(),
                ResponseKind::Subscription,
            )
            .await?;
        Ok(SubscriptionResponse::try_from(response)?)
    }

    /// Every application registered by the user.
    pub async fn show_applications(&self) -> ClientResult<ShowApplicationsResponse> {
        let response = self
            .transport
            .call(
                &self.credential,
                HttpMethod::Get,
                action::APPLICATION,
                FormParams::new(),
                ResponseKind::ShowApplications,
            )
            .await?;
        Ok(ShowApplicationsResponse::try_from(response)?)
    }

    /// Register a new application.
    pub async fn add_application(
        &self,
        info: &ApplicationInfo,
    ) -> ClientResult<AddApplicationResponse> {
        let response = self
            .transport
            .call(
                &self.credential,
                HttpMethod::Put,
                action::APPLICATION,
                application_params(info),
                ResponseKind::AddApplication,
            )
            .await?;
        Ok(AddApplicationResponse::try_from(response)?)
    }

    /// Replace the attributes of an application.
    pub async fn update_application(
        &self,
        application_id: &str,
        info: &ApplicationInfo,
    ) -> ClientResult<()> {
        self.transport
            .call(
                &self.credential,
                HttpMethod::Post,
                &action_path(action::APPLICATION, &[application_id])?,
                application_params(info),
                ResponseKind::Empty,
            )
            .await?;
        Ok(())
    }

    /// Remove an application.
    pub async fn delete_application(&self, application_id: &str) -> ClientResult<()> {
        self.transport
            .call(
                &self.credential,
                HttpMethod::Delete,
                &action_path(action::APPLICATION, &[application_id])?,
                FormParams::new(),
                ResponseKind::Empty,
            )
            .await?;
        Ok(())
    }
}

fn application_params(info: &ApplicationInfo) -> FormParams {
    [
        (param::NAME, info.name.clone()),
        (param::CONTACT_EMAIL, info.contact_email.clone()),
        (param::CONTACT_PHONE, info.contact_phone.clone()),
        (param::TWO_FACTOR, info.two_factor.to_string()),
        (param::LOCK_ON_REQUEST, info.lock_on_request.to_string()),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), vec![value]))
    .collect()
}
