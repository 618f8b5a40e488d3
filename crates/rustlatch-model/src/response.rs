//! Tagged response variants.
//!
//! Each API operation knows which payload it expects and selects a
//! [`ResponseKind`]; [`LatchResponse::decode`] then performs exactly that
//! decode. Converting back to a concrete shape goes through `TryFrom`.

use serde::de::DeserializeOwned;

use crate::error::ModelError;
use crate::output::{
    AddApplicationResponse, AddOperationResponse, HistoryResponse, PairResponse,
    ShowApplicationsResponse, ShowOperationResponse, StatusResponse, SubscriptionResponse,
};

/// The payload shape an operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// No payload of interest (lock, unpair, delete, update, ...).
    Empty,
    /// [`PairResponse`]
    Pair,
    /// [`StatusResponse`]
    Status,
    /// [`AddOperationResponse`]
    AddOperation,
    /// [`ShowOperationResponse`]
    ShowOperation,
    /// [`HistoryResponse`]
    History,
    /// [`SubscriptionResponse`]
    Subscription,
    /// [`ShowApplicationsResponse`]
    ShowApplications,
    /// [`AddApplicationResponse`]
    AddApplication,
}

impl ResponseKind {
    /// Short name used in error messages and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Pair => "pair",
            Self::Status => "status",
            Self::AddOperation => "add operation",
            Self::ShowOperation => "show operation",
            Self::History => "history",
            Self::Subscription => "subscription",
            Self::ShowApplications => "show applications",
            Self::AddApplication => "add application",
        }
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum LatchResponse {
    /// No payload.
    Empty,
    /// Pairing result.
    Pair(PairResponse),
    /// Status check result.
    Status(StatusResponse),
    /// New operation.
    AddOperation(AddOperationResponse),
    /// Operation listing.
    ShowOperation(ShowOperationResponse),
    /// Account history.
    History(HistoryResponse),
    /// Subscription details.
    Subscription(SubscriptionResponse),
    /// Application listing.
    ShowApplications(ShowApplicationsResponse),
    /// New application.
    AddApplication(AddApplicationResponse),
}

impl LatchResponse {
    /// Decode `body` as the shape selected by `kind`.
    ///
    /// The caller is expected to have checked for an embedded error first
    /// (see [`check_error`](crate::error::check_error)).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Decode`] if the body does not match the shape.
    pub fn decode(kind: ResponseKind, body: &str) -> Result<Self, ModelError> {
        Ok(match kind {
            ResponseKind::Empty => Self::Empty,
            ResponseKind::Pair => Self::Pair(from_json(kind, body)?),
            ResponseKind::Status => Self::Status(from_json(kind, body)?),
            ResponseKind::AddOperation => Self::AddOperation(from_json(kind, body)?),
            ResponseKind::ShowOperation => Self::ShowOperation(from_json(kind, body)?),
            ResponseKind::History => Self::History(from_json(kind, body)?),
            ResponseKind::Subscription => Self::Subscription(from_json(kind, body)?),
            ResponseKind::ShowApplications => Self::ShowApplications(from_json(kind, body)?),
            ResponseKind::AddApplication => Self::AddApplication(from_json(kind, body)?),
        })
    }

    /// The kind tag of this response.
    #[must_use]
    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::Empty => ResponseKind::Empty,
            Self::Pair(_) => ResponseKind::Pair,
            Self::Status(_) => ResponseKind::Status,
            Self::AddOperation(_) => ResponseKind::AddOperation,
            Self::ShowOperation(_) => ResponseKind::ShowOperation,
            Self::History(_) => ResponseKind::History,
            Self::Subscription(_) => ResponseKind::Subscription,
            Self::ShowApplications(_) => ResponseKind::ShowApplications,
            Self::AddApplication(_) => ResponseKind::AddApplication,
        }
    }
}

fn from_json<T: DeserializeOwned>(kind: ResponseKind, body: &str) -> Result<T, ModelError> {
    serde_json::from_str(body).map_err(|source| ModelError::Decode {
        kind: kind.name(),
        source,
    })
}

macro_rules! impl_try_from_response {
    ($($variant:ident => $shape:ty),+ $(,)?) => {
        $(
            impl TryFrom<LatchResponse> for $shape {
                type Error = ModelError;

                fn try_from(response: LatchResponse) -> Result<Self, Self::Error> {
                    match response {
                        LatchResponse::$variant(inner) => Ok(inner),
                        other => Err(ModelError::UnexpectedKind {
                            expected: ResponseKind::$variant.name(),
                            actual: other.kind().name(),
                        }),
                    }
                }
            }
        )+
    };
}

impl_try_from_response! {
    Pair => PairResponse,
    Status => StatusResponse,
    AddOperation => AddOperationResponse,
    ShowOperation => ShowOperationResponse,
    History => HistoryResponse,
    Subscription => SubscriptionResponse,
    ShowApplications => ShowApplicationsResponse,
    AddApplication => AddApplicationResponse,
}
