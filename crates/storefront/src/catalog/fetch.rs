//! Tri-state fetch result.

use std::future::Future;

use super::CatalogError;

/// The three mutually exclusive states of an in-flight catalog fetch.
///
/// A view starts in `Loading`, issues exactly one request, and lands in
/// `Loaded` or `Failed`. There is no automatic retry; the UI re-runs the
/// fetch on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// Request in flight; the view shows a loading indicator.
    #[default]
    Loading,
    /// Response arrived with a parseable body.
    Loaded(T),
    /// Request or parse failed; carries the display message.
    Failed(String),
}

impl<T> FetchState<T> {
    /// Drive one fetch to completion.
    ///
    /// The returned state is never `Loading`; that variant exists for views
    /// that render between dispatching the future and awaiting it.
    pub async fn run<F>(fetch: F) -> Self
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        match fetch.await {
            Ok(data) => Self::Loaded(data),
            Err(error) => Self::Failed(error.to_string()),
        }
    }

    /// The fetched data, if loaded.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    /// The failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Loaded(_) => None,
        }
    }

    /// Whether the request is still in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Map the loaded data, preserving the other states.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Loading => FetchState::Loading,
            Self::Loaded(data) => FetchState::Loaded(f(data)),
            Self::Failed(message) => FetchState::Failed(message),
        }
    }
}
