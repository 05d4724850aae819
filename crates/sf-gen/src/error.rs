use sf_core::SfError;

/// Alias for `Result<T, GenError>`.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur at the generation boundary.
///
/// None of these ever leave partial state behind: a failed generation call
/// means the store is exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The HTTP request itself failed (network, timeout).
    #[error("generation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with a non-2xx status or `success: false`.
    #[error("generation failed ({status}): {message}")]
    Api {
        /// HTTP status code, or 200 when the proxy reported a soft failure.
        status: u16,
        /// Error message from the proxy, if it sent one.
        message: String,
    },

    /// The proxy reported success but returned no usable text.
    #[error("generator returned an empty response")]
    EmptyResponse,

    /// A store precondition failed (e.g. rerolling a deleted ability).
    #[error(transparent)]
    Store(#[from] SfError),
}
