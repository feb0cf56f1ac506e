//! Error types for rendering and configuration.

use inlay_dom::{DomError, NodeId};

/// Errors raised while attaching a render target or rendering into it.
///
/// Malformed markup and failing scripts are not errors: the parser recovers
/// and script failures are logged and treated as completion.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The render target is not part of the page (not yet attached, or
    /// already removed).
    #[error("render target {0} is not attached to the page")]
    MissingTarget(NodeId),
    /// The platform refused to attach an isolation root to the host.
    #[error("cannot attach an isolation root to {host}: {source}")]
    IsolationUnavailable {
        /// The element that was to host the isolation root.
        host: NodeId,
        /// Why the platform refused.
        #[source]
        source: DomError,
    },
    /// A tree mutation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading an [`EmbedConfig`](crate::EmbedConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON was malformed or missing required fields.
    #[error("invalid embed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
