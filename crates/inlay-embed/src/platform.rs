//! The environment a renderer runs against.
//!
//! Everything the renderers need from the outside world goes through
//! [`Platform`]: markup parsing, isolation roots, script fetching and the
//! "let the tree settle" step before deferred scripts. [`DefaultPlatform`]
//! backs it with html5ever, the page's shadow roots and reqwest; tests
//! substitute their own fetcher.

use std::future::Future;
use std::pin::Pin;

use inlay_common::FetchError;
use inlay_dom::{DomError, DomTree, NodeId};
use inlay_html::ParsedFragment;

/// A boxed future that stays on the current thread.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host services used by the renderers.
pub trait Platform {
    /// Parse `markup` as a complete document.
    fn parse_document(&self, markup: &str) -> DomTree {
        inlay_html::parse_document(markup)
    }

    /// Parse `markup` as the content of a container.
    fn parse_fragment(&self, markup: &str) -> ParsedFragment {
        inlay_html::parse_fragment(markup)
    }

    /// Attach an isolation root to `host` and return it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] when `host` cannot take an isolation root,
    /// e.g. because it already has one.
    fn attach_isolation_root(&self, dom: &mut DomTree, host: NodeId) -> Result<NodeId, DomError> {
        dom.attach_shadow(host)
    }

    /// The host of the nearest isolation root containing `node`.
    fn enclosing_isolation_host(&self, dom: &DomTree, node: NodeId) -> Option<NodeId> {
        dom.containing_shadow_root(node)
            .and_then(|root| dom.shadow_host(root))
    }

    /// Whether `node` lives inside an isolation root.
    fn is_inside_foreign_isolation_boundary(&self, dom: &DomTree, node: NodeId) -> bool {
        self.enclosing_isolation_host(dom, node).is_some()
    }

    /// Fetch the source text of the script at `url`.
    fn fetch_script<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>>;

    /// Resolve once pending tree work has settled. Deferred scripts wait
    /// for this.
    fn flush(&self) -> LocalBoxFuture<'_, ()> {
        Box::pin(tokio::task::yield_now())
    }
}

/// html5ever parsing, shadow-root isolation and network fetches.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPlatform;

impl Platform for DefaultPlatform {
    fn fetch_script<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        Box::pin(inlay_common::fetch_text(url))
    }
}
