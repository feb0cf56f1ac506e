//! Mount and unmount of one embedded-HTML instance.
//!
//! An [`EmbeddedHtml`] is what a UI binding layer wraps in a component: it
//! is attached to a host element once, renders its markup exactly once,
//! and cleans up after itself when detached. Configuration changes after
//! mount take effect on the next mount, never by re-rendering.

use std::rc::Rc;

use inlay_dom::{DomError, NodeId};

use crate::config::{EmbedConfig, RenderMode};
use crate::error::EmbedError;
use crate::page::PageHandle;
use crate::platform::Platform;
use crate::render::{RenderOptions, Renderer};

/// The container markup is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// The host element itself (direct mode).
    Host(NodeId),
    /// A `<div>` placed after the outer host of an enclosing isolation
    /// root (direct mode inside someone else's shadow tree).
    Auxiliary(NodeId),
    /// The isolation root attached to the host (isolated mode).
    Isolated(NodeId),
}

impl RenderTarget {
    /// The container node.
    #[must_use]
    pub const fn node(self) -> NodeId {
        match self {
            Self::Host(id) | Self::Auxiliary(id) | Self::Isolated(id) => id,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum MountState {
    #[default]
    Unmounted,
    Mounted {
        host: NodeId,
        target: RenderTarget,
    },
}

/// One embedded-HTML instance.
#[derive(Debug)]
pub struct EmbeddedHtml {
    config: EmbedConfig,
    renderer: Renderer,
    state: MountState,
    /// Isolation roots cannot be detached from their host, so the one this
    /// instance attached is reused when it is mounted there again.
    isolation_root: Option<(NodeId, NodeId)>,
}

impl EmbeddedHtml {
    /// An unmounted instance rendering `config` into `page`.
    #[must_use]
    pub fn new(config: EmbedConfig, page: PageHandle, platform: Rc<dyn Platform>) -> Self {
        let renderer = Renderer::new(page, platform, RenderOptions::from(&config));
        Self {
            config,
            renderer,
            state: MountState::Unmounted,
            isolation_root: None,
        }
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Replace the configuration. The mounted content is left as it is.
    pub fn set_config(&mut self, config: EmbedConfig) {
        self.renderer.set_options(RenderOptions::from(&config));
        self.config = config;
    }

    /// The renderer, for access to the page and platform.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Whether [`on_attach`](Self::on_attach) produced a render target that
    /// has not been detached since.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        matches!(self.state, MountState::Mounted { .. })
    }

    /// The active render target.
    #[must_use]
    pub const fn target(&self) -> Option<RenderTarget> {
        match self.state {
            MountState::Mounted { target, .. } => Some(target),
            MountState::Unmounted => None,
        }
    }

    /// The host element this instance is mounted on.
    #[must_use]
    pub const fn host(&self) -> Option<NodeId> {
        match self.state {
            MountState::Mounted { host, .. } => Some(host),
            MountState::Unmounted => None,
        }
    }

    /// Mount on `host` and render the configured markup once.
    ///
    /// Failures are logged, never returned: a host missing from the page
    /// or refusing an isolation root leaves the instance unmounted, and a
    /// failed render leaves the target empty. Attaching an already mounted
    /// instance does nothing.
    ///
    /// Must be polled inside a `tokio::task::LocalSet`.
    pub async fn on_attach(&mut self, host: NodeId) {
        if self.is_mounted() {
            tracing::debug!(%host, "Already mounted; ignoring attach");
            return;
        }

        let target = match self.attach_target(host) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(%host, error = %e, "Failed to attach render target");
                return;
            }
        };
        self.state = MountState::Mounted { host, target };

        if let Err(e) = self
            .renderer
            .render(target.node(), &self.config.markup, self.config.mode)
            .await
        {
            tracing::error!(%host, mode = %self.config.mode, error = %e, "Failed to render markup");
        }
    }

    /// Unmount: clear the target and drop the auxiliary container, if one
    /// was created. Cleanup failures are logged at debug level.
    pub fn on_detach(&mut self) {
        let MountState::Mounted { host, target } = std::mem::take(&mut self.state) else {
            return;
        };

        if let Err(e) = self.renderer.clear(target.node()) {
            tracing::debug!(%host, error = %e, "Failed to clear render target");
        }
        if let RenderTarget::Auxiliary(aux) = target
            && let Err(e) = self.renderer.page().borrow_mut().dom_mut().detach(aux)
        {
            tracing::debug!(%host, error = %e, "Failed to remove auxiliary container");
        }
    }

    /// Clear the active target. Does nothing when unmounted.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if the target was removed from
    /// the page behind this instance's back.
    pub fn clear(&self) -> Result<(), DomError> {
        match self.state {
            MountState::Mounted { target, .. } => self.renderer.clear(target.node()),
            MountState::Unmounted => Ok(()),
        }
    }

    fn attach_target(&mut self, host: NodeId) -> Result<RenderTarget, EmbedError> {
        let page = Rc::clone(self.renderer.page());
        let platform = Rc::clone(self.renderer.platform());
        let mut page = page.borrow_mut();
        let dom = page.dom_mut();

        if !dom.is_connected(host) || dom.as_element(host).is_none() {
            return Err(EmbedError::MissingTarget(host));
        }

        match self.config.mode {
            RenderMode::Isolated => {
                let root = match self.isolation_root {
                    Some((owner, root)) if owner == host => root,
                    _ => {
                        let root = platform
                            .attach_isolation_root(dom, host)
                            .map_err(|source| EmbedError::IsolationUnavailable { host, source })?;
                        self.isolation_root = Some((host, root));
                        root
                    }
                };
                Ok(RenderTarget::Isolated(root))
            }
            RenderMode::Direct => {
                if !platform.is_inside_foreign_isolation_boundary(dom, host) {
                    return Ok(RenderTarget::Host(host));
                }
                let Some(outer) = platform.enclosing_isolation_host(dom, host) else {
                    tracing::debug!(%host, "Isolation boundary has no host; rendering in place");
                    return Ok(RenderTarget::Host(host));
                };
                let parent = dom.parent(outer).ok_or(EmbedError::MissingTarget(outer))?;
                let aux = dom.create_element("div");
                match dom.next_sibling(outer) {
                    Some(next) => dom.insert_before(parent, aux, next)?,
                    None => dom.append_child(parent, aux)?,
                }
                tracing::debug!(%host, %outer, "Host is inside an isolation root; rendering after its host");
                Ok(RenderTarget::Auxiliary(aux))
            }
        }
    }
}
