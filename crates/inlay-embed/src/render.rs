//! Mode dispatch and the shared clear primitive.

use std::rc::Rc;

use inlay_dom::{DomError, NodeId};

use crate::config::{EmbedConfig, RenderMode};
use crate::direct::render_direct;
use crate::error::EmbedError;
use crate::fonts::DEFAULT_FONT_BLOCK_ID;
use crate::isolated::render_isolated;
use crate::page::PageHandle;
use crate::platform::Platform;
use crate::scripts::{BackgroundScripts, SchedulerOptions, ScriptScheduler};

/// Settings shared by every render of one renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Id of the page-level font-face `<style>` block.
    pub font_block_id: String,
    /// Script classification settings.
    pub scheduler: SchedulerOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_block_id: DEFAULT_FONT_BLOCK_ID.to_string(),
            scheduler: SchedulerOptions::default(),
        }
    }
}

impl From<&EmbedConfig> for RenderOptions {
    fn from(config: &EmbedConfig) -> Self {
        Self {
            font_block_id: config.font_block_id.clone(),
            scheduler: config.scheduler_options(),
        }
    }
}

/// What a render did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Scripts found in the markup. Always zero in isolated mode, where
    /// scripts are inserted inert.
    pub scripts_found: usize,
    /// `@font-face` rules newly added to the page head.
    pub font_faces_hoisted: usize,
}

/// Renders markup into containers of one page.
pub struct Renderer {
    page: PageHandle,
    platform: Rc<dyn Platform>,
    options: RenderOptions,
    background: Rc<BackgroundScripts>,
}

impl Renderer {
    /// A renderer for `page`.
    #[must_use]
    pub fn new(page: PageHandle, platform: Rc<dyn Platform>, options: RenderOptions) -> Self {
        Self {
            page,
            platform,
            options,
            background: Rc::new(BackgroundScripts::new()),
        }
    }

    /// The page rendered into.
    #[must_use]
    pub const fn page(&self) -> &PageHandle {
        &self.page
    }

    /// The platform adapter.
    #[must_use]
    pub const fn platform(&self) -> &Rc<dyn Platform> {
        &self.platform
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Options for subsequent renders.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// `async` script loads started by this renderer and not yet reaped.
    #[must_use]
    pub fn background_scripts(&self) -> usize {
        self.background.pending()
    }

    /// Replace the content of `target` with `markup`.
    ///
    /// In isolated mode `target` is an isolation root and the future
    /// completes without suspending. In direct mode it resolves once the
    /// sequential and deferred scripts have run; `async` scripts may still
    /// be loading.
    ///
    /// Must be polled inside a `tokio::task::LocalSet`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::MissingTarget`] if `target` is not connected to
    /// the page, and [`EmbedError::Dom`] if the page rejects the content.
    pub async fn render(
        &self,
        target: NodeId,
        markup: &str,
        mode: RenderMode,
    ) -> Result<RenderOutcome, EmbedError> {
        if !self.page.borrow().dom().is_connected(target) {
            return Err(EmbedError::MissingTarget(target));
        }

        let outcome = match mode {
            RenderMode::Isolated => RenderOutcome {
                scripts_found: 0,
                font_faces_hoisted: render_isolated(
                    &self.page,
                    self.platform.as_ref(),
                    target,
                    markup,
                    &self.options.font_block_id,
                )?,
            },
            RenderMode::Direct => {
                let scheduler = ScriptScheduler::new(
                    Rc::clone(&self.page),
                    Rc::clone(&self.platform),
                    self.options.scheduler,
                    Rc::clone(&self.background),
                );
                let scripts_found =
                    render_direct(&self.page, self.platform.as_ref(), &scheduler, target, markup)
                        .await?;
                RenderOutcome {
                    scripts_found,
                    font_faces_hoisted: 0,
                }
            }
        };

        tracing::debug!(
            %mode,
            %target,
            scripts = outcome.scripts_found,
            font_faces = outcome.font_faces_hoisted,
            "Rendered markup"
        );
        Ok(outcome)
    }

    /// Remove every child of `target`. See [`clear`].
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `target` is not in the page.
    pub fn clear(&self, target: NodeId) -> Result<(), DomError> {
        clear(&self.page, target)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

/// One-shot [`Renderer::render`]. `async` loads it starts keep running on
/// the `LocalSet` after it returns.
///
/// # Errors
///
/// See [`Renderer::render`].
pub async fn render(
    page: &PageHandle,
    platform: Rc<dyn Platform>,
    target: NodeId,
    markup: &str,
    mode: RenderMode,
    options: RenderOptions,
) -> Result<RenderOutcome, EmbedError> {
    Renderer::new(Rc::clone(page), platform, options)
        .render(target, markup, mode)
        .await
}

/// Remove the children of `target` one at a time. Clearing an empty
/// container does nothing.
///
/// # Errors
///
/// Returns [`DomError::NodeNotFound`] if `target` is not in the page.
pub fn clear(page: &PageHandle, target: NodeId) -> Result<(), DomError> {
    page.borrow_mut().dom_mut().clear_children(target)
}
