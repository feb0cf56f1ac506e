//! Embedding arbitrary HTML into a live page.
//!
//! # Scope
//!
//! This crate provides:
//! - **Direct rendering** - markup inserted into the page, with its scripts
//!   executed in the order a parser would have run them
//!   ([`scripts`], [`render_direct`])
//! - **Isolated rendering** - markup inserted into an isolation root with
//!   scripts left inert and `@font-face` rules hoisted to the page head
//!   ([`fonts`], [`render_isolated`])
//! - **Lifecycle** - mount/unmount of one instance ([`EmbeddedHtml`])
//! - **Platform adapter** - parsing, isolation roots and script fetching
//!   ([`Platform`], [`DefaultPlatform`])
//!
//! # Threading
//!
//! A [`Page`] owns a JavaScript runtime and is `!Send`. Everything here
//! runs on one thread: drive renders inside a `tokio::task::LocalSet` on a
//! current-thread runtime.
//!
//! # Not Yet Implemented
//!
//! - Load/error events on script elements
//! - `document.currentScript`

pub mod config;
pub mod direct;
pub mod error;
pub mod fonts;
pub mod isolated;
pub mod lifecycle;
pub mod markers;
pub mod page;
pub mod platform;
pub mod render;
pub mod scripts;

pub use inlay_dom as dom;
pub use inlay_html as html;
pub use inlay_js as js;

pub use config::{EmbedConfig, RenderMode};
pub use direct::render_direct;
pub use error::{ConfigError, EmbedError};
pub use fonts::{DEFAULT_FONT_BLOCK_ID, extract_font_faces, remove_font_face_block};
pub use isolated::render_isolated;
pub use lifecycle::{EmbeddedHtml, RenderTarget};
pub use page::{Page, PageHandle, ScriptKind, ScriptStart};
pub use platform::{DefaultPlatform, LocalBoxFuture, Platform};
pub use render::{RenderOptions, RenderOutcome, Renderer, clear, render};
