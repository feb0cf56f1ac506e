//! Inlay CLI
//!
//! Mounts an HTML document or fragment into a blank host page, the way an
//! embedding component would, and prints the resulting page.

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use inlay_dom::{NodeId, outer_html};
use inlay_embed::{DefaultPlatform, EmbedConfig, EmbeddedHtml, Page, RenderMode, RenderTarget};
use owo_colors::OwoColorize;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

/// Id of the element the content is mounted on.
const HOST_ID: &str = "inlay-host";

/// Inlay - render HTML into a live page, directly or isolated
#[derive(Parser, Debug)]
#[command(name = "inlay")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render a file; its scripts run in parser order
    inlay page.html

    # Render inline markup into an isolation root
    inlay --mode isolated --html '<style>@font-face { font-family: X; }</style><p>hi</p>'

    # Inspect globals the scripts left behind
    inlay --html '<script>window.answer = 42;</script>' --eval answer

    # Load every setting from a JSON file
    inlay --config embed.json
"#)]
struct Cli {
    /// Path to the HTML to mount
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Mount this HTML string instead of a file
    #[arg(long, value_name = "MARKUP")]
    html: Option<String>,

    /// Rendering mode (direct or isolated)
    #[arg(long, value_name = "MODE")]
    mode: Option<RenderMode>,

    /// JSON configuration (`markup`, `mode`, `font_block_id`,
    /// `modules_defer_by_default`); flags override its fields
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL relative script sources resolve against
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Id of the page-level font-face style block
    #[arg(long, value_name = "ID")]
    font_block_id: Option<String>,

    /// Evaluate a JavaScript expression in the page after mounting
    /// (repeatable)
    #[arg(long, value_name = "EXPR")]
    eval: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    LocalSet::new().block_on(&runtime, mount_and_print(cli, config))
}

/// Merge the JSON configuration, the content source and the flags.
fn load_config(cli: &Cli) -> Result<EmbedConfig> {
    let markup = match (&cli.html, &cli.path) {
        (Some(html), _) => Some(html.clone()),
        (None, Some(path)) => Some(
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let mut config = match (&cli.config, markup) {
        (Some(path), markup) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let mut config = EmbedConfig::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?;
            if let Some(markup) = markup {
                config.markup = markup;
            }
            config
        }
        (None, Some(markup)) => EmbedConfig::new(markup),
        (None, None) => bail!("nothing to render: pass a FILE, --html or --config"),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(id) = &cli.font_block_id {
        config.font_block_id.clone_from(id);
    }
    Ok(config)
}

async fn mount_and_print(cli: Cli, config: EmbedConfig) -> Result<()> {
    let host_page = format!(
        "<!DOCTYPE html><html><head></head><body><div id=\"{HOST_ID}\"></div></body></html>"
    );
    let page = Page::from_html(&host_page, cli.base_url.as_deref()).into_handle();
    let host = page
        .borrow()
        .dom()
        .get_element_by_id(HOST_ID)
        .context("host page has no mount point")?;

    let font_block_id = config.font_block_id.clone();
    let mode = config.mode;
    let mut embedded = EmbeddedHtml::new(config, Rc::clone(&page), Rc::new(DefaultPlatform));
    tracing::debug!(%host, %mode, "Mounting content");
    embedded.on_attach(host).await;

    let Some(target) = embedded.target() else {
        bail!("failed to mount the content (see the log above)");
    };

    heading(&format!("Page ({mode})"));
    println!("{}", outer_html(page.borrow().dom(), NodeId::ROOT));

    heading("Render target");
    println!("{}", describe(target));

    heading("Font faces");
    let page_ref = page.borrow();
    let dom = page_ref.dom();
    match dom.get_element_by_id(&font_block_id) {
        Some(block) => println!("{}", dom.text_content(block).trim()),
        None => println!("{}", "(none hoisted)".dimmed()),
    }
    drop(page_ref);

    if !cli.eval.is_empty() {
        heading("Evaluated");
        let mut page = page.borrow_mut();
        for expr in &cli.eval {
            match page.eval_to_string(expr) {
                Ok(value) => println!("{} => {value}", expr.green()),
                Err(e) => println!("{} => {}", expr.green(), e.to_string().red()),
            }
        }
    }

    Ok(())
}

fn heading(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

fn describe(target: RenderTarget) -> String {
    match target {
        RenderTarget::Host(id) => format!("host element {id}"),
        RenderTarget::Auxiliary(id) => format!("auxiliary container {id}"),
        RenderTarget::Isolated(id) => format!("isolation root {id}"),
    }
}
