//! Mount/unmount behaviour of `EmbeddedHtml`.

mod common;

use std::rc::Rc;

use common::{TestPlatform, inline_script, order, page_with_host, run_local};
use inlay_dom::{NodeId, inner_html};
use inlay_embed::{EmbedConfig, EmbeddedHtml, Platform, RenderMode, RenderTarget};
use pretty_assertions::assert_eq;

fn embed(config: EmbedConfig, page: &inlay_embed::PageHandle) -> EmbeddedHtml {
    EmbeddedHtml::new(config, Rc::clone(page), TestPlatform::new().shared())
}

#[tokio::test]
async fn direct_mount_renders_into_host_once() {
    run_local(async {
        let (page, host) = page_with_host();
        let markup = format!("<p>x</p>{}", inline_script("", "S"));
        let mut html = embed(EmbedConfig::new(markup), &page);

        html.on_attach(host).await;
        html.on_attach(host).await;

        assert!(html.is_mounted());
        assert_eq!(html.target(), Some(RenderTarget::Host(host)));
        assert_eq!(html.host(), Some(host));
        assert_eq!(order(&page), "S");
    })
    .await;
}

#[tokio::test]
async fn detach_clears_and_clear_is_idempotent() {
    run_local(async {
        let (page, host) = page_with_host();
        let mut html = embed(EmbedConfig::new("<p>a</p><p>b</p>"), &page);

        html.on_attach(host).await;
        assert_eq!(page.borrow().dom().children(host).len(), 2);

        html.clear().unwrap();
        html.clear().unwrap();
        assert_eq!(inner_html(page.borrow().dom(), host), "");

        html.on_detach();
        assert!(!html.is_mounted());
        assert_eq!(html.target(), None);
        html.on_detach();
        html.clear().unwrap();
    })
    .await;
}

#[tokio::test]
async fn config_changes_do_not_rerender() {
    run_local(async {
        let (page, host) = page_with_host();
        let mut html = embed(EmbedConfig::new("<p>first</p>"), &page);

        html.on_attach(host).await;
        html.set_config(EmbedConfig::new("<p>second</p>"));
        assert_eq!(inner_html(page.borrow().dom(), host), "<p>first</p>");

        html.on_detach();
        html.on_attach(host).await;
        assert_eq!(inner_html(page.borrow().dom(), host), "<p>second</p>");
    })
    .await;
}

#[tokio::test]
async fn isolated_mount_attaches_and_reuses_its_root() {
    run_local(async {
        let (page, host) = page_with_host();
        let config = EmbedConfig::new("<p>inside</p>").with_mode(RenderMode::Isolated);
        let mut html = embed(config, &page);

        html.on_attach(host).await;
        let Some(RenderTarget::Isolated(root)) = html.target() else {
            panic!("expected an isolated target, got {:?}", html.target());
        };
        assert_eq!(page.borrow().dom().shadow_root(host), Some(root));
        assert_eq!(inner_html(page.borrow().dom(), host), "");

        html.on_detach();
        assert_eq!(inner_html(page.borrow().dom(), root), "");

        html.on_attach(host).await;
        assert_eq!(html.target(), Some(RenderTarget::Isolated(root)));
        assert_eq!(
            inner_html(page.borrow().dom(), root),
            "<html><head></head><body><p>inside</p></body></html>"
        );
    })
    .await;
}

#[tokio::test]
async fn second_isolation_root_on_a_host_is_refused() {
    run_local(async {
        let (page, host) = page_with_host();
        let config = EmbedConfig::new("<p>x</p>").with_mode(RenderMode::Isolated);
        let mut first = embed(config.clone(), &page);
        let mut second = embed(config, &page);

        first.on_attach(host).await;
        second.on_attach(host).await;

        assert!(first.is_mounted());
        assert!(!second.is_mounted());
    })
    .await;
}

#[tokio::test]
async fn missing_host_is_a_logged_no_op() {
    run_local(async {
        let (page, _host) = page_with_host();
        let orphan = page.borrow_mut().dom_mut().create_element("div");
        let mut html = embed(EmbedConfig::new("<p>x</p>"), &page);

        html.on_attach(orphan).await;
        html.on_attach(NodeId(usize::MAX)).await;

        assert!(!html.is_mounted());
        assert!(page.borrow().dom().children(orphan).is_empty());
    })
    .await;
}

#[tokio::test]
async fn direct_mode_inside_foreign_isolation_root_uses_auxiliary_container() {
    run_local(async {
        let (page, outer) = page_with_host();
        let platform = TestPlatform::new().shared();
        let inner = {
            let mut page = page.borrow_mut();
            let dom = page.dom_mut();
            let shadow = platform.attach_isolation_root(dom, outer).unwrap();
            let inner = dom.create_element("span");
            dom.append_child(shadow, inner).unwrap();
            inner
        };
        let markup = format!("<p>aux</p>{}", inline_script("", "S"));
        let mut html = EmbeddedHtml::new(EmbedConfig::new(markup), Rc::clone(&page), platform);

        html.on_attach(inner).await;

        let Some(RenderTarget::Auxiliary(aux)) = html.target() else {
            panic!("expected an auxiliary target, got {:?}", html.target());
        };
        {
            let page = page.borrow();
            let dom = page.dom();
            assert_eq!(dom.next_sibling(outer), Some(aux));
            assert_eq!(inner_html(dom, aux), "<p>aux</p><script>(window.order = window.order || []).push('S');</script>");
            assert!(dom.children(inner).is_empty());
        }
        assert_eq!(order(&page), "S");

        html.on_detach();
        let page = page.borrow();
        assert_eq!(page.dom().parent(aux), None);
        assert_eq!(page.dom().next_sibling(outer), None);
    })
    .await;
}

#[tokio::test]
async fn platform_decides_whether_the_host_is_isolated() {
    run_local(async {
        let (page, outer) = page_with_host();
        let platform = TestPlatform::new().with_transparent_isolation().shared();
        let inner = {
            let mut page = page.borrow_mut();
            let dom = page.dom_mut();
            let shadow = platform.attach_isolation_root(dom, outer).unwrap();
            let inner = dom.create_element("span");
            dom.append_child(shadow, inner).unwrap();
            inner
        };
        let mut html = EmbeddedHtml::new(
            EmbedConfig::new("<p>here</p>".to_string()),
            Rc::clone(&page),
            platform,
        );

        html.on_attach(inner).await;

        assert_eq!(html.target(), Some(RenderTarget::Host(inner)));
        let page = page.borrow();
        assert_eq!(inner_html(page.dom(), inner), "<p>here</p>");
        assert_eq!(page.dom().next_sibling(outer), None);
    })
    .await;
}
