//! Isolated rendering: inert scripts, stylesheet isolation and font-face
//! hoisting.

mod common;

use std::rc::Rc;

use common::{TestPlatform, page_with_host, run_local};
use inlay_dom::inner_html;
use inlay_embed::{
    DEFAULT_FONT_BLOCK_ID, Platform, RenderMode, RenderOptions, Renderer, remove_font_face_block,
};
use pretty_assertions::assert_eq;

const FONTS: &str = "<style>\
    @font-face { font-family: A; src: url(a.woff2); }\
    h1 { color: red }\
    @font-face { font-family: B; src: url(b.woff2); }\
    </style>";

fn isolated_renderer(page: &inlay_embed::PageHandle) -> (Renderer, Rc<dyn Platform>) {
    let platform: Rc<dyn Platform> = TestPlatform::new().shared();
    let renderer = Renderer::new(Rc::clone(page), Rc::clone(&platform), RenderOptions::default());
    (renderer, platform)
}

#[tokio::test]
async fn scripts_never_run_in_isolated_mode() {
    run_local(async {
        let (page, host) = page_with_host();
        let (renderer, platform) = isolated_renderer(&page);
        let root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), host)
            .unwrap();

        let outcome = renderer
            .render(root, "<p>hi</p><script>window.ran = true;</script>", RenderMode::Isolated)
            .await
            .unwrap();

        assert_eq!(outcome.scripts_found, 0);
        assert_eq!(
            page.borrow_mut().eval_to_string("typeof window.ran").unwrap(),
            "undefined"
        );
        // The script element is still there, inert.
        let page = page.borrow();
        assert_eq!(page.dom().elements_by_tag_name(root, "script").len(), 1);
    })
    .await;
}

#[tokio::test]
async fn content_gets_a_full_document_structure() {
    run_local(async {
        let (page, host) = page_with_host();
        let (renderer, platform) = isolated_renderer(&page);
        let root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), host)
            .unwrap();

        let _ = renderer
            .render(root, "<p>unclosed", RenderMode::Isolated)
            .await
            .unwrap();

        let page = page.borrow();
        assert_eq!(
            inner_html(page.dom(), root),
            "<html><head></head><body><p>unclosed</p></body></html>"
        );
        // The host's light tree is untouched.
        assert_eq!(inner_html(page.dom(), host), "");
    })
    .await;
}

#[tokio::test]
async fn font_faces_are_hoisted_once() {
    run_local(async {
        let (page, host) = page_with_host();
        let (renderer, platform) = isolated_renderer(&page);
        let root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), host)
            .unwrap();

        let first = renderer.render(root, FONTS, RenderMode::Isolated).await.unwrap();
        let second = renderer.render(root, FONTS, RenderMode::Isolated).await.unwrap();
        assert_eq!(first.font_faces_hoisted, 2);
        assert_eq!(second.font_faces_hoisted, 0);

        let page = page.borrow();
        let dom = page.dom();
        let block = dom.get_element_by_id(DEFAULT_FONT_BLOCK_ID).unwrap();
        assert_eq!(dom.parent(block), dom.head());
        assert_eq!(
            dom.text_content(block),
            "\n@font-face { font-family: A; src: url(a.woff2); }\
             \n@font-face { font-family: B; src: url(b.woff2); }"
        );
        // The original stylesheet stays inside the isolation root.
        assert_eq!(dom.elements_by_tag_name(root, "style").len(), 1);
    })
    .await;
}

#[tokio::test]
async fn no_font_faces_means_no_block() {
    run_local(async {
        let (page, host) = page_with_host();
        let (renderer, platform) = isolated_renderer(&page);
        let root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), host)
            .unwrap();

        let outcome = renderer
            .render(root, "<style>p { margin: 0 }</style><p>x</p>", RenderMode::Isolated)
            .await
            .unwrap();

        assert_eq!(outcome.font_faces_hoisted, 0);
        assert!(page.borrow().dom().get_element_by_id(DEFAULT_FONT_BLOCK_ID).is_none());
    })
    .await;
}

#[tokio::test]
async fn block_is_shared_between_roots_and_removable() {
    run_local(async {
        let (page, host) = page_with_host();
        let (renderer, platform) = isolated_renderer(&page);
        let other_host = {
            let mut page = page.borrow_mut();
            let dom = page.dom_mut();
            let body = dom.body().unwrap();
            let other = dom.create_element("section");
            dom.append_child(body, other).unwrap();
            other
        };
        let first_root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), host)
            .unwrap();
        let second_root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), other_host)
            .unwrap();

        let a = "<style>@font-face { font-family: A; }</style>";
        let ab = "<style>@font-face { font-family: A; } @font-face { font-family: B; }</style>";
        let first = renderer.render(first_root, a, RenderMode::Isolated).await.unwrap();
        let second = renderer.render(second_root, ab, RenderMode::Isolated).await.unwrap();
        assert_eq!(first.font_faces_hoisted, 1);
        assert_eq!(second.font_faces_hoisted, 1);

        let mut page = page.borrow_mut();
        let dom = page.dom_mut();
        assert_eq!(dom.elements_by_tag_name(dom.head().unwrap(), "style").len(), 1);
        assert!(remove_font_face_block(dom, DEFAULT_FONT_BLOCK_ID));
        assert!(!remove_font_face_block(dom, DEFAULT_FONT_BLOCK_ID));
    })
    .await;
}

#[tokio::test]
async fn custom_block_id_is_used() {
    run_local(async {
        let (page, host) = page_with_host();
        let platform: Rc<dyn Platform> = TestPlatform::new().shared();
        let options = RenderOptions {
            font_block_id: "my-fonts".to_string(),
            ..RenderOptions::default()
        };
        let renderer = Renderer::new(Rc::clone(&page), Rc::clone(&platform), options);
        let root = platform
            .attach_isolation_root(page.borrow_mut().dom_mut(), host)
            .unwrap();

        let _ = renderer.render(root, FONTS, RenderMode::Isolated).await.unwrap();

        let page = page.borrow();
        assert!(page.dom().get_element_by_id("my-fonts").is_some());
        assert!(page.dom().get_element_by_id(DEFAULT_FONT_BLOCK_ID).is_none());
    })
    .await;
}
