//! Shared fixtures: a scripted platform and page helpers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use inlay_common::FetchError;
use inlay_dom::{DomTree, NodeId};
use inlay_embed::{LocalBoxFuture, Page, PageHandle, Platform};
use tokio::task::LocalSet;

/// How the fake network answers one URL.
#[derive(Debug, Clone)]
pub enum Stub {
    /// Answer immediately.
    Source(String),
    /// Answer after yielding to the scheduler `n` times.
    Slow(usize, String),
    /// Never answer.
    Hang,
    /// Fail the load.
    Fail,
}

/// Parses like the default platform; fetches from a fixed table.
#[derive(Debug, Default)]
pub struct TestPlatform {
    scripts: HashMap<String, Stub>,
    fetched: RefCell<Vec<String>>,
    transparent_isolation: bool,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, stub: Stub) -> Self {
        let _ = self.scripts.insert(url.to_string(), stub);
        self
    }

    pub fn with_source(self, url: &str, code: &str) -> Self {
        self.with(url, Stub::Source(code.to_string()))
    }

    /// Report no node as being inside a foreign isolation root.
    pub fn with_transparent_isolation(mut self) -> Self {
        self.transparent_isolation = true;
        self
    }

    /// Every URL requested so far, in request order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }

    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }
}

impl Platform for TestPlatform {
    fn is_inside_foreign_isolation_boundary(&self, dom: &DomTree, node: NodeId) -> bool {
        !self.transparent_isolation && self.enclosing_isolation_host(dom, node).is_some()
    }

    fn fetch_script<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        self.fetched.borrow_mut().push(url.to_string());
        let stub = self.scripts.get(url).cloned();
        Box::pin(async move {
            match stub {
                Some(Stub::Source(code)) => Ok(code),
                Some(Stub::Slow(yields, code)) => {
                    for _ in 0..yields {
                        tokio::task::yield_now().await;
                    }
                    Ok(code)
                }
                Some(Stub::Hang) => std::future::pending().await,
                Some(Stub::Fail) | None => Err(FetchError::Unavailable(url.to_string())),
            }
        })
    }
}

/// JS that appends `label` to the page-global `order` array.
pub fn push(label: &str) -> String {
    format!("(window.order = window.order || []).push('{label}');")
}

/// `<script>` pushing `label`, with extra attributes.
pub fn inline_script(attrs: &str, label: &str) -> String {
    format!("<script {attrs}>{}</script>", push(label))
}

/// The `order` array joined with commas ("" when nothing ran).
pub fn order(page: &PageHandle) -> String {
    page.borrow_mut()
        .eval_to_string("(window.order || []).join(',')")
        .unwrap()
}

/// A blank page with a connected `<div id="host">` in its body.
pub fn page_with_host() -> (PageHandle, NodeId) {
    let page = Page::from_html(
        "<!DOCTYPE html><html><head></head><body><div id=\"host\"></div></body></html>",
        Some("https://example.com/"),
    )
    .into_handle();
    let host = page.borrow().dom().get_element_by_id("host").unwrap();
    (page, host)
}

/// Run `future` inside a fresh `LocalSet`.
pub async fn run_local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

/// Yield to the local scheduler `n` times.
pub async fn settle(n: usize) {
    for _ in 0..n {
        tokio::task::yield_now().await;
    }
}
