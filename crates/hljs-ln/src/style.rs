//! Global style rules for rendered tables.
//!
//! The rules are the same for every block, so they only need to be present once per document.

use std::sync::atomic::{AtomicBool, Ordering};

/// Collapsed borders and zero cell padding on generated tables, and the gutter number projected
/// from each cell's `data-line-number` attribute.
pub const GLOBAL_STYLE_RULES: &str = ".hljs-ln{border-collapse:collapse}\
.hljs-ln td{padding:0}\
.hljs-ln-n:before{content:attr(data-line-number)}";

/// `css` wrapped in a `<style>` element, as injected into documents.
pub fn style_element(css: &str) -> String {
    format!("<style type=\"text/css\">{css}</style>")
}

/// Makes sure the global style rules are injected exactly once.
#[derive(Debug, Default)]
pub struct StyleInjector {
    injected: AtomicBool,
}

static GLOBAL_INJECTOR: StyleInjector = StyleInjector::new();

impl StyleInjector {
    /// Create an injector that has not injected anything yet.
    pub const fn new() -> Self {
        Self {
            injected: AtomicBool::new(false),
        }
    }

    /// The process-wide injector.
    pub fn global() -> &'static StyleInjector {
        &GLOBAL_INJECTOR
    }

    /// Returns `true` once the rules have been injected.
    pub fn is_injected(&self) -> bool {
        self.injected.load(Ordering::Acquire)
    }

    /// Call `inject` with the style rules unless that already happened.
    ///
    /// Returns `true` if `inject` was called.
    pub fn ensure_injected<F>(&self, inject: F) -> bool
    where
        F: FnOnce(&str),
    {
        if self.injected.swap(true, Ordering::AcqRel) {
            return false;
        }
        inject(GLOBAL_STYLE_RULES);
        true
    }
}
