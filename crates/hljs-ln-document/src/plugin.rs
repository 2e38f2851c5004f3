//! Document-facing entry points.

use crate::document::{BlockHandle, HtmlDocument};
use crate::error::DocumentError;
use crate::scheduler::{DeferredQueue, Scheduler};
use hljs_ln::{
    LineNumbersConfig, LineSplitter, MarkupError, RenderOptions, START_FROM_ATTR_NAME,
    StyleInjector, render_block_with,
};

/// Line numbering for the code blocks of a document.
#[derive(Debug, Clone, Default)]
pub struct LineNumbers {
    config: LineNumbersConfig,
    splitter: LineSplitter,
}

impl LineNumbers {
    /// Create a plugin instance using `config` for every block.
    pub fn new(config: LineNumbersConfig) -> Self {
        Self {
            config,
            splitter: LineSplitter::default(),
        }
    }

    /// Use a custom splitter.
    pub fn with_splitter(mut self, splitter: LineSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// The configuration applied to every block.
    pub fn config(&self) -> &LineNumbersConfig {
        &self.config
    }

    /// Schedule a render for every candidate block of `document` that has not opted out.
    ///
    /// Errors while walking the document are logged and end the pass; blocks scheduled before
    /// the failure still render.
    pub fn document_ready(&self, document: &mut HtmlDocument, scheduler: &mut impl Scheduler) {
        if let Err(err) = self.schedule_blocks(document, scheduler) {
            tracing::error!(error = %err, "LineNumbers error");
        }
    }

    fn schedule_blocks(
        &self,
        document: &mut HtmlDocument,
        scheduler: &mut impl Scheduler,
    ) -> Result<(), DocumentError> {
        let mut scheduled = 0usize;
        for block in document.code_blocks()? {
            if block.try_borrow().is_ok_and(|b| b.is_disabled()) {
                continue;
            }
            self.line_numbers_block(&block, scheduler);
            scheduled += 1;
        }
        tracing::debug!(scheduled, "scheduled code blocks");
        Ok(())
    }

    /// Defer the rendering of one block.
    ///
    /// The task computes the complete table first and replaces the block contents in one
    /// assignment.
    pub fn line_numbers_block(&self, block: &BlockHandle, scheduler: &mut impl Scheduler) {
        let block = BlockHandle::clone(block);
        let config = self.config.clone();
        let splitter = self.splitter.clone();
        scheduler.defer(Box::new(move || render_into(&block, &splitter, &config)));
    }

    /// Render a markup string that has no owning block.
    pub fn line_numbers_value(&self, html: &str) -> Result<String, MarkupError> {
        render_block_with(&self.splitter, html, &RenderOptions::resolve(None, &self.config))
    }

    /// Inject the global style rules into `document` unless `injector` already did.
    ///
    /// Returns `true` if the rules were injected by this call.
    pub fn add_styles(&self, document: &mut HtmlDocument, injector: &StyleInjector) -> bool {
        injector.ensure_injected(|css| document.inject_style(css))
    }

    /// Number every block of `document` and wait for the renders to finish.
    ///
    /// Returns the failures of individual block renders.
    pub fn render_document(&self, document: &mut HtmlDocument) -> Vec<DocumentError> {
        let mut queue = DeferredQueue::new();
        self.document_ready(document, &mut queue);
        queue.run_until_idle()
    }
}

fn render_into(
    block: &BlockHandle,
    splitter: &LineSplitter,
    config: &LineNumbersConfig,
) -> Result<(), DocumentError> {
    let html = {
        let current = block.try_borrow().map_err(|_| DocumentError::BlockBusy)?;
        let index = current.index();
        let options = RenderOptions::resolve(current.attribute(START_FROM_ATTR_NAME), config);
        render_block_with(splitter, current.inner_html(), &options)
            .map_err(|source| DocumentError::Render { index, source })?
    };

    block
        .try_borrow_mut()
        .map_err(|_| DocumentError::BlockBusy)?
        .set_inner_html(html);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_is_deferred() {
        let mut doc = HtmlDocument::new("<pre><code class=\"hljs\">a\nb</code></pre>");
        let mut queue = DeferredQueue::new();
        LineNumbers::default().document_ready(&mut doc, &mut queue);

        assert_eq!(queue.len(), 1);
        assert_eq!(doc.to_html(), "<pre><code class=\"hljs\">a\nb</code></pre>");

        assert!(queue.run_until_idle().is_empty());
        assert!(doc.to_html().contains("<table class=\"hljs-ln\">"));
    }

    #[test]
    fn test_opted_out_block_is_skipped() {
        let mut doc = HtmlDocument::new("<code class=\"hljs nohljsln\">a\nb</code>");
        let mut queue = DeferredQueue::new();
        LineNumbers::default().document_ready(&mut doc, &mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_block_attribute_overrides_config() {
        let plugin = LineNumbers::new(LineNumbersConfig::default().with_start_from(10.0));
        let mut doc = HtmlDocument::new(
            "<code class=\"hljs\" data-ln-start-from=\"3\">a\nb</code><code class=\"hljs\">c\nd</code>",
        );
        assert!(plugin.render_document(&mut doc).is_empty());

        let html = doc.to_html();
        assert!(html.contains("data-line-number=\"3\""));
        assert!(html.contains("data-line-number=\"4\""));
        assert!(html.contains("data-line-number=\"10\""));
        assert!(html.contains("data-line-number=\"11\""));
    }

    #[test]
    fn test_huge_block_attribute_falls_back() {
        let plugin = LineNumbers::new(LineNumbersConfig::default().with_start_from(10.0));
        let mut doc = HtmlDocument::new(
            "<code class=\"hljs\" data-ln-start-from=\"9223372036854775807\">a\nb</code>",
        );
        assert!(plugin.render_document(&mut doc).is_empty());

        let html = doc.to_html();
        assert!(html.contains("data-line-number=\"10\">a</td>"));
        assert!(html.contains("data-line-number=\"11\">b</td>"));
    }

    #[test]
    fn test_walk_failure_is_contained() {
        let mut doc = HtmlDocument::new("<code class=\"hljs\">a\nb");
        let mut queue = DeferredQueue::new();
        LineNumbers::default().document_ready(&mut doc, &mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_render_failure_is_reported_by_the_task() {
        let mut doc = HtmlDocument::new("<code class=\"hljs\"><span>a\nb</div></code>");
        let failures = LineNumbers::default().render_document(&mut doc);
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], DocumentError::Render { index: 0, .. }));
        // Left untouched.
        assert_eq!(doc.to_html(), "<code class=\"hljs\"><span>a\nb</div></code>");
    }

    #[test]
    fn test_styles_injected_once() {
        let plugin = LineNumbers::default();
        let injector = StyleInjector::new();
        let mut doc = HtmlDocument::new("<head></head>");
        assert!(plugin.add_styles(&mut doc, &injector));
        assert!(!plugin.add_styles(&mut doc, &injector));
        assert_eq!(doc.to_html().matches("<style").count(), 1);
    }

    #[test]
    fn test_line_numbers_value() {
        let plugin = LineNumbers::new(LineNumbersConfig::default().with_single_line(true));
        let html = plugin.line_numbers_value("x").unwrap();
        assert!(html.contains("data-line-number=\"1\""));
    }
}
