use hljs_ln::{LineNumbersConfig, StyleInjector};
use hljs_ln_document::{
    DeferredQueue, DocumentError, HtmlDocument, LineNumbers, RenderTask, Scheduler,
};
use pretty_assertions::assert_eq;

const PAGE: &str = "<html><head><title>demo</title></head><body>\
<p>Call <code>main</code> first.</p>\
<pre><code class=\"hljs rust\"><span class=\"hljs-keyword\">fn</span> main() {\n    \
<span class=\"hljs-comment\">/* one\n       two */</span>\n}</code></pre>\
<pre><code class=\"hljs nohljsln\">skip\nme</code></pre>\
<pre><code class=\"nohighlight\" data-ln-start-from=\"7\">plain\ntext</code></pre>\
<pre><code class=\"hljs\">single</code></pre>\
</body></html>";

/// Runs tasks newest first.
#[derive(Default)]
struct Lifo {
    tasks: Vec<RenderTask>,
}

impl Scheduler for Lifo {
    fn defer(&mut self, task: RenderTask) {
        self.tasks.push(task);
    }
}

impl Lifo {
    fn run(&mut self) -> Vec<DocumentError> {
        let mut failures = Vec::new();
        while let Some(task) = self.tasks.pop() {
            if let Err(err) = task() {
                failures.push(err);
            }
        }
        failures
    }
}

fn render_with_queue(config: LineNumbersConfig) -> String {
    let mut doc = HtmlDocument::new(PAGE);
    let plugin = LineNumbers::new(config);
    let mut queue = DeferredQueue::new();
    plugin.document_ready(&mut doc, &mut queue);
    assert_eq!(queue.len(), 3);
    assert!(queue.run_until_idle().is_empty());
    doc.to_html()
}

#[test]
fn test_full_page() {
    let html = render_with_queue(LineNumbersConfig::default());

    assert!(html.contains("<p>Call <code>main</code> first.</p>"));
    assert!(html.contains("<code class=\"hljs nohljsln\">skip\nme</code>"));
    assert!(html.contains("<code class=\"hljs\">single</code>"));

    // The comment spanning two lines is cloned onto both rows.
    assert!(html.contains(
        "<tr><td class=\"hljs-ln-line hljs-ln-numbers\" data-line-number=\"2\">\
<div class=\"hljs-ln-n\" data-line-number=\"2\"></div></td>\
<td class=\"hljs-ln-line hljs-ln-code\" data-line-number=\"2\">    \
<span class=\"hljs-comment\">/* one</span></td></tr>"
    ));
    assert!(html.contains(
        "data-line-number=\"3\"><span class=\"hljs-comment\">       two */</span></td>"
    ));

    // Per-block start.
    assert!(html.contains("data-line-number=\"7\">plain</td>"));
    assert!(html.contains("data-line-number=\"8\">text</td>"));
}

#[test]
fn test_single_line_forced() {
    let html = render_with_queue(LineNumbersConfig::default().with_single_line(true));
    assert!(!html.contains("<code class=\"hljs\">single</code>"));
    assert!(html.contains("data-line-number=\"1\">single</td>"));
}

#[test]
fn test_task_order_does_not_matter() {
    let plugin = LineNumbers::default();

    let mut fifo_doc = HtmlDocument::new(PAGE);
    assert!(plugin.render_document(&mut fifo_doc).is_empty());

    let mut lifo_doc = HtmlDocument::new(PAGE);
    let mut lifo = Lifo::default();
    plugin.document_ready(&mut lifo_doc, &mut lifo);
    assert!(lifo.run().is_empty());

    assert_eq!(lifo_doc.to_html(), fifo_doc.to_html());
}

#[test]
fn test_styles_and_blocks_together() {
    let mut doc = HtmlDocument::new(PAGE);
    let plugin = LineNumbers::default();
    let injector = StyleInjector::new();
    assert!(plugin.add_styles(&mut doc, &injector));
    assert!(plugin.render_document(&mut doc).is_empty());

    let html = doc.to_html();
    assert!(html.contains(
        "<title>demo</title><style type=\"text/css\">.hljs-ln{border-collapse:collapse}"
    ));
    assert_eq!(html.matches("<table class=\"hljs-ln\">").count(), 2);
}
