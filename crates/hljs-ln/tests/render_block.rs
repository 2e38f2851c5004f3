use hljs_ln::{LineNumbersConfig, RenderOptions, line_numbers_value, render_block};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn row(n: i64, content: &str) -> String {
    format!(
        "<tr><td class=\"hljs-ln-line hljs-ln-numbers\" data-line-number=\"{n}\"><div class=\"hljs-ln-n\" data-line-number=\"{n}\"></div></td><td class=\"hljs-ln-line hljs-ln-code\" data-line-number=\"{n}\">{content}</td></tr>"
    )
}

#[test]
fn test_multiline_string_renders_two_rows() {
    let html = render_block(
        "<span class=\"hljs-string\">line1\nline2</span>",
        &RenderOptions::default(),
    )
    .unwrap();

    let expected = format!(
        "<table class=\"hljs-ln\">{}{}</table>",
        row(1, "<span class=\"hljs-string\">line1</span>"),
        row(2, "<span class=\"hljs-string\">line2</span>"),
    );
    assert_eq!(html, expected);
}

#[test]
fn test_start_from_five() {
    let options = RenderOptions {
        start_from: 5,
        ..RenderOptions::default()
    };
    let html = render_block("a\nb\n", &options).unwrap();
    assert_eq!(
        html,
        format!("<table class=\"hljs-ln\">{}{}</table>", row(5, "a"), row(6, "b"))
    );
}

#[test]
fn test_one_line_block_is_untouched() {
    for html in [
        "",
        "x",
        "<span class=\"hljs-keyword\">return</span> <span class=\"hljs-literal\">true</span>;",
        "<span class=\"hljs-comment\">// trailing</span>\n",
        "x\r\n",
    ] {
        assert_eq!(render_block(html, &RenderOptions::default()).unwrap(), html);
    }
}

#[test]
fn test_forced_empty_block_renders_an_empty_table() {
    let options = RenderOptions {
        single_line: true,
        ..RenderOptions::default()
    };
    assert_eq!(
        render_block("", &options).unwrap(),
        "<table class=\"hljs-ln\"></table>"
    );
}

#[test]
fn test_mixed_block() {
    let code = "<span class=\"hljs-keyword\">fn</span> <span class=\"hljs-title function_\">f</span>() {\n    <span class=\"hljs-comment\">/* a\n\n       b */</span>\n}\n";
    let html = render_block(code, &RenderOptions::default()).unwrap();
    assert_eq!(
        html,
        format!(
            "<table class=\"hljs-ln\">{}{}{}{}{}</table>",
            row(
                1,
                "<span class=\"hljs-keyword\">fn</span> <span class=\"hljs-title function_\">f</span>() {"
            ),
            row(2, "    <span class=\"hljs-comment\">/* a</span>"),
            row(3, "<span class=\"hljs-comment\"> </span>"),
            row(4, "<span class=\"hljs-comment\">       b */</span>"),
            row(5, "}"),
        )
    );
}

#[test]
fn test_config_entry_point() {
    let config: LineNumbersConfig =
        serde_json::from_str(r#"{ "startFrom": "abc", "singleLine": "yes" }"#).unwrap();
    assert_eq!(config, LineNumbersConfig::default());
    assert_eq!(line_numbers_value("x", &config).unwrap(), "x");

    let config: LineNumbersConfig =
        serde_json::from_str(r#"{ "startFrom": 0, "singleLine": true }"#).unwrap();
    let html = line_numbers_value("x", &config).unwrap();
    assert_eq!(format!("<table class=\"hljs-ln\">{}</table>", row(0, "x")), html);
}

/// Line numbers of the content cells, in document order.
fn code_line_numbers(html: &str) -> Vec<i64> {
    html.split("<td class=\"hljs-ln-line hljs-ln-code\" data-line-number=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next()?.parse().ok())
        .collect()
}

#[test]
fn test_extreme_start_values_never_fail() {
    let code = "a\nb\nc";
    let config = LineNumbersConfig::default();
    for value in [
        "9223372036854775807",
        "-9223372036854775808",
        "1e30",
        "-1e30",
        "9007199254740992",
    ] {
        let options = RenderOptions::resolve(Some(value), &config);
        let html = render_block(code, &options).unwrap();
        assert_eq!(code_line_numbers(&html), vec![1, 2, 3], "{value}");
    }

    let config: LineNumbersConfig =
        serde_json::from_str(r#"{ "startFrom": 9223372036854775807 }"#).unwrap();
    let html = line_numbers_value(code, &config).unwrap();
    assert_eq!(code_line_numbers(&html), vec![1, 2, 3]);

    let options = RenderOptions::resolve(Some("9007199254740991"), &config);
    let html = render_block(code, &options).unwrap();
    let max = 9_007_199_254_740_991;
    assert_eq!(code_line_numbers(&html), vec![max, max + 1, max + 2]);
}

#[test]
fn test_start_at_integer_limit_stays_increasing() {
    let options = RenderOptions {
        start_from: i64::MAX,
        single_line: false,
    };
    let html = render_block("a\nb\nc", &options).unwrap();
    assert_eq!(
        code_line_numbers(&html),
        vec![i64::MAX - 2, i64::MAX - 1, i64::MAX]
    );
}

fn line() -> impl Strategy<Value = String> {
    "[a-z]{1,6}( [a-z0-9]{1,6}){0,2}"
}

proptest! {
    #[test]
    fn prop_row_count_matches_line_count(
        lines in prop::collection::vec(line(), 1..24),
        trailing_newline in any::<bool>(),
        wrap in any::<bool>(),
        start_from in -10i64..1000,
    ) {
        let mut code = lines.join("\n");
        if wrap {
            code = format!("<span class=\"hljs-string\">{code}</span>");
        }
        if trailing_newline {
            code.push('\n');
        }
        let options = RenderOptions { start_from, single_line: false };
        let html = render_block(&code, &options).unwrap();

        if lines.len() == 1 {
            prop_assert_eq!(html, code);
            return Ok(());
        }

        prop_assert_eq!(html.matches("<tr>").count(), lines.len());
        for (i, text) in lines.iter().enumerate() {
            let n = start_from + i as i64;
            let content = if wrap {
                format!("<span class=\"hljs-string\">{text}</span>")
            } else {
                text.clone()
            };
            let expected = format!(
                "<td class=\"hljs-ln-line hljs-ln-code\" data-line-number=\"{n}\">{content}</td>"
            );
            prop_assert!(html.contains(&expected), "missing row {}", n);
        }
        let last = start_from + lines.len() as i64;
        let beyond = format!("data-line-number=\"{last}\"");
        prop_assert!(!html.contains(&beyond));
    }
}
