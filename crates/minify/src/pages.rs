//! Page chrome and panel fragments.
//!
//! The layout is assembled from plain string templates; only panel content
//! and panel names need escaping, everything else is static markup.

use chrono::Datelike;
use minify_core::Panel;

const STYLE: &str = r#"
body { margin: 0; background: #0e0c15; color: #f8f8f2; font-family: system-ui, sans-serif; }
header, main, footer { width: 83%; max-width: 56rem; margin: 0 auto 1.25rem; }
header a { color: inherit; text-decoration: none; }
h1 { font-size: 1.5rem; }
form, #output { display: flex; flex-direction: column; gap: 0.5rem; }
textarea, label { background: #1e1a2a; color: #f8f8f2; padding: 0.5rem; border: 0; border-radius: 0.375rem; }
fieldset { display: flex; gap: 0.5rem; border: 0; padding: 0; margin: 0; }
button { background: #f8f8f2; color: #1e1a2a; padding: 0.5rem; border: 0; border-radius: 0.375rem; cursor: pointer; }
footer { font-size: 0.8rem; opacity: 0.7; }
"#;

const FORM: &str = r##"<form hx-post="/minify" hx-target="#output">
  <textarea id="input" name="input" rows="10" placeholder="Enter your js here"></textarea>
  <fieldset>
    <label><input type="radio" name="sourcemap" value="inline" checked> Inline sourcemap</label>
    <label><input type="radio" name="sourcemap" value="external"> External sourcemap</label>
    <label><input type="radio" name="sourcemap" value="none"> No sourcemap</label>
  </fieldset>
  <fieldset>
    <label><input type="checkbox" name="splitting"> Split</label>
  </fieldset>
  <button type="submit">Minify</button>
</form>
<div id="output">
  <textarea rows="10" readonly placeholder="Minified text will appear here"></textarea>
</div>"##;

fn layout(main: &str) -> String {
    let year = chrono::Utc::now().year();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Minify</title>
  <meta name="description" content="Minify things">
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <style>{STYLE}</style>
</head>
<body>
  <header><a href="/"><h1>Minify</h1></a></header>
  <main>{main}</main>
  <footer>&copy; {year} Minify. All rights reserved.</footer>
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
</body>
</html>
"#
    )
}

/// The index page: submit form plus the placeholder output area.
pub fn index() -> String {
    layout(FORM)
}

pub fn not_found() -> String {
    layout(r#"<p>Not found. <a href="/">Back to the form.</a></p>"#)
}

/// Render panels as read-only textareas, in order.
pub fn panel_fragment(panels: &[Panel]) -> String {
    let mut html = String::new();
    for panel in panels {
        let id = html_escape::encode_double_quoted_attribute(&panel.id);
        let name = html_escape::encode_double_quoted_attribute(&panel.label);
        let content = html_escape::encode_text(&panel.content);
        html.push_str(&format!(
            "<textarea id=\"{id}\" name=\"{name}\" rows=\"10\" readonly>{content}</textarea>\n"
        ));
    }
    html
}
