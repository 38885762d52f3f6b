//! Minimal markdown renderer for AI-written plan text.
//!
//! Supports `#`/`##`/`###` headings, `- ` or `* ` list items, `**bold**`, `*italic*`
//! and line breaks. Input is HTML-escaped before any markup is added, so the output
//! never contains tags that were not produced here.

/// Escape HTML special characters to prevent XSS
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.lines() {
        let line = line.trim_end();

        if let Some((level, content)) = heading(line) {
            flush_paragraph(&mut out, &mut paragraph);
            close_list(&mut out, &mut in_list);
            out.push_str(&format!("<h{level}>{}</h{level}>", inline(content)));
        } else if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            flush_paragraph(&mut out, &mut paragraph);
            if !in_list {
                out.push_str("<ul>");
                in_list = true;
            }
            out.push_str(&format!("<li>{}</li>", inline(item.trim())));
        } else if line.trim().is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            close_list(&mut out, &mut in_list);
        } else {
            close_list(&mut out, &mut in_list);
            paragraph.push(inline(line.trim()));
        }
    }

    flush_paragraph(&mut out, &mut paragraph);
    close_list(&mut out, &mut in_list);
    out
}

fn heading(line: &str) -> Option<(usize, &str)> {
    ["### ", "## ", "# "]
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix).map(|rest| (prefix.len() - 1, rest.trim())))
}

fn flush_paragraph(out: &mut String, paragraph: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    out.push_str("<p>");
    out.push_str(&paragraph.join("<br>"));
    out.push_str("</p>");
    paragraph.clear();
}

fn close_list(out: &mut String, in_list: &mut bool) {
    if *in_list {
        out.push_str("</ul>");
        *in_list = false;
    }
}

fn inline(text: &str) -> String {
    let escaped = html_escape(text);
    let bold = wrap_delimited(&escaped, "**", "strong");
    wrap_delimited(&bold, "*", "em")
}

/// Wraps each non-empty `delim … delim` span in `<tag>`. Unpaired delimiters stay literal.
fn wrap_delimited(text: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(delim) {
        let after_open = &rest[start + delim.len()..];
        match after_open.find(delim) {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(&format!("<{tag}>{}</{tag}>", &after_open[..end]));
                rest = &after_open[end + delim.len()..];
            }
            _ => {
                out.push_str(&rest[..start + delim.len()]);
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}
