/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<span class="{class}">item</span>` for each item, escaped.
pub fn tags<'a>(class: &str, items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(|item| format!(r#"<span class="{class}">{}</span>"#, escape(item)))
        .collect()
}

/// Achievement bullets, optionally capped.
pub fn achievements(items: &[String], limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(items.len()).min(items.len());
    items[..shown]
        .iter()
        .map(|a| {
            format!(
                r#"<div class="achievement-item"><div class="achievement-bullet"></div><span class="achievement-text">{}</span></div>"#,
                escape(a)
            )
        })
        .collect()
}
