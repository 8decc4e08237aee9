use std::collections::{HashMap, HashSet};

pub const DEFAULT_TRUNCATE_LEN: usize = 100;

/// Keep at most `max_chars` characters, appending "..." when cut.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `round(value / total * 100)`, or 0 when `total` is 0.
#[must_use]
pub fn percentage(value: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(value) / f64::from(total) * 100.0).round() as u32
}

/// A `[0, 1]` level as a whole percentage.
#[must_use]
pub fn level_percent(level: f64) -> u32 {
    (level.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Strip backend HTML down to a small set of formatting tags.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "a", "h1", "h2", "h3", "h4",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// Lesson and study-tip HTML as Markdown text for a terminal.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let markdown = html2md::parse_html(&sanitize_html(html));
    normalize_markdown(&markdown)
}

/// Trim trailing whitespace and collapse runs of blank lines.
#[must_use]
pub fn normalize_markdown(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut blank_streak = 0usize;

    for line in normalized.split('\n') {
        let trimmed = line.trim_end_matches([' ', '\t']).to_string();
        if trimmed.is_empty() {
            blank_streak += 1;
            if blank_streak > 1 {
                continue;
            }
        } else {
            blank_streak = 0;
        }
        lines.push(trimmed);
    }

    let mut output = lines.join("\n").trim_matches('\n').to_string();
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_text() {
        let text = "a".repeat(120);
        let out = truncate_text(&text, DEFAULT_TRUNCATE_LEN);
        assert_eq!(out.len(), 103);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_text("short", DEFAULT_TRUNCATE_LEN), "short");
        assert_eq!(truncate_text("exactly", 7), "exactly");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_text("héllo wörld", 4), "héll...");
    }

    #[test]
    fn percentage_handles_zero_total() {
        assert_eq!(percentage(3, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(6, 6), 100);
    }

    #[test]
    fn level_percent_rounds() {
        assert_eq!(level_percent(0.796), 80);
        assert_eq!(level_percent(0.0), 0);
        assert_eq!(level_percent(1.2), 100);
    }

    #[test]
    fn html_becomes_markdown() {
        let text = html_to_text("<h2>Loops</h2><p>Use <strong>for</strong> loops.</p><script>alert(1)</script>");
        assert!(text.contains("Loops"));
        assert!(text.contains("**for**"));
        assert!(!text.contains("alert"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(normalize_markdown("a  \n\n\n\nb\n\n"), "a\n\nb\n");
    }
}
