//! Section Renderer: the uniform "no lines, no section" policy.

use crate::render::markup::format_command;

/// Name of the section environment defined by the resume document class.
pub const SECTION_ENV: &str = "rSection";

const BANNER_RULE: &str =
    "%----------------------------------------------------------------------------------------";

/// Number of lines a banner comment occupies.
pub const BANNER_LEN: usize = 5;

/// Wraps `lines` in a titled section. An empty `lines` yields nothing at all,
/// banner and begin/end wrapper included.
pub fn render_section(title: &str, lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut out = render_banner_comment(Some(format!("Section: {title}").as_str()));
    out.reserve(lines.len() + 2);
    out.push(format_command("begin", [SECTION_ENV, title], None));
    out.extend(lines);
    out.push(format_command("end", [SECTION_ENV], None));
    out
}

/// Renders a tightly spaced itemized list; empty input renders nothing.
pub fn render_itemized_list<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    let itemsep = format_command("itemsep", None::<&str>, None);
    let mut out = Vec::with_capacity(lines.len() + 3);
    out.push(format_command("begin", ["itemize"], None));
    out.push(format_command("setlength", [itemsep.as_str(), "-3pt"], None));
    out.extend(
        lines
            .iter()
            .map(|line| format_command("item", [line.as_ref()], None)),
    );
    out.push(format_command("end", ["itemize"], None));
    out
}

pub fn render_banner_comment(text: Option<&str>) -> Vec<String> {
    match text {
        Some(text) if !text.is_empty() => vec![
            String::new(),
            BANNER_RULE.to_string(),
            format!("% {}", text.to_uppercase()),
            BANNER_RULE.to_string(),
            String::new(),
        ],
        _ => Vec::new(),
    }
}
