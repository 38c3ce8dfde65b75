//! # Receipt Markup
//!
//! Plain text with optional leading style tags, one receipt line per text
//! line.
//!
//! ```text
//! <center><large><b>CORNER CAFE        one line: centered, double size, bold
//! <center>                             tag-only line: carried style from here on
//! 12 Main St                           centered
//! <right>Tel 555-0100                  right-aligned, this line only
//! <reset>                              back to defaults
//! Americano        2   6,000           left, default size
//! <feed=2>                             two blank lines
//! \<not a tag>                         literal "<not a tag>"
//! ```
//!
//! ## Tags
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `<left>` `<center>` `<right>` | alignment (`<centre>` also accepted) |
//! | `<b>` `<bold>` `<bold_on>` / `<regular>` `<bold_off>` | bold on / off |
//! | `<size=N>` | font size N pixels |
//! | `<large>` / `<normal>` | twice the default size / the default size |
//! | `<feed>` `<feed=N>` | N blank lines (3 when omitted, at most 255) |
//! | `<reset>` | restore every default |
//! | `<cut>` `<underline_on>` `<underline_off>` | accepted and dropped |
//!
//! `<cut>` and the underline pair come from receipts written for printers'
//! text mode. They are consumed so they never print as text: a job cuts
//! once at its end (see `RenderOptions::cut`) and underline is not drawn.
//!
//! ## Rules
//!
//! - Tags are only recognised at the start of a line. Whitespace between
//!   tags is skipped and one space after the last tag is dropped.
//! - Tags in front of text style that line only. A line holding nothing
//!   but tags changes the carried style that every later line starts from.
//! - Tag names are case-insensitive. The first unknown or malformed tag
//!   ends tag parsing; it and everything after it print literally.
//! - `\<` at the start of a line prints a literal `<`.
//! - Trailing whitespace is trimmed. Blank lines print as blank lines.

use crate::render::line::{Alignment, StyledLine};

/// Blank lines emitted by a bare `<feed>`.
pub const DEFAULT_FEED_LINES: usize = 3;

/// Largest accepted `<feed=N>`.
pub const MAX_FEED_LINES: usize = 255;

/// A recognised style tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tag {
    Align(Alignment),
    Bold(bool),
    Size(f32),
    Large,
    Normal,
    Feed(usize),
    Reset,
    Cut,
    Underline(bool),
}

impl Tag {
    /// Parse the inside of `<...>`. Returns `None` for anything unknown.
    pub fn parse(body: &str) -> Option<Self> {
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (body.trim(), None),
        };
        let name = name.to_ascii_lowercase();

        match (name.as_str(), value) {
            ("left", None) => Some(Tag::Align(Alignment::Left)),
            ("center" | "centre", None) => Some(Tag::Align(Alignment::Center)),
            ("right", None) => Some(Tag::Align(Alignment::Right)),
            ("b" | "bold" | "bold_on", None) => Some(Tag::Bold(true)),
            ("regular" | "bold_off", None) => Some(Tag::Bold(false)),
            ("size", Some(v)) => v.parse::<f32>().ok().map(Tag::Size),
            ("large", None) => Some(Tag::Large),
            ("normal", None) => Some(Tag::Normal),
            ("feed", None) => Some(Tag::Feed(DEFAULT_FEED_LINES)),
            ("feed", Some(v)) => v
                .parse::<usize>()
                .ok()
                .filter(|&n| n <= MAX_FEED_LINES)
                .map(Tag::Feed),
            ("reset", None) => Some(Tag::Reset),
            ("cut", None) => Some(Tag::Cut),
            ("underline_on", None) => Some(Tag::Underline(true)),
            ("underline_off", None) => Some(Tag::Underline(false)),
            _ => None,
        }
    }
}

/// Style state while walking the lines.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Style {
    font_size: f32,
    bold: bool,
    align: Alignment,
}

impl Style {
    fn defaults(default_font_size: f32) -> Self {
        Self {
            font_size: default_font_size,
            bold: false,
            align: Alignment::Left,
        }
    }

    fn line(&self, text: &str) -> StyledLine {
        StyledLine {
            text: text.to_string(),
            font_size: self.font_size,
            bold: self.bold,
            align: self.align,
        }
    }
}

/// Split a line into its leading tags and the remaining text.
pub fn split_leading_tags(line: &str) -> (Vec<Tag>, &str) {
    if line.starts_with("\\<") {
        // Keep the '<', drop the backslash
        return (Vec::new(), &line[1..]);
    }

    let mut tags = Vec::new();
    let mut rest = line;
    loop {
        let candidate = if tags.is_empty() {
            rest
        } else {
            rest.trim_start()
        };
        let Some(inner) = candidate.strip_prefix('<') else {
            break;
        };
        let Some(end) = inner.find('>') else {
            break;
        };
        match Tag::parse(&inner[..end]) {
            Some(tag) => {
                tags.push(tag);
                rest = &inner[end + 1..];
            }
            None => break,
        }
    }

    if !tags.is_empty() {
        rest = rest.strip_prefix(' ').unwrap_or(rest);
    }
    (tags, rest)
}

/// Parse receipt markup into styled lines.
///
/// An input with no lines yields an empty vector; the compositor decides
/// what an empty receipt looks like.
pub fn parse(text: &str, default_font_size: f32) -> Vec<StyledLine> {
    let defaults = Style::defaults(default_font_size);
    let mut carried = defaults;
    let mut lines = Vec::new();

    for raw in text.lines() {
        let (tags, rest) = split_leading_tags(raw.trim_end());

        let mut style = carried;
        let mut feed = 0;
        for tag in &tags {
            match *tag {
                Tag::Align(align) => style.align = align,
                Tag::Bold(bold) => style.bold = bold,
                Tag::Size(size) => style.font_size = size,
                Tag::Large => style.font_size = default_font_size * 2.0,
                Tag::Normal => style.font_size = default_font_size,
                Tag::Feed(n) => feed += n,
                Tag::Reset => style = defaults,
                Tag::Cut | Tag::Underline(_) => {}
            }
        }

        for _ in 0..feed.min(MAX_FEED_LINES) {
            lines.push(style.line(""));
        }

        if !tags.is_empty() && rest.is_empty() {
            carried = style;
            continue;
        }
        lines.push(style.line(rest));
    }

    log::debug!("parsed {} receipt lines", lines.len());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIZE: f32 = 24.0;

    fn line(text: &str, size: f32, bold: bool, align: Alignment) -> StyledLine {
        StyledLine {
            text: text.to_string(),
            font_size: size,
            bold,
            align,
        }
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(
            parse("one\ntwo", SIZE),
            vec![
                line("one", SIZE, false, Alignment::Left),
                line("two", SIZE, false, Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert!(parse("", SIZE).is_empty());
    }

    #[test]
    fn test_trailing_newline_and_crlf() {
        assert_eq!(parse("a\r\nb\n", SIZE).len(), 2);
    }

    #[test]
    fn test_blank_line_kept() {
        let lines = parse("a\n\nb", SIZE);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "");
    }

    #[test]
    fn test_inline_tags_apply_to_one_line() {
        let lines = parse("<center><b>TITLE\nbody", SIZE);
        assert_eq!(
            lines,
            vec![
                line("TITLE", SIZE, true, Alignment::Center),
                line("body", SIZE, false, Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_tag_only_line_carries_forward() {
        let lines = parse("<right>\nA\nB\n<reset>\nC", SIZE);
        assert_eq!(
            lines,
            vec![
                line("A", SIZE, false, Alignment::Right),
                line("B", SIZE, false, Alignment::Right),
                line("C", SIZE, false, Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_inline_overrides_carried_for_one_line() {
        let lines = parse("<bold>\n<regular>thin\nthick", SIZE);
        assert!(!lines[0].bold);
        assert!(lines[1].bold);
    }

    #[test]
    fn test_sizes() {
        let lines = parse("<size=16>small\n<large>big\n<large>\n<normal>back", SIZE);
        assert_eq!(lines[0].font_size, 16.0);
        assert_eq!(lines[1].font_size, 48.0);
        assert_eq!(lines[2].font_size, 24.0);
    }

    #[test]
    fn test_feed() {
        let lines = parse("a\n<feed>\nb\n<feed=1>c", SIZE);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "", "", "", "b", "", "c"]);
    }

    #[test]
    fn test_feed_out_of_range_is_literal() {
        let lines = parse("<feed=9999>", SIZE);
        assert_eq!(lines, vec![line("<feed=9999>", SIZE, false, Alignment::Left)]);
    }

    #[test]
    fn test_unknown_tag_is_literal() {
        let lines = parse("<3 you\n<center><blink>x", SIZE);
        assert_eq!(lines[0].text, "<3 you");
        assert_eq!(lines[1], line("<blink>x", SIZE, false, Alignment::Center));
    }

    #[test]
    fn test_malformed_size_is_literal() {
        let lines = parse("<size=big>x", SIZE);
        assert_eq!(lines[0].text, "<size=big>x");
    }

    #[test]
    fn test_zero_size_parses() {
        // Rejected later by the rasterizer, not silently dropped here
        let lines = parse("<size=0>x", SIZE);
        assert_eq!(lines[0].font_size, 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let lines = parse("<CENTER><Bold>x", SIZE);
        assert_eq!(lines[0], line("x", SIZE, true, Alignment::Center));
    }

    #[test]
    fn test_whitespace_between_tags_and_single_space_dropped() {
        let (tags, rest) = split_leading_tags("<center> <b>  Total");
        assert_eq!(
            tags,
            vec![Tag::Align(Alignment::Center), Tag::Bold(true)]
        );
        assert_eq!(rest, " Total");
    }

    #[test]
    fn test_escape() {
        let lines = parse("\\<center>", SIZE);
        assert_eq!(lines[0], line("<center>", SIZE, false, Alignment::Left));
    }

    #[test]
    fn test_unclosed_tag_is_literal() {
        let lines = parse("<center", SIZE);
        assert_eq!(lines[0].text, "<center");
    }

    #[test]
    fn test_text_mode_directives() {
        let lines = parse("<bold_on>\nTOTAL\n<bold_off>\nthanks\n<underline_on>u\n<cut>", SIZE);
        assert_eq!(
            lines,
            vec![
                line("TOTAL", SIZE, true, Alignment::Left),
                line("thanks", SIZE, false, Alignment::Left),
                line("u", SIZE, false, Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_tags_only_at_line_start() {
        let lines = parse("price <b>9", SIZE);
        assert_eq!(lines[0], line("price <b>9", SIZE, false, Alignment::Left));
    }
}
