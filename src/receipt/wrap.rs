//! Greedy word wrap, measured with the same rasterizer that will draw the
//! text so wrapped lines fit to the dot.

use crate::error::Result;
use crate::render::font::TextRasterizer;
use crate::render::line::StyledLine;

/// Split `line` into lines no wider than `max_width`.
///
/// Words are joined by single spaces. A word wider than the paper is
/// broken between characters, always keeping at least one character per
/// line so the loop terminates. Every output line keeps the source style.
pub fn wrap_line(
    rasterizer: &dyn TextRasterizer,
    line: StyledLine,
    max_width: usize,
) -> Result<Vec<StyledLine>> {
    let fits = |text: &str| -> Result<bool> {
        Ok(rasterizer.measure(text, line.font_size, line.bold)? <= max_width)
    };

    if line.text.is_empty() || fits(&line.text)? {
        return Ok(vec![line]);
    }

    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.text.split_whitespace() {
        let trial = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&trial)? {
            current = trial;
            continue;
        }

        if !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
        if fits(word)? {
            current = word.to_string();
        } else {
            // Hard-break an over-long word
            for ch in word.chars() {
                let mut trial = current.clone();
                trial.push(ch);
                if current.is_empty() || fits(&trial)? {
                    current = trial;
                } else {
                    pieces.push(std::mem::replace(&mut current, ch.to_string()));
                }
            }
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    Ok(pieces
        .into_iter()
        .map(|text| StyledLine {
            text,
            ..line.clone()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::font::testing::BlockFont;
    use crate::render::line::Alignment;
    use pretty_assertions::assert_eq;

    fn texts(lines: &[StyledLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_short_line_untouched() {
        let line = StyledLine::new("fits  fine", 24.0);
        let out = wrap_line(&BlockFont, line.clone(), 384).unwrap();
        assert_eq!(out, vec![line]);
    }

    #[test]
    fn test_wraps_on_words() {
        // BlockFont at 24 is 12 dots per char; 120 dots = 10 chars
        let line = StyledLine::new("aaaa bbbb cccc dd", 24.0);
        let out = wrap_line(&BlockFont, line, 120).unwrap();
        assert_eq!(texts(&out), vec!["aaaa bbbb", "cccc dd"]);
    }

    #[test]
    fn test_breaks_long_word() {
        let line = StyledLine::new("abcdefghijklmnopqrstuvwxyz", 24.0);
        let out = wrap_line(&BlockFont, line, 120).unwrap();
        assert_eq!(texts(&out), vec!["abcdefghij", "klmnopqrst", "uvwxyz"]);
    }

    #[test]
    fn test_keeps_style() {
        let line = StyledLine::new("one two three", 24.0)
            .bold(true)
            .align(Alignment::Right);
        let out = wrap_line(&BlockFont, line, 60).unwrap();
        assert!(out.len() > 1);
        assert!(out.iter().all(|l| l.bold && l.align == Alignment::Right));
    }

    #[test]
    fn test_every_piece_fits() {
        let line = StyledLine::new("the quick brown fox jumps over the lazy dog", 24.0);
        let out = wrap_line(&BlockFont, line, 100).unwrap();
        for piece in &out {
            assert!(BlockFont.measure(&piece.text, 24.0, false).unwrap() <= 100);
        }
    }
}
