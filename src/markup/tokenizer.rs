//! Line tokenizer producing the typed block sequence.

use super::inline::parse_inlines;
use super::{Block, ListMarker, MarkupDocument};

/// Transforms write-up text into an ordered block sequence.
///
/// Never fails: any line that matches no rule becomes paragraph text.
/// Fenced code is cut out before any other rule runs, so its body is never
/// scanned for headings, lists or emphasis. An unclosed fence is ordinary
/// text. Images split the surrounding line into separate blocks.
///
/// # Arguments
///
/// * `text`: Raw write-up text (LF or CRLF line endings)
///
/// # Returns
///
/// Block sequence in source order; empty for empty input
pub fn transform(text: &str) -> MarkupDocument {
    let lines: Vec<&str> = text.lines().collect();
    let closes = fence_closes(&lines);
    let mut builder = Builder::default();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];

        if let Some(language) = fence_open(line)
            && let Some(close) = closes[index + 1]
        {
            builder.flush_paragraph();
            builder.blocks.push(Block::CodeBlock {
                language,
                body: lines[index + 1..close].join("\n"),
            });
            index = close + 1;
            continue;
        }

        builder.line(line);
        index += 1;
    }

    builder.finish()
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
}

impl Builder {
    fn line(&mut self, line: &str) {
        let segments = split_images(line);

        if !segments.iter().any(|s| matches!(s, Segment::Image { .. })) {
            self.classify(line);
            return;
        }

        for (position, segment) in segments.into_iter().enumerate() {
            match segment {
                Segment::Text(text) if position == 0 && !is_bare_marker(text) => {
                    self.classify(text)
                }
                Segment::Text(_) if position == 0 => self.flush_paragraph(),
                Segment::Text(text) => {
                    if !text.trim().is_empty() {
                        self.paragraph.push(text.trim().to_string());
                    }
                }
                Segment::Image { alt, src } => {
                    self.flush_paragraph();
                    self.blocks.push(Block::Image {
                        alt: alt.to_string(),
                        src: src.to_string(),
                    });
                }
            }
        }
    }

    fn classify(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.flush_paragraph();
        } else if let Some((level, text)) = heading(line) {
            self.flush_paragraph();
            self.blocks.push(Block::Heading {
                level,
                content: parse_inlines(text),
            });
        } else if line.trim_end() == "---" {
            self.flush_paragraph();
            self.blocks.push(Block::Rule);
        } else if let Some((marker, text)) = list_item(line) {
            self.flush_paragraph();
            self.blocks.push(Block::ListItem {
                marker,
                content: parse_inlines(text),
            });
        } else {
            self.paragraph.push(line.trim().to_string());
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join("\n");
        self.paragraph.clear();
        self.blocks.push(Block::Paragraph(parse_inlines(&text)));
    }

    fn finish(mut self) -> MarkupDocument {
        self.flush_paragraph();
        MarkupDocument::new(self.blocks)
    }
}

/// Returns the fence language when `line` opens a fenced block.
///
/// The outer Option is None for non-fence lines; the inner Option is None
/// when no language follows the backticks.
fn fence_open(line: &str) -> Option<Option<String>> {
    let rest = line.trim_start().strip_prefix("```")?;
    let language = rest.trim();

    if language.contains('`') || language.contains(char::is_whitespace) {
        return None;
    }

    Some((!language.is_empty()).then(|| language.to_string()))
}

/// Index of the first closing fence at or after each line.
///
/// Has one entry past the last line so `closes[index + 1]` is always valid.
fn fence_closes(lines: &[&str]) -> Vec<Option<usize>> {
    let mut closes = vec![None; lines.len() + 1];
    for (index, line) in lines.iter().enumerate().rev() {
        closes[index] = if line.trim() == "```" {
            Some(index)
        } else {
            closes[index + 1]
        };
    }
    closes
}

/// True for a heading or list marker with no text after it.
fn is_bare_marker(line: &str) -> bool {
    heading(line).is_some_and(|(_, text)| text.is_empty())
        || list_item(line).is_some_and(|(_, text)| text.is_empty())
}

/// Parses `#`, `##` or `###` followed by a space.
fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let text = line[level..].strip_prefix(' ')?;
    Some((level as u8, text.trim()))
}

/// Parses `- `, `* ` or `N. ` list lines.
fn list_item(line: &str) -> Option<(ListMarker, &str)> {
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((ListMarker::Bullet, text.trim()));
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let text = line[digits..].strip_prefix(". ")?;
    let number = line[..digits].parse().ok()?;
    Some((ListMarker::Ordered(number), text.trim()))
}

enum Segment<'a> {
    Text(&'a str),
    Image { alt: &'a str, src: &'a str },
}

fn split_images(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut pending = 0;
    let mut search = 0;

    while let Some(found) = line[search..].find("![") {
        let start = search + found;
        match image_at(&line[start..]) {
            Some((alt, src, len)) => {
                if start > pending {
                    segments.push(Segment::Text(&line[pending..start]));
                }
                segments.push(Segment::Image { alt, src });
                pending = start + len;
                search = pending;
            }
            None => search = start + 2,
        }
    }

    if pending < line.len() {
        segments.push(Segment::Text(&line[pending..]));
    }

    segments
}

/// Matches `![alt](src)` at the start of `s`, returning its byte length.
fn image_at(s: &str) -> Option<(&str, &str, usize)> {
    let body = s.strip_prefix("![")?;
    let alt_end = body.find(']')?;
    let tail = body[alt_end + 1..].strip_prefix('(')?;
    let src_end = tail.find(')')?;
    let src = tail[..src_end].trim();

    if src.is_empty() {
        return None;
    }

    let len = "![".len() + alt_end + "](".len() + src_end + ")".len();
    Some((&body[..alt_end], src, len))
}
