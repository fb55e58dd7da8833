//! Inline pass: code spans first, then bold.

use super::Inline;

/// Intermediate piece after the code span pass.
enum Piece {
    Text(String),
    Code(String),
}

/// Parses inline code and bold emphasis in block text.
///
/// Code spans are cut out first so their content is never scanned for
/// emphasis. Bold must open and close on the same line and enclose at
/// least one character; anything else stays literal.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    emphasize(split_code_spans(text))
}

fn split_code_spans(text: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut pending = 0;
    let mut search = 0;

    while let Some(found) = text[search..].find('`') {
        let open = search + found;
        let body_start = open + 1;

        match text[body_start..].find('`') {
            // Empty span (two adjacent backticks): keep both literal
            Some(0) => search = body_start + 1,
            Some(len) => {
                if open > pending {
                    pieces.push(Piece::Text(text[pending..open].to_string()));
                }
                pieces.push(Piece::Code(
                    text[body_start..body_start + len].to_string(),
                ));
                pending = body_start + len + 1;
                search = pending;
            }
            None => break,
        }
    }

    if pending < text.len() {
        pieces.push(Piece::Text(text[pending..].to_string()));
    }

    pieces
}

fn emphasize(pieces: Vec<Piece>) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut strong: Option<Vec<Inline>> = None;

    for piece in pieces {
        let text = match piece {
            Piece::Code(code) => {
                strong.as_mut().unwrap_or(&mut out).push(Inline::Code(code));
                continue;
            }
            Piece::Text(text) => text,
        };

        let mut rest = text.as_str();
        while !rest.is_empty() {
            let delimiter = rest.find("**");
            match strong.take() {
                None => match delimiter {
                    Some(at) => {
                        push_text(&mut out, &rest[..at]);
                        strong = Some(Vec::new());
                        rest = &rest[at + 2..];
                    }
                    None => {
                        push_text(&mut out, rest);
                        rest = "";
                    }
                },
                Some(mut inner) => {
                    let newline = rest.find('\n');
                    let closing = delimiter.filter(|at| newline.is_none_or(|nl| *at < nl));
                    match (closing, newline) {
                        (Some(at), _) => {
                            push_text(&mut inner, &rest[..at]);
                            if inner.is_empty() {
                                push_text(&mut out, "****");
                            } else {
                                out.push(Inline::Strong(inner));
                            }
                            rest = &rest[at + 2..];
                        }
                        (None, Some(nl)) => {
                            reopen_literal(&mut out, inner);
                            push_text(&mut out, &rest[..=nl]);
                            rest = &rest[nl + 1..];
                        }
                        (None, None) => {
                            push_text(&mut inner, rest);
                            strong = Some(inner);
                            rest = "";
                        }
                    }
                }
            }
        }
    }

    if let Some(inner) = strong {
        reopen_literal(&mut out, inner);
    }

    out
}

/// Appends text, merging with a trailing text node.
fn push_text(target: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = target.last_mut() {
        last.push_str(text);
    } else {
        target.push(Inline::Text(text.to_string()));
    }
}

/// Unwinds an unclosed bold run back into literal text.
fn reopen_literal(out: &mut Vec<Inline>, inner: Vec<Inline>) {
    push_text(out, "**");
    for inline in inner {
        match inline {
            Inline::Text(text) => push_text(out, &text),
            other => out.push(other),
        }
    }
}
