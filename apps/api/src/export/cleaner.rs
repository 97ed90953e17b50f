//! Text cleanup applied before PDF layout.
//!
//! The PDF body is plain text: heading markers go away, bold markers are
//! removed in pairs (content kept), bracketed callout tags disappear
//! entirely, and runs of three or more newlines collapse to one blank line.

/// Cleans generated markdown for plain-text PDF output.
pub fn clean_for_export(content: &str) -> String {
    let stripped = strip_heading_markers(content);
    let stripped = strip_bold_markers(&stripped);
    let stripped = strip_bracket_tags(&stripped);
    collapse_blank_runs(&stripped)
}

/// Removes runs of 1–6 `#` followed by one whitespace character.
fn strip_heading_markers(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '#' {
            let mut j = i;
            while j < chars.len() && chars[j] == '#' && j - i < 6 {
                j += 1;
            }
            if j < chars.len() && chars[j].is_whitespace() {
                // Drop the hashes and the single whitespace after them.
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Removes `**` markers in pairs, keeping the enclosed text.
/// An unpaired trailing `**` stays literal.
fn strip_bold_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        match after.find("**") {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str(&after[..close]);
                rest = &after[close + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Removes bracketed tags and their content. Brackets never span lines;
/// an unclosed `[` stays literal.
fn strip_bracket_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        match rest[open..].find(']') {
            Some(rel) if !rest[open..open + rel].contains('\n') => {
                out.push_str(&rest[..open]);
                rest = &rest[open + rel + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapses runs of 3+ newlines to exactly two (one blank line).
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
        } else {
            push_newlines(&mut out, run);
            run = 0;
            out.push(c);
        }
    }
    push_newlines(&mut out, run);
    out
}

fn push_newlines(out: &mut String, run: usize) {
    let count = if run >= 3 { 2 } else { run };
    for _ in 0..count {
        out.push('\n');
    }
}
