//! Line-oriented markdown parser for the generated-program subset.
//!
//! Produces a sequence of typed blocks instead of rewriting text in place, so
//! no rule can ever re-match the output of an earlier rule. Only the subset
//! the prompt asks the model to produce is supported: `#`/`##`/`###`
//! headings, `- ` list items, blank-line-separated paragraphs, and the three
//! bracketed callout tags.

/// One rendered block of the generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    List(Vec<String>),
    Callout { kind: CalloutKind, text: String },
}

/// The three bracketed tags the prompt instructs the model to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Illustration,
    Image,
    Schema,
}

impl CalloutKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Illustration" => Some(CalloutKind::Illustration),
            "Image" => Some(CalloutKind::Image),
            "Schéma" => Some(CalloutKind::Schema),
            _ => None,
        }
    }
}

/// Parses markdown into blocks.
///
/// A contiguous run of `- ` lines becomes one `List`; consecutive plain lines
/// merge into one `Paragraph`; blank lines only separate blocks, so empty
/// paragraphs cannot exist.
pub fn parse(input: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut list: Vec<String> = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_list(&mut list, &mut blocks);
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            flush_list(&mut list, &mut blocks);
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            flush_paragraph(&mut paragraph, &mut blocks);
            list.push(item.to_string());
        } else if let Some((kind, text)) = parse_callout(trimmed) {
            flush_list(&mut list, &mut blocks);
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Callout { kind, text });
        } else {
            flush_list(&mut list, &mut blocks);
            paragraph.push(trimmed);
        }
    }

    flush_list(&mut list, &mut blocks);
    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    // Longest prefix first: "### " must win over "## ".
    if let Some(text) = line.strip_prefix("### ") {
        Some((3, text))
    } else if let Some(text) = line.strip_prefix("## ") {
        Some((2, text))
    } else if let Some(text) = line.strip_prefix("# ") {
        Some((1, text))
    } else {
        None
    }
}

/// Recognizes a whole-line `[Tag : description]` callout.
/// The space before the colon is optional; unknown tags stay plain text.
fn parse_callout(line: &str) -> Option<(CalloutKind, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (tag, rest) = inner.split_once(':')?;
    let kind = CalloutKind::from_tag(tag.trim())?;
    Some((kind, rest.trim().to_string()))
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(paragraph.join(" ")));
        paragraph.clear();
    }
}

fn flush_list(list: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !list.is_empty() {
        blocks.push(Block::List(std::mem::take(list)));
    }
}
