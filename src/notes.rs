use std::path::Path;

use crate::changelog;
use crate::error::Result;

/// Characters docutils accepts as section-title adornments.
const RST_ADORNMENTS: &str = "=-~^\"'`#*+_:.!$%&(),/;<>?@[]\\{|}";

/// Options for rendering a release-notes excerpt from the changelog.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesOptions {
    /// Number of most-recent changelog entries to include.
    pub entries: usize,
    /// Heading level added to every rendered heading.
    pub min_heading_level: usize,
    /// Drop the document's own top-level heading from the excerpt.
    pub exclude_top_heading: bool,
}

/// Markup-conversion collaborator: turns a changelog file into markup
/// fragments suitable for a release body.
pub trait NotesRenderer: Send + Sync {
    fn render(&self, path: &Path, options: &NotesOptions) -> Result<Vec<String>>;
}

/// Renders an RST changelog excerpt as GitHub Markdown.
///
/// Section headings are detected as a title line followed by a repeated
/// adornment character at least as long as the title. Heading depth follows
/// the docutils convention: adornment styles rank by first appearance.
/// The changelog is newest-first, so the first entry-level section is the
/// most recent release.
pub struct RstNotes;

struct Heading {
    line: usize,
    level: usize,
}

impl RstNotes {
    fn collect_headings(lines: &[String]) -> Vec<Heading> {
        let mut styles: Vec<char> = Vec::new();
        let mut headings = Vec::new();

        let mut i = 0;
        while i + 1 < lines.len() {
            let title = &lines[i];
            if !title.trim().is_empty() && adornment_char(title).is_none() {
                if let Some(ch) = adornment_char(&lines[i + 1]) {
                    if lines[i + 1].chars().count() >= title.trim_end().chars().count() {
                        let level = match styles.iter().position(|&s| s == ch) {
                            Some(pos) => pos + 1,
                            None => {
                                styles.push(ch);
                                styles.len()
                            }
                        };
                        headings.push(Heading { line: i, level });
                        i += 2;
                        continue;
                    }
                }
            }
            i += 1;
        }

        headings
    }
}

impl NotesRenderer for RstNotes {
    fn render(&self, path: &Path, options: &NotesOptions) -> Result<Vec<String>> {
        let lines = changelog::read_lines(path)?;
        let headings = Self::collect_headings(&lines);

        // The first heading is the document title; release entries follow it
        // and may reuse its adornment, so entry detection keys off position
        // rather than adornment rank.
        let Some((top, rest)) = headings.split_first() else {
            return Ok(Vec::new());
        };
        let Some(entry_level) = rest.first().map(|h| h.level) else {
            return Ok(Vec::new());
        };

        let entry_starts: Vec<usize> = rest
            .iter()
            .filter(|h| h.level == entry_level)
            .map(|h| h.line)
            .collect();
        let Some(&start) = entry_starts.first() else {
            return Ok(Vec::new());
        };
        let end = entry_starts
            .get(options.entries)
            .copied()
            .unwrap_or(lines.len());

        let depth_of = |level: usize| {
            (level + 1 + options.min_heading_level).saturating_sub(entry_level).max(1)
        };

        let mut fragments = Vec::new();
        if !options.exclude_top_heading {
            fragments.push(format!(
                "{} {}",
                "#".repeat(depth_of(top.level)),
                lines[top.line].trim()
            ));
        }

        let mut i = start;
        while i < end {
            if let Some(heading) = headings.iter().find(|h| h.line == i) {
                let depth = depth_of(heading.level);
                fragments.push(format!("{} {}", "#".repeat(depth), lines[i].trim()));
                i += 2;
                continue;
            }

            // Targets, directives, and comments have no Markdown rendering.
            if lines[i].starts_with(".. ") {
                i += 1;
                continue;
            }

            fragments.push(inline_literals_to_code_spans(&lines[i]));
            i += 1;
        }

        // Trim blank fragments at both ends of the excerpt.
        while fragments.first().is_some_and(|l| l.trim().is_empty()) {
            fragments.remove(0);
        }
        while fragments.last().is_some_and(|l| l.trim().is_empty()) {
            fragments.pop();
        }

        Ok(fragments)
    }
}

/// The repeated adornment character of a line, if the line is one.
fn adornment_char(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if !RST_ADORNMENTS.contains(first) || line.chars().count() < 2 {
        return None;
    }
    if chars.all(|c| c == first) {
        Some(first)
    } else {
        None
    }
}

/// Convert RST double-backtick inline literals to Markdown code spans.
fn inline_literals_to_code_spans(line: &str) -> String {
    if let Ok(re) = regex::Regex::new(r"``([^`]+)``") {
        re.replace_all(line, "`$1`").into_owned()
    } else {
        line.to_string()
    }
}
