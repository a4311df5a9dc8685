use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// Placeholder for the next version in underscore notation (anchor labels).
pub const UNDERSCORE_PLACEHOLDER: &str = "x_x_x";

/// Placeholder for the next version in dotted notation (section title).
pub const DOT_PLACEHOLDER: &str = "x.x.x";

/// Character used for RST section-title underlines in the changelog.
pub const UNDERLINE_CHAR: char = '=';

/// Rewrite the changelog placeholders with a concrete version.
///
/// Scans in document order and rewrites the first line containing each
/// placeholder: `x_x_x` becomes `major_minor_patch` and `x.x.x` becomes
/// `major.minor.patch`. The line after the dotted title is regenerated as an
/// `=` underline matching the rewritten title's character count.
///
/// Requires a three-level version; the placeholders hard-code three
/// components even though [Version] itself supports any level count.
///
/// Returns a fresh line sequence and never mutates the input, so the
/// original stays available for diffing.
pub fn rewrite(lines: &[String], version: &Version) -> Result<Vec<String>> {
    let components = version.components();
    if components.len() != 3 {
        return Err(ReleaseError::format(format!(
            "Changelog rewrite requires a three-level version, got {} levels",
            components.len()
        )));
    }

    let underscored = format!("{}_{}_{}", components[0], components[1], components[2]);
    let dotted = format!("{}.{}.{}", components[0], components[1], components[2]);

    let mut rewritten: Vec<String> = lines.to_vec();

    let i_ref = rewritten
        .iter()
        .position(|l| l.contains(UNDERSCORE_PLACEHOLDER))
        .ok_or_else(|| ReleaseError::placeholder(UNDERSCORE_PLACEHOLDER))?;
    rewritten[i_ref] = rewritten[i_ref].replace(UNDERSCORE_PLACEHOLDER, &underscored);

    let i_title = rewritten
        .iter()
        .position(|l| l.contains(DOT_PLACEHOLDER))
        .ok_or_else(|| ReleaseError::placeholder(DOT_PLACEHOLDER))?;
    rewritten[i_title] = rewritten[i_title].replace(DOT_PLACEHOLDER, &dotted);

    if i_title + 1 >= rewritten.len() {
        return Err(ReleaseError::placeholder(format!(
            "no underline after title '{}'",
            rewritten[i_title]
        )));
    }
    let title_len = rewritten[i_title].chars().count();
    rewritten[i_title + 1] = UNDERLINE_CHAR.to_string().repeat(title_len);

    Ok(rewritten)
}

/// Read a changelog document as terminator-free lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write a line sequence back out with a trailing newline.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}
