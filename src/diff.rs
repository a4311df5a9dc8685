use std::path::Path;

use similar::TextDiff;

/// Produce a unified diff between the original changelog and the staged
/// rewrite, for operator review before publishing.
///
/// Returns an empty string when the documents are identical; the caller
/// treats that as a warning since a real bump always changes at least the
/// two placeholder lines.
pub fn unified(original: &str, rewritten: &str, path: &Path) -> String {
    if original == rewritten {
        return String::new();
    }

    TextDiff::from_lines(original, rewritten)
        .unified_diff()
        .context_radius(3)
        .header(
            &format!("a/{}", path.display()),
            &format!("b/{}", path.display()),
        )
        .to_string()
}
