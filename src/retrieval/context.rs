use super::ranker::ScoredDocument;

/// Per-note character budget in the context block.
pub const EXCERPT_CHARS: usize = 1200;

/// Render ranked notes as `[i] heading: content` entries separated by blank lines.
///
/// Each entry after the marker is cut to [`EXCERPT_CHARS`] characters, which may
/// land mid-word. The content is trimmed on both ends before the heading is
/// prepended, so leading spaces in a note never reach the block.
///
/// Returns the block and the raw title of every entry, so that marker `[i]`
/// belongs to `titles[i - 1]`.
pub fn assemble(ranked: &[ScoredDocument]) -> (String, Vec<String>) {
    let entries: Vec<String> = ranked
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let doc = &s.document;
            let entry = format!("{}: {}", doc.heading(), doc.content.trim());
            let excerpt: String = entry.trim_end().chars().take(EXCERPT_CHARS).collect();
            format!("[{}] {}", i + 1, excerpt)
        })
        .collect();

    let titles = ranked.iter().map(|s| s.document.title.clone()).collect();
    (entries.join("\n\n"), titles)
}
