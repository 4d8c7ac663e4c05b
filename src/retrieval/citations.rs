use std::collections::HashSet;

/// Distinct `[n]` markers in `answer` with `1 <= n <= source_count`, in order of first appearance.
///
/// Anything else in brackets (`[x]`, `[+1]`, `[0]`, `[12]` with only 6 sources) is
/// ignored. Only ASCII digits count, optionally padded with spaces.
pub fn cited_indices(answer: &str, source_count: usize) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut cited = Vec::new();

    let mut rest = answer;
    while let Some(open) = rest.find('[') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find(']') else {
            break;
        };
        let inner = rest[..close].trim();
        if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(n) = inner.parse::<usize>() {
            if (1..=source_count).contains(&n) && seen.insert(n) {
                cited.push(n);
            }
        }
    }

    cited
}
