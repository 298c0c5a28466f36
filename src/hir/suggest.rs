//! Near-miss suggestions by edit distance.

use smol_str::SmolStr;

/// A candidate replacement for an unresolved name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub text: SmolStr,
    pub distance: usize,
}

/// Levenshtein distance between two strings, ignoring ASCII case.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().map(|c| c.to_ascii_lowercase()).collect();
    let b: Vec<char> = b.chars().map(|c| c.to_ascii_lowercase()).collect();
    if a.is_empty() {
        return b.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Case-insensitive ordering used wherever names are listed.
pub fn compare_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_ascii_lowercase()
        .cmp(&b.to_ascii_lowercase())
        .then_with(|| a.cmp(b))
}

/// Candidates within `max_distance` of `query`, nearest first, ties broken
/// lexicographically, at most `limit` of them.
pub fn rank<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
    limit: usize,
) -> Vec<Suggestion> {
    let mut found: Vec<Suggestion> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(query, candidate);
            (distance <= max_distance).then(|| Suggestion {
                text: SmolStr::new(candidate),
                distance,
            })
        })
        .collect();
    found.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| compare_names(&a.text, &b.text))
    });
    found.dedup_by(|a, b| a.text == b.text);
    found.truncate(limit);
    found
}
