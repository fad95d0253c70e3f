//! Approximate host-name lookup.

use crate::config::Configuration;

/// Whether every character of `pattern` appears in `candidate` in order,
/// ignoring case.
pub fn is_subsequence(pattern: &str, candidate: &str) -> bool {
    let mut rest = candidate.chars().flat_map(char::to_lowercase);
    pattern
        .chars()
        .flat_map(char::to_lowercase)
        .all(|wanted| rest.any(|c| c == wanted))
}

/// Edit distance between two strings, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let b_len = b.len();

    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Names containing `pattern` as a case-insensitive subsequence, closest
/// first. Ties are broken alphabetically.
pub fn rank_by_pattern<'a, I>(pattern: &str, names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = pattern.to_lowercase();
    let mut ranked: Vec<(usize, &str)> = names
        .into_iter()
        .filter(|name| is_subsequence(pattern, name))
        .map(|name| (levenshtein(&needle, &name.to_lowercase()), name))
        .collect();
    ranked.sort();
    ranked.into_iter().map(|(_, name)| name).collect()
}

impl Configuration {
    /// Host names approximately matching `pattern`, best match first.
    ///
    /// An empty pattern matches every host.
    pub fn find_by_pattern(&self, pattern: &str) -> Vec<String> {
        let found: Vec<String> = rank_by_pattern(pattern, self.host_names())
            .into_iter()
            .map(str::to_string)
            .collect();
        tracing::debug!(
            event = "core.resolve.find_completed",
            pattern = pattern,
            matches = found.len()
        );
        found
    }
}
