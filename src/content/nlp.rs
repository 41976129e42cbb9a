// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Keyword and summary heuristics over extracted article text

use std::collections::{HashMap, HashSet};

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "could", "did", "does",
    "doing", "down", "during", "each", "even", "few", "for", "from", "further", "had", "has",
    "have", "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into",
    "its", "itself", "just", "many", "more", "most", "much", "must", "not", "now", "off", "once",
    "one", "only", "other", "our", "ours", "ourselves", "out", "over", "own", "said", "same",
    "says", "she", "should", "since", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "too",
    "under", "until", "upon", "very", "was", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves", "may", "might", "new", "like", "get", "got", "two", "use", "used", "way",
    "well", "year", "years", "within", "without", "yet", "per", "via",
];

/// Lowercase content words of `text`, in order
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 3)
        .map(str::to_lowercase)
        .filter(|w| !w.chars().all(|c| c.is_numeric()))
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
}

/// The `count` most frequent content words, ties broken by first appearance
pub fn keywords(text: &str, count: usize) -> Vec<String> {
    let mut frequencies: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in tokens(text).enumerate() {
        frequencies
            .entry(token)
            .and_modify(|(hits, _)| *hits += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<_> = frequencies.into_iter().collect();
    ranked.sort_by(|(_, (a_hits, a_pos)), (_, (b_hits, b_pos))| {
        b_hits.cmp(a_hits).then(a_pos.cmp(b_pos))
    });
    ranked.into_iter().take(count).map(|(word, _)| word).collect()
}

/// Split text into sentences on `.`, `!` or `?` followed by whitespace
pub fn sentences(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().map_or(true, |next| next.is_whitespace());
        if at_boundary {
            let sentence = current.trim();
            if !sentence.is_empty() {
                result.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        result.push(tail.to_string());
    }
    result
}

/// Pick the `count` sentences with the most keyword hits, kept in document order
pub fn summarize(text: &str, keywords: &[String], count: usize) -> String {
    let keyword_set: HashSet<&str> = keywords.iter().map(String::as_str).collect();
    let all = sentences(text);

    let mut scored: Vec<(usize, usize)> = all
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let hits = tokens(sentence)
                .filter(|t| keyword_set.contains(t.as_str()))
                .count();
            (index, hits)
        })
        .collect();
    scored.sort_by(|(a_idx, a_hits), (b_idx, b_hits)| b_hits.cmp(a_hits).then(a_idx.cmp(b_idx)));

    let mut chosen: Vec<usize> = scored.into_iter().take(count).map(|(i, _)| i).collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|i| all[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
