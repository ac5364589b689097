//! Linear semantic search and keyword filtering.
//!
//! The corpus is small and static, so there is no index structure: a query is
//! scored against every paragraph vector independently, O(n*d) per query.

use crate::transcription::Paragraph;

/// Maximum number of keyword search results returned.
pub const KEYWORD_RESULT_CAP: usize = 100;

/// A corpus position with its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub index: usize,
    pub score: f32,
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm, when lengths differ, or
/// when the vectors are empty. The zero-norm case is policy, not an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Score a query vector against every corpus vector and return the top K
/// positions, ranked by descending similarity.
///
/// The sort is stable, so equal scores retain ascending index order.
pub fn rank(query: &[f32], corpus: &[Vec<f32>], top_k: usize) -> Vec<Scored> {
    let mut scored: Vec<Scored> = corpus
        .iter()
        .enumerate()
        .map(|(index, embedding)| Scored {
            index,
            score: cosine_similarity(query, embedding),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);

    scored
}

/// A keyword search hit, carrying the paragraph's original position.
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatch<'a> {
    pub index: usize,
    pub paragraph: &'a Paragraph,
}

/// Case-insensitive substring search over paragraph text.
///
/// An empty query term matches every paragraph. The speaker filter is exact:
/// a paragraph without a speaker never matches a non-null filter. Scanning
/// stops once `cap` results are collected.
pub fn keyword_search<'a>(
    paragraphs: &'a [Paragraph],
    query: &str,
    speaker: Option<u32>,
    cap: usize,
) -> Vec<KeywordMatch<'a>> {
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for (index, paragraph) in paragraphs.iter().enumerate() {
        if let Some(filter) = speaker {
            if paragraph.speaker != Some(filter) {
                continue;
            }
        }
        if !needle.is_empty() && !paragraph.text.to_lowercase().contains(&needle) {
            continue;
        }

        results.push(KeywordMatch { index, paragraph });
        if results.len() >= cap {
            break;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(speaker: Option<u32>, text: &str) -> Paragraph {
        Paragraph {
            speaker,
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cosine_similarity_basic() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.3, 0.7, 0.1];
        let b = vec![0.9, 0.2, 0.4];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_rank_ordering() {
        let corpus = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.9, 0.1]];
        let ranked = rank(&[1.0, 0.0], &corpus, 10);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].index, 0);
        assert!((ranked[0].score - 1.0).abs() < 0.001);
        assert_eq!(ranked[1].index, 2);
        assert!((ranked[1].score - 0.994).abs() < 0.001);
        assert_eq!(ranked[2].index, 1);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_rank_ties_keep_index_order() {
        // Identical vectors score identically; ties must come back in
        // ascending index order.
        let corpus = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]];
        let ranked = rank(&[1.0, 0.0], &corpus, 10);

        let indices: Vec<usize> = ranked.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_rank_truncates_to_top_k() {
        let corpus = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let ranked = rank(&[1.0], &corpus, 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_rank_repeated_runs_identical() {
        let corpus = vec![vec![0.5, 0.5], vec![0.5, 0.5], vec![0.1, 0.9]];
        let query = vec![0.7, 0.3];
        let first = rank(&query, &corpus, 10);
        let second = rank(&query, &corpus, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyword_search_case_insensitive() {
        let paragraphs = vec![
            paragraph(Some(0), "Money was discussed"),
            paragraph(Some(1), "Nothing relevant"),
        ];

        let results = keyword_search(&paragraphs, "money", None, KEYWORD_RESULT_CAP);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 0);
    }

    #[test]
    fn test_keyword_search_speaker_filter() {
        let paragraphs = vec![
            paragraph(Some(0), "the deal"),
            paragraph(Some(1), "the deal"),
            paragraph(None, "the deal"),
        ];

        let results = keyword_search(&paragraphs, "deal", Some(1), KEYWORD_RESULT_CAP);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 1);
    }

    #[test]
    fn test_keyword_search_absent_speaker_never_matches_filter() {
        let paragraphs = vec![paragraph(None, "the deal")];
        let results = keyword_search(&paragraphs, "deal", Some(0), KEYWORD_RESULT_CAP);
        assert!(results.is_empty());
    }

    #[test]
    fn test_keyword_search_empty_query_matches_all() {
        let paragraphs = vec![paragraph(Some(0), "a"), paragraph(Some(1), "b")];
        let results = keyword_search(&paragraphs, "", None, KEYWORD_RESULT_CAP);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_keyword_search_no_match() {
        let paragraphs = vec![paragraph(Some(0), "hello world")];
        let results = keyword_search(&paragraphs, "xyz123notfound", None, KEYWORD_RESULT_CAP);
        assert!(results.is_empty());
    }

    #[test]
    fn test_keyword_search_cap_short_circuits() {
        let paragraphs: Vec<Paragraph> =
            (0..10).map(|i| paragraph(Some(0), &format!("item {}", i))).collect();

        let results = keyword_search(&paragraphs, "item", None, 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].index, 2);
    }
}
