//! Aggregations over the attempt history.
//!
//! The heatmap and version deltas are plain reductions recomputed on demand
//! from the bounded attempt logs; nothing is maintained incrementally.

use serde::{Deserialize, Serialize};

use crate::model::{Attempt, QuestionCategory, WeaknessTag};

/// Per-category aggregate over the attempt log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryHeat {
    pub category: QuestionCategory,
    pub attempts: usize,
    /// Mean score, rounded.
    pub avg_score: u8,
    /// Most frequent weakness tag; first seen wins ties.
    pub top_weakness: Option<WeaknessTag>,
}

/// Group attempts by category, preserving first-encounter order.
pub fn heatmap(attempts: &[Attempt]) -> Vec<CategoryHeat> {
    let mut groups: Vec<(QuestionCategory, Vec<&Attempt>)> = Vec::new();
    for attempt in attempts {
        match groups.iter_mut().find(|(c, _)| *c == attempt.category) {
            Some((_, bucket)) => bucket.push(attempt),
            None => groups.push((attempt.category, vec![attempt])),
        }
    }

    groups
        .into_iter()
        .map(|(category, bucket)| {
            let total: u64 = bucket.iter().map(|a| u64::from(a.score)).sum();
            let avg_score = (total as f64 / bucket.len().max(1) as f64).round() as u8;

            let mut tag_counts: Vec<(WeaknessTag, usize)> = Vec::new();
            for attempt in &bucket {
                for tag in &attempt.weakness_tags {
                    match tag_counts.iter_mut().find(|(t, _)| t == tag) {
                        Some((_, count)) => *count += 1,
                        None => tag_counts.push((*tag, 1)),
                    }
                }
            }
            let mut top_weakness: Option<(WeaknessTag, usize)> = None;
            for (tag, count) in tag_counts {
                match top_weakness {
                    Some((_, best)) if count <= best => {}
                    _ => top_weakness = Some((tag, count)),
                }
            }

            CategoryHeat {
                category,
                attempts: bucket.len(),
                avg_score,
                top_weakness: top_weakness.map(|(tag, _)| tag),
            }
        })
        .collect()
}

/// The category with the lowest average score; first seen wins ties.
pub fn weakest_category(heat: &[CategoryHeat]) -> Option<&CategoryHeat> {
    let mut weakest: Option<&CategoryHeat> = None;
    for entry in heat {
        match weakest {
            Some(current) if entry.avg_score >= current.avg_score => {}
            _ => weakest = Some(entry),
        }
    }
    weakest
}

/// Latest-vs-previous comparison for one question's attempt history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDelta {
    pub latest: Attempt,
    pub previous: Attempt,
    pub score_delta: i64,
    pub word_delta: i64,
}

/// Compare the two most recent attempts in an oldest-first per-question log.
pub fn version_delta(attempts: &[Attempt]) -> Option<VersionDelta> {
    if attempts.len() < 2 {
        return None;
    }
    let latest = attempts[attempts.len() - 1].clone();
    let previous = attempts[attempts.len() - 2].clone();
    let score_delta = i64::from(latest.score) - i64::from(previous.score);
    let word_delta = latest.words as i64 - previous.words as i64;
    Some(VersionDelta {
        latest,
        previous,
        score_delta,
        word_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn attempt(category: QuestionCategory, score: u8, tags: &[WeaknessTag]) -> Attempt {
        Attempt {
            id: Uuid::new_v4(),
            question_id: "q".into(),
            question_text: "Q?".into(),
            category,
            score,
            words: 30,
            elapsed_secs: 30,
            answer: "answer".into(),
            weakness_tags: tags.to_vec(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn heatmap_groups_and_averages() {
        let log = vec![
            attempt(QuestionCategory::Moat, 80, &[WeaknessTag::Shallow]),
            attempt(QuestionCategory::Retention, 50, &[WeaknessTag::NoMetric]),
            attempt(QuestionCategory::Moat, 71, &[WeaknessTag::Shallow]),
        ];
        let heat = heatmap(&log);
        assert_eq!(heat.len(), 2);
        assert_eq!(heat[0].category, QuestionCategory::Moat);
        assert_eq!(heat[0].attempts, 2);
        assert_eq!(heat[0].avg_score, 76, "round(151/2)");
        assert_eq!(heat[0].top_weakness, Some(WeaknessTag::Shallow));
        assert_eq!(heat[1].category, QuestionCategory::Retention);
    }

    #[test]
    fn top_weakness_ties_go_to_first_seen() {
        let log = vec![
            attempt(QuestionCategory::Gtm, 60, &[WeaknessTag::TooShort]),
            attempt(QuestionCategory::Gtm, 60, &[WeaknessTag::NoMetric]),
        ];
        let heat = heatmap(&log);
        assert_eq!(heat[0].top_weakness, Some(WeaknessTag::TooShort));
    }

    #[test]
    fn weakest_category_is_minimum_average() {
        let log = vec![
            attempt(QuestionCategory::Moat, 80, &[]),
            attempt(QuestionCategory::Timing, 42, &[]),
            attempt(QuestionCategory::Retention, 42, &[]),
        ];
        let heat = heatmap(&log);
        let weakest = weakest_category(&heat).unwrap();
        // Timing comes first in the log, so it wins the tie with Retention.
        assert_eq!(weakest.category, QuestionCategory::Timing);
    }

    #[test]
    fn empty_log_has_no_heat() {
        assert!(heatmap(&[]).is_empty());
        assert!(weakest_category(&[]).is_none());
    }

    #[test]
    fn version_delta_needs_two_attempts() {
        let one = vec![attempt(QuestionCategory::Moat, 70, &[])];
        assert!(version_delta(&one).is_none());

        let two = vec![
            attempt(QuestionCategory::Moat, 60, &[]),
            attempt(QuestionCategory::Moat, 72, &[]),
        ];
        let delta = version_delta(&two).unwrap();
        assert_eq!(delta.score_delta, 12);
        assert_eq!(delta.word_delta, 0);
        assert_eq!(delta.latest.score, 72);
        assert_eq!(delta.previous.score, 60);
    }
}
