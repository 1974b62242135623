use crate::forge::store::{CognitiveProfile, ProfileRecord, SubmissionRecord};
use crate::forge::types::ImprovementEntry;
use serde::Serialize;

const DEFAULT_DISPLAY_NAME: &str = "Student";
const IMPROVEMENT_LOG_LEN: usize = 10;
const DASHBOARD_TAG_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagWeight {
    pub tag: String,
    /// Weight scaled to 0..100 and rounded.
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub needs_onboarding: bool,
    pub display_name: String,
    pub skill_level: Option<String>,
    pub streak: u32,
    pub total_submissions: u32,
    pub dominant_weakness: Option<String>,
    pub tags: Vec<TagWeight>,
    pub recent_submissions: Vec<SubmissionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub submission: usize,
    pub date: String,
    pub mistakes: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub radar: Vec<TagWeight>,
    pub bar: Vec<TagWeight>,
    pub timeline: Vec<TimelinePoint>,
    pub improvements: Vec<ImprovementEntry>,
}

fn percent(weight: f64) -> u32 {
    (weight * 100.0).round().clamp(0.0, u32::MAX as f64) as u32
}

fn unsorted_weights(cognitive: Option<&CognitiveProfile>) -> Vec<TagWeight> {
    cognitive
        .map(|c| {
            c.tag_weights
                .iter()
                .map(|(tag, w)| TagWeight {
                    tag: tag.clone(),
                    weight: percent(*w),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Heaviest first; ties keep tag order.
fn sorted_weights(cognitive: Option<&CognitiveProfile>) -> Vec<(String, f64)> {
    let mut weights: Vec<(String, f64)> = cognitive
        .map(|c| c.tag_weights.iter().map(|(t, w)| (t.clone(), *w)).collect())
        .unwrap_or_default();
    weights.sort_by(|a, b| b.1.total_cmp(&a.1));
    weights
}

pub fn build_dashboard(
    profile: &ProfileRecord,
    cognitive: Option<&CognitiveProfile>,
    recent_submissions: Vec<SubmissionRecord>,
) -> Dashboard {
    let sorted = sorted_weights(cognitive);
    let dominant_weakness = cognitive
        .and_then(|c| c.dominant_weakness.clone())
        .filter(|w| !w.is_empty())
        .or_else(|| sorted.first().map(|(tag, _)| tag.clone()));

    Dashboard {
        needs_onboarding: !profile.quiz_completed,
        display_name: profile
            .display_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        skill_level: profile.skill_level.clone(),
        streak: profile.streak_count,
        total_submissions: cognitive.map(|c| c.total_submissions).unwrap_or(0),
        dominant_weakness,
        tags: sorted
            .into_iter()
            .take(DASHBOARD_TAG_LIMIT)
            .map(|(tag, w)| TagWeight {
                tag,
                weight: percent(w),
            })
            .collect(),
        recent_submissions,
    }
}

/// `submissions` must be in ascending creation order.
pub fn build_analytics(
    cognitive: Option<&CognitiveProfile>,
    submissions: &[SubmissionRecord],
) -> Analytics {
    let mut bar = unsorted_weights(cognitive);
    bar.sort_by(|a, b| b.weight.cmp(&a.weight));

    let timeline = submissions
        .iter()
        .enumerate()
        .map(|(i, s)| TimelinePoint {
            submission: i + 1,
            date: s.created_at.format("%Y-%m-%d").to_string(),
            mistakes: s.mistake_tags.len(),
        })
        .collect();

    let improvements = cognitive
        .map(|c| {
            let history = &c.improvement_history;
            let start = history.len().saturating_sub(IMPROVEMENT_LOG_LEN);
            history[start..].iter().rev().cloned().collect()
        })
        .unwrap_or_default();

    Analytics {
        radar: unsorted_weights(cognitive),
        bar,
        timeline,
        improvements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::{MistakeTag, Severity};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn profile(completed: bool) -> ProfileRecord {
        ProfileRecord {
            user_id: "u1".to_string(),
            display_name: None,
            skill_level: completed.then(|| "beginner".to_string()),
            streak_count: 3,
            quiz_completed: completed,
            quiz_answers: Vec::new(),
        }
    }

    fn cognitive(weights: &[(&str, f64)], dominant: Option<&str>) -> CognitiveProfile {
        CognitiveProfile {
            user_id: "u1".to_string(),
            tag_weights: weights
                .iter()
                .map(|(t, w)| (t.to_string(), *w))
                .collect::<BTreeMap<_, _>>(),
            dominant_weakness: dominant.map(str::to_string),
            total_submissions: 12,
            improvement_history: (0..14)
                .map(|i| ImprovementEntry {
                    tag: format!("tag-{}", i),
                    from: 0.5,
                    to: 0.4,
                    date: None,
                })
                .collect(),
        }
    }

    fn submission(day: u32, tags: usize) -> SubmissionRecord {
        SubmissionRecord {
            id: format!("s{}", day),
            user_id: "u1".to_string(),
            language: "python".to_string(),
            code: "pass".to_string(),
            mistake_tags: (0..tags)
                .map(|_| MistakeTag {
                    tag: "off-by-one".to_string(),
                    explanation: String::new(),
                    severity: Severity::Low,
                    line_hint: None,
                })
                .collect(),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_dashboard_falls_back_to_heaviest_tag() {
        let cog = cognitive(&[("null-handling", 0.2), ("off-by-one", 0.734)], None);
        let dash = build_dashboard(&profile(true), Some(&cog), vec![submission(1, 0)]);

        assert!(!dash.needs_onboarding);
        assert_eq!(dash.display_name, "Student");
        assert_eq!(dash.streak, 3);
        assert_eq!(dash.total_submissions, 12);
        assert_eq!(dash.dominant_weakness.as_deref(), Some("off-by-one"));
        assert_eq!(
            dash.tags,
            vec![
                TagWeight {
                    tag: "off-by-one".to_string(),
                    weight: 73
                },
                TagWeight {
                    tag: "null-handling".to_string(),
                    weight: 20
                },
            ]
        );
        assert_eq!(dash.recent_submissions.len(), 1);
    }

    #[test]
    fn test_dashboard_keeps_heaviest_tags_only() {
        let weights: Vec<(String, f64)> = (0..12)
            .map(|i| (format!("tag-{:02}", i), i as f64 / 20.0))
            .collect();
        let refs: Vec<(&str, f64)> = weights.iter().map(|(t, w)| (t.as_str(), *w)).collect();
        let cog = cognitive(&refs, None);
        let dash = build_dashboard(&profile(true), Some(&cog), Vec::new());

        assert_eq!(dash.tags.len(), 8);
        assert_eq!(dash.tags[0].tag, "tag-11");
        assert_eq!(dash.tags[7].tag, "tag-04");
        assert!(dash.tags.windows(2).all(|w| w[0].weight >= w[1].weight));

        let analytics = build_analytics(Some(&cog), &[]);
        assert_eq!(analytics.bar.len(), 12);
    }

    #[test]
    fn test_dashboard_prefers_stored_weakness() {
        let cog = cognitive(&[("off-by-one", 0.9)], Some("scope-confusion"));
        let dash = build_dashboard(&profile(true), Some(&cog), Vec::new());
        assert_eq!(dash.dominant_weakness.as_deref(), Some("scope-confusion"));
    }

    #[test]
    fn test_dashboard_without_quiz() {
        let dash = build_dashboard(&profile(false), None, Vec::new());
        assert!(dash.needs_onboarding);
        assert_eq!(dash.total_submissions, 0);
        assert!(dash.dominant_weakness.is_none());
        assert!(dash.tags.is_empty());
    }

    #[test]
    fn test_analytics() {
        let cog = cognitive(&[("a-tag", 0.1), ("b-tag", 0.555), ("c-tag", 0.3)], None);
        let subs = vec![submission(1, 2), submission(4, 0), submission(9, 1)];
        let analytics = build_analytics(Some(&cog), &subs);

        let radar: Vec<(&str, u32)> = analytics
            .radar
            .iter()
            .map(|t| (t.tag.as_str(), t.weight))
            .collect();
        assert_eq!(radar, vec![("a-tag", 10), ("b-tag", 56), ("c-tag", 30)]);

        let bar: Vec<&str> = analytics.bar.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(bar, vec!["b-tag", "c-tag", "a-tag"]);

        assert_eq!(
            analytics.timeline[0],
            TimelinePoint {
                submission: 1,
                date: "2024-03-01".to_string(),
                mistakes: 2
            }
        );
        assert_eq!(analytics.timeline[2].submission, 3);
        assert_eq!(analytics.timeline[2].mistakes, 1);

        assert_eq!(analytics.improvements.len(), 10);
        assert_eq!(analytics.improvements[0].tag, "tag-13");
        assert_eq!(analytics.improvements[9].tag, "tag-4");
    }

    #[test]
    fn test_analytics_empty() {
        let analytics = build_analytics(None, &[]);
        assert!(analytics.radar.is_empty());
        assert!(analytics.timeline.is_empty());
        assert!(analytics.improvements.is_empty());
    }
}
