use crate::backend::{BackendError, Challenge};
use crate::queries::ChallengeQueries;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub struct SeedChallenge {
    pub id: &'static str,
    pub description: &'static str,
    pub difficulty: u32,
    pub estimated_time: u32,
}

pub const SEED_CHALLENGES: [SeedChallenge; 7] = [
    SeedChallenge {
        id: "url-shortener-design",
        description: "Design a URL Shortener Service\n\nDesign a scalable URL shortening service like bit.ly. Consider the data model, hashing strategy, redirect mechanism, and how you'd handle 100M+ URLs. What database would you choose and why?",
        difficulty: 2,
        estimated_time: 30,
    },
    SeedChallenge {
        id: "ride-sharing-db",
        description: "Choose the Right Database for Ride-Sharing\n\nA ride-sharing app needs to store driver locations (updated every 5s), trip history, and user profiles. Evaluate SQL vs NoSQL vs time-series databases. Justify your choice with trade-offs.",
        difficulty: 3,
        estimated_time: 45,
    },
    SeedChallenge {
        id: "cache-strategy",
        description: "Design a Caching Strategy for an E-Commerce Platform\n\nAn e-commerce site has slow product page loads. Design a multi-layer caching strategy using Redis. Address cache invalidation, TTL policies, and the thundering herd problem.",
        difficulty: 2,
        estimated_time: 25,
    },
    SeedChallenge {
        id: "api-rate-limiting",
        description: "Implement API Rate Limiting\n\nDesign a rate limiting system for a public REST API. Compare token bucket vs sliding window algorithms. How would you implement this in a distributed system with multiple API servers?",
        difficulty: 2,
        estimated_time: 20,
    },
    SeedChallenge {
        id: "algo-bst-vs-array",
        description: "BST vs Array: When Does It Matter?\n\nYou're building a leaderboard for a gaming platform with 10M players. Compare using a sorted array vs a BST vs a skip list for real-time rank queries and updates. Analyze time complexity for each operation.",
        difficulty: 1,
        estimated_time: 15,
    },
    SeedChallenge {
        id: "git-branching-strategy",
        description: "Design a Git Branching Strategy for a 50-Person Team\n\nA startup is scaling from 5 to 50 engineers. Compare GitFlow, trunk-based development, and GitHub Flow. Recommend a strategy and explain how it prevents merge conflicts and enables CI/CD.",
        difficulty: 1,
        estimated_time: 20,
    },
    SeedChallenge {
        id: "microservice-vs-monolith",
        description: "Monolith vs Microservices: Make the Call\n\nA fintech startup has a 2-year-old monolith with 200K LOC. The team wants to migrate to microservices. Analyze the trade-offs, identify which services to extract first, and describe the strangler fig pattern.",
        difficulty: 3,
        estimated_time: 40,
    },
];

/// Inserts the seed set when the backend holds no challenges. Individual
/// insert failures are skipped. Returns the refreshed list.
pub async fn seed_if_empty(queries: &ChallengeQueries) -> Result<Vec<Challenge>, BackendError> {
    if !queries.is_ready().await {
        return Err(BackendError::NotReady);
    }

    let existing = queries.all_challenges().await?;
    if !existing.is_empty() {
        return Ok(existing);
    }

    let mut added = 0;
    for seed in &SEED_CHALLENGES {
        match queries
            .add_challenge(seed.id, seed.description, seed.difficulty, seed.estimated_time)
            .await
        {
            Ok(()) => added += 1,
            Err(e) => debug!("Skipping seed {}: {}", seed.id, e),
        }
    }
    info!("Seeded {} challenges", added);

    queries.refetch().await
}

pub fn difficulty_label(difficulty: u32) -> &'static str {
    match difficulty {
        0 | 1 => "Beginner",
        2 => "Intermediate",
        _ => "Advanced",
    }
}

pub fn category_for(id: &str) -> &'static str {
    let has = |needles: &[&str]| needles.iter().any(|n| id.contains(n));

    if has(&["url", "shortener"]) {
        "System Design"
    } else if has(&["db", "database"]) {
        "Database"
    } else if has(&["cache", "redis"]) {
        "Caching"
    } else if has(&["api", "rest"]) {
        "API Design"
    } else if has(&["algo", "sort"]) {
        "Algorithms"
    } else if has(&["git", "version"]) {
        "DevOps"
    } else {
        "Architecture"
    }
}

/// First line of the description with leading `#` markers stripped.
pub fn title_of(description: &str) -> &str {
    description
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_start_matches('#')
        .trim_start()
}

/// Everything after the title line, trimmed.
pub fn body_of(description: &str) -> &str {
    description
        .split_once('\n')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default()
}

const ALL: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallengeFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Difficulty label, or `all`.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Category name, or `all`.
    #[serde(default)]
    pub category: Option<String>,
}

impl ChallengeFilter {
    pub fn matches(&self, challenge: &Challenge) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        let matches_search = search.is_empty()
            || challenge.description.to_lowercase().contains(&search)
            || challenge.id.to_lowercase().contains(&search);

        let matches_difficulty = match self.difficulty.as_deref() {
            None | Some(ALL) => true,
            Some(label) => difficulty_label(challenge.difficulty) == label,
        };

        let matches_category = match self.category.as_deref() {
            None | Some(ALL) => true,
            Some(category) => category_for(&challenge.id) == category,
        };

        matches_search && matches_difficulty && matches_category
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeCard {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub difficulty: u32,
    pub difficulty_label: &'static str,
    pub category: &'static str,
    pub estimated_time: u32,
}

impl From<&Challenge> for ChallengeCard {
    fn from(c: &Challenge) -> Self {
        let rest = c
            .description
            .split('\n')
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ");
        let rest = rest.trim();

        Self {
            id: c.id.clone(),
            title: title_of(&c.description).to_string(),
            summary: if rest.is_empty() {
                c.description.clone()
            } else {
                rest.to_string()
            },
            difficulty: c.difficulty,
            difficulty_label: difficulty_label(c.difficulty),
            category: category_for(&c.id),
            estimated_time: c.estimated_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeFeed {
    /// `all` followed by each category present, in first-seen order.
    pub categories: Vec<&'static str>,
    pub challenges: Vec<ChallengeCard>,
}

pub fn build_feed(all: &[Challenge], filter: &ChallengeFilter) -> ChallengeFeed {
    let mut categories = vec![ALL];
    for c in all {
        let category = category_for(&c.id);
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    ChallengeFeed {
        categories,
        challenges: all
            .iter()
            .filter(|c| filter.matches(c))
            .map(ChallengeCard::from)
            .collect(),
    }
}
