//! Industry challenge feed and the answer workspace.

mod catalog;
mod workspace;

pub use catalog::{
    ChallengeCard, ChallengeFeed, ChallengeFilter, SEED_CHALLENGES, build_feed, category_for,
    difficulty_label, seed_if_empty,
};
pub use workspace::{SubmittedAnswer, Workspace, WorkspaceError, WorkspaceView};
