pub mod challenges;
pub mod cognitive_profiles;
pub mod mentor_responses;
pub mod profiles;
pub mod submissions;
