use crate::conflict::validator::{self, DiffLine, Validation};
use crate::conflict::{ConflictScenario, SCENARIOS, find_scenario};
use serde::Serialize;

/// Editing state for one learner working through the scenarios.
#[derive(Debug, Clone)]
pub struct ConflictTrainer {
    scenario: &'static ConflictScenario,
    merged: String,
    hints_shown: usize,
    validation: Validation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffView {
    pub base: Vec<DiffLine>,
    pub ours: Vec<DiffLine>,
    pub theirs: Vec<DiffLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSnapshot {
    pub scenario_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub diff: DiffView,
    pub merged: String,
    /// Whether the merged text still carries conflict markers.
    pub markers_remaining: bool,
    pub hints: Vec<&'static str>,
    pub hints_shown: usize,
    pub hint_total: usize,
    pub validation: Validation,
    /// Only present once the resolution is accepted.
    pub explanation: Option<&'static str>,
}

impl Default for ConflictTrainer {
    fn default() -> Self {
        Self::for_scenario(&SCENARIOS[0])
    }
}

impl ConflictTrainer {
    fn for_scenario(scenario: &'static ConflictScenario) -> Self {
        Self {
            scenario,
            merged: scenario.conflict_markers.to_string(),
            hints_shown: 0,
            validation: Validation::Idle,
        }
    }

    /// Switches scenario and restores the conflict text. Returns `false` for an unknown id.
    pub fn select(&mut self, id: &str) -> bool {
        match find_scenario(id) {
            Some(scenario) => {
                *self = Self::for_scenario(scenario);
                true
            }
            None => false,
        }
    }

    pub fn scenario_id(&self) -> &'static str {
        self.scenario.id
    }

    pub fn set_merged(&mut self, merged: &str) {
        self.merged = merged.to_string();
    }

    pub fn check(&mut self) -> Validation {
        self.validation = validator::validate(&self.merged, self.scenario.expected);
        self.validation
    }

    /// Reveals the next hint, if any remain.
    pub fn reveal_hint(&mut self) -> Option<&'static str> {
        let next = self.scenario.hints.get(self.hints_shown).copied()?;
        self.hints_shown += 1;
        Some(next)
    }

    pub fn reset(&mut self) {
        *self = Self::for_scenario(self.scenario);
    }

    pub fn snapshot(&self) -> TrainerSnapshot {
        let s = self.scenario;
        TrainerSnapshot {
            scenario_id: s.id,
            title: s.title,
            description: s.description,
            diff: DiffView {
                base: validator::classify_lines(s.base),
                ours: validator::classify_lines(s.ours),
                theirs: validator::classify_lines(s.theirs),
            },
            merged: self.merged.clone(),
            markers_remaining: validator::has_conflict_markers(&self.merged),
            hints: s.hints[..self.hints_shown].to_vec(),
            hints_shown: self.hints_shown,
            hint_total: s.hints.len(),
            validation: self.validation,
            explanation: (self.validation == Validation::Success).then_some(s.explanation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_first_scenario_with_markers() {
        let trainer = ConflictTrainer::default();
        let snap = trainer.snapshot();

        assert_eq!(snap.scenario_id, "variable-rename");
        assert_eq!(snap.merged, SCENARIOS[0].conflict_markers);
        assert!(snap.markers_remaining);
        assert_eq!(snap.validation, Validation::Idle);
        assert!(snap.hints.is_empty());
        assert!(snap.explanation.is_none());
    }

    #[test]
    fn test_hints_revealed_in_order_and_capped() {
        let mut trainer = ConflictTrainer::default();
        let total = SCENARIOS[0].hints.len();

        for i in 0..total {
            assert_eq!(trainer.reveal_hint(), Some(SCENARIOS[0].hints[i]));
        }
        assert_eq!(trainer.reveal_hint(), None);
        assert_eq!(trainer.snapshot().hints_shown, total);
    }

    #[test]
    fn test_check_and_explanation() {
        let mut trainer = ConflictTrainer::default();
        assert_eq!(trainer.check(), Validation::Error);

        trainer.set_merged(SCENARIOS[0].expected);
        assert!(!trainer.snapshot().markers_remaining);
        assert_eq!(trainer.check(), Validation::Success);
        assert_eq!(trainer.snapshot().explanation, Some(SCENARIOS[0].explanation));
    }

    #[test]
    fn test_select_and_reset_restore_state() {
        let mut trainer = ConflictTrainer::default();
        trainer.set_merged("edited");
        trainer.reveal_hint();
        trainer.check();

        assert!(trainer.select("logic-divergence"));
        let snap = trainer.snapshot();
        assert_eq!(snap.merged, SCENARIOS[1].conflict_markers);
        assert_eq!(snap.hints_shown, 0);
        assert_eq!(snap.validation, Validation::Idle);

        trainer.set_merged("edited again");
        trainer.reveal_hint();
        trainer.reset();
        let snap = trainer.snapshot();
        assert_eq!(snap.scenario_id, "logic-divergence");
        assert_eq!(snap.merged, SCENARIOS[1].conflict_markers);
        assert_eq!(snap.hints_shown, 0);

        assert!(!trainer.select("no-such-scenario"));
        assert_eq!(trainer.snapshot().scenario_id, "logic-divergence");
    }
}
