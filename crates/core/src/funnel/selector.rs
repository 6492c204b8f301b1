use serde::{Deserialize, Serialize};

use crate::funnel::signals::SignalSet;
use crate::funnel::stages::{Stage, StageRuleId};

/// Everything stage selection looks at. Recomputed from the transcript on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionInput {
    pub transcript_len: usize,
    pub signals: SignalSet,
    pub matched_products: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDecision {
    pub stage: Stage,
    pub rule: StageRuleId,
}

#[derive(Clone, Copy)]
pub struct StageRule {
    pub id: StageRuleId,
    pub stage: Stage,
    pub predicate: fn(&SelectionInput) -> bool,
}

impl std::fmt::Debug for StageRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRule").field("id", &self.id).field("stage", &self.stage).finish()
    }
}

impl StageRule {
    pub fn applies(&self, input: &SelectionInput) -> bool {
        (self.predicate)(input)
    }
}

/// Greeting plus the first user reply.
pub const FIRST_USER_TURN_LEN: usize = 2;

/// First-match-wins decision table over [`SelectionInput`].
#[derive(Clone, Debug)]
pub struct StageSelector {
    rules: Vec<StageRule>,
}

impl Default for StageSelector {
    fn default() -> Self {
        Self::with_rules(default_rules())
    }
}

impl StageSelector {
    pub fn with_rules(rules: Vec<StageRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[StageRule] {
        &self.rules
    }

    pub fn select(&self, input: &SelectionInput) -> StageDecision {
        self.rules
            .iter()
            .find(|rule| rule.applies(input))
            .map(|rule| StageDecision { stage: rule.stage, rule: rule.id })
            .unwrap_or(StageDecision { stage: Stage::Commitment, rule: StageRuleId::Fallback })
    }
}

pub fn default_rules() -> Vec<StageRule> {
    vec![
        StageRule {
            id: StageRuleId::FirstUserTurn,
            stage: Stage::Reciprocity,
            predicate: |input| input.transcript_len == FIRST_USER_TURN_LEN,
        },
        StageRule {
            id: StageRuleId::Hesitation,
            stage: Stage::Scarcity,
            predicate: |input| input.signals.shows_hesitation,
        },
        StageRule {
            id: StageRuleId::CuriousInterest,
            stage: Stage::SocialProof,
            predicate: |input| input.signals.is_question && input.signals.shows_interest,
        },
        StageRule {
            id: StageRuleId::BuyReadiness,
            stage: Stage::Anchoring,
            predicate: |input| input.signals.ready_to_buy,
        },
        StageRule {
            id: StageRuleId::CatalogMatch,
            stage: Stage::Authority,
            predicate: |input| input.matched_products > 0,
        },
        StageRule { id: StageRuleId::Fallback, stage: Stage::Commitment, predicate: |_| true },
    ]
}

#[cfg(test)]
mod tests {
    use super::{SelectionInput, StageDecision, StageRule, StageSelector};
    use crate::funnel::signals::SignalSet;
    use crate::funnel::stages::{Stage, StageRuleId};

    fn all_signals() -> SignalSet {
        SignalSet {
            is_question: true,
            shows_interest: true,
            shows_hesitation: true,
            ready_to_buy: true,
        }
    }

    fn input(transcript_len: usize, signals: SignalSet, matched_products: usize) -> SelectionInput {
        SelectionInput { transcript_len, signals, matched_products }
    }

    #[test]
    fn rule_order_is_fixed() {
        let stages =
            StageSelector::default().rules().iter().map(|rule| rule.stage).collect::<Vec<_>>();
        assert_eq!(stages, Stage::ALL.to_vec());
    }

    #[test]
    fn first_user_turn_wins_over_every_signal() {
        for matched in [0, 3] {
            for signals in [SignalSet::default(), all_signals()] {
                let decision = StageSelector::default().select(&input(2, signals, matched));
                assert_eq!(decision.stage, Stage::Reciprocity);
                assert_eq!(decision.rule, StageRuleId::FirstUserTurn);
            }
        }
    }

    #[test]
    fn hesitation_beats_question_interest_and_buying() {
        let decision = StageSelector::default().select(&input(4, all_signals(), 2));
        assert_eq!(decision.stage, Stage::Scarcity);
    }

    #[test]
    fn question_needs_interest_for_social_proof() {
        let selector = StageSelector::default();
        let curious = SignalSet { is_question: true, shows_interest: true, ..SignalSet::default() };
        let question_only = SignalSet { is_question: true, ..SignalSet::default() };

        assert_eq!(selector.select(&input(5, curious, 0)).stage, Stage::SocialProof);
        assert_eq!(selector.select(&input(5, question_only, 0)).stage, Stage::Commitment);
        assert_eq!(selector.select(&input(5, question_only, 1)).stage, Stage::Authority);
    }

    #[test]
    fn buy_readiness_beats_catalog_match() {
        let buying = SignalSet { ready_to_buy: true, ..SignalSet::default() };
        let decision = StageSelector::default().select(&input(6, buying, 2));
        assert_eq!(
            decision,
            StageDecision { stage: Stage::Anchoring, rule: StageRuleId::BuyReadiness }
        );
    }

    #[test]
    fn nothing_matched_falls_back_to_commitment() {
        let decision = StageSelector::default().select(&input(3, SignalSet::default(), 0));
        assert_eq!(decision.stage, Stage::Commitment);
        assert_eq!(decision.rule, StageRuleId::Fallback);
    }

    #[test]
    fn single_message_transcript_is_not_a_first_turn() {
        let decision = StageSelector::default().select(&input(1, SignalSet::default(), 0));
        assert_eq!(decision.stage, Stage::Commitment);
    }

    #[test]
    fn empty_rule_table_still_terminates() {
        let selector = StageSelector::with_rules(Vec::<StageRule>::new());
        let decision = selector.select(&input(2, all_signals(), 1));
        assert_eq!(decision.stage, Stage::Commitment);
    }

    #[test]
    fn selection_is_idempotent() {
        let selector = StageSelector::default();
        let decision_input = input(7, SignalSet { ready_to_buy: true, ..SignalSet::default() }, 1);
        assert_eq!(selector.select(&decision_input), selector.select(&decision_input));
    }
}
