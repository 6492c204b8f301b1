use serde::{Deserialize, Serialize};

/// Persuasion strategy that governs which reply template is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Reciprocity,
    Scarcity,
    SocialProof,
    Anchoring,
    Authority,
    Commitment,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Self::Reciprocity,
        Self::Scarcity,
        Self::SocialProof,
        Self::Anchoring,
        Self::Authority,
        Self::Commitment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reciprocity => "reciprocity",
            Self::Scarcity => "scarcity",
            Self::SocialProof => "social_proof",
            Self::Anchoring => "anchoring",
            Self::Authority => "authority",
            Self::Commitment => "commitment",
        }
    }

    /// Every stage except the opener quotes the discounted offer price.
    pub fn quotes_price(self) -> bool {
        !matches!(self, Self::Reciprocity)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the selection rule that produced a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRuleId {
    FirstUserTurn,
    Hesitation,
    CuriousInterest,
    BuyReadiness,
    CatalogMatch,
    Fallback,
}

impl StageRuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstUserTurn => "first_user_turn",
            Self::Hesitation => "hesitation",
            Self::CuriousInterest => "curious_interest",
            Self::BuyReadiness => "buy_readiness",
            Self::CatalogMatch => "catalog_match",
            Self::Fallback => "fallback",
        }
    }
}
