pub mod selector;
pub mod signals;
pub mod stages;

pub use selector::{SelectionInput, StageDecision, StageRule, StageSelector};
pub use signals::{IntentClassifier, SignalKind, SignalPatterns, SignalSet};
pub use stages::{Stage, StageRuleId};
