use serde::{Deserialize, Serialize};

/// Intent flags derived from the latest message. Flags are independent and may overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub is_question: bool,
    pub shows_interest: bool,
    pub shows_hesitation: bool,
    pub ready_to_buy: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Question,
    Interest,
    Hesitation,
    Buy,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [Self::Question, Self::Interest, Self::Hesitation, Self::Buy];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Interest => "interest",
            Self::Hesitation => "hesitation",
            Self::Buy => "buy",
        }
    }
}

/// Trigger phrases per signal. A signal fires when the lowercased message contains any of
/// its phrases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPatterns {
    pub question: Vec<String>,
    pub interest: Vec<String>,
    pub hesitation: Vec<String>,
    pub buy: Vec<String>,
}

impl Default for SignalPatterns {
    fn default() -> Self {
        Self {
            question: phrases(&["?"]),
            interest: phrases(&["interest", "want", "need", "looking", "help", "tell me"]),
            hesitation: phrases(&["not sure", "maybe", "expensive", "think about", "later"]),
            buy: phrases(&["buy", "purchase", "get", "how much", "price", "checkout"]),
        }
    }
}

impl SignalPatterns {
    pub fn phrases(&self, kind: SignalKind) -> &[String] {
        match kind {
            SignalKind::Question => &self.question,
            SignalKind::Interest => &self.interest,
            SignalKind::Hesitation => &self.hesitation,
            SignalKind::Buy => &self.buy,
        }
    }

    pub fn phrases_mut(&mut self, kind: SignalKind) -> &mut Vec<String> {
        match kind {
            SignalKind::Question => &mut self.question,
            SignalKind::Interest => &mut self.interest,
            SignalKind::Hesitation => &mut self.hesitation,
            SignalKind::Buy => &mut self.buy,
        }
    }

    /// Returns the first signal whose phrase list is empty or contains only blanks.
    pub fn first_empty(&self) -> Option<SignalKind> {
        SignalKind::ALL.into_iter().find(|kind| {
            self.phrases(*kind).iter().all(|phrase| phrase.trim().is_empty())
        })
    }

    fn normalized(&self) -> Self {
        let lower = |list: &[String]| {
            list.iter()
                .filter(|phrase| !phrase.trim().is_empty())
                .map(|phrase| phrase.to_lowercase())
                .collect::<Vec<_>>()
        };
        Self {
            question: lower(&self.question),
            interest: lower(&self.interest),
            hesitation: lower(&self.hesitation),
            buy: lower(&self.buy),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct IntentClassifier {
    patterns: SignalPatterns,
}

impl IntentClassifier {
    pub fn new(patterns: SignalPatterns) -> Self {
        Self { patterns: patterns.normalized() }
    }

    pub fn patterns(&self) -> &SignalPatterns {
        &self.patterns
    }

    pub fn classify(&self, message: &str) -> SignalSet {
        let normalized = message.to_lowercase();
        SignalSet {
            is_question: self.fires(SignalKind::Question, &normalized),
            shows_interest: self.fires(SignalKind::Interest, &normalized),
            shows_hesitation: self.fires(SignalKind::Hesitation, &normalized),
            ready_to_buy: self.fires(SignalKind::Buy, &normalized),
        }
    }

    /// Phrases that fired, for diagnostics.
    pub fn matched_phrases(&self, kind: SignalKind, message: &str) -> Vec<&str> {
        let normalized = message.to_lowercase();
        self.patterns
            .phrases(kind)
            .iter()
            .filter(|phrase| normalized.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }

    fn fires(&self, kind: SignalKind, normalized: &str) -> bool {
        self.patterns.phrases(kind).iter().any(|phrase| normalized.contains(phrase.as_str()))
    }
}

fn phrases(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{IntentClassifier, SignalKind, SignalPatterns, SignalSet};

    #[test]
    fn question_mark_marks_a_question() {
        let signals = IntentClassifier::default().classify("Is this for beginners?");
        assert!(signals.is_question);
        assert!(!signals.shows_hesitation);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let signals = IntentClassifier::default().classify("I'm LOOKING for something");
        assert_eq!(signals, SignalSet { shows_interest: true, ..SignalSet::default() });
    }

    #[test]
    fn flags_can_overlap() {
        let signals =
            IntentClassifier::default().classify("Maybe later? I want it but the price is high");
        assert_eq!(
            signals,
            SignalSet {
                is_question: true,
                shows_interest: true,
                shows_hesitation: true,
                ready_to_buy: true,
            }
        );
    }

    #[test]
    fn substring_matching_is_literal() {
        // "together" contains "get"
        let signals = IntentClassifier::default().classify("let's work together");
        assert!(signals.ready_to_buy);
    }

    #[test]
    fn plain_greeting_has_no_signals() {
        assert_eq!(IntentClassifier::default().classify("hi"), SignalSet::default());
    }

    #[test]
    fn custom_patterns_replace_defaults() {
        let mut patterns = SignalPatterns::default();
        *patterns.phrases_mut(SignalKind::Hesitation) = vec!["Pricey".to_string()];
        let classifier = IntentClassifier::new(patterns);

        assert!(classifier.classify("that's pricey").shows_hesitation);
        assert!(!classifier.classify("too expensive").shows_hesitation);
    }

    #[test]
    fn whitespace_only_phrases_never_fire() {
        let mut patterns = SignalPatterns::default();
        patterns.interest = vec!["want".to_string(), " ".to_string(), "\t".to_string()];
        let classifier = IntentClassifier::new(patterns);

        assert_eq!(classifier.patterns().interest, vec!["want"]);
        assert!(!classifier.classify("tell us more please").shows_interest);
        assert!(classifier.classify("I want that").shows_interest);
    }

    #[test]
    fn matched_phrases_lists_every_hit() {
        let classifier = IntentClassifier::default();
        assert_eq!(
            classifier.matched_phrases(SignalKind::Buy, "How much to buy? What's the price?"),
            vec!["buy", "how much", "price"]
        );
    }

    #[test]
    fn empty_phrase_lists_are_reported() {
        let mut patterns = SignalPatterns::default();
        assert_eq!(patterns.first_empty(), None);

        patterns.interest = vec![" ".to_string()];
        assert_eq!(patterns.first_empty(), Some(SignalKind::Interest));
    }
}
