use std::sync::Arc;

use pitchcraft_core::config::AppConfig;
use pitchcraft_core::domain::conversation::{Message, Transcript};
use pitchcraft_core::domain::customer::CustomerProfile;
use pitchcraft_core::domain::product::ProductId;
use pitchcraft_core::errors::ApplicationError;
use pitchcraft_core::funnel::selector::{SelectionInput, StageDecision, StageSelector};
use pitchcraft_core::funnel::signals::{IntentClassifier, SignalPatterns, SignalSet};
use pitchcraft_core::sales::catalog::{configured_source, Catalog};
use pitchcraft_core::sales::matcher::ProductMatcher;
use serde::Serialize;
use tracing::debug;

use crate::composer::{ComputedValues, ResponseComposer, COMMITMENT_OPTIONS};
use crate::random::{RandomSource, ThreadRandom};

/// Full outcome of one engine call. `message` is what the caller renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EngineReply {
    pub decision: StageDecision,
    pub signals: SignalSet,
    pub matched_products: Vec<ProductId>,
    pub lead_product: ProductId,
    #[serde(skip)]
    pub values: ComputedValues,
    pub message: String,
}

/// Stateless dialogue policy: classify, match, select a stage, compose.
///
/// Holds only read-only data plus a shareable random source, so one instance can serve
/// concurrent callers behind an `Arc`.
pub struct DialogueEngine {
    catalog: Catalog,
    classifier: IntentClassifier,
    matcher: ProductMatcher,
    selector: StageSelector,
    composer: ResponseComposer,
    random: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("catalog_size", &self.catalog.len())
            .field("selector", &self.selector)
            .finish()
    }
}

impl DialogueEngine {
    pub fn new(catalog: Catalog, patterns: SignalPatterns) -> Result<Self, ApplicationError> {
        Self::with_random(catalog, patterns, Arc::new(ThreadRandom))
    }

    pub fn with_random(
        catalog: Catalog,
        patterns: SignalPatterns,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, ApplicationError> {
        Ok(Self {
            catalog,
            classifier: IntentClassifier::new(patterns),
            matcher: ProductMatcher::new(),
            selector: StageSelector::default(),
            composer: ResponseComposer::new()?,
            random,
        })
    }

    pub fn builtin() -> Result<Self, ApplicationError> {
        Self::new(Catalog::builtin(), SignalPatterns::default())
    }

    /// Loads the configured catalog source and signal patterns.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let catalog = configured_source(config.catalog.path.as_deref()).load()?;
        Self::new(catalog, config.signals.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Opening line shown before the customer's first message.
    pub fn greeting(&self, profile: &CustomerProfile) -> Result<String, ApplicationError> {
        profile.validate()?;
        Ok(format!(
            "Hi {}! 👋 I'm your personal AI sales assistant. I'm here to help you discover \
             products and courses that perfectly match your needs. What brings you here today?",
            profile.name
        ))
    }

    pub fn respond(
        &self,
        messages: &[Message],
        profile: &CustomerProfile,
    ) -> Result<String, ApplicationError> {
        self.reply(messages, profile).map(|reply| reply.message)
    }

    pub fn reply(
        &self,
        messages: &[Message],
        profile: &CustomerProfile,
    ) -> Result<EngineReply, ApplicationError> {
        let transcript = Transcript::new(messages)?;
        profile.validate()?;

        let latest = transcript.latest_normalized();
        let signals = self.classifier.classify(&latest);
        let matched = self.matcher.matches(&self.catalog, &profile.interests, &latest);

        let decision = self.selector.select(&SelectionInput {
            transcript_len: transcript.len(),
            signals,
            matched_products: matched.len(),
        });

        let lead = matched.first().copied().unwrap_or_else(|| self.catalog.first());
        let composed = self.composer.compose(
            decision.stage,
            profile,
            lead,
            self.catalog.leading(COMMITMENT_OPTIONS),
            self.random.as_ref(),
        )?;

        debug!(
            event_name = "engine.reply_composed",
            stage = decision.stage.as_str(),
            rule = decision.rule.as_str(),
            transcript_len = transcript.len(),
            matched_products = matched.len(),
            lead_product = lead.id.0,
            "dialogue stage selected"
        );

        Ok(EngineReply {
            decision,
            signals,
            matched_products: matched.iter().map(|product| product.id).collect(),
            lead_product: lead.id,
            values: composed.values,
            message: composed.text,
        })
    }
}
