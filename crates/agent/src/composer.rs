//! Stage templates and the values they are rendered with.
//!
//! Every stage owns exactly one template. Templates are registered once when the composer
//! is built; rendering only fills placeholders, so the text is a pure function of
//! (stage, profile, products, computed values).

use std::ops::RangeInclusive;

use pitchcraft_core::domain::customer::CustomerProfile;
use pitchcraft_core::domain::product::{Product, ProductCategory};
use pitchcraft_core::errors::ApplicationError;
use pitchcraft_core::funnel::stages::Stage;
use pitchcraft_core::sales::pricing::{anchor_price, discounted_price};
use serde::Serialize;
use tera::{Context, Tera};

use crate::random::RandomSource;

/// Inclusive bounds of the "spots remaining" figure quoted by the scarcity reply.
pub const SCARCITY_RANGE: RangeInclusive<u32> = 5..=19;

/// Number of catalog items listed by the commitment reply.
pub const COMMITMENT_OPTIONS: usize = 3;

const RECIPROCITY: &str = "{{ name }}, I appreciate you taking the time to chat! Let me share \
something valuable with you right away. Based on your interests, I have some exciting options \
that could really transform your journey.

Before we dive in, may I ask - what's your biggest challenge or goal right now? This will help \
me recommend the perfect solution for you. 🎯";

const SCARCITY: &str = "I completely understand wanting to take your time, {{ name }}. However, \
I should mention - we have a limited-time offer running this week. Our {{ product.name }} is \
available for just ${{ discounted_price }} with a special 30% discount, but only \
{{ scarcity_count }} spots remain at this price.

Many of our successful students/customers wished they'd started sooner. What specific \
concerns can I address to help you make the best decision? 🤔";

const SOCIAL_PROOF: &str = "Great question, {{ name }}! I love your curiosity. 🌟

Our {{ product.name }} has helped over 5,000+ people achieve incredible results. Just last \
week, Sarah M. shared how she {{ success_story }} within 3 months of starting.

{{ product.description }}

✨ What you get:
{% for benefit in product.benefits %}• {{ benefit }}
{% endfor %}
Regular price: ${{ list_price }} | Your price today: ${{ discounted_price }}

What aspect interests you most? I can dive deeper into specifics! 💪";

const ANCHORING: &str = "Fantastic decision, {{ name }}! I'm excited for your journey ahead! 🎉

Here's what makes this a no-brainer:

Most people spend ${{ anchor_price }}+ trying to figure this out themselves. Our \
{{ product.name }} gives you the exact blueprint for just ${{ discounted_price }} \
(30% off today only).

{% for benefit in product.benefits %}✅ {{ benefit }}
{% endfor %}
🎁 BONUS: Order in the next 30 minutes and get our premium bonus package (worth $199) \
absolutely FREE!

Ready to secure your spot? Click here to get started: [Checkout Link]

P.S. - Our 60-day money-back guarantee means zero risk. If you're not thrilled, full refund - \
no questions asked! 💯";

const AUTHORITY: &str = "{{ name }}, based on what you've shared, I have the perfect \
recommendation that aligns with your goals! 🎯

**{{ product.name }}** - This is our bestseller for people exactly like you.

{{ product.description }}

Here's why it's perfect:
{% for benefit in product.benefits %}{{ loop.index }}. {{ benefit }}
{% endfor %}
💰 Investment: ~~${{ list_price }}~~ → Only ${{ discounted_price }} (Limited time)

Over 1,000 five-star reviews! Our customers report an average 10x ROI within 6 months.

Would you like to see some success stories, or shall we get you started right away? 🚀";

const COMMITMENT: &str = "I love your interest, {{ name }}! Let me ask you this - imagine it's \
6 months from now, and you've achieved your biggest goal. How would that feel? 🌟

I'm asking because I want to make sure we match you with the perfect solution. We have \
several options:

{% for option in options %}{{ loop.index }}. **{{ option.name }}** - {{ option.description }} \
({{ option.category_label }}) - Special price: ${{ option.discounted_price }}

{% endfor %}Which one resonates most with your goals? I can provide more details on any of \
these! 💪";

fn template_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Reciprocity => "reciprocity.txt",
        Stage::Scarcity => "scarcity.txt",
        Stage::SocialProof => "social_proof.txt",
        Stage::Anchoring => "anchoring.txt",
        Stage::Authority => "authority.txt",
        Stage::Commitment => "commitment.txt",
    }
}

fn template_body(stage: Stage) -> &'static str {
    match stage {
        Stage::Reciprocity => RECIPROCITY,
        Stage::Scarcity => SCARCITY,
        Stage::SocialProof => SOCIAL_PROOF,
        Stage::Anchoring => ANCHORING,
        Stage::Authority => AUTHORITY,
        Stage::Commitment => COMMITMENT,
    }
}

pub fn success_story(category: ProductCategory) -> &'static str {
    match category {
        ProductCategory::Course => "landed her dream job",
        ProductCategory::Product => "scaled her business to 6 figures",
    }
}

/// Numbers that are computed rather than copied from the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ComputedValues {
    /// `None` for the reciprocity stage, which never quotes a price.
    pub discounted_price: Option<u32>,
    /// Only drawn for the scarcity stage.
    pub scarcity_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedReply {
    pub stage: Stage,
    pub values: ComputedValues,
    pub text: String,
}

#[derive(Serialize)]
struct ProductView<'a> {
    name: &'a str,
    description: &'a str,
    benefits: &'a [String],
}

#[derive(Serialize)]
struct OptionView<'a> {
    name: &'a str,
    description: &'a str,
    category_label: &'static str,
    discounted_price: u32,
}

#[derive(Serialize)]
struct ReplyContext<'a> {
    name: &'a str,
    product: ProductView<'a>,
    success_story: &'static str,
    list_price: u32,
    anchor_price: u64,
    discounted_price: Option<u32>,
    scarcity_count: Option<u32>,
    options: Vec<OptionView<'a>>,
}

pub struct ResponseComposer {
    templates: Tera,
}

impl std::fmt::Debug for ResponseComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseComposer")
            .field("templates", &self.templates.get_template_names().count())
            .finish()
    }
}

impl ResponseComposer {
    pub fn new() -> Result<Self, ApplicationError> {
        let mut templates = Tera::default();
        templates
            .add_raw_templates(
                Stage::ALL.into_iter().map(|stage| (template_name(stage), template_body(stage))),
            )
            .map_err(|error| ApplicationError::Rendering(error.to_string()))?;
        Ok(Self { templates })
    }

    /// Draws the computed values for `stage` and renders its template.
    ///
    /// `lead` is the first matched product, already resolved to the catalog fallback when
    /// nothing matched. `options` is only read by the commitment template.
    pub fn compose(
        &self,
        stage: Stage,
        profile: &CustomerProfile,
        lead: &Product,
        options: &[Product],
        random: &dyn RandomSource,
    ) -> Result<ComposedReply, ApplicationError> {
        let values = ComputedValues {
            discounted_price: stage.quotes_price().then(|| discounted_price(lead.price)),
            scarcity_count: (stage == Stage::Scarcity)
                .then(|| random.next_in_range(SCARCITY_RANGE)),
        };
        let text = self.render(stage, profile, lead, options, &values)?;
        Ok(ComposedReply { stage, values, text })
    }

    pub fn render(
        &self,
        stage: Stage,
        profile: &CustomerProfile,
        lead: &Product,
        options: &[Product],
        values: &ComputedValues,
    ) -> Result<String, ApplicationError> {
        let reply = ReplyContext {
            name: &profile.name,
            product: ProductView {
                name: &lead.name,
                description: &lead.description,
                benefits: &lead.benefits,
            },
            success_story: success_story(lead.category),
            list_price: lead.price,
            anchor_price: anchor_price(lead.price),
            discounted_price: values.discounted_price,
            scarcity_count: values.scarcity_count,
            options: options
                .iter()
                .take(COMMITMENT_OPTIONS)
                .map(|option| OptionView {
                    name: &option.name,
                    description: &option.description,
                    category_label: option.category.label(),
                    discounted_price: discounted_price(option.price),
                })
                .collect(),
        };

        let context = Context::from_serialize(&reply)
            .map_err(|error| ApplicationError::Rendering(error.to_string()))?;
        self.templates
            .render(template_name(stage), &context)
            .map_err(|error| ApplicationError::Rendering(error.to_string()))
    }
}
