use std::fs;
use std::path::Path;
use std::sync::Arc;

use pitchcraft_agent::{DialogueEngine, EngineReply, FixedRandom};
use pitchcraft_core::config::{AppConfig, LoadOptions};
use pitchcraft_core::domain::conversation::Message;
use pitchcraft_core::domain::customer::CustomerProfile;
use pitchcraft_core::errors::{ApplicationError, InterfaceError};
use pitchcraft_core::sales::catalog::configured_source;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::CommandResult;

#[derive(Debug, Deserialize)]
struct ReplyRequest {
    messages: Vec<Message>,
    #[serde(rename = "customerData")]
    customer_data: CustomerProfile,
}

#[derive(Debug, Serialize)]
struct ReplyReport<'a> {
    command: &'static str,
    status: &'static str,
    #[serde(flatten)]
    reply: &'a EngineReply,
    scarcity_count: Option<u32>,
}

pub fn run(path: &Path, seed: Option<u32>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("reply", "config_validation", error.to_string(), 2)
        }
    };

    let request = match read_request(path) {
        Ok(request) => request,
        Err(message) => return CommandResult::failure("reply", "request_invalid", message, 3),
    };

    let engine = match build_engine(&config, seed) {
        Ok(engine) => engine,
        Err(error) => {
            return CommandResult::failure("reply", "engine_unavailable", error.to_string(), 5)
        }
    };

    match engine.reply(&request.messages, &request.customer_data) {
        Ok(reply) => {
            info!(
                event_name = "cli.reply.composed",
                correlation_id = "cli",
                stage = reply.decision.stage.as_str(),
                rule = reply.decision.rule.as_str(),
                "reply rendered from request file"
            );
            CommandResult::report(&ReplyReport {
                command: "reply",
                status: "ok",
                scarcity_count: reply.values.scarcity_count,
                reply: &reply,
            })
        }
        Err(error) => match error.into_interface("cli") {
            InterfaceError::BadRequest { message, .. } => {
                CommandResult::failure("reply", "request_rejected", message, 4)
            }
            InterfaceError::Internal { message, .. } => {
                CommandResult::failure("reply", "engine_failure", message, 5)
            }
        },
    }
}

fn read_request(path: &Path) -> Result<ReplyRequest, String> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("could not read `{}`: {error}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|error| format!("could not parse `{}`: {error}", path.display()))
}

fn build_engine(
    config: &AppConfig,
    seed: Option<u32>,
) -> Result<DialogueEngine, ApplicationError> {
    match seed {
        Some(seed) => {
            let catalog = configured_source(config.catalog.path.as_deref()).load()?;
            let random = Arc::new(FixedRandom(seed));
            DialogueEngine::with_random(catalog, config.signals.clone(), random)
        }
        None => DialogueEngine::from_config(config),
    }
}
