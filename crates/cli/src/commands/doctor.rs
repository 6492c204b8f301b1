use pitchcraft_agent::{FixedRandom, ResponseComposer};
use pitchcraft_core::config::{AppConfig, LoadOptions};
use pitchcraft_core::domain::customer::CustomerProfile;
use pitchcraft_core::funnel::stages::Stage;
use pitchcraft_core::sales::catalog::{configured_source, Catalog};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match check_catalog(&config) {
                Ok((check, catalog)) => {
                    checks.push(check);
                    checks.push(check_stage_rendering(&catalog));
                }
                Err(check) => {
                    checks.push(check);
                    checks.push(skipped("stage_rendering", "catalog did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("catalog_load", "configuration did not load"));
            checks.push(skipped("stage_rendering", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> Result<(DoctorCheck, Catalog), DoctorCheck> {
    let source = configured_source(config.catalog.path.as_deref());
    match source.load() {
        Ok(catalog) => Ok((
            DoctorCheck {
                name: "catalog_load",
                status: CheckStatus::Pass,
                details: format!("{} products loaded from {}", catalog.len(), source.describe()),
            },
            catalog,
        )),
        Err(error) => Err(DoctorCheck {
            name: "catalog_load",
            status: CheckStatus::Fail,
            details: error.to_string(),
        }),
    }
}

/// Renders every stage with every product as the lead so a bad catalog entry shows up here
/// instead of in a live conversation.
fn check_stage_rendering(catalog: &Catalog) -> DoctorCheck {
    let composer = match ResponseComposer::new() {
        Ok(composer) => composer,
        Err(error) => {
            return DoctorCheck {
                name: "stage_rendering",
                status: CheckStatus::Fail,
                details: error.to_string(),
            };
        }
    };
    let profile = CustomerProfile::new("Doctor", "doctor@localhost", Vec::new());
    let random = FixedRandom(0);
    let options = catalog.leading(pitchcraft_agent::composer::COMMITMENT_OPTIONS);

    for lead in catalog.products() {
        for stage in Stage::ALL {
            if let Err(error) = composer.compose(stage, &profile, lead, options, &random) {
                return DoctorCheck {
                    name: "stage_rendering",
                    status: CheckStatus::Fail,
                    details: format!("{stage} failed for product {}: {error}", lead.id.0),
                };
            }
        }
    }

    DoctorCheck {
        name: "stage_rendering",
        status: CheckStatus::Pass,
        details: format!("{} stages rendered for {} products", Stage::ALL.len(), catalog.len()),
    }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {reason}"),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
