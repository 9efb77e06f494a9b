//! Pipeline Orchestrator — drives enrichment, prompting, evaluation and write-back.
//!
//! Flow per applicant: enrich → build prompt → evaluate → parse → update record.
//! Flow per team:      group → build team data → evaluate → parse → update every member.
//!
//! Items are processed one at a time. A failing item is logged and skipped; nothing
//! is retried. Re-running overwrites earlier results.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::evaluation::evaluator::Evaluator;
use crate::evaluation::parser::{parse, parse_team, Evaluation};
use crate::evaluation::prompt_builder::{build_applicant_prompt, build_team_prompt};
use crate::github::Enricher;
use crate::models::applicant::{
    ApplicantRecord, GITHUB_REPOSITORY, GITHUB_URL, INDIVIDUAL_FEEDBACK, INDIVIDUAL_SCORE,
    TEAM_FEEDBACK, TEAM_SCORE,
};
use crate::models::team::TeamRecord;
use crate::store::ApplicantStore;

/// Groups smaller than this are applicants whose team nobody joined.
pub const MIN_TEAM_SIZE: usize = 2;

pub const NO_FEEDBACK: &str = "No feedback generated.";
pub const NO_TEAM_FEEDBACK: &str = "No team feedback generated.";

/// Outcome counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Applicants or teams that got a parsed evaluation.
    pub evaluated: usize,
    /// Store records written.
    pub records_updated: usize,
    /// Items or record writes that failed.
    pub failures: usize,
}

pub struct Pipeline {
    store: Arc<dyn ApplicantStore>,
    enricher: Arc<dyn Enricher>,
    evaluator: Evaluator,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ApplicantStore>,
        enricher: Arc<dyn Enricher>,
        evaluator: Evaluator,
    ) -> Self {
        Self {
            store,
            enricher,
            evaluator,
        }
    }

    /// Scores every applicant in the store individually.
    pub async fn run_individual(&self) -> Result<RunSummary, AppError> {
        let applicants = self.store.list_all().await?;
        info!("Fetched {} applicants for evaluation", applicants.len());

        let mut summary = RunSummary::default();
        for applicant in &applicants {
            match self.evaluate_applicant(applicant).await {
                Ok(evaluation) => {
                    summary.evaluated += 1;
                    match self
                        .store
                        .update(&applicant.id, individual_fields(&evaluation))
                        .await
                    {
                        Ok(()) => {
                            summary.records_updated += 1;
                            info!(
                                "Updated applicant {} with score {}",
                                applicant.display_name(),
                                evaluation.score
                            );
                        }
                        Err(e) => {
                            summary.failures += 1;
                            error!("Error updating applicant {}: {e}", applicant.display_name());
                        }
                    }
                }
                Err(e) => {
                    summary.failures += 1;
                    error!("Error evaluating applicant {}: {e}", applicant.display_name());
                }
            }
        }

        info!(
            "Individual run finished: {} evaluated, {} updated, {} failures",
            summary.evaluated, summary.records_updated, summary.failures
        );
        Ok(summary)
    }

    /// Scores every team of two or more and writes the result onto each member.
    pub async fn run_team(&self) -> Result<RunSummary, AppError> {
        let applicants = self.store.list_all().await?;
        let teams = group_by_team(applicants);
        info!("Found {} teams to evaluate", teams.len());

        let mut summary = RunSummary::default();
        for (team_code, members) in &teams {
            info!("Evaluating team {team_code} ({} members)", members.len());

            let evaluation = match self.evaluate_team(team_code, members).await {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    summary.failures += 1;
                    error!("Error evaluating team {team_code}: {e}");
                    continue;
                }
            };
            summary.evaluated += 1;

            let fields = team_fields(&evaluation);
            for member in members {
                match self.store.update(&member.id, fields.clone()).await {
                    Ok(()) => {
                        summary.records_updated += 1;
                        info!(
                            "Updated team member {} with team score {}",
                            member.display_name(),
                            evaluation.score
                        );
                    }
                    Err(e) => {
                        summary.failures += 1;
                        error!("Error updating team member {}: {e}", member.display_name());
                    }
                }
            }
        }

        info!(
            "Team run finished: {} teams evaluated, {} members updated, {} failures",
            summary.evaluated, summary.records_updated, summary.failures
        );
        Ok(summary)
    }

    async fn evaluate_applicant(&self, applicant: &ApplicantRecord) -> Result<Evaluation, AppError> {
        let profile = match applicant.non_empty(GITHUB_URL) {
            Some(url) => Some(self.enricher.fetch_profile(&url).await),
            None => None,
        };
        let repo = match applicant.non_empty(GITHUB_REPOSITORY) {
            Some(url) => Some(self.enricher.fetch_repo(&url).await),
            None => None,
        };

        let prompt = build_applicant_prompt(applicant, profile.as_ref(), repo.as_ref());
        let reply = self.evaluator.evaluate(&prompt).await?;
        Ok(parse(&reply))
    }

    async fn evaluate_team(
        &self,
        team_code: &str,
        members: &[ApplicantRecord],
    ) -> Result<Evaluation, AppError> {
        let team = TeamRecord::from_members(team_code, members);
        let prompt = build_team_prompt(&team);
        let reply = self.evaluator.evaluate(&prompt).await?;
        Ok(parse_team(&reply))
    }
}

/// Groups applicants by team code, dropping applicants without one and groups
/// smaller than [`MIN_TEAM_SIZE`]. Members keep their store order.
pub fn group_by_team(applicants: Vec<ApplicantRecord>) -> BTreeMap<String, Vec<ApplicantRecord>> {
    let mut teams: BTreeMap<String, Vec<ApplicantRecord>> = BTreeMap::new();
    for applicant in applicants {
        if let Some(code) = applicant.team_code() {
            teams.entry(code).or_default().push(applicant);
        }
    }

    teams.retain(|code, members| {
        let keep = members.len() >= MIN_TEAM_SIZE;
        if !keep {
            warn!("Skipping team {code}: only {} member", members.len());
        }
        keep
    });
    teams
}

fn individual_fields(evaluation: &Evaluation) -> Map<String, Value> {
    result_fields(INDIVIDUAL_SCORE, INDIVIDUAL_FEEDBACK, evaluation, NO_FEEDBACK)
}

fn team_fields(evaluation: &Evaluation) -> Map<String, Value> {
    result_fields(TEAM_SCORE, TEAM_FEEDBACK, evaluation, NO_TEAM_FEEDBACK)
}

fn result_fields(
    score_field: &str,
    feedback_field: &str,
    evaluation: &Evaluation,
    empty_feedback: &str,
) -> Map<String, Value> {
    let feedback = if evaluation.feedback.trim().is_empty() {
        empty_feedback
    } else {
        evaluation.feedback.as_str()
    };

    let mut fields = Map::new();
    fields.insert(score_field.to_string(), json!(evaluation.score));
    fields.insert(feedback_field.to_string(), json!(feedback));
    fields
}
