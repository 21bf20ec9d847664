use crate::infra::in_memory_service;
use chrono::{Datelike, Local};
use clap::Args;
use psychorisk::assessment::{
    AssessmentService, DimensionCatalog, EvaluationId, InMemoryEvaluationRepository,
    QuestionNumber, StaticCatalog, SubjectId,
};
use psychorisk::config::{AppConfig, AssessmentConfig};
use psychorisk::error::AppError;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Evaluation period (year). Defaults to the current year; the baseline uses the year before.
    #[arg(long)]
    pub(crate) period: Option<i32>,
    /// Answer (1-4) given to every question of the current evaluation.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub(crate) answer: u8,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogCheckArgs {
    /// CSV catalog to validate. Defaults to the configured catalog.
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

pub(crate) fn run_catalog_check(args: CatalogCheckArgs) -> Result<(), AppError> {
    let catalog = match args.path {
        Some(path) => StaticCatalog::from_csv_path(path)?,
        None => AppConfig::load()?.assessment.load_catalog()?,
    };
    render_catalog(&catalog);
    Ok(())
}

fn render_catalog(catalog: &dyn DimensionCatalog) {
    println!(
        "Catalog valid: {} dimensions, {} questions",
        catalog.dimensions().len(),
        catalog.question_count()
    );
    for dimension in catalog.dimensions() {
        let questions = catalog.questions_for(dimension.id);
        println!(
            "{:>2}. {} ({} questions) -> BAJO {} | MEDIO {} | ALTO {}",
            dimension.order,
            dimension.name,
            questions.len(),
            dimension.ranges.low,
            dimension.ranges.medium,
            dimension.ranges.high
        );
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { period, answer } = args;
    let period = period.unwrap_or_else(|| Local::now().year());
    let baseline_answer = answer.saturating_sub(1).max(1);

    let service = in_memory_service(&AssessmentConfig::default())?;
    let subject = SubjectId("demo-subject".to_string());

    println!("Psychosocial risk demo for {subject}");
    let baseline = complete_evaluation(&service, &subject, period - 1, baseline_answer)?;
    let current = complete_evaluation(&service, &subject, period, answer)?;

    let edited = service.request_edit(&current)?;
    println!(
        "\nEdit opened on {} ({} of {} edits used)",
        edited.id,
        edited.edit_count,
        service.guard().max_edits()
    );
    let first_dimension = service
        .catalog()
        .dimensions()
        .first()
        .map(|dimension| dimension.id);
    let corrections: BTreeMap<QuestionNumber, u8> = first_dimension
        .map(|id| service.catalog().questions_for(id))
        .unwrap_or_default()
        .into_iter()
        .map(|question| (question, 4))
        .collect();
    service.record_responses(&current, &corrections)?;
    let outcome = service.submit_evaluation(&current)?;
    println!(
        "- Resubmitted {}: global {} ({}) after {} edit(s)",
        outcome.evaluation_id, outcome.global_score, outcome.global_label, outcome.edit_count
    );

    let summary = service.get_summary(&current)?;
    println!("\nSummary\n{}", serde_json::to_string_pretty(&summary)?);

    let comparison = service.compare(&baseline, &current)?;
    println!(
        "\nComparison {} -> {}",
        comparison.period_a, comparison.period_b
    );
    for delta in &comparison.dimensions {
        println!(
            "- {}: {} {} -> {} {} ({:+}){}",
            delta.name,
            delta.score_a,
            delta.label_a,
            delta.score_b,
            delta.label_b,
            delta.delta,
            if delta.improved { " improved" } else { "" }
        );
    }

    let cohort = service.cohort_overview(Some(period))?;
    println!("\nCohort {period}\n{}", serde_json::to_string_pretty(&cohort)?);

    Ok(())
}

fn complete_evaluation(
    service: &AssessmentService<InMemoryEvaluationRepository>,
    subject: &SubjectId,
    period: i32,
    answer: u8,
) -> Result<EvaluationId, AppError> {
    let evaluation = service.start_evaluation(subject.clone(), period)?;
    service.accept_confidentiality(&evaluation.id)?;
    let answers: BTreeMap<QuestionNumber, u8> = service
        .catalog()
        .questions()
        .iter()
        .map(|question| (question.number, answer))
        .collect();
    service.record_responses(&evaluation.id, &answers)?;
    let outcome = service.submit_evaluation(&evaluation.id)?;
    println!(
        "- Period {period}: {} completed with global {} ({})",
        outcome.evaluation_id, outcome.global_score, outcome.global_label
    );
    Ok(evaluation.id)
}
