use crate::infra::InMemoryAttemptRepository;
use chrono::Utc;
use clap::Args;
use gifts_engine::error::AppError;
use gifts_engine::gifts::bank::{question_bank, tiebreak_items, LIKERT_MAX, LIKERT_MIN};
use gifts_engine::gifts::domain::DEFAULT_LANGUAGE;
use gifts_engine::gifts::{
    confidence_label, resolve_tie, score, AssessmentAttempt, AssessmentSubmission, Gift,
    GiftAssessmentService, GiftProfileView, GiftResult, QuestionnaireView, ResponseSheetImporter,
    SubmissionOutcome, TiebreakSubmission, TraitProfile, UserId,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Print the questionnaire as JSON instead of numbered text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Response sheet CSV with `Question,Response` columns.
    #[arg(long, conflicts_with = "responses", required_unless_present = "responses")]
    pub(crate) responses_csv: Option<PathBuf>,
    /// Fifty comma-separated answers in questionnaire order.
    #[arg(long, value_delimiter = ',')]
    pub(crate) responses: Option<Vec<i32>>,
    /// Answers to the primary gift's three tie-break items.
    #[arg(long, value_delimiter = ',', requires = "tiebreak_secondary")]
    pub(crate) tiebreak_primary: Option<Vec<i32>>,
    /// Answers to the secondary gift's three tie-break items.
    #[arg(long, value_delimiter = ',', requires = "tiebreak_primary")]
    pub(crate) tiebreak_secondary: Option<Vec<i32>>,
    /// Print the downloadable report for this name after scoring.
    #[arg(long)]
    pub(crate) user_name: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Identifier used for the scripted attempts.
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Skip the plain-text report at the end of the demo.
    #[arg(long)]
    pub(crate) skip_report: bool,
}

pub(crate) fn run_questions(args: QuestionsArgs) {
    if args.json {
        match serde_json::to_string_pretty(&QuestionnaireView::build()) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Questionnaire payload unavailable: {}", err),
        }
        return;
    }

    println!(
        "Spiritual gifts questionnaire (answer {} = strongly disagree .. {} = strongly agree)",
        LIKERT_MIN, LIKERT_MAX
    );
    for item in question_bank() {
        println!(
            "{:>2}. [{} / {}] {}",
            item.index + 1,
            item.gift,
            item.kind.label(),
            item.text
        );
    }

    println!("\nTie-break items (asked only when the top two gifts are close)");
    for gift in Gift::ALL {
        println!("{}:", gift);
        for item in tiebreak_items(gift) {
            println!("  {}. {}", item.position + 1, item.text);
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        responses_csv,
        responses,
        tiebreak_primary,
        tiebreak_secondary,
        user_name,
    } = args;

    let responses = match (responses_csv, responses) {
        (Some(path), _) => ResponseSheetImporter::from_path(path)?,
        (None, Some(responses)) => responses,
        (None, None) => Vec::new(),
    };

    let base = score(&responses)?;
    let (result, used_tiebreak) = match (tiebreak_primary, tiebreak_secondary) {
        (Some(primary), Some(secondary)) if base.needs_tiebreak => {
            (resolve_tie(&base, &primary, &secondary)?, true)
        }
        (Some(_), Some(_)) => {
            println!(
                "Tie-break answers ignored: margin {:.3} already separates the top two gifts.",
                base.margin
            );
            (base, false)
        }
        _ => (base, false),
    };

    render_result(&result, used_tiebreak);
    if result.needs_tiebreak {
        println!(
            "\nTie-break recommended: {} and {} are within {:.3}.",
            result.primary, result.secondary, result.margin
        );
        println!("Answer these items and rerun with --tiebreak-primary and --tiebreak-secondary:");
        for gift in [result.primary, result.secondary] {
            for item in tiebreak_items(gift) {
                println!("  - [{}] {}", gift, item.text);
            }
        }
    }

    if let Some(name) = user_name {
        println!("\n{}", single_attempt_report(&name, responses, result, used_tiebreak));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { user, skip_report } = args;
    let user_id = UserId(user);

    println!("Spiritual gifts assessment demo for {}", user_id);
    let repository = Arc::new(InMemoryAttemptRepository::default());
    let service = GiftAssessmentService::new(repository.clone());

    for (label, responses) in demo_attempts() {
        println!("\n{}", label);
        match service.submit(&user_id, AssessmentSubmission::new(responses))? {
            SubmissionOutcome::Completed(attempt) => {
                render_result(&attempt.result, attempt.used_tiebreak);
            }
            SubmissionOutcome::TiebreakRequired(prompt) => {
                println!(
                    "- {} and {} are within {:.3}; asking tie-break items",
                    prompt.primary, prompt.secondary, prompt.margin
                );
                for item in prompt.primary_items.iter().chain(&prompt.secondary_items) {
                    println!("    [{}] {}", item.gift, item.text);
                }
                let attempt = service.resolve_tiebreak(
                    &user_id,
                    &TiebreakSubmission {
                        primary: vec![4, 4, 5],
                        secondary: vec![3, 2, 3],
                    },
                )?;
                render_result(&attempt.result, attempt.used_tiebreak);
            }
        }
    }

    println!(
        "\nStored attempts for {}: {}",
        user_id,
        repository.count(&user_id)
    );
    let Some(profile) = service.profile(&user_id)? else {
        println!("  No profile available");
        return Ok(());
    };

    println!(
        "Stable trait across {} retake(s):",
        profile.attempts_in_trait_window
    );
    for (rank, entry) in profile.trait_top_gifts.iter().enumerate() {
        println!("  {}. {} ({:.3})", rank + 1, entry.gift, entry.score);
    }
    match serde_json::to_string_pretty(&profile) {
        Ok(json) => println!("Profile payload:\n{}", json),
        Err(err) => println!("Profile payload unavailable: {}", err),
    }

    if !skip_report {
        println!("\n{}", profile.render_text(&user_id.0));
    }

    Ok(())
}

/// Report for one offline scoring run. There is no retake history, so the trait section is left
/// out.
fn single_attempt_report(
    name: &str,
    responses: Vec<i32>,
    result: GiftResult,
    used_tiebreak: bool,
) -> String {
    let attempt = AssessmentAttempt::new(
        UserId(name.to_string()),
        Utc::now(),
        DEFAULT_LANGUAGE.to_string(),
        responses,
        result,
        used_tiebreak,
    );
    GiftProfileView::new(&attempt, &TraitProfile::default(), 0).render_text(name)
}

fn render_result(result: &GiftResult, used_tiebreak: bool) {
    println!(
        "- Primary {} | Secondary {} | margin {:.3} | confidence {}",
        result.primary,
        result.secondary,
        result.margin,
        confidence_label(result.margin)
    );
    if used_tiebreak {
        println!("  Tie-break applied");
    }
    for (rank, entry) in result.top(3).iter().enumerate() {
        println!("  {}. {} ({:.3})", rank + 1, entry.gift, entry.score);
    }
}

/// Per-gift answer blocks in declaration order, flattened into a 50-answer vector.
fn flatten(blocks: [[i32; 5]; 10]) -> Vec<i32> {
    blocks.iter().flatten().copied().collect()
}

fn demo_attempts() -> Vec<(&'static str, Vec<i32>)> {
    let steady = [2, 2, 2, 2, 2];
    vec![
        (
            "Attempt 1: mercy-leaning answers",
            flatten([
                [3, 3, 3, 2, 3],
                steady,
                steady,
                [5, 5, 5, 4, 5],
                [4, 4, 3, 4, 3],
                steady,
                steady,
                [3, 2, 3, 3, 2],
                steady,
                [3, 4, 3, 3, 3],
            ]),
        ),
        (
            "Attempt 2: teaching and mercy neck and neck",
            flatten([
                [4, 5, 5, 5, 5],
                steady,
                steady,
                [5, 5, 5, 5, 4],
                [3, 3, 3, 3, 3],
                steady,
                steady,
                steady,
                steady,
                steady,
            ]),
        ),
        (
            "Attempt 3: mercy settles in front",
            flatten([
                [3, 4, 3, 3, 3],
                steady,
                steady,
                [5, 5, 5, 5, 5],
                [4, 3, 4, 4, 3],
                steady,
                steady,
                steady,
                steady,
                [3, 3, 4, 3, 3],
            ]),
        ),
    ]
}
