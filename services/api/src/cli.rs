use crate::demo::{run_demo, run_questions, run_score, DemoArgs, QuestionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gifts_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tukuza Yesu Spiritual Gifts",
    about = "Score spiritual gifts assessments and run the assessment service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the core questionnaire and tie-break items
    Questions(QuestionsArgs),
    /// Score a completed questionnaire from a response sheet or inline answers
    Score(ScoreArgs),
    /// Run a scripted multi-attempt session against an in-memory store
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions(args) => {
            run_questions(args);
            Ok(())
        }
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["gifts-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_inline_answers_and_tiebreak_triples() {
        let cli = Cli::try_parse_from([
            "gifts-api",
            "score",
            "--responses",
            "3,3,3",
            "--tiebreak-primary",
            "5,4,5",
            "--tiebreak-secondary",
            "2,2,1",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.responses, Some(vec![3, 3, 3]));
                assert_eq!(args.tiebreak_primary, Some(vec![5, 4, 5]));
                assert_eq!(args.tiebreak_secondary, Some(vec![2, 2, 1]));
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn score_rejects_both_answer_sources() {
        let parsed = Cli::try_parse_from([
            "gifts-api",
            "score",
            "--responses",
            "3",
            "--responses-csv",
            "sheet.csv",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn tiebreak_triples_must_come_in_pairs() {
        let parsed = Cli::try_parse_from([
            "gifts-api",
            "score",
            "--responses",
            "3",
            "--tiebreak-primary",
            "3,3,3",
        ]);
        assert!(parsed.is_err());
    }
}
