use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use avengers_quiz::config::DEFAULT_LOG_FILE;
use avengers_quiz::{logging, QuestionSource, Quiz, QuizConfig, QuizError};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (built-in set when omitted)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Length of the loading transition after pressing start, in milliseconds
    #[arg(long, default_value_t = 1500)]
    loading_delay_ms: u64,

    /// Skip the start screen's loading transition
    #[arg(long)]
    no_start_gate: bool,

    /// File to write logs to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Print the validated questions as JSON and exit
    #[arg(long)]
    dump_questions: bool,
}

impl Args {
    fn into_config(self) -> QuizConfig {
        QuizConfig {
            questions: self
                .questions
                .map_or(QuestionSource::Builtin, QuestionSource::File),
            loading_delay: Duration::from_millis(self.loading_delay_ms),
            start_gate: !self.no_start_gate,
            log_file: Some(self.log_file),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let dump_questions = args.dump_questions;
    let config = args.into_config();

    if let Some(log_file) = &config.log_file {
        if let Err(e) = logging::init(log_file) {
            eprintln!("Logging disabled, cannot open {}: {}", log_file.display(), e);
        }
    }

    let result = if dump_questions {
        dump(&config)
    } else {
        run(&config).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error running quiz: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &QuizConfig) -> Result<(), QuizError> {
    Quiz::with_config(config)?.run().await
}

fn dump(config: &QuizConfig) -> Result<(), QuizError> {
    let questions = config.questions.load()?;
    let json = serde_json::to_string_pretty(&questions)
        .map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}
