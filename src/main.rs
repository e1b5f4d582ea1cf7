#[macro_use]
mod cli;
mod api;
mod error;
mod quiz;
mod session;
mod telemetry;

use std::path::Path;
use std::time::Duration;

use clap::Parser;

use api::{ApiConfig, QuizApi};
use session::AttemptSource;

/// An interactive quiz attempt runner
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct AppArgs {
    /// The quiz id to attempt, or a path to a quiz json file with --preview.
    #[arg(name = "QUIZ")]
    quiz: String,
    /// The user id to record the attempt for.
    #[arg(long = "user")]
    user: Option<String>,
    /// The base url of the quiz backend. Overrides QUIZ_API_URL.
    #[arg(long = "base-url")]
    base_url: Option<String>,
    /// The request timeout in seconds. Overrides QUIZ_API_TIMEOUT_SECS.
    #[arg(long = "timeout")]
    timeout: Option<u64>,
    /// Dry-run a local quiz file: no countdown, no backend submission.
    #[arg(long = "preview")]
    preview: bool,
}

fn init(args: &AppArgs) -> Result<(QuizApi, AttemptSource), String> {
    let mut config = ApiConfig::from_env();
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    let api = QuizApi::new(&config)
        .map_err(|e| format!("Could not create the backend client: {}", e))?;

    let source = if args.preview {
        let quiz = quiz::loader::from_file(Path::new(&args.quiz))
            .map_err(|e| format!("Could not import quiz file: {}", e))?;
        AttemptSource::Preview { quiz }
    } else {
        let user_id = args
            .user
            .clone()
            .ok_or_else(|| "A --user id is required to record an attempt.".to_string())?;
        AttemptSource::Remote { quiz_id: args.quiz.clone(), user_id }
    };
    Ok((api, source))
}

#[tokio::main]
async fn main() {
    telemetry::init();
    let args = AppArgs::parse();

    match init(&args) {
        Ok((api, source)) => {
            let preview = args.preview;
            let service = session::create_session(api, source);
            match service.load().await {
                Ok(()) => {
                    if !preview {
                        session::timer::start(service.clone());
                    }
                    println!("Quiz loaded. Type `quiz` for details, `questions` to get started.");
                }
                Err(e) => println!("Could not load the quiz: {}\nUse `reload` to try again.", e),
            }
            cli::start(service, preview).await;
        }
        Err(e) => {
            println!("{}", e);
        }
    }
}
