#[macro_use]
mod print;
mod command;

use clap::{Arg, ArgMatches, Command};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::session::AttemptService;

async fn read() -> Result<ArgMatches, String> {
    let mut s = String::new();
    BufReader::new(io::stdin()).read_line(&mut s).await.expect("Did not enter a correct string");
    Command::new("Attempt command>")
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .infer_subcommands(true)
        .subcommand(Command::new("exit")
            .about("Closes the attempt session."))
        .subcommand(Command::new("quiz")
            .about("Prints the quiz title, description, time limit and total points."))
        .subcommand(Command::new("questions")
            .about("Prints the list of questions and which of them are answered."))
        .subcommand(Command::new("show")
            .about("Prints a question with its answer options.")
            .arg(Arg::new("number")
                    .help("Number of the question to show.")
                    .required(true)))
        .subcommand(Command::new("answer")
            .about("Records an answer: an option index, true/false, or free text.")
            .arg(Arg::new("number")
                    .help("Number of the question to answer.")
                    .required(true))
            .arg(Arg::new("value")
                    .help("The answer value.")
                    .num_args(1..)
                    .required(true)))
        .subcommand(Command::new("status")
            .about("Prints the session status, answered count and remaining time."))
        .subcommand(Command::new("submit")
            .about("Submits the attempt, asking for confirmation when questions are unanswered."))
        .subcommand(Command::new("review")
            .about("Prints the per-question review and the summary after submission."))
        .subcommand(Command::new("reload")
            .about("Retries loading the quiz after a failed load."))
        .try_get_matches_from(s.trim().split_whitespace().collect::<Vec<_>>())
        .map_err(|e| e.to_string())
}

pub async fn start(service: AttemptService, preview: bool) {
    loop {
        attempt_command_prefix!();
        match read().await.as_ref().map(|m| m.subcommand()) {
            Ok(Some(("exit", _)))            => break,
            Ok(Some(("quiz", _)))            => command::quiz(service.clone()).await,
            Ok(Some(("questions", _)))       => command::questions(service.clone()).await,
            Ok(Some(("show", matches)))      => command::show(service.clone(), matches).await,
            Ok(Some(("answer", matches)))    => command::answer(service.clone(), matches).await,
            Ok(Some(("status", _)))          => command::status(service.clone()).await,
            Ok(Some(("submit", _)))          => if command::submit(service.clone()).await { break },
            Ok(Some(("review", _)))          => command::review(service.clone()).await,
            Ok(Some(("reload", _)))          => command::reload(service.clone(), preview).await,
            Err(e) => println!("{}", e),
            _ => unreachable!(),
        }
    }
    service.close().await;
    println!("Closing attempt...");
}
