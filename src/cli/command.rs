use clap::ArgMatches;
use tabular::{Row, Table};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::quiz::{AnswerValue, Question};
use crate::session::{AttemptService, SessionStatus, SubmitOutcome, timer};

use super::print::clock;

pub async fn quiz(service: AttemptService) {
    let Some(quiz) = service.quiz().await else {
        println!("No quiz loaded yet. Use `reload` to try again.");
        return;
    };
    println!("quiz: {}", quiz.title());
    if !quiz.description().is_empty() {
        println!("{}", quiz.description());
    }
    println!("time limit: {} minutes", quiz.time_limit_minutes());
    println!("total points: {}", quiz.total_points());
    if let Some(deadline) = quiz.deadline() {
        println!("deadline: {}", deadline);
    }
}

pub async fn questions(service: AttemptService) {
    let Some(quiz) = service.quiz().await else {
        println!("No quiz loaded yet. Use `reload` to try again.");
        return;
    };
    let mut table = Table::new("\t{:<}: {:<} {:<}");
    for question in quiz.questions() {
        let answered = if service.answer(question.number()).await.is_empty() { "" } else { "answered" };
        table.add_row(Row::new()
            .with_cell(question.number())
            .with_cell(question.question_type())
            .with_cell(answered));
    }
    println!("{}", table);
}

fn print_question(question: &Question, current: &AnswerValue) {
    println!("question {}: {}", question.number(), question.text());
    println!("type: {}", question.question_type());
    if question.is_malformed() {
        println!("This multiple choice question has no answer options and cannot be answered properly.");
    } else if let Some(options) = question.options() {
        let mut table = Table::new("\t{:<}: {:<}");
        for (i, option) in options.iter().enumerate() {
            table.add_row(Row::new().with_cell(i).with_cell(option));
        }
        println!("{}", table);
    }
    if !current.is_empty() {
        println!("your answer: {}", question.answer_text(current));
    }
}

pub async fn show(service: AttemptService, args: &ArgMatches) {
    let Some(quiz) = service.quiz().await else {
        println!("No quiz loaded yet. Use `reload` to try again.");
        return;
    };
    let number = match args.get_one::<String>("number").and_then(|n| n.parse::<u32>().ok()) {
        Some(number) => number,
        None => {
            println!("Give a question number.");
            return;
        }
    };
    match quiz.question(number) {
        Some(question) => {
            let current = service.answer(number).await;
            print_question(question, &current);
        }
        None => println!("There is no question {}.", number),
    }
}

pub async fn answer(service: AttemptService, args: &ArgMatches) {
    let Some(number) = args.get_one::<String>("number").and_then(|n| n.parse::<u32>().ok()) else {
        println!("Give a question number.");
        return;
    };
    let value = args
        .get_many::<String>("value")
        .map(|v| v.map(|s| s.as_str()).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let value = match value.parse::<i64>() {
        Ok(index) => AnswerValue::Number(index),
        Err(_) => AnswerValue::Text(value),
    };
    match service.set_answer(number, value).await {
        Ok(display) => println!("Answer to question {} recorded: {}", number, display),
        Err(e) => println!("{}", e),
    }
}

pub async fn status(service: AttemptService) {
    print!("status: ");
    match service.status().await {
        SessionStatus::Loading => {
            println!("Loading\nThe quiz is not available yet. Use `reload` to try again.");
        }
        SessionStatus::Running { remaining_seconds } => {
            println!("Attempt in progress");
            let unanswered = service.unanswered().await;
            if let Some(quiz) = service.quiz().await {
                let total = quiz.question_count();
                println!("answered: {}/{}", total - unanswered.len(), total);
            }
            println!("remaining time: {}", clock(remaining_seconds));
        }
        SessionStatus::AwaitingConfirmation { unanswered } => {
            println!("Waiting for submit confirmation ({} unanswered)", unanswered.len());
        }
        SessionStatus::Submitting => println!("Submitting"),
        SessionStatus::Completed => println!("Completed\nUse `review` to see the results."),
        SessionStatus::Failed { message } => {
            println!("Submission failed: {}\nUse `submit` to try again.", message);
        }
    }
}

async fn yes_no_question(message: &str) -> bool {
    loop {
        use std::io::Write;
        print!("{} (y/n)> ", message);
        std::io::stdout().flush().expect("Output flush failed");
        let mut s = String::new();
        BufReader::new(io::stdin()).read_line(&mut s).await.expect("Did not enter a correct string");
        match s.trim() {
            "y" => return true,
            "n" => return false,
            _ => println!("Answer y or n"),
        }
    }
}

/// Returns true when the session is finished and the command loop
/// should close (preview runs end at submission).
pub async fn submit(service: AttemptService) -> bool {
    let outcome = service.submit(false).await;
    let outcome = match outcome {
        SubmitOutcome::NeedsConfirmation(unanswered) => {
            let mut table = Table::new("\t{:<}");
            table.add_heading("Unanswered questions:");
            for number in unanswered {
                table.add_row(Row::new().with_cell(number));
            }
            println!("{}", table);
            if !yes_no_question("Do you want to submit anyway?").await {
                let _ = service.confirm_submit(false).await;
                println!("Submission cancelled.");
                return false;
            }
            service.confirm_submit(true).await
        }
        other => other,
    };
    match outcome {
        SubmitOutcome::Completed => {
            println!("Attempt submitted.");
            review(service).await;
            false
        }
        SubmitOutcome::PreviewDone => {
            println!("Preview finished. No attempt was recorded.");
            true
        }
        SubmitOutcome::Failed(message) => {
            println!("Could not submit the attempt: {}\nYour answers are kept, use `submit` to try again.", message);
            false
        }
        SubmitOutcome::Cancelled => {
            println!("Submission cancelled.");
            false
        }
        SubmitOutcome::NotRunning => {
            println!("There is nothing to submit right now.");
            false
        }
        SubmitOutcome::NeedsConfirmation(_) => unreachable!(),
    }
}

pub async fn review(service: AttemptService) {
    let (Some(quiz), Some(result)) = (service.quiz().await, service.result().await) else {
        println!("No results available yet.");
        return;
    };
    let mut table = Table::new("\t{:<} {:^}\t{:<} {:<} {:>}")
        .with_row(Row::new()
            .with_cell("")
            .with_cell("")
            .with_cell("Your answer")
            .with_cell("Correct answer")
            .with_cell("Points"));
    for entry in &result.question_results {
        let (user_answer, correct_answer, max_points) = match quiz.question(entry.question_no) {
            Some(question) => (
                question.answer_text(&entry.user_answer),
                question.answer_text(&entry.correct_answer),
                question.points(),
            ),
            None => (entry.user_answer.as_text(), entry.correct_answer.as_text(), 0),
        };
        table.add_row(Row::new()
            .with_cell(entry.question_no)
            .with_cell(if entry.is_correct { "+" } else { "x" })
            .with_cell(user_answer.replace('\n', " "))
            .with_cell(correct_answer.replace('\n', " "))
            .with_cell(format!("{}/{}", entry.points_earned, max_points)));
    }
    println!("{}", table);
    println!("score: {}/{} ({}%)", result.total_score, result.max_score, result.percentage);
    println!("correct: {}, incorrect: {}", result.correct_count(), result.incorrect_count());
    println!("time spent: {}", clock(result.time_spent_seconds));
}

pub async fn reload(service: AttemptService, preview: bool) {
    if !service.status().await.is_loading() {
        println!("The quiz is already loaded.");
        return;
    }
    match service.load().await {
        Ok(()) => {
            println!("Quiz loaded.");
            quiz(service.clone()).await;
            if !preview {
                timer::start(service);
            }
        }
        Err(e) => println!("Could not load the quiz: {}", e),
    }
}
