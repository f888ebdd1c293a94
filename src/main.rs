// Career Compass - command line entry point

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use career_compass::models::companion::MessageContext;
use career_compass::services::quiz::{QuizResults, QuizView};
use career_compass::storage::ConfigService;
use career_compass::{AppError, AppState};

#[derive(Parser)]
#[command(name = "career-compass")]
#[command(about = "Career assessment quiz with Captain Sky", long_about = None)]
struct Cli {
    /// Path to a JSON config file (overrides CAREER_COMPASS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Quiz {
        /// Number of questions to generate
        #[arg(short, long)]
        questions: Option<usize>,
    },
    /// Recommend careers for a JSON array of answers
    Recommend {
        /// e.g. '[{"questionId":"q1","selectedOption":0,"category":"aviation"}]'
        #[arg(short, long)]
        answers: String,
    },
    /// Print one companion message
    Message {
        /// welcome, question, encouragement or completion
        context: MessageContext,
        /// Question number for the question context
        #[arg(long)]
        ordinal: Option<usize>,
    },
    /// Print the effective configuration
    Config {
        /// Also confirm the provider accepts the configured key
        #[arg(long)]
        check: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let service =
        ConfigService::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Config { check } => {
            match service.config_path() {
                Some(path) => println!("config file: {}", path.display()),
                None => println!("config file: (none)"),
            }
            let key_status = if service.get_config().has_api_key() {
                "set"
            } else {
                "not set (built-in content only)"
            };
            println!("api key: {}", key_status);
            println!("{}", serde_json::to_string_pretty(service.get_config())?);

            if check {
                let state = AppState::from_config(service.get_config_clone());
                match state.gateway().check_connection().await {
                    Ok(()) => println!("connection: ok"),
                    Err(e) => println!("connection: failed ({})", e),
                }
            }
        }
        Commands::Quiz { questions } => {
            let state = AppState::from_config(service.get_config_clone());
            let count = questions.unwrap_or(state.config().question_count);
            run_quiz(&state, count).await?;
        }
        Commands::Recommend { answers } => {
            let state = AppState::from_config(service.get_config_clone());
            let results = state.flow().recommend_for_payload(Some(&answers)).await?;
            print_results(&results);
        }
        Commands::Message { context, ordinal } => {
            let state = AppState::from_config(service.get_config_clone());
            let text = state.gateway().generate_message(context, ordinal).await;
            println!("{}", text);
        }
    }

    Ok(())
}

async fn run_quiz(state: &AppState, count: usize) -> Result<()> {
    let flow = state.flow();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut view = flow.start(count).await?;
    println!("\nCaptain Sky: {}\n", view.message.text);

    while !view.completed {
        print_question(&view);

        let Some(line) = lines.next_line().await? else {
            println!("\nQuiz abandoned.");
            return Ok(());
        };
        let input = line.trim();
        match input {
            "" => continue,
            "q" | "quit" => {
                flow.restart().await;
                println!("Quiz abandoned.");
                return Ok(());
            }
            "?" => {
                println!("\nCaptain Sky: {}\n", flow.encouragement().await.text);
                continue;
            }
            _ => {}
        }

        let Some(index) = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            println!("Enter the number of an option, '?' for a hint or 'q' to quit.");
            continue;
        };

        match flow.select_option(index).await {
            Ok(next) => {
                view = next;
                println!("\nCaptain Sky: {}\n", view.message.text);
            }
            Err(AppError::InvalidInput(_)) => {
                println!("Enter the number of an option, '?' for a hint or 'q' to quit.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let results = flow.finish().await?;
    print_results(&results);
    Ok(())
}

fn print_question(view: &QuizView) {
    let Some(question) = &view.question else {
        return;
    };
    println!(
        "Question {} of {} ({:.0}% complete) [{}]",
        view.ordinal.unwrap_or(0),
        view.total,
        view.progress * 100.0,
        question.category.label()
    );
    println!("{}", question.question);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_results(results: &QuizResults) {
    println!("Captain Sky: {}\n", results.message.text);

    if let Some(top) = results.profile.top_interest() {
        println!("Strongest interest: {}\n", top.label());
    }

    for (i, rec) in results.recommendations.iter().enumerate() {
        println!(
            "{}. {} - {}% match [{}]",
            i + 1,
            rec.title,
            rec.match_percentage,
            rec.category.label()
        );
        println!("   {}", rec.description);
        if !rec.required_skills.is_empty() {
            println!("   Skills: {}", rec.required_skills.join(", "));
        }
        if !rec.education_path.is_empty() {
            println!("   Education: {}", rec.education_path.join(" -> "));
        }
        if let Some(salary) = &rec.average_salary {
            println!("   Salary: {}", salary);
        }
        println!("   Outlook: {}\n", rec.job_outlook);
    }
}
