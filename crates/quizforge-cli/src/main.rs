//! quizforge CLI: offline access to quiz extraction and grading.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Recover AI-generated quizzes and grade submissions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a validated quiz from a raw generator response
    Extract {
        /// File containing the raw completion text ("-" for stdin)
        #[arg(long)]
        input: PathBuf,

        /// Output format: json, table
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a submission against a quiz's stored questions
    Grade {
        /// JSON file with the quiz's persisted questions
        #[arg(long)]
        questions: PathBuf,

        /// JSON file with the submitted answers
        #[arg(long)]
        answers: PathBuf,

        /// Override the configured passing score
        #[arg(long)]
        passing_score: Option<f64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the generation prompt for a quiz request
    Prompt {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        grade_level: String,

        #[arg(long)]
        topic: String,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<u32>,

        /// easy, medium, or hard (default from config)
        #[arg(long)]
        difficulty: Option<String>,

        /// Question types, comma-separated (default from config)
        #[arg(long)]
        kinds: Option<String>,

        /// Extra instructions appended to the prompt
        #[arg(long)]
        custom: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Extract a table of contents from a raw generator response
    Toc {
        /// File containing the raw completion text ("-" for stdin)
        #[arg(long)]
        input: PathBuf,
    },

    /// Extract a performance analysis from a raw generator response
    Analyze {
        /// File containing the raw completion text ("-" for stdin)
        #[arg(long)]
        input: PathBuf,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            format,
            config,
        } => commands::extract::execute(input, format, config),
        Commands::Grade {
            questions,
            answers,
            passing_score,
            format,
            config,
        } => commands::grade::execute(questions, answers, passing_score, format, config),
        Commands::Prompt {
            subject,
            grade_level,
            topic,
            count,
            difficulty,
            kinds,
            custom,
            config,
        } => commands::prompt::execute(
            subject,
            grade_level,
            topic,
            count,
            difficulty,
            kinds,
            custom,
            config,
        ),
        Commands::Toc { input } => commands::insights::execute_toc(input),
        Commands::Analyze { input } => commands::insights::execute_analyze(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
