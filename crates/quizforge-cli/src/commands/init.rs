//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust passing_score and generation defaults in quizforge.toml");
    println!(
        "  2. Run: quizforge prompt --subject Biology --grade-level \"Grade 9\" --topic Cells"
    );
    println!("  3. Run: quizforge extract --input response.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

# Minimum percentage for a passing result
passing_score = 60.0

# Generation defaults
default_question_count = 10
default_difficulty = "medium"
default_question_types = ["multiple_choice", "true_false"]

# Model name shown with extracted quizzes
model = "gemini-pro"
"#;
