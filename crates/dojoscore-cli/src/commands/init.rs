//! The `dojoscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create dojoscore.toml
    if std::path::Path::new("dojoscore.toml").exists() {
        println!("dojoscore.toml already exists, skipping.");
    } else {
        std::fs::write("dojoscore.toml", SAMPLE_CONFIG)?;
        println!("Created dojoscore.toml");
    }

    // Create example question set
    std::fs::create_dir_all("question-sets")?;
    let example_path = std::path::Path::new("question-sets/example.toml");
    if example_path.exists() {
        println!("question-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created question-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit dojoscore.toml to point at your progress store");
    println!("  2. Run: dojoscore grade --questions question-sets/example.toml");
    println!("  3. Run: dojoscore roi");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# dojoscore configuration

admin_username = "admin"

[store]
type = "json"
path = "user_progress.json"

# Remote spreadsheet backend:
# [store]
# type = "sheet"
# base_url = "https://sheets.example.com/v1/training"
# api_token = "${DOJOSCORE_SHEET_TOKEN}"

[roi]
time_saved_hours = 0.25
cost_per_hour = 50.0
participation_threshold = 10
"#;

const EXAMPLE_QUESTION_SET: &str = r#"[quiz]
id = "example"
name = "Example Question Set"
description = "A small starter set to try grading with"

[[questions]]
question = "How many points does a correct answer earn?"
options = ["5", "10", "20"]
answer = "10"

[[questions]]
question = "Which belt does a brand-new user hold?"
options = ["White Belt", "Yellow Belt", "Black Belt"]
answer = "White Belt"

[[questions]]
question = "What does a session need to count toward participation?"
options = [
    "At least one interaction",
    "A completed quiz",
    "An administrator sign-off",
]
answer = "At least one interaction"
"#;
