//! User prompts for values that are needed before discovery can start

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};

/// Parses a home subdivision id as typed by the user.
///
/// Returns `None` for anything that is not a positive integer.
pub fn parse_association_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id >= 1)
}

/// Interprets a yes/no answer. German and English answers are accepted.
pub fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "j" | "ja" | "y" | "yes")
}

/// Prompts the user for a new API domain and returns the trimmed input.
pub async fn prompt_for_api_domain() -> Result<String, AppError> {
    println!("Please enter the API domain (e.g. https://www.basketball-bund.net): ");
    let mut input = String::new();
    let mut reader = io::BufReader::new(io::stdin());
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}

/// Asks a yes/no question on stdin. A closed stdin counts as "no".
pub async fn confirm(question: &str) -> Result<bool, AppError> {
    let mut out = io::stdout();
    out.write_all(format!("{question} (y/n): ").as_bytes()).await?;
    out.flush().await?;

    let mut input = String::new();
    let mut reader = io::BufReader::new(io::stdin());
    if reader.read_line(&mut input).await? == 0 {
        return Ok(false);
    }
    Ok(parse_confirmation(&input))
}

/// Prompts on stdin until a valid home subdivision id is entered.
///
/// Returns `Ok(None)` when stdin is closed.
pub async fn prompt_for_home_association() -> Result<Option<i64>, AppError> {
    let mut reader = io::BufReader::new(io::stdin());
    let mut out = io::stdout();

    loop {
        out.write_all(b"Home subdivision (Verband) id: ").await?;
        out.flush().await?;

        let mut input = String::new();
        if reader.read_line(&mut input).await? == 0 {
            return Ok(None);
        }

        match parse_association_id(&input) {
            Some(id) => return Ok(Some(id)),
            None => {
                out.write_all(b"Please enter a positive number.\n").await?;
            }
        }
    }
}
