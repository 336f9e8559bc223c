use std::io::{self, BufRead, Write};

use crate::config::{data_dir, ensure_directories, env_file_path};
use crate::error::{Error, Result};

const CREDENTIALS_URL: &str = "https://console.cloud.google.com/apis/credentials";

pub fn run(api_key: Option<String>, force: bool) -> Result<()> {
    ensure_directories()?;

    let env_file = env_file_path();
    if env_file.exists() && !force {
        println!("A key is already stored in {}", env_file.display());
        println!("Pass --force to replace it.");
        return Ok(());
    }

    let api_key = match api_key {
        Some(key) => validate_key(&key)?,
        None => {
            let stdin = io::stdin();
            ask_for_key(&mut stdin.lock(), &mut io::stdout())?
        }
    };

    std::fs::write(&env_file, env_contents(&api_key))?;

    println!("Saved YOUTUBE_API_KEY to {}", env_file.display());
    println!("Data directory: {}", data_dir().display());
    Ok(())
}

/// Explain what the key is for, then read one line from `input`
fn ask_for_key<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    writeln!(out, "Rankings are fetched from the YouTube Data API v3.")?;
    writeln!(out, "Create an API key at {} and enable", CREDENTIALS_URL)?;
    writeln!(out, "\"YouTube Data API v3\" for its project. The key is sent with every request.")?;
    write!(out, "API key: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    validate_key(&line)
}

fn validate_key(raw: &str) -> Result<String> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(Error::InvalidInput(format!(
            "an API key is required (create one at {})",
            CREDENTIALS_URL
        )));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(Error::InvalidInput("API keys cannot contain whitespace".to_string()));
    }
    Ok(key.to_string())
}

fn env_contents(api_key: &str) -> String {
    format!("YOUTUBE_API_KEY={}\n", api_key)
}
