use std::io::{self, BufRead, Write};

use crate::commands::recent::{no_videos_message, write_ranked};
use crate::error::{ErrorKind, Result};
use crate::pipeline::{Pipeline, parse_recency_hours, parse_result_count};

pub async fn run(pipeline: &Pipeline) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(pipeline, &mut stdin.lock(), &mut stdout.lock()).await
}

/// Prompt → rank → print, until an empty channel name or end of input.
pub async fn run_session<R: BufRead, W: Write>(
    pipeline: &Pipeline,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        let Some(channel) = prompt(input, out, "Channel name (empty to quit): ")? else {
            break;
        };
        if channel.is_empty() {
            break;
        }

        let Some(count) = prompt_until_valid(input, out, "Number of recent uploads to scan: ", parse_result_count)?
        else {
            break;
        };
        let Some(hours) = prompt_until_valid(input, out, "Only videos from the last N hours: ", parse_recency_hours)?
        else {
            break;
        };

        match pipeline.recent_popular_by_name(&channel, count, hours).await {
            Ok(videos) => {
                writeln!(out)?;
                write_ranked(out, &videos)?;
            }
            Err(e) if e.kind() == ErrorKind::NoCandidates => writeln!(out, "{}", no_videos_message(hours))?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        writeln!(out)?;
    }

    Ok(())
}

/// One trimmed line, or `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_until_valid<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    parse: fn(&str) -> Result<u32>,
) -> Result<Option<u32>> {
    loop {
        let Some(raw) = prompt(input, out, label)? else {
            return Ok(None);
        };
        match parse(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "{}. Please try again.", e)?,
        }
    }
}
