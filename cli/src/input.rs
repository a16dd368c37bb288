//! Terminal prompt helpers.
//!
//! Every prompt loops until it receives valid input; malformed entries are
//! reported and re-asked, never propagated. Only a closed stdin aborts.

use std::io::{self, Write};

use anyhow::{bail, Result};

/// Read one trimmed line, prompting first.
///
/// Returns an error only when stdin is closed.
fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt until `parse` accepts the input.
///
/// `parse` returns either the parsed value or a message to show before
/// re-prompting.
pub fn prompt_until<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> std::result::Result<T, &'static str>,
{
    loop {
        let raw = read_line(prompt)?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(message) => println!("{}", message),
        }
    }
}

/// Prompt for a positive integer, re-asking on anything else.
pub fn prompt_positive_usize(prompt: &str) -> Result<usize> {
    prompt_until(prompt, |raw| match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("Invalid input: the number must be a positive integer. Please try again."),
        Err(_) => Err("Invalid input: please enter a whole number."),
    })
}

/// Prompt for a yes/no answer, re-asking on anything else.
pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    prompt_until(prompt, |raw| {
        match raw.to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(true),
            "no" | "n" => Ok(false),
            _ => Err("Invalid response. Please answer with 'yes' or 'no'."),
        }
    })
}
