//! Terminal prompts and styled output.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use std::future::Future;
use std::io::Write;
use std::time::Duration;

/// Whether a human is at the terminal (prompts would block otherwise)
pub fn is_interactive() -> bool {
    console::user_attended() && console::Term::stdout().is_term()
}

/// Select from a list of options with arrow keys
pub fn select<T: std::fmt::Display>(
    prompt: &str,
    items: &[T],
    default: Option<usize>,
) -> Result<usize> {
    let theme = ColorfulTheme::default();
    let mut select = Select::with_theme(&theme).with_prompt(prompt).items(items);

    if let Some(idx) = default {
        select = select.default(idx);
    }

    Ok(select.interact()?)
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let theme = ColorfulTheme::default();
    Ok(Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Get text input
pub fn input(prompt: &str, default: Option<&str>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);

    if let Some(d) = default {
        input = input.default(d.to_string());
    }

    Ok(input.interact_text()?)
}

/// Get password/secret input (hidden)
pub fn password(prompt: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    Ok(Password::with_theme(&theme).with_prompt(prompt).interact()?)
}

pub fn header(text: &str) {
    println!();
    println!("{}", style(text).bold().red());
    println!();
}

pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Await `task` while animating a spinner on stderr.
///
/// Falls back to a single status line when stderr is not a terminal.
pub async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let term = console::Term::stderr();
    if !term.is_term() {
        eprintln!("{message}");
        return task.await;
    }

    tokio::pin!(task);
    let mut ticker = tokio::time::interval(Duration::from_millis(80));
    let mut frame = 0usize;

    let output = loop {
        tokio::select! {
            output = &mut task => break output,
            _ = ticker.tick() => {
                eprint!(
                    "\r{} {}",
                    style(SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]).red(),
                    message
                );
                std::io::stderr().flush().ok();
                frame += 1;
            }
        }
    };

    term.clear_line().ok();
    output
}
