//! Interactive research chat.
//!
//! A rustyline REPL over the `/api/research` endpoint. Each submitted
//! question appends a user entry to the transcript, shows a transient
//! "Thinking..." line, and then records the answer (or its error
//! equivalent) as the assistant entry.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::{Result, bail};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use stockin_client::{ApiClient, AuthOutcome};
use stockin_core::{MessageRole, ResearchQuery, Transcript};

/// Slash commands understood by the chat REPL, with the description shown
/// in completions and hints.
const CHAT_COMMANDS: [(&str, &str); 2] = [
    ("/history", "review the conversation so far"),
    ("/quit", "leave the chat"),
];

/// Commands matching the given prefix, as (command, description) pairs.
/// A prefix that doesn't start with '/' matches nothing: plain text is a
/// question, not a command.
fn command_candidates(prefix: &str) -> Vec<(&'static str, &'static str)> {
    if !prefix.starts_with('/') {
        return Vec::new();
    }
    CHAT_COMMANDS
        .iter()
        .filter(|(cmd, _)| cmd.starts_with(prefix))
        .copied()
        .collect()
}

/// Inline hint for a partially typed command: the unentered remainder of
/// the first match, followed by its description.
fn command_hint(line: &str) -> Option<String> {
    if !line.starts_with('/') || line.contains(' ') {
        return None;
    }
    CHAT_COMMANDS
        .iter()
        .find(|(cmd, _)| cmd.starts_with(line) && cmd.len() > line.len())
        .map(|(cmd, help)| format!("{}  ({help})", &cmd[line.len()..]))
}

/// Returns true when the line is exactly one of the known commands.
fn is_known_command(line: &str) -> bool {
    let trimmed = line.trim_end();
    CHAT_COMMANDS.iter().any(|(cmd, _)| trimmed == *cmd)
}

/// REPL helper: completion, inline hints, and highlighting for the slash
/// commands. Known commands render cyan, unrecognized ones yellow so a
/// typo is visible before Enter.
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = command_candidates(&line[..pos])
            .into_iter()
            .map(|(cmd, help)| Pair {
                display: format!("{cmd} - {help}"),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if is_known_command(line) {
            Owned(line.bright_cyan().to_string())
        } else if line.starts_with('/') {
            Owned(line.yellow().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        command_hint(line)
    }
}

impl Validator for ChatHelper {}

pub async fn run(client: &ApiClient, company: String, tab: String) -> Result<()> {
    if !client.store().is_logged_in() {
        bail!("Not logged in. Run `stockin login` first.");
    }

    let mut transcript = Transcript::new();

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    println!(
        "{}",
        format!("=== StockIn research: {company} ({tab}) ===")
            .bright_magenta()
            .bold()
    );
    println!(
        "{}",
        "Type a question, '/history' to review the conversation, or '/quit' to exit.".bright_black()
    );
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "/quit" || trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed == "/history" {
                    print_history(&transcript);
                    continue;
                }

                if trimmed.is_empty() {
                    println!("{}", "Please enter a question.".yellow());
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                transcript.push_user(format!("({company} - {tab}) {trimmed}"));
                println!("{}", format!("> ({company} - {tab}) {trimmed}").green());
                println!("{}", "Thinking...".bright_black());

                let query = ResearchQuery::new(company.clone(), Some(tab.clone()), trimmed);

                match client.research(&query).await {
                    Ok(AuthOutcome::Authorized(answer)) => {
                        transcript.push_assistant(answer.clone());
                        for line in answer.lines() {
                            println!("{}", line.bright_blue());
                        }
                        println!();
                    }
                    Ok(AuthOutcome::Unauthorized) => {
                        println!(
                            "{}",
                            "Session expired. Please run `stockin login` again.".red()
                        );
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("research request failed: {e}");
                        transcript.push_assistant("Error fetching response.");
                        println!("{}", "Error fetching response.".red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn print_history(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }

    for message in transcript.messages() {
        match message.role {
            MessageRole::User => println!("{}", format!("> {}", message.content).green()),
            MessageRole::Assistant => {
                for line in message.content.lines() {
                    println!("{}", line.bright_blue());
                }
            }
            MessageRole::System => println!("{}", message.content.bright_black()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_candidates_filter_by_prefix() {
        let all = command_candidates("/");
        assert_eq!(all.len(), 2);

        let history = command_candidates("/hi");
        assert_eq!(history, vec![("/history", "review the conversation so far")]);

        assert!(command_candidates("/x").is_empty());
    }

    #[test]
    fn test_plain_text_is_not_completed() {
        assert!(command_candidates("what is the revenue").is_empty());
        assert!(command_candidates("").is_empty());
    }

    #[test]
    fn test_hint_carries_remainder_and_description() {
        assert_eq!(
            command_hint("/qu").as_deref(),
            Some("it  (leave the chat)")
        );
        assert_eq!(command_hint("/quit"), None);
        assert_eq!(command_hint("/history extra"), None);
        assert_eq!(command_hint("how about AAPL"), None);
    }

    #[test]
    fn test_known_command_detection() {
        assert!(is_known_command("/history"));
        assert!(is_known_command("/quit"));
        assert!(!is_known_command("/hist"));
        assert!(!is_known_command("/unknown"));
        assert!(!is_known_command("quit"));
    }
}
