use anyhow::Result;
use railway_faq_core::{Assistant, Session, Turn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Debug, PartialEq)]
enum Input<'a> {
    Query(&'a str),
    History,
    Feedback { rating: u8, comment: &'a str },
    Invalid(String),
}

fn parse_input(line: &str) -> Input<'_> {
    if line == "/history" {
        return Input::History;
    }

    if let Some(rest) = line.strip_prefix("/feedback") {
        let rest = rest.trim_start();
        let (rating, comment) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        return match rating.parse::<u8>() {
            Ok(rating) => Input::Feedback {
                rating,
                comment: comment.trim(),
            },
            Err(_) => Input::Invalid("usage: /feedback <1-5> [comment]".to_string()),
        };
    }

    Input::Query(line)
}

pub fn format_turn(turn: &Turn) -> String {
    format!("{}: {}", turn.role.label(), turn.text)
}

pub fn run_chat(assistant: &Assistant) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new();

    println!("🚆 Indian Railways Chatbot");
    println!("Ask your questions about tickets, PNR, delays, and more. Type 'exit' to leave.");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed.to_ascii_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        rl.add_history_entry(trimmed).ok();

        match parse_input(trimmed) {
            Input::Query(query) => {
                if let Some(reply) = session.submit(assistant, query) {
                    let history = session.history();
                    for turn in &history[history.len().saturating_sub(2)..] {
                        println!("{}", format_turn(turn));
                    }
                    tracing::debug!(score = reply.retrieval.score, "answered");
                }
            }
            Input::History => {
                for turn in session.history() {
                    println!("{}", format_turn(turn));
                }
            }
            Input::Feedback { rating, comment } => {
                match assistant.submit_feedback(rating, comment) {
                    Ok(_) => println!("Thanks for your feedback!"),
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            Input::Invalid(msg) => eprintln!("{msg}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railway_faq_core::Role;

    #[test]
    fn recognises_commands() {
        assert_eq!(parse_input("/history"), Input::History);
        assert_eq!(
            parse_input("/feedback 4 quick and clear"),
            Input::Feedback {
                rating: 4,
                comment: "quick and clear"
            }
        );
        assert_eq!(
            parse_input("/feedback 2"),
            Input::Feedback {
                rating: 2,
                comment: ""
            }
        );
        assert!(matches!(parse_input("/feedback great"), Input::Invalid(_)));
        assert_eq!(parse_input("pnr at night"), Input::Query("pnr at night"));
    }

    #[test]
    fn turns_are_labelled() {
        let turn = Turn {
            role: Role::Bot,
            text: "hello".to_string(),
        };
        assert_eq!(format_turn(&turn), "Bot: hello");
    }
}
