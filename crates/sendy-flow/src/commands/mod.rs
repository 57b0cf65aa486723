// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::event::{AppEvent, Direction};
use sendy_core::types::SUBSCRIBER_LEN;

/// Largest repeat count for `bs`, `left` and `right`: the widest field.
pub const MAX_REPEAT: usize = SUBSCRIBER_LEN;

pub const HELP: &str = "\
commands:
  type <text>     type characters into the focused field
  paste <text>    paste text at the caret
  bs [n]          backspace n times (default 1, at most 10)
  left [n]        move the caret left
  right [n]       move the caret right
  clear           empty the focused field
  agree           toggle the terms agreement
  submit          send the phone number or the code
  code <digits>   replace the code and submit it
  reset           leave the SMS screen and start over
  bank <name>     pick a bank when asked to
  wait            block until the pending request finishes
  status          print the current screen
  help            show this text
  q, quit         leave";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Paste(String),
    Backspace(usize),
    Left(usize),
    Right(usize),
    Clear,
    Agree,
    Submit,
    // Clear, paste and submit in one go
    Code(String),
    Reset,
    Bank(String),
    // Handled by the shell loop, not the app
    Wait,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one shell line.
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// line returns `Err("")` as a sentinel meaning "nothing to do".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "status" => Ok(Command::Status),
            "wait" => Ok(Command::Wait),
            "clear" => Ok(Command::Clear),
            "agree" => Ok(Command::Agree),
            "submit" => Ok(Command::Submit),
            "reset" => Ok(Command::Reset),
            "bs" | "backspace" => count(rest, "bs").map(Command::Backspace),
            "left" => count(rest, "left").map(Command::Left),
            "right" => count(rest, "right").map(Command::Right),
            "type" => required(rest, "type <text>").map(Command::Type),
            "paste" => required(rest, "paste <text>").map(Command::Paste),
            "code" => required(rest, "code <digits>").map(Command::Code),
            "bank" => required(rest, "bank <name>").map(Command::Bank),
            other => Err(format!("unknown command: {other}")),
        }
    }

    /// The app events this command stands for. Shell-only commands map to
    /// nothing.
    pub fn into_events(self) -> Vec<AppEvent> {
        match self {
            Command::Type(text) => text.chars().map(AppEvent::Char).collect(),
            Command::Paste(text) => vec![AppEvent::Paste(text)],
            Command::Backspace(n) => vec![AppEvent::Backspace; n],
            Command::Left(n) => vec![AppEvent::Cursor(Direction::Left); n],
            Command::Right(n) => vec![AppEvent::Cursor(Direction::Right); n],
            Command::Clear => vec![AppEvent::Clear],
            Command::Agree => vec![AppEvent::ToggleAgreement],
            Command::Submit => vec![AppEvent::Submit],
            Command::Code(code) => vec![AppEvent::Clear, AppEvent::Paste(code), AppEvent::Submit],
            Command::Reset => vec![AppEvent::Reset],
            Command::Bank(name) => vec![AppEvent::SelectBank(name)],
            Command::Quit => vec![AppEvent::Quit],
            Command::Wait | Command::Status | Command::Help => Vec::new(),
        }
    }
}

fn count(rest: &str, word: &str) -> Result<usize, String> {
    if rest.is_empty() {
        return Ok(1);
    }
    match rest.parse::<usize>() {
        Ok(n) if n <= MAX_REPEAT => Ok(n),
        _ => Err(format!("usage: {word} [count], count at most {MAX_REPEAT}")),
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_line_is_sentinel() {
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn simple_words() {
        assert_eq!(Command::parse("submit"), Ok(Command::Submit));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse(" wait "), Ok(Command::Wait));
    }

    #[test]
    fn counts_default_to_one() {
        assert_eq!(Command::parse("bs"), Ok(Command::Backspace(1)));
        assert_eq!(Command::parse("left 3"), Ok(Command::Left(3)));
        assert_eq!(
            Command::parse("right x"),
            Err("usage: right [count], count at most 10".to_string())
        );
    }

    #[test]
    fn counts_are_capped_at_field_width() {
        assert_eq!(Command::parse("bs 10"), Ok(Command::Backspace(10)));
        assert_eq!(
            Command::parse("bs 11"),
            Err("usage: bs [count], count at most 10".to_string())
        );
        assert_eq!(
            Command::parse("left 18446744073709551615"),
            Err("usage: left [count], count at most 10".to_string())
        );
        assert_eq!(
            Command::parse("right 99999999999999999999999"),
            Err("usage: right [count], count at most 10".to_string())
        );
    }

    #[test]
    fn text_argument_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("paste +7 999 123-45-67"),
            Ok(Command::Paste("+7 999 123-45-67".into()))
        );
        assert_eq!(Command::parse("type"), Err("usage: type <text>".to_string()));
    }

    #[test]
    fn unknown_word() {
        assert_eq!(
            Command::parse("dance"),
            Err("unknown command: dance".to_string())
        );
    }

    #[test]
    fn type_expands_to_chars() {
        let events = Command::Type("9a".into()).into_events();
        assert_eq!(events, vec![AppEvent::Char('9'), AppEvent::Char('a')]);
    }

    #[test]
    fn code_clears_then_submits() {
        let events = Command::Code("123456".into()).into_events();
        assert_eq!(
            events,
            vec![
                AppEvent::Clear,
                AppEvent::Paste("123456".into()),
                AppEvent::Submit
            ]
        );
    }

    #[test]
    fn shell_commands_have_no_events() {
        assert!(Command::Wait.into_events().is_empty());
        assert!(Command::Status.into_events().is_empty());
    }
}
