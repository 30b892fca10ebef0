//! Parsing of REPL input lines.
//!
//! Lines starting with `/` are commands; anything else is a submission.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text to send to the assistant.
    Submit(String),
    ToggleMic,
    SendStaged,
    EditStaged(String),
    SetLanguage(String),
    ListLanguages,
    Mute,
    Unmute,
    ListQuickPrompts,
    /// Zero-based quick prompt index.
    QuickPrompt(usize),
    ShowLog,
    ShowStatus,
    Help,
    Quit,
    /// Blank line.
    Nothing,
    /// Unrecognized or malformed command, with a hint for the user.
    Invalid(String),
}

pub const HELP: &str = "\
Type a question and press enter to ask the assistant.
  /mic            start or stop voice input
  /send           send the staged transcript
  /edit <text>    replace the staged transcript
  /lang <code>    switch language (see /langs)
  /langs          list languages
  /mute, /unmute  turn spoken replies off or on
  /quick [n]      list quick prompts or send prompt n
  /log            show the conversation
  /status         show the session status
  /quit           exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Nothing;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Submit(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name, arg) {
            ("mic", "") => Command::ToggleMic,
            ("send", "") => Command::SendStaged,
            ("edit", text) => Command::EditStaged(text.to_string()),
            ("lang", "") => Command::Invalid("usage: /lang <code>".into()),
            ("lang", code) => Command::SetLanguage(code.to_string()),
            ("langs", "") => Command::ListLanguages,
            ("mute", "") => Command::Mute,
            ("unmute", "") => Command::Unmute,
            ("quick", "") => Command::ListQuickPrompts,
            ("quick", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::QuickPrompt(n - 1),
                _ => Command::Invalid("usage: /quick <n>, counting from 1".into()),
            },
            ("log", "") => Command::ShowLog,
            ("status", "") => Command::ShowStatus,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Invalid(format!("unknown command /{}, try /help", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_submission() {
        assert_eq!(
            Command::parse("  Waste cost this week?  "),
            Command::Submit("Waste cost this week?".into())
        );
        assert_eq!(Command::parse("   "), Command::Nothing);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(Command::parse("/lang ta-IN"), Command::SetLanguage("ta-IN".into()));
        assert_eq!(Command::parse("/quick 2"), Command::QuickPrompt(1));
        assert_eq!(
            Command::parse("/edit top   items"),
            Command::EditStaged("top   items".into())
        );
        assert_eq!(Command::parse("/edit"), Command::EditStaged(String::new()));
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(Command::parse("/mic"), Command::ToggleMic);
        assert_eq!(Command::parse("/send"), Command::SendStaged);
        assert_eq!(Command::parse("/quick"), Command::ListQuickPrompts);
        assert_eq!(Command::parse("/langs"), Command::ListLanguages);
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn test_malformed_commands() {
        assert!(matches!(Command::parse("/quick 0"), Command::Invalid(_)));
        assert!(matches!(Command::parse("/quick two"), Command::Invalid(_)));
        assert!(matches!(Command::parse("/lang"), Command::Invalid(_)));
        assert!(matches!(Command::parse("/mic now"), Command::Invalid(_)));
        assert!(matches!(Command::parse("/dance"), Command::Invalid(_)));
    }
}
