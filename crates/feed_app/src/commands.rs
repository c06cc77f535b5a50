use feed_core::{find_section, Msg};

/// Everything the main loop reacts to: shell commands and engine completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Feed(Msg),
    /// Show the URL of the n-th article (1-based).
    Open(usize),
    Sections,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line typed at the prompt; blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "more" | "m" => Input::Feed(Msg::ScrolledToBottom),
        "refresh" | "r" => Input::Feed(Msg::RefreshRequested),
        "section" | "s" if rest.is_empty() => Input::Sections,
        "section" | "s" => {
            // Unknown names are passed through as raw server section ids.
            let id = match find_section(rest) {
                Some(section) => section.id.map(str::to_string),
                None => Some(rest.to_ascii_lowercase()),
            };
            Input::Feed(Msg::SectionSelected(id))
        }
        "sections" => Input::Sections,
        "online" => Input::Feed(Msg::ConnectivityChanged(true)),
        "offline" => Input::Feed(Msg::ConnectivityChanged(false)),
        "open" | "o" => match rest.parse::<usize>() {
            Ok(index) if index > 0 => Input::Open(index),
            _ => Input::Unknown(line.to_string()),
        },
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_commands_map_to_messages() {
        assert_eq!(parse_command("more"), Some(Input::Feed(Msg::ScrolledToBottom)));
        assert_eq!(parse_command(" R "), Some(Input::Feed(Msg::RefreshRequested)));
        assert_eq!(
            parse_command("offline"),
            Some(Input::Feed(Msg::ConnectivityChanged(false)))
        );
    }

    #[test]
    fn section_accepts_labels_ids_and_overview() {
        assert_eq!(
            parse_command("section Opinion"),
            Some(Input::Feed(Msg::SectionSelected(Some("commentisfree".into()))))
        );
        assert_eq!(
            parse_command("s sport"),
            Some(Input::Feed(Msg::SectionSelected(Some("sport".into()))))
        );
        assert_eq!(
            parse_command("section overview"),
            Some(Input::Feed(Msg::SectionSelected(None)))
        );
        assert_eq!(
            parse_command("section Technology"),
            Some(Input::Feed(Msg::SectionSelected(Some("technology".into()))))
        );
        assert_eq!(parse_command("section"), Some(Input::Sections));
    }

    #[test]
    fn open_requires_positive_index() {
        assert_eq!(parse_command("open 3"), Some(Input::Open(3)));
        assert_eq!(parse_command("open 0"), Some(Input::Unknown("open 0".into())));
        assert_eq!(parse_command("o x"), Some(Input::Unknown("o x".into())));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("dance"), Some(Input::Unknown("dance".into())));
        assert_eq!(parse_command("q"), Some(Input::Quit));
    }
}
