use std::fmt::Write;

use feed_core::{EmptyState, FailureReason, FeedViewModel, SECTIONS};

pub const HELP: &str = "\
commands:
  more | m              load the next page
  refresh | r           reload from the first page
  section <name> | s    filter by section (see `sections`)
  sections              list known sections
  online | offline      report connectivity
  open <n> | o <n>      show the link of article n
  help | ?              this text
  quit | q              leave
";

pub const NO_CONNECTION: &str = "No internet connection.";

pub fn render(view: &FeedViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.section_title);

    for row in &view.articles {
        let _ = writeln!(out, "{:>3}. {}", row.position, row.title);
        let _ = writeln!(out, "     {}", row.published_at);
    }

    if view.articles.is_empty() {
        if let Some(empty_state) = view.empty_state {
            let _ = writeln!(out, "{}", empty_state_text(empty_state));
        }
    } else if let Some(reason) = view.last_failure {
        let _ = writeln!(out, "Could not load more: {}", failure_text(reason));
    }

    let status = if view.refreshing {
        "refreshing..."
    } else if view.loading_more {
        "loading more..."
    } else if view.end_of_feed {
        "end of feed"
    } else {
        ""
    };
    if !status.is_empty() {
        let _ = writeln!(out, "[{status}]");
    }
    if !view.connected {
        let _ = writeln!(out, "[offline]");
    }
    out
}

pub fn render_sections(active: Option<&str>) -> String {
    let mut out = String::new();
    for section in SECTIONS {
        let marker = if section.id == active { '*' } else { ' ' };
        let id = section.id.unwrap_or("-");
        let _ = writeln!(out, "{marker} {:<10} {id}", section.label);
    }
    out
}

fn empty_state_text(empty_state: EmptyState) -> &'static str {
    match empty_state {
        EmptyState::NoConnection => NO_CONNECTION,
        EmptyState::NoResults => "No news found.",
        EmptyState::SomethingWrong => "Something went wrong. Try `refresh`.",
    }
}

fn failure_text(reason: FailureReason) -> String {
    match reason {
        FailureReason::InvalidUrl => "invalid request url".to_string(),
        FailureReason::Network => "network error".to_string(),
        FailureReason::HttpStatus(code) => format!("server answered {code}"),
        FailureReason::MalformedResponse => "unexpected response".to_string(),
    }
}
