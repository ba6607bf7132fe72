//! Terminal and JSON rendering of parse results and tokens.

use std::collections::BTreeMap;

use owo_colors::OwoColorize;
use quire_lexer::{Token, TokenKind};
use quire_sgml::{ParseIssue, SgmlEvent};
use serde::Serialize;

/// JSON shape of one event.
#[derive(Serialize)]
struct EventRecord<'a> {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    element: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<BTreeMap<&'a str, &'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    non_breaking: bool,
}

impl<'a> From<&'a SgmlEvent> for EventRecord<'a> {
    fn from(event: &'a SgmlEvent) -> Self {
        Self {
            kind: event.kind().to_string(),
            element: event.element().map(|element| element.name()),
            attributes: event.attributes().map(|attributes| {
                attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect()
            }),
            text: event.text(),
            non_breaking: matches!(
                event,
                SgmlEvent::CharacterData {
                    non_breaking: true,
                    ..
                }
            ),
        }
    }
}

/// JSON shape of one issue.
#[derive(Serialize)]
struct IssueRecord<'a> {
    kind: String,
    line: usize,
    message: &'a str,
}

#[derive(Serialize)]
struct Report<'a> {
    events: Vec<EventRecord<'a>>,
    issues: Vec<IssueRecord<'a>>,
}

/// Print events one per line, indented by nesting depth.
pub fn print_events(events: &[SgmlEvent], issues: &[ParseIssue]) {
    println!("=== Events ({}) ===", events.len());
    let mut depth = 0_usize;
    for event in events {
        if matches!(event, SgmlEvent::EndTag { .. }) {
            depth = depth.saturating_sub(1);
        }
        let indent = "  ".repeat(depth);
        match event {
            SgmlEvent::StartTag { .. } => {
                println!("{indent}{}", event.green());
                depth += 1;
            }
            SgmlEvent::EndTag { .. } => println!("{indent}{}", event.blue()),
            SgmlEvent::CharacterData {
                non_breaking: true, ..
            } => println!("{indent}{}", event.cyan()),
            SgmlEvent::CharacterData { .. } => println!("{indent}{event}"),
            SgmlEvent::ParsingFinished => println!("{indent}{}", event.dimmed()),
        }
    }
    print_issues(issues);
}

/// Print the recoverable issues, if there are any, to stderr.
pub fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        return;
    }
    eprintln!("\n=== Parse Issues ({}) ===", issues.len());
    for issue in issues {
        eprintln!("  - {} {}", issue.yellow(), format!("[{}]", issue.kind).dimmed());
    }
}

/// Print events and issues as one pretty JSON document.
pub fn print_events_json(events: &[SgmlEvent], issues: &[ParseIssue]) -> serde_json::Result<()> {
    let report = Report {
        events: events.iter().map(EventRecord::from).collect(),
        issues: issues
            .iter()
            .map(|issue| IssueRecord {
                kind: issue.kind.to_string(),
                line: issue.line,
                message: &issue.message,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print tokens with their byte ranges, colored by kind.
pub fn print_tokens(text: &str, tokens: &[Token]) {
    println!("=== Tokens ({}) ===", tokens.len());
    for token in tokens {
        let range = format!("{:>6}..{:<6}", token.start, token.end);
        let kind = format!("{:<20}", token.kind);
        let body = format!("{:?}", token.text(text));
        match token.kind {
            TokenKind::Keyword => println!("{range} {} {}", kind.magenta(), body.bold()),
            TokenKind::Constant | TokenKind::MultiLineConstant => {
                println!("{range} {} {}", kind.green(), body.green());
            }
            TokenKind::Comment | TokenKind::MultiLineComment => {
                println!("{range} {} {}", kind.dimmed(), body.dimmed());
            }
            TokenKind::Token | TokenKind::EndOfInput => println!("{range} {kind} {body}"),
        }
    }
}
