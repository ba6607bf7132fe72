//! Quire CLI - SGML/HTML event and tokenizer inspection tool
//!
//! Usage:
//!   quire events <file>            Print the event stream of an HTML file
//!   quire events --html '<p>hi'    Parse an HTML string instead
//!   quire events <file> --json     Print events and issues as JSON
//!   quire normalize <file>         Re-serialize a document with all tags explicit
//!   quire lex --language java <file>
//!   quire check-dtd                Validate the built-in HTML 3.2 DTD
//!
//! Set `RUST_LOG=debug` to trace implicit closes and entity expansion.

mod output;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use quire_lexer::{Language, LexState, Token};
use quire_sgml::{
    EventCollector, MarkupWriter, ParseIssue, ParserConfig, SgmlListener, SgmlParser,
    build_html_dtd, html_dtd,
};

/// Quire - a DTD-driven SGML/HTML parser
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show how omitted end tags are inferred
    quire events --html '<ul><li>one<li>two</ul>'

    # Same document, validated strictly
    quire events --strict page.html

    # Make every implied tag explicit
    quire normalize page.html

    # Lex line by line, carrying comment/string state across lines
    quire lex --language c --by-line main.c
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parse events of a document
    Events {
        #[command(flatten)]
        input: DocumentInput,

        /// Print events and issues as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a document and write it back with every tag explicit
    Normalize {
        #[command(flatten)]
        input: DocumentInput,
    },
    /// Print the tokens of a source file
    Lex {
        /// Source language: java, c, cpp or smalltalk
        #[arg(short, long)]
        language: Language,

        /// Lex each line separately, resuming from the previous line's state
        #[arg(long)]
        by_line: bool,

        /// Source file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Validate the built-in HTML 3.2 DTD
    CheckDtd,
}

/// Where a document comes from and how it is parsed.
#[derive(clap::Args, Debug)]
struct DocumentInput {
    /// Path to the document
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse an HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Reject undeclared attributes and drop unknown end tags
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if cli.no_color {
        owo_colors::set_override(false);
    }

    match cli.command {
        Command::Events { input, json } => {
            let mut collector = EventCollector::new();
            let issues = parse_document(&input, &mut collector)?;
            if json {
                output::print_events_json(collector.events(), &issues)?;
            } else {
                output::print_events(collector.events(), &issues);
            }
        }
        Command::Normalize { input } => {
            let mut writer = MarkupWriter::new();
            let issues = parse_document(&input, &mut writer)?;
            print!("{}", writer.output());
            output::print_issues(&issues);
        }
        Command::Lex {
            language,
            by_line,
            path,
        } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let tokens = if by_line {
                lex_by_line(language, &text)
            } else {
                quire_lexer::tokenize(language, &text)
            };
            output::print_tokens(&text, &tokens);
        }
        Command::CheckDtd => check_dtd()?,
    }
    Ok(())
}

/// Parse the requested document into `listener` and return the issues.
fn parse_document(input: &DocumentInput, listener: &mut dyn SgmlListener) -> Result<Vec<ParseIssue>> {
    let config = if input.strict {
        ParserConfig::strict()
    } else {
        ParserConfig::html()
    };
    let mut parser = SgmlParser::with_config(html_dtd(), config);
    parser.add_listener(listener);

    if let Some(ref html) = input.html {
        parser.parse_str(html).context("failed to parse --html input")?;
    } else if let Some(ref path) = input.path {
        let reader = open(path)?;
        parser
            .parse_reader(reader)
            .with_context(|| format!("failed to parse {}", path.display()))?;
    } else {
        bail!("a file path or --html is required");
    }
    Ok(parser.take_issues())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Lex `text` one line at a time, the way an editor re-lexes edited lines.
fn lex_by_line(language: Language, text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut state = LexState::default();
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let line_end = line_start + line.trim_end_matches(['\n', '\r']).len();
        let mut tokenizer = language.tokenizer(text, line_start..line_end);
        tokenizer.set_state(state);
        tokens.extend(tokenizer.tokenize_all());
        state = tokenizer.state();
        line_start += line.len();
    }
    tokens
}

fn check_dtd() -> Result<()> {
    let dtd = build_html_dtd();
    dtd.validate().context("built-in HTML DTD is inconsistent")?;
    println!(
        "HTML 3.2 DTD is valid: root <{}>, {} elements, {} entities",
        dtd.root_name(),
        dtd.element_count(),
        dtd.entity_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_lexer::TokenKind;

    #[test]
    fn test_lex_by_line_carries_comment_state() {
        let text = "/* a\r\nb */ x\n";
        let kinds: Vec<TokenKind> = lex_by_line(Language::C, text)
            .iter()
            .map(|token| token.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                TokenKind::MultiLineComment,
                TokenKind::Comment,
                TokenKind::Token
            ]
        );
    }

    #[test]
    fn test_builtin_dtd_checks() {
        assert!(check_dtd().is_ok());
    }
}
