//! Property tests for event stream invariants.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use quire_sgml::{EventCollector, HtmlParser, MarkupWriter, SgmlEvent, html_dtd};

const INLINE: &[&str] = &["B", "I", "U", "TT", "EM", "STRONG", "CODE", "VAR"];

const WORDS: &[&str] = &["alpha", "beta", "x", "y z", "1 2 3", " "];

/// Markup fragments, defined and undefined, that make up tag soup.
const SOUP: &[&str] = &[
    "<P>", "</P>", "<UL>", "</UL>", "<LI>", "<TABLE>", "<TR>", "<TD>", "</TABLE>", "<B>",
    "</B>", "<A HREF=x>", "</A>", "<BR>", "<HTML>", "</HTML>", "<BODY>", "</BODY>", "<HEAD>",
    "<TITLE>", "<DL>", "<DT>", "<DD>", "<TEXTAREA>", "</TEXTAREA>", "<SCRIPT>", "</SCRIPT>",
    "<BLINK>", "</BLINK>", "text", " ", "\n", "\r\n", "&amp;", "&nbsp;", "a < b", "&bogus;",
    "&#13;", "<IMG ALT=\"x&#10;y\">",
];

fn pick(g: &mut Gen, choices: &[&'static str]) -> &'static str {
    g.choose(choices).copied().unwrap_or("x")
}

#[derive(Clone, Debug)]
enum Node {
    Text(&'static str),
    Element(&'static str, Vec<Node>),
}

impl Node {
    fn arbitrary_with_depth(g: &mut Gen, depth: usize) -> Self {
        if depth == 0 || bool::arbitrary(g) {
            return Self::Text(pick(g, WORDS));
        }
        Self::arbitrary_element(g, depth)
    }

    fn arbitrary_element(g: &mut Gen, depth: usize) -> Self {
        let count = usize::arbitrary(g) % 4;
        let children = (0..count)
            .map(|_| Self::arbitrary_with_depth(g, depth.saturating_sub(1)))
            .collect();
        Self::Element(pick(g, INLINE), children)
    }

    fn render(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(name, children) => {
                out.push_str(&format!("<{name}>"));
                for child in children {
                    child.render(out);
                }
                out.push_str(&format!("</{name}>"));
            }
        }
    }

    fn start_names(&self, out: &mut Vec<String>) {
        if let Self::Element(name, children) = self {
            out.push((*name).to_string());
            for child in children {
                child.start_names(out);
            }
        }
    }

    fn text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(_, children) => {
                for child in children {
                    child.text(out);
                }
            }
        }
    }
}

/// A well-formed fragment of nested inline elements.
#[derive(Clone, Debug)]
struct Fragment(Node);

impl Arbitrary for Fragment {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(Node::arbitrary_element(g, 3))
    }
}

/// An arbitrary sequence of markup pieces.
#[derive(Clone, Debug)]
struct Soup(Vec<&'static str>);

impl Arbitrary for Soup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() + 1);
        Self((0..len).map(|_| pick(g, SOUP)).collect())
    }
}

fn parse_html(input: &str) -> Vec<SgmlEvent> {
    let mut collector = EventCollector::new();
    {
        let mut parser = HtmlParser::new();
        parser.add_listener(&mut collector);
        parser.parse_str(input).unwrap();
    }
    collector.into_events()
}

fn is_defined(event: &SgmlEvent) -> bool {
    event
        .element()
        .is_some_and(|element| html_dtd().element(element.name()).is_some())
}

#[quickcheck]
fn prop_balanced_fragment_nests_properly(fragment: Fragment) -> bool {
    let mut markup = String::new();
    fragment.0.render(&mut markup);
    let events = parse_html(&markup);

    let mut stack: Vec<String> = Vec::new();
    let mut starts = Vec::new();
    let mut text = String::new();
    for event in &events {
        match event {
            SgmlEvent::StartTag { element, .. } => {
                stack.push(element.name().to_string());
                starts.push(element.name().to_string());
            }
            SgmlEvent::EndTag { element } => {
                if stack.pop().as_deref() != Some(element.name()) {
                    return false;
                }
            }
            SgmlEvent::CharacterData { text: chunk, .. } => text.push_str(chunk),
            SgmlEvent::ParsingFinished => {}
        }
    }

    let mut expected_starts = Vec::new();
    fragment.0.start_names(&mut expected_starts);
    let mut expected_text = String::new();
    fragment.0.text(&mut expected_text);

    stack.is_empty()
        && starts == expected_starts
        && text == expected_text
        && events.last() == Some(&SgmlEvent::ParsingFinished)
}

#[quickcheck]
fn prop_defined_start_and_end_tags_balance(soup: Soup) -> bool {
    let events = parse_html(&soup.0.concat());

    let mut depth = 0_usize;
    for event in events.iter().filter(|event| is_defined(event)) {
        match event {
            SgmlEvent::StartTag { .. } => depth += 1,
            SgmlEvent::EndTag { .. } => match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return false,
            },
            _ => {}
        }
    }

    let finished = events
        .iter()
        .filter(|event| matches!(event, SgmlEvent::ParsingFinished))
        .count();
    depth == 0 && finished == 1 && events.last() == Some(&SgmlEvent::ParsingFinished)
}

#[quickcheck]
fn prop_serialized_events_reparse_identically(soup: Soup) -> bool {
    let events = parse_html(&soup.0.concat());

    let mut writer = MarkupWriter::new();
    {
        let mut parser = HtmlParser::new();
        parser.add_listener(&mut writer);
        parser.parse_str(&soup.0.concat()).unwrap();
    }
    let reparsed = parse_html(writer.output());

    events == reparsed
}
