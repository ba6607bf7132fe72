//! The HTML 3.2 document type.
//!
//! Content models follow the W3C HTML 3.2 DTD, flattened into tag sets.
//! Two relaxations keep real-world pages parseable: `A`, `FONT` and
//! `CENTER` are inclusions of `HTML` (so acceptable anywhere, subject to
//! exclusions), and `XMP`/`LISTING` are kept as raw-text blocks.

use std::sync::{Arc, LazyLock};

use quire_dtd::{ContentType, Dtd, Element};

use super::entities::declare_entities;

// =============================================================================
// Element Groups
// =============================================================================

const HEADINGS: &[&str] = &["H1", "H2", "H3", "H4", "H5", "H6"];

const FONT_STYLE: &[&str] = &["TT", "I", "B", "U", "STRIKE", "BIG", "SMALL", "SUB", "SUP"];

const PHRASE: &[&str] = &["EM", "STRONG", "DFN", "CODE", "SAMP", "KBD", "VAR", "CITE"];

const SPECIAL: &[&str] = &["A", "IMG", "APPLET", "FONT", "BASEFONT", "BR", "SCRIPT", "MAP"];

const FORM_FIELDS: &[&str] = &["INPUT", "SELECT", "TEXTAREA"];

const BLOCK: &[&str] = &[
    "P", "UL", "OL", "DIR", "MENU", "PRE", "XMP", "LISTING", "DL", "DIV", "CENTER",
    "BLOCKQUOTE", "FORM", "ISINDEX", "HR", "TABLE",
];

const HEAD_CONTENT: &[&str] = &["TITLE", "ISINDEX", "BASE", "SCRIPT", "STYLE", "META", "LINK"];

/// `%text`: character data and text-level elements.
fn text() -> Vec<&'static str> {
    let mut names = vec!["#PCDATA"];
    for group in [FONT_STYLE, PHRASE, SPECIAL, FORM_FIELDS] {
        names.extend_from_slice(group);
    }
    names
}

/// `%flow`: text plus block elements.
fn flow() -> Vec<&'static str> {
    let mut names = text();
    names.extend_from_slice(BLOCK);
    names
}

/// `%body.content`: flow plus headings and `ADDRESS`.
fn body_content() -> Vec<&'static str> {
    let mut names = flow();
    names.extend_from_slice(HEADINGS);
    names.push("ADDRESS");
    names
}

// =============================================================================
// Attribute Groups
// =============================================================================

const ALIGN: &[&str] = &["ALIGN"];

const TABLE_CELL: &[&str] = &[
    "NOWRAP", "ROWSPAN", "COLSPAN", "ALIGN", "VALIGN", "WIDTH", "HEIGHT",
];

// =============================================================================
// Element Declarations
// =============================================================================

fn structure(dtd: &mut Dtd) {
    let declarations = [
        Element::new("HTML", ContentType::Model)
            .with_attributes(["VERSION"])
            .with_content_model(["HEAD", "BODY"])
            .with_inclusions(["A", "FONT", "CENTER"]),
        Element::new("HEAD", ContentType::Model).with_content_model(HEAD_CONTENT),
        Element::new("TITLE", ContentType::Pcdata),
        Element::new("ISINDEX", ContentType::Empty).with_attributes(["PROMPT"]),
        Element::new("BASE", ContentType::Empty).with_attributes(["HREF"]),
        Element::new("META", ContentType::Empty).with_attributes(["HTTP-EQUIV", "NAME", "CONTENT"]),
        Element::new("LINK", ContentType::Empty)
            .with_attributes(["HREF", "REL", "REV", "TITLE"]),
        Element::new("SCRIPT", ContentType::Cdata).with_attributes(["LANGUAGE", "SRC", "TYPE"]),
        Element::new("STYLE", ContentType::Cdata).with_attributes(["TYPE"]),
        Element::new("BODY", ContentType::Model)
            .with_attributes(["BACKGROUND", "BGCOLOR", "TEXT", "LINK", "VLINK", "ALINK"])
            .with_content_model(body_content()),
        Element::new("ADDRESS", ContentType::Model).with_content_model({
            let mut names = text();
            names.push("P");
            names
        }),
        Element::new("DIV", ContentType::Model)
            .with_attributes(ALIGN)
            .with_content_model(body_content()),
        Element::new("CENTER", ContentType::Model).with_content_model(body_content()),
        Element::new("BLOCKQUOTE", ContentType::Model).with_content_model(body_content()),
        Element::new("HR", ContentType::Empty)
            .with_attributes(["ALIGN", "NOSHADE", "SIZE", "WIDTH"]),
    ];
    for element in declarations {
        let _ = dtd.add_element(element);
    }
    for heading in HEADINGS {
        let _ = dtd.add_element(
            Element::new(heading, ContentType::Model)
                .with_attributes(ALIGN)
                .with_content_model(text()),
        );
    }
}

fn blocks(dtd: &mut Dtd) {
    let declarations = [
        Element::new("P", ContentType::Model)
            .with_attributes(ALIGN)
            .with_content_model(text()),
        Element::new("PRE", ContentType::Model)
            .with_attributes(["WIDTH"])
            .with_content_model(text())
            .with_exclusions(["IMG", "BIG", "SMALL", "SUB", "SUP"]),
        Element::new("XMP", ContentType::Cdata),
        Element::new("LISTING", ContentType::Cdata),
        Element::new("DL", ContentType::Model)
            .with_attributes(["COMPACT"])
            .with_content_model(["DT", "DD"]),
        Element::new("DT", ContentType::Model).with_content_model(text()),
        Element::new("DD", ContentType::Model).with_content_model(flow()),
        Element::new("UL", ContentType::Model)
            .with_attributes(["TYPE", "COMPACT"])
            .with_content_model(["LI"]),
        Element::new("OL", ContentType::Model)
            .with_attributes(["TYPE", "START", "COMPACT"])
            .with_content_model(["LI"]),
        Element::new("DIR", ContentType::Model)
            .with_attributes(["COMPACT"])
            .with_content_model(["LI"]),
        Element::new("MENU", ContentType::Model)
            .with_attributes(["COMPACT"])
            .with_content_model(["LI"]),
        Element::new("LI", ContentType::Model)
            .with_attributes(["TYPE", "VALUE"])
            .with_content_model(flow()),
    ];
    for element in declarations {
        let _ = dtd.add_element(element);
    }
}

fn forms(dtd: &mut Dtd) {
    let declarations = [
        Element::new("FORM", ContentType::Model)
            .with_attributes(["ACTION", "METHOD", "ENCTYPE"])
            .with_content_model(body_content())
            .with_exclusions(["FORM"]),
        Element::new("INPUT", ContentType::Empty).with_attributes([
            "TYPE", "NAME", "VALUE", "CHECKED", "SIZE", "MAXLENGTH", "SRC", "ALIGN",
        ]),
        Element::new("SELECT", ContentType::Model)
            .with_attributes(["NAME", "SIZE", "MULTIPLE"])
            .with_content_model(["OPTION"]),
        Element::new("OPTION", ContentType::Pcdata).with_attributes(["SELECTED", "VALUE"]),
        Element::new("TEXTAREA", ContentType::Rcdata).with_attributes(["NAME", "ROWS", "COLS"]),
    ];
    for element in declarations {
        let _ = dtd.add_element(element);
    }
}

fn tables(dtd: &mut Dtd) {
    let declarations = [
        Element::new("TABLE", ContentType::Model)
            .with_attributes(["ALIGN", "WIDTH", "BORDER", "CELLSPACING", "CELLPADDING"])
            .with_content_model(["CAPTION", "TR"]),
        Element::new("CAPTION", ContentType::Model)
            .with_attributes(ALIGN)
            .with_content_model(text()),
        Element::new("TR", ContentType::Model)
            .with_attributes(["ALIGN", "VALIGN"])
            .with_content_model(["TH", "TD"]),
        Element::new("TH", ContentType::Model)
            .with_attributes(TABLE_CELL)
            .with_content_model(body_content()),
        Element::new("TD", ContentType::Model)
            .with_attributes(TABLE_CELL)
            .with_content_model(body_content()),
    ];
    for element in declarations {
        let _ = dtd.add_element(element);
    }
}

fn text_level(dtd: &mut Dtd) {
    for name in FONT_STYLE.iter().chain(PHRASE) {
        let _ = dtd.add_element(Element::new(name, ContentType::Model).with_content_model(text()));
    }

    let declarations = [
        Element::new("A", ContentType::Model)
            .with_attributes(["NAME", "HREF", "REL", "REV", "TITLE"])
            .with_content_model(text())
            .with_exclusions(["A"]),
        Element::new("IMG", ContentType::Empty).with_attributes([
            "SRC", "ALT", "ALIGN", "HEIGHT", "WIDTH", "BORDER", "HSPACE", "VSPACE", "USEMAP",
            "ISMAP",
        ]),
        Element::new("APPLET", ContentType::Model)
            .with_attributes([
                "CODEBASE", "CODE", "ALT", "NAME", "WIDTH", "HEIGHT", "ALIGN", "HSPACE", "VSPACE",
            ])
            .with_content_model({
                let mut names = text();
                names.push("PARAM");
                names
            }),
        Element::new("PARAM", ContentType::Empty).with_attributes(["NAME", "VALUE"]),
        Element::new("FONT", ContentType::Model)
            .with_attributes(["SIZE", "COLOR"])
            .with_content_model(text()),
        Element::new("BASEFONT", ContentType::Empty).with_attributes(["SIZE"]),
        Element::new("BR", ContentType::Empty).with_attributes(["CLEAR"]),
        Element::new("MAP", ContentType::Model)
            .with_attributes(["NAME"])
            .with_content_model(["AREA"]),
        Element::new("AREA", ContentType::Empty)
            .with_attributes(["SHAPE", "COORDS", "HREF", "NOHREF", "ALT"]),
    ];
    for element in declarations {
        let _ = dtd.add_element(element);
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Build a fresh HTML 3.2 DTD.
///
/// Most callers want the shared instance from [`html_dtd`]; building a copy
/// is useful to extend the table with extra elements or entities.
#[must_use]
pub fn build_html_dtd() -> Dtd {
    let mut dtd = Dtd::new("HTML");
    structure(&mut dtd);
    blocks(&mut dtd);
    forms(&mut dtd);
    tables(&mut dtd);
    text_level(&mut dtd);
    declare_entities(&mut dtd);
    dtd
}

static HTML_DTD: LazyLock<Arc<Dtd>> = LazyLock::new(|| Arc::new(build_html_dtd()));

/// The shared HTML 3.2 DTD, built on first use.
#[must_use]
pub fn html_dtd() -> Arc<Dtd> {
    Arc::clone(&HTML_DTD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_dtd_is_valid() {
        let dtd = html_dtd();
        assert_eq!(dtd.validate(), Ok(()));
        assert_eq!(dtd.root_name(), "HTML");
        assert_eq!(dtd.element_count(), 69);
        assert_eq!(dtd.entity_count(), 100);
    }

    #[test]
    fn test_shared_instance() {
        assert!(Arc::ptr_eq(&html_dtd(), &html_dtd()));
    }

    #[test]
    fn test_paragraph_holds_text_not_blocks() {
        let dtd = html_dtd();
        let p = dtd.element("p").unwrap();
        assert_eq!(p.content_type(), ContentType::ModelPcdata);
        assert!(p.accepts_name("B"));
        assert!(!p.accepts_name("P"));
        assert!(!p.accepts_name("UL"));
    }

    #[test]
    fn test_raw_text_elements() {
        let dtd = html_dtd();
        for name in ["SCRIPT", "STYLE", "XMP", "LISTING"] {
            assert_eq!(dtd.element(name).unwrap().content_type(), ContentType::Cdata);
        }
        assert_eq!(
            dtd.element("TEXTAREA").unwrap().content_type(),
            ContentType::Rcdata
        );
    }
}
