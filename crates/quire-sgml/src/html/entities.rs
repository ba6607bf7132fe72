//! Character entities of HTML 3.2.

use quire_dtd::{Dtd, Entity};

/// Markup-significant characters.
const MARKUP_ENTITIES: [(&str, u32); 4] = [("amp", 38), ("lt", 60), ("gt", 62), ("quot", 34)];

/// ISO 8859-1 entity names, in code point order from U+00A0 (`nbsp`).
const LATIN1_ENTITIES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", //
    "uml", "copy", "ordf", "laquo", "not", "shy", "reg", "macr", //
    "deg", "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot", //
    "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest", //
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", //
    "Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", //
    "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times", //
    "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig", //
    "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil", //
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", //
    "eth", "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", //
    "oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml", //
];

const LATIN1_FIRST: u32 = 0xA0;

/// Register every HTML 3.2 character entity on `dtd`. Each replacement text
/// is a numeric character reference.
pub(super) fn declare_entities(dtd: &mut Dtd) {
    for (name, code_point) in MARKUP_ENTITIES {
        let _ = dtd.add_entity(Entity::character(name, code_point));
    }
    for (code_point, name) in (LATIN1_FIRST..).zip(LATIN1_ENTITIES) {
        let _ = dtd.add_entity(Entity::character(name, code_point));
    }
}
