//! Declarative style rule sets and the inline style filter.
//!
//! Which declarations survive a paste is data, not control flow: each mode
//! is a table of property rules, and [`styling_rules`] picks the table as a
//! pure function of (internal, extended, color scheme). Adding a mode means
//! adding a table.

use kuchikiki::NodeRef;
use smol_str::SmolStr;

/// One property rule. In an allow set the values are still-blocked values;
/// in a block set they are exempted values.
#[derive(Clone, Copy, Debug)]
pub struct PropertyRule {
    pub property: &'static str,
    pub values: &'static [&'static str],
}

const fn rule(property: &'static str) -> PropertyRule {
    PropertyRule {
        property,
        values: &[],
    }
}

/// Properties safe to carry regardless of the destination color scheme.
pub const NIGHT_MODE_PROPERTIES: &[PropertyRule] = &[
    rule("font-weight"),
    rule("font-style"),
    rule("text-decoration-line"),
];

/// The night set plus colors. A `transparent` background is noise some
/// editors attach to everything, not a color choice, and is dropped.
pub const LIGHT_MODE_PROPERTIES: &[PropertyRule] = &[
    rule("font-weight"),
    rule("font-style"),
    rule("text-decoration-line"),
    rule("color"),
    PropertyRule {
        property: "background-color",
        values: &["transparent"],
    },
];

/// Properties stripped from same-editor pastes: these should re-derive from
/// the destination document's defaults rather than travel per-element. A
/// `transparent` background is visually inert and may stay.
pub const INTERNAL_PROPERTIES: &[PropertyRule] = &[
    PropertyRule {
        property: "background-color",
        values: &["transparent"],
    },
    rule("font-size"),
    rule("font-family"),
];

/// The two predicate shapes over a rule table.
#[derive(Clone, Copy, Debug)]
pub enum StylePredicate {
    /// Property must be listed, and its value must not be one of the rule's
    /// blocked values.
    Allow(&'static [PropertyRule]),
    /// Property must not be listed, unless its value is one of the rule's
    /// exempted values.
    Block(&'static [PropertyRule]),
}

impl StylePredicate {
    /// Whether a declaration survives. Names and values compare as the
    /// literal attribute text; equivalent spellings (`transparent` vs
    /// `rgba(0,0,0,0)`) are not unified.
    pub fn keeps(&self, property: &str, value: &str) -> bool {
        match self {
            Self::Allow(rules) => rules
                .iter()
                .find(|r| r.property == property)
                .is_some_and(|r| !r.values.contains(&value)),
            Self::Block(rules) => rules
                .iter()
                .find(|r| r.property == property)
                .is_none_or(|r| r.values.contains(&value)),
        }
    }
}

/// Destination document color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Night,
}

/// Rule selection for a paste. `None` means no style attribute survives at
/// all (the tag filter already removes them in that mode).
pub fn styling_rules(
    internal: bool,
    extended: bool,
    color_scheme: ColorScheme,
) -> Option<StylePredicate> {
    if internal {
        return Some(StylePredicate::Block(INTERNAL_PROPERTIES));
    }
    if !extended {
        return None;
    }
    Some(StylePredicate::Allow(match color_scheme {
        ColorScheme::Light => LIGHT_MODE_PROPERTIES,
        ColorScheme::Night => NIGHT_MODE_PROPERTIES,
    }))
}

/// A parsed `style` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: SmolStr,
    pub value: SmolStr,
}

/// Tolerant split of a style attribute into declarations. Splits on `;` and
/// the first `:`; fragments without a colon are dropped.
pub fn parse_declarations(style: &str) -> Vec<Declaration> {
    style
        .split(';')
        .filter_map(|declaration| {
            let declaration = declaration.trim();
            let (name, value) = declaration.split_once(':')?;
            Some(Declaration {
                name: name.trim().into(),
                value: value.trim().into(),
            })
        })
        .collect()
}

pub fn write_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Higher-order filter: returns a closure that rewrites an element's inline
/// `style` in place, keeping only declarations the predicate accepts. A
/// style attribute filtered down to nothing stays present, empty.
pub fn filter_styling(predicate: StylePredicate) -> impl Fn(&NodeRef) {
    move |node: &NodeRef| {
        let Some(element) = node.as_element() else {
            return;
        };
        let mut attributes = element.attributes.borrow_mut();
        let Some(style) = attributes.get("style").map(str::to_string) else {
            return;
        };
        let kept: Vec<Declaration> = parse_declarations(&style)
            .into_iter()
            .filter(|d| predicate.keeps(&d.name, &d.value))
            .collect();
        attributes.insert("style", write_declarations(&kept));
    }
}
