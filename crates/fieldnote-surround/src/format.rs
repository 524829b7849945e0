//! Surround formats: what to match, what to create.

use fieldnote_dom::NodeRef;
use fieldnote_dom::node::element_name;
use fieldnote_dom::parse::new_element;

type Matcher = Box<dyn Fn(&NodeRef) -> bool>;
type Factory = Box<dyn Fn() -> NodeRef>;

/// One kind of inline formatting.
///
/// The matcher recognizes existing elements that already carry the format
/// (so toggling off is symmetric with toggling on); the factory creates a
/// fresh wrapper. The two must agree: anything the factory produces should
/// satisfy the matcher.
pub struct SurroundFormat {
    matcher: Matcher,
    factory: Factory,
}

impl SurroundFormat {
    pub fn new(
        matcher: impl Fn(&NodeRef) -> bool + 'static,
        factory: impl Fn() -> NodeRef + 'static,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            factory: Box::new(factory),
        }
    }

    /// A format that wraps in a bare tag and recognizes that tag, e.g.
    /// `with_tag("b")` for bold.
    pub fn with_tag(tag: &str) -> Self {
        let match_tag = tag.to_string();
        let create_tag = tag.to_string();
        Self::new(
            move |node| element_name(node).is_some_and(|name| name.as_ref() == match_tag),
            move || new_element(&create_tag, &[]),
        )
    }

    /// A format wrapping in a tag with fixed attributes, matched on tag name
    /// and the presence of one distinguishing attribute, e.g. a highlight
    /// span matched on its class.
    pub fn with_tag_and_attr(tag: &str, attr: &str, value: &str) -> Self {
        let match_tag = tag.to_string();
        let match_attr = attr.to_string();
        let match_value = value.to_string();
        let create: Vec<(String, String)> = vec![(attr.to_string(), value.to_string())];
        let create_tag = tag.to_string();
        Self::new(
            move |node| {
                element_name(node).is_some_and(|name| name.as_ref() == match_tag)
                    && fieldnote_dom::parse::get_attribute(node, &match_attr).as_deref()
                        == Some(match_value.as_str())
            },
            move || {
                let attrs: Vec<(&str, &str)> = create
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect();
                new_element(&create_tag, &attrs)
            },
        )
    }

    pub fn matches(&self, node: &NodeRef) -> bool {
        (self.matcher)(node)
    }

    pub fn create_wrapper(&self) -> NodeRef {
        (self.factory)()
    }
}
