//! Behavior tests for the surround engine against live DOM fixtures.

use fieldnote_dom::parse::{inner_html, outer_html, parse_body_fragment};
use fieldnote_dom::{NodeRef, Position, SelectionRange};
use fieldnote_surround::{
    SplitPolicy, SurroundFormat, is_surrounded, surround, surround_splitting, unsurround,
};

fn bold() -> SurroundFormat {
    SurroundFormat::with_tag("b")
}

fn underline() -> SurroundFormat {
    SurroundFormat::with_tag("u")
}

fn child(body: &NodeRef, index: usize) -> NodeRef {
    body.children().nth(index).unwrap()
}

#[test]
fn surround_all_text() {
    let body = parse_body_fragment("111222");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    let applied = surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>111222</b>");
    assert_eq!(outer_html(&applied), "<b>111222</b>");
}

#[test]
fn surround_first_half() {
    let body = parse_body_fragment("111222");
    let text = child(&body, 0);
    let range = SelectionRange::new(Position::new(text.clone(), 0), Position::new(text, 3));

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>111</b>222");
}

#[test]
fn surround_second_half() {
    let body = parse_body_fragment("111222");
    let text = child(&body, 0);
    let range = SelectionRange::new(Position::new(text.clone(), 3), Position::new(text, 6));

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "111<b>222</b>");
}

#[test]
fn surround_across_block_elements_is_a_noop() {
    let body = parse_body_fragment("Before<br><ul><li>First</li><li>Second</li></ul>");
    let range = SelectionRange::new(Position::new(body.clone(), 0), Position::new(body.clone(), 3));

    assert!(surround(&range, &body, &bold()).is_none());
    assert_eq!(
        inner_html(&body),
        "Before<br><ul><li>First</li><li>Second</li></ul>"
    );
}

#[test]
fn surround_merges_into_matching_neighbour() {
    let body = parse_body_fragment("before<u><b>after</b></u>");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    surround(&range, &body, &underline()).unwrap();

    assert_eq!(inner_html(&body), "<u>before<b>after</b></u>");
}

#[test]
fn surround_leaves_differently_nested_neighbour_alone() {
    let body = parse_body_fragment("before<u><b>after</b></u>");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>before</b><u><b>after</b></u>");
}

#[test]
fn surround_extends_existing_and_flattens_nesting() {
    let body = parse_body_fragment("111<b>222<b>333<b>444</b></b></b>555");
    let range = SelectionRange::select_node(&child(&body, 2)).unwrap();

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "111<b>222333444555</b>");
}

#[test]
fn surround_keeps_nested_non_matching_structure() {
    let body = parse_body_fragment("111<b>222<i>333<i>444</i></i></b>555");
    let range = SelectionRange::select_node(&child(&body, 2)).unwrap();

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "111<b>222<i>333<i>444</i></i>555</b>");
}

#[test]
fn surround_normalizes_complicated_nesting() {
    let body = parse_body_fragment("<i>1</i><b><i>2</i>3<i>4</i></b><i>5</i>");
    let first_text = child(&body, 0).first_child().unwrap();
    let last_text = child(&body, 2).first_child().unwrap();
    let range = SelectionRange::new(
        Position::new(first_text, 0),
        Position::new(last_text, 1),
    );

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b><i>1</i><i>2</i>3<i>4</i><i>5</i></b>");
}

#[test]
fn surround_joins_run_across_negligible_br() {
    let body = parse_body_fragment("before<br>after");
    let range = SelectionRange::new(Position::new(body.clone(), 0), Position::new(body.clone(), 3));

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>before<br>after</b>");
}

#[test]
fn surround_joins_existing_across_negligible_br() {
    let body = parse_body_fragment("before<br><b>after</b>");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>before<br>after</b>");
}

#[test]
fn surround_from_node_contents_range() {
    let body = parse_body_fragment("before<br><b>after</b>");
    let range = SelectionRange::select_node_contents(&child(&body, 0));

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>before<br>after</b>");
}

#[test]
fn surround_absorbs_partially_selected_matching_element() {
    let body = parse_body_fragment("aa<b>bb</b>");
    let aa = child(&body, 0);
    let bb = child(&body, 1).first_child().unwrap();
    let range = SelectionRange::new(Position::new(aa, 0), Position::new(bb, 1));

    surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>aabb</b>");
}

#[test]
fn surround_twice_is_idempotent() {
    let body = parse_body_fragment("111222");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();
    let first = surround(&range, &body, &bold()).unwrap();

    let range = SelectionRange::select_node(&first).unwrap();
    let second = surround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>111222</b>");
    assert_eq!(first, second);
}

#[test]
fn surround_without_text_is_a_noop() {
    let body = parse_body_fragment("a<br>b");
    let range = SelectionRange::select_node(&child(&body, 1)).unwrap();

    assert!(surround(&range, &body, &bold()).is_none());
    assert_eq!(inner_html(&body), "a<br>b");
}

#[test]
fn surround_collapsed_selection_is_a_noop() {
    let body = parse_body_fragment("abc");
    let text = child(&body, 0);
    let range = SelectionRange::new(Position::new(text.clone(), 1), Position::new(text, 1));

    assert!(surround(&range, &body, &bold()).is_none());
    assert_eq!(inner_html(&body), "abc");
}

#[test]
fn unsurround_whole_element() {
    let body = parse_body_fragment("<b>123</b>");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    unsurround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "123");
}

#[test]
fn unsurround_middle_splits_the_wrapper() {
    let body = parse_body_fragment("<b>123</b>");
    let text = child(&body, 0).first_child().unwrap();
    let range = SelectionRange::new(Position::new(text.clone(), 1), Position::new(text, 2));

    unsurround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b>1</b>2<b>3</b>");
}

#[test]
fn unsurround_split_duplicates_attributes() {
    let body = parse_body_fragment("<b id=\"z\">123</b>");
    let text = child(&body, 0).first_child().unwrap();
    let range = SelectionRange::new(Position::new(text.clone(), 1), Position::new(text, 2));

    unsurround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "<b id=\"z\">1</b>2<b id=\"z\">3</b>");
}

#[test]
fn unsurround_removes_nested_occurrences() {
    let body = parse_body_fragment("<b>1<b>2</b>3</b>");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    unsurround(&range, &body, &bold()).unwrap();

    assert_eq!(inner_html(&body), "123");
}

#[test]
fn unsurround_without_match_is_a_noop() {
    let body = parse_body_fragment("123");
    let range = SelectionRange::select_node(&child(&body, 0)).unwrap();

    assert!(unsurround(&range, &body, &bold()).is_none());
    assert_eq!(inner_html(&body), "123");
}

#[test]
fn unsurround_across_block_elements_is_a_noop() {
    let body = parse_body_fragment("<ul><li><b>a</b></li><li><b>b</b></li></ul>");
    let a = body.select_first("li").unwrap().as_node().first_child().unwrap();
    let last_li = body.select_first("ul").unwrap().as_node().last_child().unwrap();
    let range = SelectionRange::new(
        Position::new(a.first_child().unwrap(), 0),
        Position::after(&last_li).unwrap(),
    );

    assert!(unsurround(&range, &body, &bold()).is_none());
    assert_eq!(
        inner_html(&body),
        "<ul><li><b>a</b></li><li><b>b</b></li></ul>"
    );
}

#[test]
fn is_surrounded_checks_boundaries() {
    let body = parse_body_fragment("<b>ab</b>cd");
    let inside = child(&body, 0).first_child().unwrap();
    let outside = child(&body, 1);
    let range = SelectionRange::new(
        Position::new(inside.clone(), 0),
        Position::new(inside, 2),
    );
    assert!(is_surrounded(&range, &body, &bold()));

    let range = SelectionRange::new(
        Position::new(outside.clone(), 0),
        Position::new(outside, 2),
    );
    assert!(!is_surrounded(&range, &body, &bold()));
}

#[test]
fn splitting_refused_by_default_policy() {
    let body = parse_body_fragment("<u>abc</u>");
    let text = child(&body, 0).first_child().unwrap();
    let range = SelectionRange::new(Position::new(text.clone(), 1), Position::new(text, 2));

    assert!(surround_splitting(&range, &body, &bold(), &SplitPolicy::none()).is_none());
    assert_eq!(inner_html(&body), "<u>abc</u>");
}

#[test]
fn splitting_allowed_by_policy_flattens_the_boundary() {
    let body = parse_body_fragment("<u>abc</u>");
    let text = child(&body, 0).first_child().unwrap();
    let range = SelectionRange::new(Position::new(text.clone(), 1), Position::new(text, 2));

    surround_splitting(&range, &body, &bold(), &SplitPolicy::allowing(&["u"])).unwrap();

    assert_eq!(inner_html(&body), "<u>a</u><b><u>b</u></b><u>c</u>");
}

#[test]
fn splitting_without_straddled_elements_behaves_like_surround() {
    let body = parse_body_fragment("ab");
    let text = child(&body, 0);
    let range = SelectionRange::new(Position::new(text.clone(), 0), Position::new(text, 1));

    surround_splitting(&range, &body, &bold(), &SplitPolicy::none()).unwrap();

    assert_eq!(inner_html(&body), "<b>a</b>b");
}
