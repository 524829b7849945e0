//! End-to-end tests for the paste pipeline across its mode matrix.

use fieldnote_filter::{ColorScheme, PasteContext, filter_html, filter_html_with};

#[test]
fn empty_input_is_empty_in_every_mode() {
    for internal in [false, true] {
        for extended in [false, true] {
            assert_eq!(filter_html("", internal, extended), "");
        }
    }
}

#[test]
fn internal_strips_non_inheriting_properties() {
    assert_eq!(
        filter_html(
            "<div style=\"font-weight: bold; font-size: 10px;\"></div>",
            true,
            true
        ),
        "<div style=\"font-weight: bold;\"></div>"
    );
}

#[test]
fn internal_preserves_transparent_background() {
    assert_eq!(
        filter_html(
            "<span style=\"background-color: transparent;\">x</span>",
            true,
            true
        ),
        "<span style=\"background-color: transparent;\">x</span>"
    );
}

#[test]
fn internal_trusts_tags_and_classes() {
    assert_eq!(
        filter_html("<b class=\"big\"><i>t</i></b>", true, true),
        "<b class=\"big\"><i>t</i></b>"
    );
}

#[test]
fn external_extended_drops_transparent_background() {
    assert_eq!(
        filter_html(
            "<span style=\"background-color: transparent;\"></span>",
            false,
            true
        ),
        "<span style=\"\"></span>"
    );
}

#[test]
fn external_extended_keeps_real_background() {
    assert_eq!(
        filter_html(
            "<span style=\"background-color: blue;\"></span>",
            false,
            true
        ),
        "<span style=\"background-color: blue;\"></span>"
    );
}

#[test]
fn external_non_extended_reduces_to_text() {
    assert_eq!(
        filter_html("<span style=\"background-color: blue;\">x</span>", false, false),
        "x"
    );
}

#[test]
fn external_night_mode_drops_colors_keeps_weight() {
    let context = PasteContext::new(false, true).with_color_scheme(ColorScheme::Night);
    assert_eq!(
        filter_html_with(
            "<span style=\"color: red; font-weight: bold;\">x</span>",
            &context
        ),
        "<span style=\"font-weight: bold;\">x</span>"
    );
}

#[test]
fn scripts_never_survive() {
    assert_eq!(
        filter_html("<script>alert(1)</script><b>x</b>", false, true),
        "<b>x</b>"
    );
    assert_eq!(filter_html("<script>alert(1)</script>", true, true), "");
    assert_eq!(
        filter_html("<b onclick=\"evil()\">x</b>", true, true),
        "<b>x</b>"
    );
}

#[test]
fn links_and_stylesheets_never_survive() {
    assert_eq!(
        filter_html("<link rel=\"stylesheet\" href=\"x.css\"><p>x</p>", false, true),
        "<p>x</p>"
    );
    assert_eq!(
        filter_html("<style>p { color: red; }</style><p>x</p>", true, true),
        "<p>x</p>"
    );
}

#[test]
fn leading_title_does_not_eat_content() {
    assert_eq!(filter_html("<title>T</title><p>x</p>", false, false), "<p>x</p>");
}

#[test]
fn external_non_extended_collapses_whitespace() {
    assert_eq!(filter_html("a\n\t  b", false, false), "a b");
    assert_eq!(filter_html("  <b>a</b>  ", false, false), "a");
}

#[test]
fn external_extended_keeps_allowed_attributes() {
    assert_eq!(
        filter_html("<font color=\"red\" face=\"serif\">x</font>", false, true),
        "<font color=\"red\">x</font>"
    );
    assert_eq!(
        filter_html(
            "<a href=\"https://example.com/\" onclick=\"evil()\">t</a>",
            false,
            true
        ),
        "<a href=\"https://example.com/\">t</a>"
    );
}

#[test]
fn external_basic_keeps_images_with_src_only() {
    assert_eq!(
        filter_html("<img src=\"a.png\" class=\"big\" alt=\"pic\">", false, false),
        "<img src=\"a.png\">"
    );
}

#[test]
fn external_unwraps_unknown_containers() {
    assert_eq!(
        filter_html("<article><p><mark>x</mark></p></article>", false, true),
        "<p>x</p>"
    );
}

#[test]
fn word_processor_paste_reduces_to_retained_formatting() {
    // The kind of markup office suites put on the clipboard: guid-carrying
    // wrappers, metadata, and styling noise around the actual formatting.
    let html = concat!(
        "<meta charset=\"utf-8\">",
        "<b style=\"font-weight:normal;\" id=\"docs-internal-guid\">",
        "<span style=\"font-size:11pt;font-family:Arial;background-color:transparent;font-weight:700;\">Hello</span>",
        " world</b>"
    );
    insta::assert_snapshot!(
        filter_html(html, false, true),
        @r#"<b><span style="font-weight: 700;">Hello</span> world</b>"#
    );
}

#[test]
fn malformed_markup_is_tolerated() {
    assert_eq!(
        filter_html("<b>unclosed <i>nested", false, true),
        "<b>unclosed <i>nested</i></b>"
    );
    assert_eq!(filter_html("</div>>><<", false, false), "&gt;&gt;&lt;&lt;");
}
