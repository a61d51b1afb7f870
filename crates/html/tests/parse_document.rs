//! Parsing fixtures: element, text, and attribute fidelity through the
//! sink, plus tolerance for malformed markup.

use dom::{Document, NodeKey};
use html::parse_document_str;

const FLASH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Transfer</title></head>
<body>
    <!-- result banners -->
    <div class="result-box" id="confirmation">Transaction successful &#10003;</div>
    <div class="result-message" style="color: red">Transfer failed</div>
    <p>Check your balance.</p>
</body>
</html>"#;

/// Find the first element with the given class token.
fn first_with_class(document: &Document, class: &str) -> NodeKey {
    document
        .elements_with_any_class(&[class])
        .into_iter()
        .next()
        .expect("element with class present")
}

#[test]
fn parses_elements_text_and_attributes() {
    let document = parse_document_str(FLASH_PAGE).expect("fixture parses");
    assert!(document.is_complete());

    let confirmation = first_with_class(&document, "result-box");
    assert_eq!(document.tag(confirmation), Some("div"));
    assert_eq!(document.attr(confirmation, "id"), Some("confirmation"));
    assert_eq!(
        document.text_content(confirmation),
        "Transaction successful \u{2713}"
    );

    let failure = first_with_class(&document, "result-message");
    assert_eq!(document.text_content(failure), "Transfer failed");
    assert_eq!(document.style_property(failure, "color"), Some("red"));
}

#[test]
fn class_queries_follow_document_order() {
    let document = parse_document_str(FLASH_PAGE).expect("fixture parses");
    let found = document.elements_with_any_class(&["result-message", "result-box"]);
    assert_eq!(found.len(), 2);
    assert_eq!(document.attr(found[0], "id"), Some("confirmation"));
    assert_eq!(document.tag(found[1]), Some("div"));
}

#[test]
fn malformed_markup_still_yields_a_tree() {
    // Unclosed div and stray closing tag; html5ever recovers.
    let document = parse_document_str(
        "<body><div class=\"result-box\">Deposit successful</p><span>rest</span>",
    )
    .expect("malformed markup parses");
    let banner = first_with_class(&document, "result-box");
    assert!(document.text_content(banner).contains("Deposit successful"));
}

#[test]
fn empty_input_yields_document_root_only_tree() {
    let document = parse_document_str("").expect("empty input parses");
    assert!(document.is_complete());
    assert!(
        document
            .elements_with_any_class(&["result-message", "result-box"])
            .is_empty()
    );
    // html5ever still implies html/head/body.
    assert!(document.node_count() > 1);
}

#[test]
fn comments_are_kept_out_of_text_content() {
    let document = parse_document_str(FLASH_PAGE).expect("fixture parses");
    let confirmation = first_with_class(&document, "result-box");
    let parent = document.parent(confirmation).expect("banner has a parent");
    assert!(!document.text_content(parent).contains("result banners"));
}
