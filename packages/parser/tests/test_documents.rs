use htmled_parser::{parse, serialize, serialize_with_indent, Element, ParseError};

const ARTICLE: &str = r#"<!DOCTYPE html>
<!-- generated by hand -->
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Notes &amp; Drafts</title>
  </head>
  <body class="page">
    <h1 id="heading">Weekly   notes</h1>
    <ul id="list">
      <li id="one">Buy <b>fresh</b> bread</li>
      <li id='two'>Call &quot;Sam&quot;</li>
      <li>Unnamed item</li>
    </ul>
    <img id="logo" src="logo.png"/>
    <br>
    <p id="footer">Written on a &lt;Monday&gt;</p>
  </body>
</html>
"#;

#[test]
fn test_article_structure() {
    let root = parse(ARTICLE).unwrap();

    assert_eq!(root.id, "html");
    let head = root.child("head").unwrap();
    assert_eq!(head.child("title").unwrap().text.as_deref(), Some("Notes & Drafts"));

    let body = root.child("body").unwrap();
    let tags: Vec<_> = body.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["h1", "ul", "img", "br", "p"]);

    assert_eq!(root.find("heading").unwrap().text.as_deref(), Some("Weekly notes"));
    assert_eq!(root.find("one").unwrap().text.as_deref(), Some("Buy bread"));
    assert_eq!(root.find("two").unwrap().text.as_deref(), Some("Call \"Sam\""));
    assert_eq!(root.find("footer").unwrap().text.as_deref(), Some("Written on a <Monday>"));
}

#[test]
fn test_article_generated_ids() {
    let root = parse(ARTICLE).unwrap();
    let list = root.find("list").unwrap();
    assert_eq!(list.children[2].id, "li-1");
    assert!(root.find("meta-1").is_some());
    assert!(root.find("br-1").is_some());
}

#[test]
fn test_article_round_trip() {
    let root = parse(ARTICLE).unwrap();
    let saved = serialize(&root);
    let reloaded = parse(&saved).unwrap();

    assert_eq!(reloaded.ids(), root.ids());
    assert_eq!(serialize(&reloaded), saved);
    assert!(saved.contains("&lt;Monday&gt;"));
    assert!(saved.contains("<img id=\"logo\">"));
}

#[test]
fn test_indent_width() {
    let doc = Element::empty_document();
    let expected = "\
<html>
    <head>
        <title></title>
    </head>
    <body></body>
</html>
";
    assert_eq!(serialize_with_indent(&doc, 4), expected);
}

#[test]
fn test_errors_carry_positions() {
    let source = "<html><head><title></title></head><body><p id=\"a\"></span></body></html>";
    match parse(source) {
        Err(ParseError::UnexpectedToken { span, expected, found }) => {
            assert_eq!(expected, "</p>");
            assert_eq!(found, "</span>");
            assert_eq!(&source[span.start..span.end], "span");
        }
        other => panic!("expected UnexpectedToken, got {:?}", other),
    }

    let source = "<html><head><title></title></head><body><p id=\"a\"></p><i id=\"a\"></i></body></html>";
    assert!(matches!(parse(source), Err(ParseError::DuplicateId { id, .. }) if id == "a"));
}
