//! Rendering tests over the template fixtures

use rstest::rstest;
use serde::Serialize;
use serde_json::json;
use slim_html::{builtins, Record, RenderError, Template, Value};
use std::collections::HashMap;
use std::path::PathBuf;

fn fixture(name: &str) -> Template {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.slim"));
    Template::parse_file(path).unwrap()
}

const PAGE: &str = r#"<!doctype html>
<html lang="ja">
  <head>
    <meta charset="UTF-8"/>
    <title>
    </title>
  </head>
  <body>
    <p>Hello</p>
  </body>
</html>
"#;

#[test]
fn test_page() {
    let html = fixture("page").render_to_string(&()).unwrap();
    assert_eq!(html, PAGE);
}

#[test]
fn test_value_interpolation() {
    let html = fixture("value")
        .render_to_string(&HashMap::from([("foo", "bar")]))
        .unwrap();
    assert_eq!(html, PAGE.replace("<p>Hello</p>", "<p>bar</p>"));
}

#[test]
fn test_unknown_identifier_fails() {
    let result = fixture("value").render_to_string(&HashMap::from([("bar", "baz")]));
    assert!(matches!(result, Err(RenderError::Eval(_))));
}

#[test]
fn test_each() {
    let html = fixture("each")
        .render_to_string(&json!({"foo": ["foo", "bar", "baz"]}))
        .unwrap();
    insta::assert_snapshot!(html, @r#"
<!doctype html>
<html lang="ja">
  <head>
    <meta charset="UTF-8"/>
    <title>
    </title>
  </head>
  <body>
    <ul>
      <li>foo</li>
      <li>bar</li>
      <li>baz</li>
    </ul>
  </body>
</html>
"#);
}

#[test]
fn test_each_over_empty_list() {
    let html = fixture("each").render_to_string(&json!({"foo": []})).unwrap();
    assert!(html.contains("    <ul>\n    </ul>\n"));
}

#[test]
fn test_each_over_non_list_fails() {
    let err = fixture("each")
        .render_to_string(&json!({"foo": "not a list"}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot iterate over `foo`: expected a list, found string"
    );
}

#[test]
fn test_raw_block_and_shorthands() {
    let html = fixture("script")
        .render_to_string(&json!({"title": "Hi"}))
        .unwrap();
    insta::assert_snapshot!(html, @r#"
<html>
  <head>
    <script>var greeting = "hello";
if (greeting) {
  console.log(greeting);
}</script>
    <link rel="stylesheet" href="/site.css"/>
  </head>
  <body id="home" class="page wide">
    <h1 class="title">Hi</h1>
    <p> Welcome</p>
  </body>
</html>
"#);
}

#[derive(Serialize)]
struct Product {
    name: String,
    tags: Vec<String>,
    price: i64,
}

#[test]
fn test_record_context() {
    let mut template = Template::parse_str(
        "article\n  h2 = name\n  p = price * 2\n  ul = for tag in tags\n    li = upper(tag)",
    );
    template.func_map(builtins::standard());
    let product = Product {
        name: "Lamp".to_string(),
        tags: vec!["new".to_string(), "sale".to_string()],
        price: 21,
    };
    let html = template.render_to_string(&Record(&product)).unwrap();
    assert_eq!(
        html,
        "<article>\n  <h2>Lamp</h2>\n  <p>42</p>\n  <ul>\n    <li>NEW</li>\n    <li>SALE</li>\n  </ul>\n</article>\n"
    );
}

#[test]
fn test_nested_loops() {
    let template = Template::parse_str(
        "table = for row in rows\n  tr = for cell in row\n    td = cell",
    );
    let html = template
        .render_to_string(&json!({"rows": [[1, 2], [3]]}))
        .unwrap();
    assert_eq!(
        html,
        "<table>\n  <tr>\n    <td>1</td>\n    <td>2</td>\n  </tr>\n  <tr>\n    <td>3</td>\n  </tr>\n</table>\n"
    );
}

#[test]
fn test_value_followed_by_text() {
    let template = Template::parse_str("p = count\n  | items");
    let html = template.render_to_string(&json!({"count": 3})).unwrap();
    assert_eq!(html, "<p>3 items</p>\n");
}

#[rstest]
#[case("input disabled=", "<input disabled/>\n")]
#[case("option selected=\"\"", "<option selected>\n</option>\n")]
#[case("a href=\"/docs\" Docs", "<a href=\"/docs\">Docs</a>\n")]
#[case("img src=\"a.png\" alt=\"two words\"", "<img src=\"a.png\" alt=\"two words\"/>\n")]
fn test_attribute_rendering(#[case] source: &str, #[case] expected: &str) {
    let html = Template::parse_str(source).render_to_string(&()).unwrap();
    assert_eq!(html, expected);
}

#[rstest]
#[case("br")]
#[case("img src=\"x\"\n  p child\n  | text")]
#[case("meta charset=\"UTF-8\" trailing words")]
#[case("link = for x in xs\n  p never")]
fn test_void_elements_never_close(#[case] source: &str) {
    let html = Template::parse_str(source)
        .render_to_string(&json!({"xs": [1]}))
        .unwrap();
    assert!(html.ends_with("/>\n"), "{html:?}");
    assert_eq!(html.lines().count(), 1);
    assert!(!html.contains("</"));
}

#[test]
fn test_rendering_is_idempotent() {
    let template = fixture("each");
    let context = json!({"foo": ["a", "b"]});
    let first = template.render_to_string(&context).unwrap();
    let second = template.render_to_string(&context).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_renders() {
    let template = fixture("each");
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4i64)
            .map(|i| {
                let template = &template;
                scope.spawn(move || {
                    let items: Vec<Value> = (0..i).map(Value::from).collect();
                    let context = HashMap::from([("foo", Value::from(items))]);
                    template.render_to_string(&context).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let html = handle.join().unwrap();
            assert_eq!(html.matches("<li>").count(), i);
        }
    });
}

#[test]
fn test_linear_nesting_renders_as_indentation() {
    let source = (0..5)
        .map(|depth| format!("{}d{depth}", "  ".repeat(depth)))
        .collect::<Vec<_>>()
        .join("\n");
    let html = Template::parse_str(&source).render_to_string(&()).unwrap();
    for depth in 0..5 {
        let open = format!("{}<d{depth}>", "  ".repeat(depth));
        assert!(html.lines().any(|line| line == open), "missing {open:?}");
    }
}
