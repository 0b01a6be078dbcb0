//! Treeviz snapshots of the fixtures

use slim_parser::slim::formats::to_treeviz_str;
use slim_parser::slim::testing::fixture;

#[test]
fn test_page_treeviz() {
    let doc = fixture("page").unwrap().parse();
    insta::assert_snapshot!(to_treeviz_str(&doc), @r#"
⧉ template
├─ ◇ doctype | html
└─ ◇ html lang="ja"
  ├─ ◇ head
  │ ├─ ◇ meta charset="UTF-8"
  │ └─ ◇ title
  └─ ◇ body
    └─ ◇ p | Hello
"#);
}

#[test]
fn test_script_treeviz() {
    let doc = fixture("script").unwrap().parse();
    insta::assert_snapshot!(to_treeviz_str(&doc), @r#"
⧉ template
└─ ◇ html
  ├─ ◇ head
  │ ├─ 𝒱 javascript: | var greeting = "hello";
  │ └─ ◇ link rel="stylesheet" href="/site.css"
  └─ ◇ body#home.page.wide
    ├─ ◇ h1.title = title
    └─ ◇ p |  Welcome
"#);
}
