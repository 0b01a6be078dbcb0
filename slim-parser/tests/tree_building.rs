//! Tree shape tests over the shared fixtures and small inline sources

use slim_parser::slim::testing::{assert_tree, fixture};
use slim_parser::{parse_reader, parse_str};

#[test]
fn test_page_fixture() {
    let doc = fixture("page").unwrap().parse();
    assert_tree(&doc)
        .child_count(2)
        .node_count(7)
        .child(0, |doctype| {
            doctype.name("doctype").text("html").is_leaf();
        })
        .child(1, |html| {
            html.name("html")
                .attr("lang", "ja")
                .attr_count(1)
                .child_count(2)
                .child(0, |head| {
                    head.name("head")
                        .child_count(2)
                        .child(0, |meta| {
                            meta.name("meta").attr("charset", "UTF-8").is_leaf();
                        })
                        .child(1, |title| {
                            title.name("title").text("").is_leaf();
                        });
                })
                .child(1, |body| {
                    body.name("body").child_count(1).child(0, |p| {
                        p.name("p").text("Hello").no_expr().is_leaf();
                    });
                });
        });
}

#[test]
fn test_value_fixture() {
    let doc = fixture("value").unwrap().parse();
    assert_tree(&doc).child(1, |html| {
        html.child(1, |body| {
            body.child(0, |p| {
                p.name("p").expr("foo").text("");
            });
        });
    });
}

#[test]
fn test_each_fixture() {
    let doc = fixture("each").unwrap().parse();
    assert_tree(&doc).child(1, |html| {
        html.child(1, |body| {
            body.child_count(1).child(0, |ul| {
                ul.name("ul")
                    .expr("for x in foo")
                    .attr_count(0)
                    .child_count(1)
                    .child(0, |li| {
                        li.name("li").expr("x").is_leaf();
                    });
            });
        });
    });
}

#[test]
fn test_script_fixture() {
    let doc = fixture("script").unwrap().parse();
    assert_tree(&doc).child_count(1).child(0, |html| {
        html.child_count(2)
            .child(0, |head| {
                head.child_count(2)
                    .child(0, |script| {
                        script
                            .name("javascript:")
                            .text(
                                "var greeting = \"hello\";\nif (greeting) {\n  console.log(greeting);\n}",
                            )
                            .is_leaf();
                    })
                    .child(1, |link| {
                        link.name("link")
                            .attr("rel", "stylesheet")
                            .attr("href", "/site.css");
                    });
            })
            .child(1, |body| {
                body.name("body")
                    .id("home")
                    .classes(&["page", "wide"])
                    .child_count(2)
                    .child(0, |h1| {
                        h1.name("h1").classes(&["title"]).expr("title");
                    })
                    .child(1, |p| {
                        p.name("p").text(" Welcome").is_leaf();
                    });
            });
    });
}

#[test]
fn test_siblings_after_deeper_lines() {
    let source = "\
section
  header
    h1
      span
        em
  footer
";
    let doc = parse_str(source);
    assert_tree(&doc).child_count(1).child(0, |section| {
        section.child_count(2).child(1, |footer| {
            footer.name("footer").is_leaf();
        });
    });
}

#[test]
fn test_dedent_to_root() {
    let doc = parse_str("a\n  b\n    c\n  d\ne");
    assert_tree(&doc)
        .child_count(2)
        .child(0, |a| {
            a.name("a")
                .child_count(2)
                .child(0, |b| {
                    b.name("b").child_count(1);
                })
                .child(1, |d| {
                    d.name("d").is_leaf();
                });
        })
        .child(1, |e| {
            e.name("e").is_leaf();
        });
}

#[test]
fn test_implicit_div() {
    let doc = parse_str("#app\n  .row.main\n    .col");
    assert_tree(&doc).child(0, |app| {
        app.name("div").id("app").child(0, |row| {
            row.name("div")
                .no_id()
                .classes(&["row", "main"])
                .child(0, |col| {
                    col.name("div").classes(&["col"]);
                });
        });
    });
}

#[test]
fn test_expression_and_text_lines_attach_to_last_element() {
    let doc = parse_str("ul\n  li\n  = for x in xs\n  | tail");
    assert_tree(&doc).child(0, |ul| {
        ul.no_expr().child_count(1).child(0, |li| {
            li.expr("for x in xs").text(" tail");
        });
    });
}

#[test]
fn test_reader_and_string_agree_on_fixture() {
    let loader = fixture("script").unwrap();
    let from_reader = parse_reader(loader.source().as_bytes()).unwrap();
    assert_eq!(from_reader, loader.parse());
}
