//! End-to-end extraction over real C/C++ sources.

use super::{extract, summary, Workspace};
use span_extract::{CompilationDatabase, Descent, Extractor, FailurePolicy, SpanCollector};

fn found(name: &str, message: Option<&str>) -> (String, Option<String>) {
    (name.to_string(), message.map(str::to_string))
}

#[test]
fn test_constructor_call_message() {
    let workspace = Workspace::new().source("a.cc", "Span s = Span(\"hi\");\n");
    assert_eq!(summary(&extract(&workspace, "a.cc")), [found("s", Some("hi"))]);
}

#[test]
fn test_declaration_without_literal() {
    let workspace = Workspace::new().source("a.cc", "Span s;\n");
    let spans = extract(&workspace, "a.cc");
    assert_eq!(summary(&spans), [found("s", None)]);
    assert!(spans[0].message_description.is_none());
}

#[test]
fn test_other_types_yield_nothing() {
    let workspace = Workspace::new().source(
        "a.cc",
        concat!(
            "int x = 5;\n",
            "const char* text = \"not a span\";\n",
            "Span<int> t(\"t\");\n",
            "Spans many(\"m\");\n",
            "MySpan mine(\"y\");\n",
        ),
    );
    assert!(extract(&workspace, "a.cc").is_empty());
}

#[test]
fn test_literal_nested_in_calls() {
    let workspace = Workspace::new().source(
        "a.cc",
        "Span s = make(wrap(\"msg\"), \"later\");\n",
    );
    assert_eq!(summary(&extract(&workspace, "a.cc")), [found("s", Some("msg"))]);
}

#[test]
fn test_declarations_reported_in_source_order() {
    let workspace = Workspace::new().source(
        "a.cc",
        r#"
Span first("one");
namespace outer {
Span second = Span("two");
}
void run() {
    int unrelated = 3;
    Span third;
    for (int i = 0; i < 2; ++i) {
        Span fourth{"four"};
    }
}
Span fifth(R"(five)");
"#,
    );

    assert_eq!(
        summary(&extract(&workspace, "a.cc")),
        [
            found("first", Some("one")),
            found("second", Some("two")),
            found("third", None),
            found("fourth", Some("four")),
            found("fifth", Some("five")),
        ]
    );
}

#[test]
fn test_message_range_points_at_literal() {
    let workspace = Workspace::new().source("src/a.cc", "int x;\nSpan s(\"hi\");\n");
    let spans = extract(&workspace, "src/a.cc");

    let description = spans[0].message_description.as_ref().unwrap();
    assert_eq!(description.source_range.start.file, workspace.path("src/a.cc"));
    assert_eq!(description.source_range.start.line, 2);
    assert_eq!(description.source_range.start.column, 8);
    assert_eq!(description.source_range.start.offset, 14);
    assert_eq!(description.source_range.end.column, 12);
}

#[test]
fn test_escapes_are_kept_as_spelled() {
    let workspace = Workspace::new().source("a.cc", "Span s(\"say \\\"hi\\\"\\n\");\n");
    assert_eq!(
        summary(&extract(&workspace, "a.cc")),
        [found("s", Some("say \\\"hi\\\"\\n"))]
    );
}

#[test]
fn test_c_translation_unit() {
    let workspace = Workspace::new().entry("a.c", "cc");
    std::fs::write(
        workspace.path("a.c"),
        "struct Span s = { \"c-msg\" };\nint x = 5;\n",
    )
    .unwrap();

    assert_eq!(summary(&extract(&workspace, "a.c")), [found("s", Some("c-msg"))]);
}

#[test]
fn test_custom_type_name() {
    let workspace = Workspace::new().source(
        "a.cc",
        "Span s(\"span\");\nTrace t(\"trace\");\n",
    );
    let database = workspace.database();
    let collector = SpanCollector::new("Trace", Descent::Always);
    let mut extractor = Extractor::new(&database, collector, FailurePolicy::Abort);

    let report = extractor.run(&[workspace.path("a.cc")], |_| {});
    assert_eq!(summary(&report.spans), [found("t", Some("trace"))]);
}

#[test]
fn test_syntax_errors_do_not_fail_the_file() {
    let workspace = Workspace::new().source("a.cc", "Span ok(\"fine\");\nint broken = ;\n");
    let database: CompilationDatabase = workspace.database();
    let mut extractor = Extractor::new(&database, SpanCollector::default(), FailurePolicy::Abort);

    let report = extractor.run(&[workspace.path("a.cc")], |_| {});
    assert!(report.failures.is_empty());
    assert_eq!(summary(&report.spans), [found("ok", Some("fine"))]);
}
