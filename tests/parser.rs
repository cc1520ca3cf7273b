use pretty_assertions::assert_eq;
use shellscribe::model::{AlertKind, Argument, ExitCode, OptionEntry};
use shellscribe::parser::{self, ParseOptions, Parser};
use shellscribe::{DocBlock, Document};
use std::path::Path;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn parse(text: &str) -> Document {
    parser::parse_str(text, "test.sh").unwrap()
}

fn function<'a>(doc: &'a Document, name: &str) -> &'a DocBlock {
    doc.functions()
        .find(|b| b.function_name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no block for {}", name))
}

// -- Document layout --

#[test]
fn file_block_then_functions() {
    let doc = parse("# @file t.sh\n# @brief B\nfoo() {\n  :\n}\n");
    assert_eq!(doc.block_count(), 2);
    assert_eq!(doc.file().file_name.as_deref(), Some("t.sh"));
    assert_eq!(doc.file().brief.as_deref(), Some("B"));
    assert_eq!(doc.file().function_name, None);
    assert_eq!(doc.blocks()[1].function_name.as_deref(), Some("foo"));
}

#[test]
fn functions_in_file_order() {
    let doc = parse("b() {\n}\n# @function a\n# @brief A\na() {\n}\nfunction c {\n}\n");
    let names: Vec<_> = doc
        .functions()
        .map(|b| b.function_name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn block_cap_stops_collection() {
    let parser = Parser::new(ParseOptions { max_blocks: 2 });
    let doc = parser.parse_str("a() {\n}\nb() {\n}\nc() {\n}\n", "t.sh").unwrap();
    assert_eq!(doc.block_count(), 2);
    assert_eq!(doc.blocks()[1].function_name.as_deref(), Some("a"));
}

#[test]
fn missing_file_is_an_error() {
    let err = parser::parse_file(Path::new("/nonexistent/script.sh")).unwrap_err();
    assert!(err.to_string().starts_with("failed to open /nonexistent/script.sh"));
}

// -- Tags --

#[test]
fn quoted_argument() {
    let doc = parse("# @function f\n# @arg $1 string \"desc\"\nf() {\n}\n");
    assert_eq!(
        function(&doc, "f").arguments,
        vec![Argument {
            name: "$1".to_string(),
            arg_type: Some("string".to_string()),
            description: "desc".to_string(),
        }]
    );
}

#[test]
fn exit_codes_in_order() {
    let doc = parse("# @function f\n# @exitcode 0 Success\n# @exitcode 1 Failure\nf() {\n}\n");
    assert_eq!(
        function(&doc, "f").exit_codes,
        vec![
            ExitCode {
                code: "0".to_string(),
                description: "Success".to_string(),
            },
            ExitCode {
                code: "1".to_string(),
                description: "Failure".to_string(),
            },
        ]
    );
}

#[test]
fn deprecated_versions() {
    let doc = parse("# @function f\n# @deprecated from 2.0.0\nf() {\n}\n# @function g\n# @deprecated\ng() {\n}\n");
    let f = &function(&doc, "f").deprecation;
    assert!(f.is_deprecated);
    assert_eq!(f.version.as_deref(), Some("2.0.0"));
    let g = &function(&doc, "g").deprecation;
    assert!(g.is_deprecated);
    assert_eq!(g.version, None);
}

#[test]
fn description_joins_continuation_lines() {
    let doc = parse("# @function f\n# @description First\n#   second\n# third\n\nf() {\n}\n");
    assert_eq!(
        function(&doc, "f").function_description.as_deref(),
        Some("First\nsecond\nthird")
    );
}

#[test]
fn example_splits_on_blank_comment() {
    let doc = parse("# @function f\n# @example\n#   f one\n#\n#   f two\nf() {\n}\n");
    let examples = function(&doc, "f").examples();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].trim(), "f one");
    assert_eq!(examples[1].trim(), "f two");
}

#[test]
fn unknown_tag_is_ignored() {
    let doc = parse("# @function f\n# @frobnicate foo\n# @brief Still parsed\nf() {\n}\n");
    assert_eq!(doc.block_count(), 2);
    assert_eq!(function(&doc, "f").function_brief.as_deref(), Some("Still parsed"));
}

#[test]
fn skip_marks_only_the_file_block() {
    let doc = parser::parse_file(Path::new(&fixture_path("skipped.sh"))).unwrap();
    assert!(doc.is_skipped());
    assert!(doc.file().is_skipped);
    let hidden = function(&doc, "hidden");
    assert!(!hidden.is_skipped);
    assert_eq!(hidden.function_brief.as_deref(), Some("Not documented"));
}

// -- Full fixture --

#[test]
fn fixture_file_metadata() {
    let doc = parser::parse_file(Path::new(&fixture_path("deploy.sh"))).unwrap();
    let file = doc.file();
    assert_eq!(file.file_name.as_deref(), Some("deploy.sh"));
    assert_eq!(file.interpreter.as_deref(), Some("/usr/bin/env bash"));
    assert_eq!(file.brief.as_deref(), Some("Deployment helpers"));
    assert_eq!(
        file.description.as_deref(),
        Some("Functions used by the release pipeline\nto push builds to the fleet.")
    );
    assert_eq!(file.version.as_deref(), Some("1.4.0"));
    assert_eq!(file.author.as_deref(), Some("Jane Doe (@jdoe), Sam Roe"));
    assert_eq!(file.license.as_deref(), Some("MIT"));
    assert_eq!(doc.block_count(), 4);
}

#[test]
fn fixture_function_block() {
    let doc = parser::parse_file(Path::new(&fixture_path("deploy.sh"))).unwrap();
    let push = function(&doc, "deploy_push");

    assert_eq!(push.function_brief.as_deref(), Some("Upload a build to every host"));
    assert_eq!(
        push.function_description.as_deref(),
        Some("Reads the host list and copies the\nartifact with rsync.")
    );
    assert_eq!(push.arguments.len(), 2);
    assert_eq!(push.arguments[0].description, "Path to the artifact");
    assert_eq!(push.arguments[1].arg_type.as_deref(), Some("int"));

    assert_eq!(
        push.options[0],
        OptionEntry {
            short_opt: Some("-n".to_string()),
            long_opt: Some("--dry-run".to_string()),
            arg_spec: None,
            description: "Only print what would happen".to_string(),
        }
    );
    assert_eq!(push.options[1].long_opt.as_deref(), Some("--target"));
    assert_eq!(push.options[1].arg_spec.as_deref(), Some("host"));

    assert_eq!(push.env_vars[0].name, "DEPLOY_USER");
    assert_eq!(push.set_vars[0].var_type, "string");
    assert_eq!(push.exit_codes.len(), 2);
    assert_eq!(push.stdout_doc.as_deref(), Some("Progress lines\none per host."));
    assert_eq!(push.stderr_doc.as_deref(), Some("Errors"));
    assert_eq!(push.requires, vec!["rsync".to_string()]);

    assert_eq!(push.see_also.len(), 2);
    assert!(push.see_also[0].is_internal);
    assert_eq!(push.see_also[1].url.as_deref(), Some("https://rsync.samba.org"));

    assert_eq!(push.alerts[0].kind, AlertKind::Warning);
    assert_eq!(push.examples().len(), 2);

    assert_eq!(push.shellcheck.len(), 1);
    assert_eq!(push.shellcheck[0].code.as_deref(), Some("SC2029"));
    assert_eq!(
        push.shellcheck[0].reason.as_deref(),
        Some("remote expansion is intended")
    );
}

#[test]
fn fixture_flags_and_views() {
    let doc = parser::parse_file(Path::new(&fixture_path("deploy.sh"))).unwrap();

    let rollback = function(&doc, "deploy_rollback");
    assert!(rollback.no_args);
    assert_eq!(rollback.deprecation.version.as_deref(), Some("1.3.0"));
    assert_eq!(rollback.deprecation.replacement.as_deref(), Some("deploy_restore"));

    let views = doc.model();
    assert_eq!(views.len(), doc.block_count());
    let renderable: Vec<_> = views
        .iter()
        .filter(|v| v.is_renderable())
        .filter_map(|v| v.function_name)
        .collect();
    assert_eq!(renderable, vec!["deploy_push", "deploy_rollback"]);
}
