use std::collections::BTreeMap;

use sch_cli_opts::{
    CommandSpec, GroupSpec, OptionSpec, OptionValue, Parser, ParserErrorKind, ParserResult,
    Primitive, Process, ProgramSpec, Registry, SpecError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `sch log init [path] [--store-type <string>] [--store-config <string>...]`
fn log_program() -> ProgramSpec {
    let init = CommandSpec::builder("init")
        .description("Initialise a log store")
        .arg(
            OptionSpec::string("path")
                .default_with(|process| process.cwd().display().to_string())
                .build()
                .unwrap(),
        )
        .unwrap()
        .flag(OptionSpec::string("store-type").short('t').optional().build().unwrap())
        .unwrap()
        .flag(OptionSpec::string("store-config").multiple().optional().build().unwrap())
        .unwrap()
        .build()
        .unwrap();

    ProgramSpec::builder("sch")
        .group(GroupSpec::builder("log").command(init).unwrap().build().unwrap())
        .unwrap()
        .build()
        .unwrap()
}

fn process() -> Process {
    Process::new(Vec::new(), "/work/logs", BTreeMap::new())
}

fn parse(program: ProgramSpec, tokens: &[&str]) -> ParserResult {
    Parser::new(program).unwrap().parse(tokens, &process()).unwrap()
}

fn error_kind(result: &ParserResult) -> Option<ParserErrorKind> {
    result.error().map(|e| e.kind())
}

fn string(value: &str) -> OptionValue {
    OptionValue::Single(Primitive::String(value.to_string()))
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_command_without_options_uses_defaults() {
    let result = parse(log_program(), &["log", "init"]);

    assert!(result.is_ok(), "unexpected error: {:?}", result.error());
    assert_eq!(result.names(), ["log", "init"]);
    assert_eq!(result.arg("path"), Some(&string("/work/logs")));
    assert!(result.flags().is_empty());
}

#[test]
fn test_single_valued_flag() {
    let result = parse(log_program(), &["log", "init", "--store-type", "gdrive"]);

    assert!(result.is_ok());
    assert_eq!(result.flag("store-type"), Some(&string("gdrive")));
}

#[test]
fn test_multi_valued_flag_accumulates_in_order() {
    let result = parse(
        log_program(),
        &["log", "init", "--store-config", "a", "--store-config", "b"],
    );

    assert!(result.is_ok());
    assert_eq!(
        result.flag("store-config"),
        Some(&OptionValue::Multiple(vec!["a".into(), "b".into()]))
    );
}

#[test]
fn test_unknown_flag() {
    let result = parse(log_program(), &["log", "init", "--bogus"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidFlag));
    assert_eq!(result.names(), ["log", "init"]);
}

#[test]
fn test_unknown_command() {
    let result = parse(log_program(), &["log", "frobnicate"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidName));
    assert_eq!(result.names(), ["log"]);
}

#[test]
fn test_string_flag_at_end_without_value() {
    let result = parse(log_program(), &["log", "init", "--store-type"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::NoValueFoundForFlag));
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[test]
fn test_empty_input_has_no_command() {
    let result = parse(log_program(), &[]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidName));
    assert!(result.names().is_empty());
}

#[test]
fn test_group_without_command() {
    let result = parse(log_program(), &["log"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidName));
    assert_eq!(
        result.error().and_then(|e| e.detail()),
        Some("'log' is a group, not a command")
    );
}

#[test]
fn test_nested_groups() {
    let push = CommandSpec::builder("push").build().unwrap();
    let remote = GroupSpec::builder("remote").command(push).unwrap().build().unwrap();
    let log = GroupSpec::builder("log").group(remote).unwrap().build().unwrap();
    let program = ProgramSpec::builder("sch").group(log).unwrap().build().unwrap();

    let result = parse(program, &["log", "remote", "push"]);

    assert!(result.is_ok());
    assert_eq!(result.names(), ["log", "remote", "push"]);
}

#[test]
fn test_top_level_command() {
    let version = CommandSpec::builder("version").build().unwrap();
    let program = ProgramSpec::builder("sch").command(version).unwrap().build().unwrap();

    let invocation = parse(program, &["version"]).into_result().unwrap();
    assert_eq!(invocation.path(), ["version"]);
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_single_flag_rejected() {
    let result = parse(
        log_program(),
        &["log", "init", "--store-type", "a", "--store-type", "b"],
    );

    assert_eq!(error_kind(&result), Some(ParserErrorKind::MultipleValuesNotAllowed));
    assert_eq!(result.flag("store-type"), Some(&string("a")));
}

#[test]
fn test_short_alias_and_single_dash() {
    let short = parse(log_program(), &["log", "init", "-t", "s3"]);
    let single_dash = parse(log_program(), &["log", "init", "-store-type", "s3"]);

    assert_eq!(short.flag("store-type"), Some(&string("s3")));
    assert_eq!(single_dash.flag("store-type"), Some(&string("s3")));
}

#[test]
fn test_flag_followed_by_flag_has_no_value() {
    let result = parse(log_program(), &["log", "init", "--store-type", "--store-config", "a"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::NoValueFoundForFlag));
}

fn boolean_program() -> ProgramSpec {
    let sync = CommandSpec::builder("sync")
        .flag(OptionSpec::boolean("force").optional().build().unwrap())
        .unwrap()
        .flag(OptionSpec::number("depth").optional().build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    ProgramSpec::builder("sch").command(sync).unwrap().build().unwrap()
}

#[test]
fn test_boolean_flag_refinement() {
    let yes = parse(boolean_program(), &["sync", "--force", "true"]);
    let no = parse(boolean_program(), &["sync", "--force", "false"]);
    let bad = parse(boolean_program(), &["sync", "--force", "yes"]);

    assert_eq!(yes.flag("force"), Some(&OptionValue::Single(Primitive::Boolean(true))));
    assert_eq!(no.flag("force"), Some(&OptionValue::Single(Primitive::Boolean(false))));
    assert_eq!(error_kind(&bad), Some(ParserErrorKind::InvalidFlagValue));
}

#[test]
fn test_boolean_presence_flag() {
    let at_end = parse(boolean_program(), &["sync", "--force"]);
    let before_flag = parse(boolean_program(), &["sync", "--force", "--depth", "3"]);

    assert_eq!(at_end.flag("force"), Some(&OptionValue::Single(Primitive::Boolean(true))));
    assert!(before_flag.is_ok());
    assert_eq!(before_flag.flag("force"), Some(&OptionValue::Single(Primitive::Boolean(true))));
    assert_eq!(before_flag.flag("depth"), Some(&OptionValue::Single(Primitive::Number(3.0))));
}

#[test]
fn test_number_flag_rejects_garbage() {
    let result = parse(boolean_program(), &["sync", "--depth", "deep"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidFlagValue));
}

#[test]
fn test_required_flag_missing() {
    let deploy = CommandSpec::builder("deploy")
        .flag(OptionSpec::string("target").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    let program = ProgramSpec::builder("sch").command(deploy).unwrap().build().unwrap();

    let result = parse(program, &["deploy"]);
    assert_eq!(error_kind(&result), Some(ParserErrorKind::RequiredFlagNotFound));
}

#[test]
fn test_flag_default_for_multiple_is_a_list() {
    let deploy = CommandSpec::builder("deploy")
        .flag(OptionSpec::string("region").multiple().default_value("eu").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    let program = ProgramSpec::builder("sch").command(deploy).unwrap().build().unwrap();

    let result = parse(program, &["deploy"]);
    assert_eq!(result.flag("region"), Some(&OptionValue::Multiple(vec!["eu".into()])));
}

// ---------------------------------------------------------------------------
// Positional arguments
// ---------------------------------------------------------------------------

fn copy_program() -> ProgramSpec {
    let cp = CommandSpec::builder("cp")
        .arg(OptionSpec::string("dst").build().unwrap())
        .unwrap()
        .arg(OptionSpec::string("src").multiple().optional().build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    ProgramSpec::builder("sch").command(cp).unwrap().build().unwrap()
}

#[test]
fn test_explicit_positional_overrides_default() {
    let result = parse(log_program(), &["log", "init", "/srv/logs"]);

    assert_eq!(result.arg("path"), Some(&string("/srv/logs")));
}

#[test]
fn test_positionals_fill_in_order_and_last_collects() {
    let result = parse(copy_program(), &["cp", "out", "a", "--", "b"]);
    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidFlag));

    let result = parse(copy_program(), &["cp", "out", "a", "b"]);
    assert!(result.is_ok());
    assert_eq!(result.arg("dst"), Some(&string("out")));
    assert_eq!(
        result.arg("src"),
        Some(&OptionValue::Multiple(vec!["a".into(), "b".into()]))
    );
}

#[test]
fn test_optional_positional_may_be_omitted() {
    let result = parse(copy_program(), &["cp", "out"]);

    assert!(result.is_ok());
    assert_eq!(result.arg("src"), None);
}

#[test]
fn test_missing_required_positional() {
    let result = parse(copy_program(), &["cp"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidArg));
}

#[test]
fn test_surplus_positional() {
    let result = parse(log_program(), &["log", "init", "a", "b"]);

    assert_eq!(error_kind(&result), Some(ParserErrorKind::InvalidArg));
    assert_eq!(result.arg("path"), Some(&string("a")));
}

#[test]
fn test_positional_refinement_failure() {
    let wait = CommandSpec::builder("wait")
        .arg(OptionSpec::number("seconds").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    let program = ProgramSpec::builder("sch").command(wait).unwrap().build().unwrap();

    assert_eq!(
        parse(program.clone(), &["wait", "2.5"]).arg("seconds"),
        Some(&OptionValue::Single(Primitive::Number(2.5)))
    );
    assert_eq!(error_kind(&parse(program, &["wait", "soon"])), Some(ParserErrorKind::InvalidArg));
}

// ---------------------------------------------------------------------------
// Construction and dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_flag_names_are_rejected_at_build_time() {
    let err = CommandSpec::builder("init")
        .flag(OptionSpec::string("store-type").build().unwrap())
        .unwrap()
        .flag(OptionSpec::boolean("store-type").build().unwrap())
        .unwrap_err();

    assert_eq!(err, SpecError::DuplicateFlag("store-type".into()));
}

#[test]
fn test_parser_is_reusable() {
    let parser = Parser::new(log_program()).unwrap();

    let first = parser.parse(&["log", "init", "--bogus"], &process()).unwrap();
    let second = parser.parse(&["log", "init"], &process()).unwrap();

    assert!(first.error().is_some());
    assert!(second.is_ok());
}

#[test]
fn test_registry_dispatches_on_resolved_path() {
    let log = Registry::builder().entry("init", "init-handler").unwrap().build();
    let registry = Registry::builder()
        .default("help-handler")
        .unwrap()
        .registry("log", log)
        .unwrap()
        .build();

    let invocation = parse(log_program(), &["log", "init"]).into_result().unwrap();
    assert_eq!(registry.find(invocation.path()), Some(&"init-handler"));
}

#[test]
fn test_result_serializes_to_json() {
    let result = parse(log_program(), &["log", "init", "--store-config", "a"]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "names": ["log", "init"],
            "args": { "path": "/work/logs" },
            "flags": { "store-config": ["a"] },
        })
    );

    let failed = parse(log_program(), &["log", "nope"]);
    let json = serde_json::to_value(&failed).unwrap();
    assert_eq!(json["error"]["kind"], "invalid-name");
}
