//! Process-level end-to-end tests for the `lox` CLI.
//!
//! These drive the built binary directly in file mode (the REPL reads
//! stdin interactively and isn't exercised here), covering argument
//! dispatch, exit codes, and stdout/stderr content end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lox_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lox"))
}

fn script(source: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("program.lox");
    std::fs::write(&path, source).expect("failed to write script");
    (dir, path)
}

#[test]
fn arithmetic_precedence() {
    let (_dir, path) = script("print 1 + 2 * 3;");
    lox_bin()
        .arg(&path)
        .assert()
        .success()
        .code(0)
        .stdout("7\n");
}

#[test]
fn string_concatenation() {
    let (_dir, path) = script(r#"var a = "hi"; var b = " there"; print a + b;"#);
    lox_bin().arg(&path).assert().success().stdout("hi there\n");
}

#[test]
fn while_loop_prints_successive_lines() {
    let (_dir, path) = script("var i = 0; while (i < 3) { print i; i = i + 1; }");
    lox_bin().arg(&path).assert().success().stdout("0\n1\n2\n");
}

#[test]
fn recursive_fibonacci() {
    let (_dir, path) = script(
        "fun fib(n) { if (n < 2) return n; return fib(n-1) + fib(n-2); } print fib(10);",
    );
    lox_bin().arg(&path).assert().success().stdout("55\n");
}

#[test]
fn undefined_variable_is_runtime_error_exit_70() {
    let (_dir, path) = script("print x;");
    lox_bin()
        .arg(&path)
        .assert()
        .code(70)
        .stderr(predicate::str::contains("Undefined variable 'x'."));
}

#[test]
fn adding_string_and_number_is_runtime_error() {
    let (_dir, path) = script(r#"print "a" + 1;"#);
    lox_bin()
        .arg(&path)
        .assert()
        .code(70)
        .stderr(predicate::str::contains(
            "Operands must be two numbers or two strings.",
        ));
}

#[test]
fn parse_error_reports_at_offending_token_and_exits_65() {
    let (_dir, path) = script("1 + ;");
    lox_bin()
        .arg(&path)
        .assert()
        .code(65)
        .stdout("")
        .stderr(predicate::str::contains("Error at ';'"));
}

#[test]
fn for_loop_desugars_to_while() {
    let (_dir, path) = script("for (var i = 0; i < 3; i = i + 1) print i;");
    lox_bin().arg(&path).assert().success().stdout("0\n1\n2\n");
}

#[test]
fn block_scope_does_not_leak_to_outer_scope() {
    let (_dir, path) = script("var a = 1; { var a = 2; print a; } print a;");
    lox_bin().arg(&path).assert().success().stdout("2\n1\n");
}

#[test]
fn file_mode_never_echoes_bare_expression_statements() {
    let (_dir, path) = script("1 + 1;");
    lox_bin().arg(&path).assert().success().stdout("");
}

#[test]
fn nonexistent_file_is_not_a_usage_error() {
    lox_bin()
        .arg("/nonexistent/path/does-not-exist.lox")
        .assert()
        .failure()
        .code(predicate::ne(64));
}

#[test]
fn too_many_arguments_prints_usage_and_exits_64() {
    lox_bin()
        .arg("a")
        .arg("b")
        .assert()
        .code(64)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn unterminated_string_is_a_scan_error() {
    let (_dir, path) = script("print \"unterminated;");
    lox_bin()
        .arg(&path)
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Unterminated string."));
}

#[test]
fn arity_mismatch_reports_both_counts() {
    let (_dir, path) = script("fun f(a, b) { return a + b; } f(1);");
    lox_bin()
        .arg(&path)
        .assert()
        .code(70)
        .stderr(
            predicate::str::contains("Expected 2 arguments")
                .and(predicate::str::contains("got 1")),
        );
}
