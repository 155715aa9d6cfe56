use std::{collections::VecDeque, sync::atomic::AtomicBool};

use algoscript::{
    parse_expression, run_program, Environment, Expr, FunctionDef, PlotSurface, ProgramIo,
    RunOutcome, RuntimeError, Statement, Value,
};

/// I/O collaborator that replays queued input lines and records every
/// output line and prompt.
#[derive(Default)]
struct RecordingIo {
    inputs:  VecDeque<String>,
    prompts: Vec<Option<String>>,
    output:  Vec<String>,
}

impl RecordingIo {
    fn with_inputs(inputs: &[&str]) -> Self {
        Self { inputs: inputs.iter().map(|s| (*s).to_string()).collect(),
               ..Self::default() }
    }
}

impl ProgramIo for RecordingIo {
    fn request_line(&mut self, prompt: Option<&str>) -> String {
        self.prompts.push(prompt.map(str::to_string));
        self.inputs.pop_front().unwrap_or_default()
    }

    fn write_line(&mut self, text: &str, _newline: bool) {
        self.output.push(text.to_string());
    }
}

/// Plot collaborator that records every command it receives, in order.
#[derive(Default)]
struct RecordingPlot {
    commands: Vec<String>,
}

impl PlotSurface for RecordingPlot {
    fn clear(&mut self) {
        self.commands.push("clear".to_string());
    }

    fn draw_point(&mut self, x: f64, y: f64, color: &str) {
        self.commands.push(format!("point {x} {y} {color}"));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str) {
        self.commands.push(format!("line {x1} {y1} {x2} {y2} {color}"));
    }

    fn plot_function(&mut self,
                     f: &mut dyn FnMut(f64) -> Option<f64>,
                     from: f64,
                     to: f64,
                     step: f64,
                     color: &str) {
        let mut samples = Vec::new();
        let mut x = from;
        while x <= to {
            samples.push(match f(x) {
                             Some(y) => y.to_string(),
                             None => "gap".to_string(),
                         });
            x += step;
        }
        self.commands
            .push(format!("curve {color} [{}]", samples.join(", ")));
    }

    fn set_window(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64, x_grad: f64, y_grad: f64) {
        self.commands
            .push(format!("window {x_min} {x_max} {y_min} {y_max} {x_grad} {y_grad}"));
    }
}

fn expr(text: &str) -> Expr {
    parse_expression(text).unwrap()
}

fn define(target: &str, value: &str, line: usize) -> Statement {
    Statement::Define { target: expr(target),
                        value: expr(value),
                        line }
}

fn display(value: &str, line: usize) -> Statement {
    Statement::Display { value: expr(value),
                         newline: true,
                         line }
}

fn run(program: &[Statement]) -> (Result<RunOutcome, RuntimeError>, Vec<String>) {
    let mut env = Environment::new();
    let mut io = RecordingIo::default();
    let mut plot = RecordingPlot::default();
    let cancel = AtomicBool::new(false);

    let outcome = run_program(program, &mut env, &mut io, &mut plot, &cancel);
    (outcome, io.output)
}

fn run_ok(program: &[Statement]) -> Vec<String> {
    let (outcome, output) = run(program);
    assert_eq!(outcome.unwrap(), RunOutcome::Completed);
    output
}

fn run_err(program: &[Statement]) -> RuntimeError {
    let (outcome, _) = run(program);
    outcome.expect_err("expected the program to fail")
}

#[test]
fn define_and_display_in_program_order() {
    let output = run_ok(&[define("x", "1 + 2", 1),
                          display("x", 2),
                          display("\"done\"", 3)]);
    assert_eq!(output, vec!["3", "done"]);
}

#[test]
fn display_renders_values() {
    let output = run_ok(&[display("[1, \"a\", true]", 1),
                          display("2 = 2", 2),
                          display("1 + 2i", 3)]);
    assert_eq!(output, vec!["[1, \"a\", TRUE]", "TRUE", "1 + 2i"]);
}

#[test]
fn if_and_else_blocks() {
    let output = run_ok(&[define("x", "7", 1),
                          Statement::If { condition: expr("x > 5"),
                                          block: vec![display("\"big\"", 3)],
                                          line: 2 },
                          Statement::Else { block: vec![display("\"small\"", 5)],
                                            line: 4 },
                          Statement::If { condition: expr("x > 100"),
                                          block: vec![display("\"huge\"", 7)],
                                          line: 6 },
                          Statement::Else { block: vec![display("\"modest\"", 9)],
                                            line: 8 }]);
    assert_eq!(output, vec!["big", "modest"]);
}

#[test]
fn else_without_if_is_an_error() {
    let error = run_err(&[display("1", 1),
                          Statement::Else { block: vec![],
                                            line: 2 }]);
    assert!(matches!(error, RuntimeError::ElseWithoutIf { line: 2 }));
}

#[test]
fn non_boolean_condition_is_an_error() {
    let error = run_err(&[Statement::If { condition: expr("1 + 1"),
                                          block: vec![],
                                          line: 1 }]);
    assert!(matches!(error, RuntimeError::ExpectedBoolean { line: 1 }));
}

#[test]
fn for_loop_ascending_and_descending() {
    let ascending = run_ok(&[Statement::For { variable: "i".to_string(),
                                              from: expr("1"),
                                              to: expr("5"),
                                              step: None,
                                              block: vec![display("i", 2)],
                                              line: 1 }]);
    assert_eq!(ascending, vec!["1", "2", "3", "4", "5"]);

    let descending = run_ok(&[Statement::For { variable: "i".to_string(),
                                               from: expr("5"),
                                               to: expr("1"),
                                               step: Some(expr("-1")),
                                               block: vec![display("i", 2)],
                                               line: 1 }]);
    assert_eq!(descending, vec!["5", "4", "3", "2", "1"]);
}

#[test]
fn for_loop_zero_step_is_an_error() {
    let error = run_err(&[Statement::For { variable: "i".to_string(),
                                           from: expr("1"),
                                           to: expr("5"),
                                           step: Some(expr("0")),
                                           block: vec![],
                                           line: 1 }]);
    assert!(matches!(error, RuntimeError::InvalidArgument { .. }));
}

#[test]
fn loop_body_writes_through_to_enclosing_scope() {
    let output = run_ok(&[define("total", "0", 1),
                          Statement::For { variable: "i".to_string(),
                                           from: expr("1"),
                                           to: expr("3"),
                                           step: None,
                                           block: vec![define("total", "total + i", 3)],
                                           line: 2 },
                          display("total", 4)]);
    assert_eq!(output, vec!["6"]);
}

#[test]
fn loop_body_locals_do_not_leak() {
    let error = run_err(&[Statement::For { variable: "i".to_string(),
                                           from: expr("1"),
                                           to: expr("3"),
                                           step: None,
                                           block: vec![define("local", "i * 2", 2)],
                                           line: 1 },
                          display("local", 3)]);
    assert!(matches!(error, RuntimeError::UnknownVariable { .. }));
}

#[test]
fn while_loop_with_break() {
    let output = run_ok(&[define("x", "0", 1),
                          Statement::While { condition: expr("true"),
                                             block: vec![define("x", "x + 1", 3),
                                                         Statement::If { condition: expr("x > 2"),
                                                                         block: vec![Statement::Break { line: 5 }],
                                                                         line: 4 },
                                                         display("x", 6)],
                                             line: 2 },
                          display("\"after\"", 7)]);
    assert_eq!(output, vec!["1", "2", "after"]);
}

#[test]
fn continue_skips_rest_of_iteration() {
    let output = run_ok(&[Statement::For { variable: "i".to_string(),
                                           from: expr("1"),
                                           to: expr("5"),
                                           step: None,
                                           block: vec![Statement::If { condition: expr("i = 3"),
                                                                       block: vec![Statement::Continue { line: 3 }],
                                                                       line: 2 },
                                                       display("i", 4)],
                                           line: 1 }]);
    assert_eq!(output, vec!["1", "2", "4", "5"]);
}

#[test]
fn break_terminates_only_the_innermost_loop() {
    let output = run_ok(&[Statement::For { variable: "i".to_string(),
                                           from: expr("1"),
                                           to: expr("2"),
                                           step: None,
                                           block: vec![Statement::While { condition: expr("true"),
                                                                          block: vec![Statement::Break { line: 3 }],
                                                                          line: 2 },
                                                       display("i", 4)],
                                           line: 1 }]);
    assert_eq!(output, vec!["1", "2"]);
}

#[test]
fn break_outside_loop_is_an_error() {
    let error = run_err(&[Statement::Break { line: 1 }]);
    assert!(matches!(error, RuntimeError::BreakOutsideLoop { line: 1 }));

    let error = run_err(&[Statement::If { condition: expr("true"),
                                          block: vec![Statement::Continue { line: 2 }],
                                          line: 1 }]);
    assert!(matches!(error, RuntimeError::ContinueOutsideLoop { line: 2 }));
}

#[test]
fn return_outside_function_is_an_error() {
    let error = run_err(&[Statement::Return { value: None,
                                              line: 1 }]);
    assert!(matches!(error, RuntimeError::ReturnOutsideFunction { line: 1 }));
}

#[test]
fn user_functions_return_values() {
    let double = FunctionDef { name:   "double".to_string(),
                               params: vec!["n".to_string()],
                               body:   vec![Statement::Return { value: Some(expr("n * 2")),
                                                                line:  2 }],
                               line:   1, };

    let output = run_ok(&[Statement::Function(double),
                          define("y", "double(8)", 3),
                          display("y", 4)]);
    assert_eq!(output, vec!["16"]);
}

#[test]
fn recursive_function() {
    // FUNCTION f(n): IF n = 0 { RETURN 1 }; RETURN n * f(n - 1)
    let body = vec![Statement::If { condition: expr("n = 0"),
                                    block: vec![Statement::Return { value: Some(expr("1")),
                                                                    line:  3 }],
                                    line: 2 },
                    Statement::Return { value: Some(expr("n * f(n - 1)")),
                                        line:  4 }];
    let f = FunctionDef { name:   "f".to_string(),
                          params: vec!["n".to_string()],
                          body,
                          line:   1, };

    let output = run_ok(&[Statement::Function(f), display("f(5)", 5)]);
    assert_eq!(output, vec!["120"]);
}

#[test]
fn function_redefinition_overwrites() {
    let first = FunctionDef { name:   "f".to_string(),
                              params: vec![],
                              body:   vec![Statement::Return { value: Some(expr("1")),
                                                               line:  2 }],
                              line:   1, };
    let second = FunctionDef { name:   "f".to_string(),
                               params: vec![],
                               body:   vec![Statement::Return { value: Some(expr("2")),
                                                                line:  4 }],
                               line:   3, };

    let output = run_ok(&[Statement::Function(first),
                          Statement::Function(second),
                          display("f()", 5)]);
    assert_eq!(output, vec!["2"]);
}

#[test]
fn function_arity_is_checked() {
    let f = FunctionDef { name:   "f".to_string(),
                          params: vec!["a".to_string(), "b".to_string()],
                          body:   vec![],
                          line:   1, };

    let error = run_err(&[Statement::Function(f),
                          Statement::Call { name: "f".to_string(),
                                            arguments: vec![expr("1")],
                                            line: 2 }]);
    assert!(matches!(error,
                     RuntimeError::ArgumentCountMismatch { expected: 2, actual: 1, .. }));
}

#[test]
fn void_function_in_value_position_is_an_error() {
    let noop = FunctionDef { name:   "noop".to_string(),
                             params: vec![],
                             body:   vec![],
                             line:   1, };

    // CALL is fine with no result...
    let ok = run_ok(&[Statement::Function(noop.clone()),
                      Statement::Call { name: "noop".to_string(),
                                        arguments: vec![],
                                        line: 2 }]);
    assert!(ok.is_empty());

    // ...but an expression needs a value.
    let error = run_err(&[Statement::Function(noop),
                          define("x", "noop()", 2)]);
    assert!(matches!(error, RuntimeError::MissingValue { .. }));
}

#[test]
fn calling_an_unknown_name_fails() {
    let error = run_err(&[Statement::Call { name: "nope".to_string(),
                                            arguments: vec![],
                                            line: 1 }]);
    assert!(matches!(error, RuntimeError::UnknownVariable { .. }));
}

#[test]
fn call_statement_reaches_builtins() {
    // Discarding the result is allowed.
    run_ok(&[Statement::Call { name: "sin".to_string(),
                               arguments: vec![expr("0")],
                               line: 1 }]);
}

#[test]
fn input_uses_prior_type_then_inference() {
    let mut env = Environment::new();
    let mut io = RecordingIo::with_inputs(&["42", "42", "true", "quoted"]);
    let mut plot = RecordingPlot::default();
    let cancel = AtomicBool::new(false);

    let program = [define("text", "\"old\"", 1),
                   Statement::Input { variable: "text".to_string(),
                                      prompt: None,
                                      line: 2 },
                   Statement::Input { variable: "number".to_string(),
                                      prompt: Some(expr("\"n?\"")),
                                      line: 3 },
                   Statement::Input { variable: "flag".to_string(),
                                      prompt: None,
                                      line: 4 },
                   Statement::Input { variable: "word".to_string(),
                                      prompt: None,
                                      line: 5 }];

    let outcome = run_program(&program, &mut env, &mut io, &mut plot, &cancel).unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    // the prior String type wins over numeric inference
    assert_eq!(env.get_variable("text"), Some(&Value::Str("42".to_string())));
    assert_eq!(env.get_variable("number"), Some(&Value::Real(42.0)));
    assert_eq!(env.get_variable("flag"), Some(&Value::Bool(true)));
    assert_eq!(env.get_variable("word"), Some(&Value::Str("quoted".to_string())));
    assert_eq!(io.prompts, vec![None, Some("n?".to_string()), None, None]);
}

#[test]
fn indexed_assignment() {
    let output = run_ok(&[define("a", "[1, 2, 3]", 1),
                          define("a[1]", "9", 2),
                          display("a", 3)]);
    assert_eq!(output, vec!["[1, 9, 3]"]);

    let output = run_ok(&[define("grid", "[[1, 2], [3, 4]]", 1),
                          define("grid[1][0]", "7", 2),
                          display("grid[1]", 3)]);
    assert_eq!(output, vec!["[7, 4]"]);
}

#[test]
fn assignment_target_errors() {
    let error = run_err(&[define("1 + 2", "3", 1)]);
    assert!(matches!(error, RuntimeError::InvalidAssignmentTarget { line: 1 }));

    let error = run_err(&[define("a", "[1, 2, 3]", 1), define("a[5]", "0", 2)]);
    assert!(matches!(error, RuntimeError::IndexOutOfRange { index: 5, len: 3, line: 2 }));

    let error = run_err(&[define("n", "5", 1), define("n[0]", "0", 2)]);
    assert!(matches!(error, RuntimeError::ArrayAccessType { line: 2 }));
}

#[test]
fn plot_commands_are_emitted_in_order() {
    let mut env = Environment::new();
    let mut io = RecordingIo::default();
    let mut plot = RecordingPlot::default();
    let cancel = AtomicBool::new(false);

    let program = [Statement::ClearPlot { line: 1 },
                   Statement::SetWindow { x_min: expr("-10"),
                                          x_max: expr("10"),
                                          y_min: expr("-5"),
                                          y_max: expr("5"),
                                          x_grad: expr("1"),
                                          y_grad: expr("0"),
                                          line: 2 },
                   Statement::DrawPoint { x: expr("1"),
                                          y: expr("2"),
                                          color: expr("\"red\""),
                                          line: 3 },
                   Statement::DrawLine { x1: expr("0"),
                                         y1: expr("0"),
                                         x2: expr("3"),
                                         y2: expr("4"),
                                         color: expr("\"#00ff00\""),
                                         line: 4 }];

    run_program(&program, &mut env, &mut io, &mut plot, &cancel).unwrap();
    assert_eq!(plot.commands,
               vec!["clear",
                    "window -10 10 -5 5 1 0",
                    "point 1 2 red",
                    "line 0 0 3 4 #00ff00"]);
}

#[test]
fn plot_function_samples_the_expression() {
    let mut env = Environment::new();
    let mut io = RecordingIo::default();
    let mut plot = RecordingPlot::default();
    let cancel = AtomicBool::new(false);

    let program = [Statement::PlotFunction { variable: "x".to_string(),
                                             body: expr("x ^ 2"),
                                             from: expr("0"),
                                             to: expr("2"),
                                             step: expr("1"),
                                             color: expr("\"blue\""),
                                             line: 1 }];

    run_program(&program, &mut env, &mut io, &mut plot, &cancel).unwrap();
    assert_eq!(plot.commands, vec!["curve blue [0, 1, 4]"]);
}

#[test]
fn plot_function_reports_gaps() {
    let mut env = Environment::new();
    let mut io = RecordingIo::default();
    let mut plot = RecordingPlot::default();
    let cancel = AtomicBool::new(false);

    // 1 / x has no value at x = 0
    let program = [Statement::PlotFunction { variable: "x".to_string(),
                                             body: expr("1 / x"),
                                             from: expr("-1"),
                                             to: expr("1"),
                                             step: expr("1"),
                                             color: expr("\"red\""),
                                             line: 1 }];

    run_program(&program, &mut env, &mut io, &mut plot, &cancel).unwrap();
    assert_eq!(plot.commands, vec!["curve red [-1, gap, 1]"]);
}

#[test]
fn cancellation_interrupts_the_run() {
    let mut env = Environment::new();
    let mut io = RecordingIo::default();
    let mut plot = RecordingPlot::default();
    let cancel = AtomicBool::new(true);

    let program = [display("\"never\"", 1)];
    let outcome = run_program(&program, &mut env, &mut io, &mut plot, &cancel).unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted);
    assert!(io.output.is_empty());
}

#[test]
fn sleep_completes() {
    run_ok(&[Statement::Sleep { duration: expr("0.01"),
                                line: 1 }]);

    let error = run_err(&[Statement::Sleep { duration: expr("-1"),
                                             line: 1 }]);
    assert!(matches!(error, RuntimeError::InvalidArgument { .. }));
}

#[test]
fn comments_have_no_effect() {
    let output = run_ok(&[Statement::Comment { text: "setup".to_string(),
                                               line: 1 },
                          display("1", 2)]);
    assert_eq!(output, vec!["1"]);
}

#[test]
fn runtime_errors_carry_the_statement_line() {
    let error = run_err(&[define("a", "1", 1), define("b", "missing + 1", 7)]);
    assert!(matches!(error, RuntimeError::UnknownVariable { line: 7, .. }));
}
