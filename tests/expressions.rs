use algoscript::{
    evaluate_expression, parse_expression, Environment, RuntimeError, Value,
};

fn eval(source: &str) -> Value {
    let expr = parse_expression(source).unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    let mut env = Environment::new();
    evaluate_expression(&expr, &mut env).unwrap_or_else(|e| panic!("evaluation failed for {source:?}: {e}"))
}

fn eval_err(source: &str) -> RuntimeError {
    let expr = parse_expression(source).unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    let mut env = Environment::new();
    match evaluate_expression(&expr, &mut env) {
        Ok(value) => panic!("expected an error for {source:?}, got {value}"),
        Err(error) => error,
    }
}

fn assert_real(source: &str, expected: f64) {
    match eval(source) {
        Value::Real(r) => assert_eq!(r, expected, "wrong result for {source:?}"),
        other => panic!("expected a real result for {source:?}, got {other}"),
    }
}

fn assert_real_close(source: &str, expected: f64) {
    match eval(source) {
        Value::Real(r) => {
            assert!((r - expected).abs() < 1e-9, "wrong result for {source:?}: {r}")
        },
        other => panic!("expected a real result for {source:?}, got {other}"),
    }
}

fn assert_complex_close(source: &str, real: f64, imaginary: f64) {
    match eval(source) {
        Value::Complex(c) => {
            assert!((c.real - real).abs() < 1e-9 && (c.imaginary - imaginary).abs() < 1e-9,
                    "wrong result for {source:?}: {c}");
        },
        other => panic!("expected a complex result for {source:?}, got {other}"),
    }
}

fn assert_bool(source: &str, expected: bool) {
    assert_eq!(eval(source), Value::Bool(expected), "wrong result for {source:?}");
}

#[test]
fn basic_arithmetic() {
    assert_real("42", 42.0);
    assert_real("-42", -42.0);
    assert_real("2+2", 4.0);
    assert_real("3*3", 9.0);
    assert_real("142        -9   ", 133.0);
    assert_real(" 50/10", 5.0);
    assert_real("4*2.5 + 8.5+1.5 / 3.0", 19.0);
    assert_real("2 -4 +6 -1 -1- 0 +8", 10.0);
    assert_real(" 2*3 - 4*5 + 6/3 ", -12.0);
    assert_real("10/4", 2.5);
    assert_real("5e+99/2e45", 2.5e54);
}

#[test]
fn unary_minus_edge_cases() {
    assert_real("--5", 5.0);
    assert_real("0--5", 5.0);
    // unary minus binds looser than the power operator
    assert_real("-2^2", -4.0);
    assert_real("2^-1", 0.5);
}

#[test]
fn power_is_right_associative() {
    assert_real("2^3^2", 512.0);
    assert_real("(2^3)^2", 64.0);
}

#[test]
fn division_by_zero_fails() {
    assert!(matches!(eval_err("1/0"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(eval_err("1/(2-2)"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(eval_err("(1+2i)/(0+0i)"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(eval_err("0^-1"), RuntimeError::DivisionByZero { .. }));
}

#[test]
fn comparisons() {
    assert_bool("2+2 >= 1+1", true);
    assert_bool("3+3 <= 12/2", true);
    assert_bool("2 < 3", true);
    assert_bool("3 > 2", true);
    assert_bool("2 <> 3", true);
    assert_bool("2 = 2", true);
    assert_bool("(2+2) = 4", true);
    assert_bool("\"abc\" < \"abd\"", true);
    assert_bool("\"abc\" = 'abc'", true);
}

#[test]
fn logic_and_localized_keywords() {
    assert_bool("true and false", false);
    assert_bool("true or false", true);
    assert_bool("vrai xor TRUE", false);
    assert_bool("not false", true);
    assert_bool("NON FAUX", true);
    assert_bool("2+2 = 4 AND 3+3 = 6", true);
}

#[test]
fn string_concatenation() {
    assert_eq!(eval("\"ab\" + \"cd\""), Value::Str("abcd".to_string()));
}

#[test]
fn list_operators() {
    assert_eq!(eval("[1,2] + [3]"), eval("[1,2,3]"));
    assert_eq!(eval("[1,2] * 3"), eval("[1,2,1,2,1,2]"));
    assert_eq!(eval("3 * [1,2]"), eval("[1,2,1,2,1,2]"));
    assert_eq!(eval("[] + [1]"), eval("[1]"));
}

#[test]
fn list_indexing() {
    assert_real("[10,20,30][1]", 20.0);
    assert_real("[10,20,30][1.9]", 20.0); // indices truncate
    assert_real("[8,5,42,96,31,84,35][-4]", 96.0); // negative indices count from the end
    assert_real("[[1,2],[3,4]][1][0]", 3.0);

    assert!(matches!(eval_err("[10,20,30][5]"),
                     RuntimeError::IndexOutOfRange { index: 5, len: 3, .. }));
    assert!(matches!(eval_err("5[0]"), RuntimeError::ArrayAccessType { .. }));
}

#[test]
fn type_errors() {
    assert!(matches!(eval_err("1 + \"a\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(eval_err("true + false"), RuntimeError::InvalidBinaryOperator { .. }));
    assert!(matches!(eval_err("-true"), RuntimeError::InvalidUnaryOperator { .. }));
    assert!(matches!(eval_err("not 1"), RuntimeError::InvalidUnaryOperator { .. }));
    assert!(matches!(eval_err("[1] * 0.5"), RuntimeError::NonIntegerRepeat { .. }));
    assert!(matches!(eval_err("(1+2i) < 3"), RuntimeError::InvalidBinaryOperator { .. }));
}

#[test]
fn undefined_variable() {
    assert!(matches!(eval_err("x + 1"), RuntimeError::UnknownVariable { .. }));
}

#[test]
fn complex_arithmetic() {
    assert_complex_close("(2+3i)+(4+5i)", 6.0, 8.0);
    assert_complex_close("(2+3i)*(4+5i)", -7.0, 22.0);
    assert_complex_close("(2+3i)^2", -5.0, 12.0);
    assert_complex_close("3*sqrt(-4)", 0.0, 6.0);
    // a complex result with zero imaginary part demotes to real
    assert_real_close("(2+3i) + (4-3i)", 6.0);
}

#[test]
fn complex_accessors() {
    assert_real("re(5+4i)", 5.0);
    assert_real("im(8-9i)", -9.0);
    assert_complex_close("conj(5+4i)", 5.0, -4.0);
    assert_bool("round(arg(2+3i) - atan(3/2), 12) = 0", true);
    assert_real_close("rect(2, 0)", 2.0);
}

#[test]
fn square_root_of_negative_is_complex() {
    assert_real("sqrt(49)", 7.0);
    assert_complex_close("sqrt(-4)", 0.0, 2.0);
    assert_real_close("sqrt(2)^2", 2.0);
}

#[test]
fn out_of_range_inverse_sine_is_complex() {
    assert_bool("asin(2) = pi/2 + i*ln(2+sqrt(3))", true);
}

#[test]
fn rounding_and_signs() {
    assert_real("round(3.7)", 4.0);
    assert_real("round(3.14159, 2)", 3.14);
    assert_real("ceil(pi)", 4.0);
    assert_real("floor(e)", 2.0);
    assert_real("trunc(-2.7)", -2.0);
    assert_real("sign(-5)", -1.0);
    assert_real("sign(0)", 0.0);
    assert_real("sign(11)", 1.0);
    assert_real("abs(-5)", 5.0);
}

#[test]
fn exponentials_and_logarithms() {
    assert_real("exp(0)", 1.0);
    assert_real("ln(1)", 0.0);
    assert_real_close("log(100)", 2.0);
    assert_real_close("log(8, 2)", 3.0);
    assert_real_close("deg(2*pi)", 360.0);
    assert_real_close("rad(180)", std::f64::consts::PI);
}

#[test]
fn number_theory() {
    assert_real("gcd(12, 18)", 6.0);
    assert_real("gcd(248, 4584)", 8.0);
    assert_real("lcm(904, 1356)", 2712.0);
    assert_real("factorial(5)", 120.0);
    assert_real("fact(5)", 120.0);
    assert_real("fib(10)", 55.0);
    assert_real("binomial(3, 2)", 3.0);
    assert_real("binomial(3, 0)", 1.0);
    assert_real("hypot(3, 4)", 5.0);
    assert_real_close("gamma(6)", 120.0);
    assert_bool("round(beta(18, 2) * 342, 9) = 1", true);
}

#[test]
fn statistics() {
    assert_real("mean(2, 4, 6)", 4.0);
    assert_real("mean([2, 4, 6])", 4.0);
    assert_real("average([12, 82, 74, 36, 14, 94])", 52.0);
    assert_real("sum([1, 8, 9, 6, 24, 54, 354])", 456.0);
    assert_real("median(1, 3, 2)", 2.0);
    assert_real("median(1, 2, 3, 4)", 2.5);
    assert_real("mode(1, 2, 2, 3)", 2.0);
    assert_real("min(4, 2, 7)", 2.0);
    assert_real("max(4, 2, 7)", 7.0);
    assert_real("round(variance([2.75, 1.75, 1.25, 0.25, 0.5, 1.25, 3.5]), 2)", 1.18);
    assert_real("round(variance_sample([2.75, 1.75, 1.25, 0.25, 0.5, 1.25, 3.5]), 2)", 1.37);
    assert_real_close("harmonic_mean(2.5, 3, 10)", 3.6);
    assert_real_close("stdev(2, 4, 6)", (8.0_f64 / 3.0).sqrt());
}

#[test]
fn geometry_formulas() {
    assert_real_close("circle_perimeter(1)", std::f64::consts::TAU);
    assert_real_close("cube_volume(3)", 27.0);
    assert_real_close("cube_area(2)", 24.0);
    assert_real_close("cuboid_volume(2, 3, 4)", 24.0);
    assert_real_close("cylinder_volume(1, 2)", std::f64::consts::TAU);
    assert_real_close("sphere_volume(1)", 4.0 / 3.0 * std::f64::consts::PI);
}

#[test]
fn type_casts() {
    assert_real("num(\"42\")", 42.0);
    assert_real("num(true)", 1.0);
    assert_eq!(eval("str(42)"), Value::Str("42".to_string()));
    assert_eq!(eval("str([1, 2])"), Value::Str("[1, 2]".to_string()));
    assert_bool("bool(1)", true);
    assert_bool("bool(\"faux\")", false);
    assert_eq!(eval("list(\"ab\")"), eval("[\"a\", \"b\"]"));
    assert_eq!(eval("list(5)"), eval("[5]"));
}

#[test]
fn calculus_primitives() {
    // the midpoint rule with 1000 steps is good to a few millionths here
    assert_bool("round(integ(sin, 0, pi), 4) = 2", true);
    assert_bool("round(gradient(sqrt, 4), 6) = 0.25", true);
    assert_bool("round(derivative(exp, 0), 6) = 1", true);
}

#[test]
fn expand_argument() {
    assert_real("gcd(*[12, 18])", 6.0);
    assert_real("mean(2, *[4, 6])", 4.0);

    let error = eval_err("gcd(*[12, 18, 6])");
    assert!(matches!(error, RuntimeError::ArgumentCountMismatch { .. }));
}

#[test]
fn expand_argument_must_be_last() {
    assert!(parse_expression("gcd(*[12], 18)").is_err());
}

#[test]
fn builtin_argument_validation() {
    assert!(matches!(eval_err("gcd(1)"), RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(eval_err("sin(true)"),
                     RuntimeError::ArgumentTypeMismatch { index: 1, .. }));
    assert!(matches!(eval_err("mean(1, \"a\")"),
                     RuntimeError::ArgumentTypeMismatch { index: 2, .. }));
}

#[test]
fn constants() {
    assert_real("pi", std::f64::consts::PI);
    assert_real("e", std::f64::consts::E);
    // i * i collapses to a real number
    assert_real("i * i", -1.0);
    assert_complex_close("1 + i", 1.0, 1.0);
}

#[test]
fn parse_errors_are_fatal_and_positioned() {
    assert!(parse_expression("").is_err());
    assert!(parse_expression("1 +").is_err());
    assert!(parse_expression("(1 + 2").is_err());
    assert!(parse_expression("1 ยง 2").is_err());
    assert!(parse_expression("1 2").is_err());
    // comparisons do not chain
    assert!(parse_expression("1 < 2 < 3").is_err());
}

#[test]
fn print_parse_round_trip_is_idempotent() {
    let sources = ["1 + 2 * 3",
                   "-(1 + 2) * 3",
                   "2 ^ 3 ^ 2",
                   "(2 ^ 3) ^ 2",
                   "-2 ^ 2",
                   "not a = b",
                   "a and (b or c)",
                   "f(x, y) + g(*xs)",
                   "[1, 2, 3][2]",
                   "(a + b)[0]",
                   "\"ab\" + 'cd'",
                   "sqrt(-4) * 3i",
                   "vrai xor faux",
                   "mean(2, 4, 6) >= 4"];

    for source in sources {
        let once = parse_expression(source).unwrap().to_string();
        let twice = parse_expression(&once).unwrap().to_string();
        assert_eq!(once, twice, "round trip diverged for {source:?}");
    }
}
