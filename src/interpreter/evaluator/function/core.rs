use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{builtin, casts, complex, geometry, stats, trig},
        },
        runtime::{core::Machine, signal::Signal},
        value::core::{FunctionValue, Value},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the bound argument values (defaults already filled
/// in) and the current line number, and returns its pure mathematical
/// result.
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// The type constraint a builtin parameter places on its argument.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// A real or complex Number.
    Number,
    /// Any value; the builtin validates further itself.
    Any,
}

impl ParamType {
    /// User-facing name of the constraint, used in error messages.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Any => "any value",
        }
    }

    /// Tests whether a value satisfies the constraint.
    pub(crate) const fn matches(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Any => true,
        }
    }
}

/// One parameter of a builtin: a name (for documentation), a type
/// constraint and an optional default filled in when the argument is
/// omitted.
#[derive(Clone, Copy)]
pub struct ParamSpec {
    pub name:    &'static str,
    pub ty:      ParamType,
    pub default: Option<f64>,
}

/// A required Number parameter.
const fn num(name: &'static str) -> ParamSpec {
    ParamSpec { name,
                ty: ParamType::Number,
                default: None }
}

/// An optional Number parameter with a default.
const fn num_default(name: &'static str, default: f64) -> ParamSpec {
    ParamSpec { name,
                ty: ParamType::Number,
                default: Some(default) }
}

/// An unconstrained parameter.
const fn any(name: &'static str) -> ParamSpec {
    ParamSpec { name,
                ty: ParamType::Any,
                default: None }
}

/// One entry of the builtin catalog.
pub struct BuiltinDef {
    pub name:     &'static str,
    pub params:   &'static [ParamSpec],
    /// Variadic builtins accept one or more arguments, all matched against
    /// the single declared parameter.
    pub variadic: bool,
    pub func:     BuiltinFn,
}

const fn entry(name: &'static str, params: &'static [ParamSpec], func: BuiltinFn) -> BuiltinDef {
    BuiltinDef { name,
                 params,
                 variadic: false,
                 func }
}

const fn variadic(name: &'static str, params: &'static [ParamSpec], func: BuiltinFn) -> BuiltinDef {
    BuiltinDef { name,
                 params,
                 variadic: true,
                 func }
}

/// The builtin catalog: a read-only table constructed once, never mutated.
///
/// Calculus primitives (`gradient`, `derivative`, `integ`) are absent here
/// because they need evaluator access; see [`CONTEXT_BUILTINS`].
pub static BUILTIN_TABLE: &[BuiltinDef] = &[
    // rounding and arithmetic
    entry("abs", &[num("x")], builtin::abs),
    entry("ceil", &[num("num")], builtin::ceil),
    entry("floor", &[num("num")], builtin::floor),
    entry("trunc", &[num("num")], builtin::trunc),
    entry("round", &[num("num"), num_default("prec", 0.0)], builtin::round),
    entry("sign", &[num("num")], builtin::sign),
    entry("sqrt", &[num("num")], builtin::sqrt),
    entry("root", &[num("num"), num("n")], builtin::root),
    entry("pow", &[num("num"), num("p")], builtin::pow),
    entry("gcd", &[num("a"), num("b")], builtin::gcd),
    entry("lcm", &[num("a"), num("b")], builtin::lcm),
    entry("hypot", &[num("x"), num("y")], builtin::hypot),
    // exponentials and logarithms
    entry("exp", &[num("x")], builtin::exp),
    entry("ln", &[num("num")], builtin::ln),
    entry("log", &[num("num"), num_default("base", 10.0)], builtin::log),
    // angle conversion
    entry("deg", &[num("x")], builtin::deg),
    entry("rad", &[num("x")], builtin::rad),
    // trigonometry
    entry("sin", &[num("x")], trig::sin),
    entry("cos", &[num("x")], trig::cos),
    entry("tan", &[num("x")], trig::tan),
    entry("asin", &[num("x")], trig::asin),
    entry("acos", &[num("x")], trig::acos),
    entry("atan", &[num("x")], trig::atan),
    entry("sec", &[num("x")], trig::sec),
    entry("csc", &[num("x")], trig::csc),
    entry("cot", &[num("x")], trig::cot),
    entry("sinh", &[num("x")], trig::sinh),
    entry("cosh", &[num("x")], trig::cosh),
    entry("tanh", &[num("x")], trig::tanh),
    entry("asinh", &[num("x")], trig::asinh),
    entry("acosh", &[num("x")], trig::acosh),
    entry("atanh", &[num("x")], trig::atanh),
    entry("versin", &[num("x")], trig::versin),
    entry("vercos", &[num("x")], trig::vercos),
    entry("haversin", &[num("x")], trig::haversin),
    entry("havercos", &[num("x")], trig::havercos),
    // complex accessors
    entry("re", &[num("x")], complex::re),
    entry("im", &[num("x")], complex::im),
    entry("conj", &[num("x")], complex::conj),
    entry("arg", &[num("x")], complex::arg),
    entry("polar", &[num("x")], complex::polar),
    entry("rect", &[num("r"), num("theta")], complex::rect),
    // statistics
    variadic("mean", &[any("values")], stats::mean),
    variadic("average", &[any("values")], stats::mean),
    variadic("median", &[any("values")], stats::median),
    variadic("mode", &[any("values")], stats::mode),
    variadic("sum", &[any("values")], stats::sum),
    variadic("min", &[any("values")], stats::min),
    variadic("max", &[any("values")], stats::max),
    variadic("variance", &[any("values")], stats::variance),
    variadic("variance_sample", &[any("values")], stats::variance_sample),
    variadic("stdev", &[any("values")], stats::stdev),
    variadic("stdev_sample", &[any("values")], stats::stdev_sample),
    variadic("harmonic_mean", &[any("values")], stats::harmonic_mean),
    // combinatorics
    entry("binomial", &[num("n"), num("k")], stats::binomial),
    entry("factorial", &[num("n")], stats::factorial),
    entry("fact", &[num("n")], stats::factorial),
    entry("fib", &[num("n")], stats::fib),
    entry("gamma", &[num("x")], stats::gamma),
    entry("lgamma", &[num("x")], stats::lgamma),
    entry("beta", &[num("a"), num("b")], stats::beta),
    // geometry
    entry("circle_area", &[num("radius")], geometry::circle_area),
    entry("circle_perimeter", &[num("radius")], geometry::circle_perimeter),
    entry("sphere_area", &[num("radius")], geometry::sphere_area),
    entry("sphere_volume", &[num("radius")], geometry::sphere_volume),
    entry("cube_area", &[num("side")], geometry::cube_area),
    entry("cube_volume", &[num("side")], geometry::cube_volume),
    entry("cylinder_area", &[num("radius"), num("height")], geometry::cylinder_area),
    entry("cylinder_volume", &[num("radius"), num("height")], geometry::cylinder_volume),
    entry("cuboid_area", &[num("a"), num("b"), num("c")], geometry::cuboid_area),
    entry("cuboid_volume", &[num("a"), num("b"), num("c")], geometry::cuboid_volume),
    entry("pyramid_volume",
          &[num("sides"), num("length"), num("height")],
          geometry::pyramid_volume),
    // type casts
    entry("num", &[any("obj")], casts::num_cast),
    entry("str", &[any("obj")], casts::str_cast),
    entry("bool", &[any("obj")], casts::bool_cast),
    entry("list", &[any("obj")], casts::list_cast),
];

/// Builtins that need evaluator access because they call a Function value.
/// They are dispatched directly by [`Machine::invoke`].
pub const CONTEXT_BUILTINS: &[&str] = &["gradient", "derivative", "integ"];

/// Finds a catalog entry by name.
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|b| b.name == name)
}

/// Resolves a name to its static builtin spelling, covering both the
/// catalog and the context builtins.
#[must_use]
pub fn builtin_name(name: &str) -> Option<&'static str> {
    if let Some(def) = lookup_builtin(name) {
        return Some(def.name);
    }
    CONTEXT_BUILTINS.iter().find(|n| **n == name).copied()
}

/// Validates a builtin's arguments against its parameter specs and fills in
/// defaults for omitted trailing parameters.
///
/// # Errors
/// - `ArgumentCountMismatch` when the count is outside the allowed range.
/// - `ArgumentTypeMismatch` when an argument violates its constraint.
pub(crate) fn bind_arguments(def: &BuiltinDef,
                             mut args: Vec<Value>,
                             line: usize)
                             -> EvalResult<Vec<Value>> {
    if def.variadic {
        if args.is_empty() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: 1,
                                                             actual: 0,
                                                             line });
        }
        for (index, arg) in args.iter().enumerate() {
            if !def.params[0].ty.matches(arg) {
                return Err(RuntimeError::ArgumentTypeMismatch { index: index + 1,
                                                                expected: def.params[0].ty.name(),
                                                                found: arg.type_name(),
                                                                line });
            }
        }
        return Ok(args);
    }

    let required = def.params.iter().filter(|p| p.default.is_none()).count();
    if args.len() < required || args.len() > def.params.len() {
        return Err(RuntimeError::ArgumentCountMismatch { expected: required,
                                                         actual: args.len(),
                                                         line });
    }

    for (index, (arg, param)) in args.iter().zip(def.params).enumerate() {
        if !param.ty.matches(arg) {
            return Err(RuntimeError::ArgumentTypeMismatch { index: index + 1,
                                                            expected: param.ty.name(),
                                                            found: arg.type_name(),
                                                            line });
        }
    }

    for param in &def.params[args.len()..] {
        let default = param.default
                           .expect("optional parameters follow required ones");
        args.push(Value::Real(default));
    }

    Ok(args)
}

/// Collects a variadic builtin's arguments into real numbers.
///
/// A single List argument contributes its elements; otherwise every
/// argument is taken directly, so the statistics builtins accept both
/// spellings: `mean(2, 4, 6)` and `mean([2, 4, 6])`.
pub(crate) fn collect_numbers(args: &[Value], line: usize) -> EvalResult<Vec<f64>> {
    let items: &[Value] = match args {
        [Value::List(items)] => items,
        _ => args,
    };

    if items.is_empty() {
        return Err(RuntimeError::InvalidArgument { details: "at least one value is required".to_string(),
                                                   line });
    }

    let mut numbers = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Real(r) => numbers.push(*r),
            other => {
                return Err(RuntimeError::ArgumentTypeMismatch { index: index + 1,
                                                                expected: "Number",
                                                                found: other.type_name(),
                                                                line });
            },
        }
    }
    Ok(numbers)
}

impl Machine<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee and all arguments are evaluated left-to-right; a trailing
    /// expand argument must hold a List, whose elements are spliced in as
    /// individual positional arguments. The call is then dispatched to a
    /// user-defined function or a builtin. A function that produces no
    /// value is an error in value position.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            expand_last: bool)
                            -> EvalResult<Value> {
        let line = self.line;

        let callable = match self.eval(callee)? {
            Value::Function(callable) => callable,
            other => {
                return Err(RuntimeError::InvalidArgument { details: format!("{} is not callable",
                                                                            other.type_name()),
                                                           line });
            },
        };

        let mut args = Vec::with_capacity(arguments.len());
        for (index, argument) in arguments.iter().enumerate() {
            let value = self.eval(argument)?;

            if expand_last && index == arguments.len() - 1 {
                match value {
                    Value::List(items) => args.extend(items.iter().cloned()),
                    other => {
                        return Err(RuntimeError::InvalidArgument { details: format!("expand argument must be a List, got {}",
                                                                                    other.type_name()),
                                                                   line });
                    },
                }
            } else {
                args.push(value);
            }
        }

        self.invoke(&callable, args)?
            .ok_or(RuntimeError::MissingValue { line })
    }

    /// Dispatches a call to a user function or a builtin with
    /// already-evaluated arguments. Returns `None` when a user function
    /// body falls through without RETURN.
    pub(crate) fn invoke(&mut self,
                         callable: &FunctionValue,
                         args: Vec<Value>)
                         -> EvalResult<Option<Value>> {
        match callable {
            FunctionValue::User(def) => self.call_user_function(def, args),
            FunctionValue::Builtin(name) => match *name {
                "gradient" | "derivative" => self.builtin_gradient(&args).map(Some),
                "integ" => self.builtin_integ(&args).map(Some),
                name => {
                    let def = lookup_builtin(name).ok_or_else(|| {
                                  RuntimeError::UnknownVariable { name: name.to_string(),
                                                                  line: self.line, }
                              })?;
                    let bound = bind_arguments(def, args, self.line)?;
                    (def.func)(&bound, self.line).map(Some)
                },
            },
        }
    }

    /// Calls a user-defined function: fresh scope, positional parameter
    /// binding, body execution, RETURN consumption.
    fn call_user_function(&mut self,
                          def: &FunctionDef,
                          args: Vec<Value>)
                          -> EvalResult<Option<Value>> {
        let call_line = self.line;

        if args.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: def.params.len(),
                                                             actual: args.len(),
                                                             line: call_line, });
        }

        self.env.push_scope();
        for (param, value) in def.params.iter().zip(args) {
            self.env.define_local(param, value);
        }

        let outcome = self.exec_block(&def.body);

        self.env.pop_scope();
        self.line = call_line;

        match outcome? {
            Signal::Normal => Ok(None),
            Signal::Return { value, .. } => Ok(value),
            Signal::Break { line } => Err(RuntimeError::BreakOutsideLoop { line }),
            Signal::Continue { line } => Err(RuntimeError::ContinueOutsideLoop { line }),
        }
    }
}
