use std::{
    rc::Rc,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        env::Environment,
        evaluator::core::{resolve_index, EvalResult},
        io::{NullIo, NullPlot, PlotSurface, ProgramIo},
        runtime::{input::parse_input_value, signal::Signal},
        value::core::{FunctionValue, Value},
    },
};

/// How a program run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All statements executed.
    Completed,
    /// The external stop request ended the run early. This is a deliberate
    /// termination, not a failure.
    Interrupted,
}

/// The borrowed execution state of one running program.
///
/// A `Machine` owns nothing: it borrows the environment, the host
/// collaborators and the cancellation flag for the duration of a run, and
/// tracks the line of the statement currently executing so every error can
/// point at it. Execution is single-threaded and cooperative; side effects
/// are emitted in program order, never reordered or batched.
pub struct Machine<'a> {
    pub(crate) env:    &'a mut Environment,
    pub(crate) io:     &'a mut dyn ProgramIo,
    pub(crate) plot:   &'a mut dyn PlotSurface,
    pub(crate) cancel: &'a AtomicBool,
    /// Line of the statement currently executing, for error reporting.
    pub(crate) line:   usize,
}

/// Runs a program against an environment and a pair of host collaborators.
///
/// Statements execute in order; the cancellation flag is polled at every
/// statement boundary and every loop-iteration boundary. When the flag is
/// set, execution unwinds all open scopes and reports
/// `RunOutcome::Interrupted` — already-emitted output and plot commands are
/// not rolled back, since they are externally visible once emitted.
///
/// # Errors
/// Any `RuntimeError` raised by a statement terminates the program and is
/// surfaced to the host carrying the originating statement's line. A BREAK
/// or CONTINUE reaching the top level, or a RETURN outside any function,
/// are errors of this kind too.
pub fn run_program(program: &[Statement],
                   env: &mut Environment,
                   io: &mut dyn ProgramIo,
                   plot: &mut dyn PlotSurface,
                   cancel: &AtomicBool)
                   -> Result<RunOutcome, RuntimeError> {
    debug!(statements = program.len(), "running program");

    let mut machine = Machine { env,
                                io,
                                plot,
                                cancel,
                                line: 0 };

    let outcome = match machine.exec_block(program) {
        Ok(Signal::Normal) => Ok(RunOutcome::Completed),
        Ok(Signal::Break { line }) => Err(RuntimeError::BreakOutsideLoop { line }),
        Ok(Signal::Continue { line }) => Err(RuntimeError::ContinueOutsideLoop { line }),
        Ok(Signal::Return { line, .. }) => Err(RuntimeError::ReturnOutsideFunction { line }),
        Err(RuntimeError::Interrupted { .. }) => Ok(RunOutcome::Interrupted),
        Err(error) => Err(error),
    };

    debug!(?outcome, "program finished");
    outcome
}

/// Evaluates a single expression against an environment.
///
/// Uses no-op host collaborators: a user function called from the
/// expression may run statements, but its DISPLAY/plot side effects go
/// nowhere. This is the "calculator" surface.
///
/// # Errors
/// Any `RuntimeError` raised during the walk.
///
/// # Example
/// ```
/// use algoscript::interpreter::{
///     env::Environment, parser::parse_expression, runtime::evaluate_expression,
///     value::core::Value,
/// };
///
/// let expr = parse_expression("2 + 2 = 4").unwrap();
/// let mut env = Environment::new();
///
/// assert_eq!(evaluate_expression(&expr, &mut env).unwrap(), Value::Bool(true));
/// ```
pub fn evaluate_expression(expr: &Expr, env: &mut Environment) -> EvalResult<Value> {
    let mut io = NullIo;
    let mut plot = NullPlot;
    let cancel = AtomicBool::new(false);

    let mut machine = Machine { env,
                                io: &mut io,
                                plot: &mut plot,
                                cancel: &cancel,
                                line: 0 };
    machine.eval(expr)
}

impl Machine<'_> {
    /// Executes a block of statements in order.
    ///
    /// The first non-`Normal` signal stops the block and is returned to the
    /// caller. An `Else` is consumed by the `If` immediately before it; an
    /// `Else` encountered on its own is an `ElseWithoutIf` error.
    pub(crate) fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Signal> {
        let mut index = 0;

        while index < statements.len() {
            let statement = &statements[index];

            if self.cancel.load(Ordering::Relaxed) {
                return Err(RuntimeError::Interrupted { line: statement.line() });
            }

            self.line = statement.line();
            trace!(line = self.line, "executing statement");

            let signal = match statement {
                Statement::Define { target, value, .. } => self.exec_define(target, value)?,
                Statement::Display { value, newline, .. } => {
                    let text = self.eval(value)?.to_string();
                    self.io.write_line(&text, *newline);
                    Signal::Normal
                },
                Statement::Input { variable, prompt, .. } => self.exec_input(variable, prompt.as_ref())?,
                Statement::If { condition, block, line } => {
                    let taken = self.eval(condition)?.as_bool(*line)?;
                    let else_block = match statements.get(index + 1) {
                        Some(Statement::Else { block, .. }) => {
                            index += 1; // the Else belongs to this If
                            Some(block)
                        },
                        _ => None,
                    };

                    if taken {
                        self.exec_block(block)?
                    } else if let Some(block) = else_block {
                        self.exec_block(block)?
                    } else {
                        Signal::Normal
                    }
                },
                Statement::Else { line, .. } => {
                    return Err(RuntimeError::ElseWithoutIf { line: *line });
                },
                Statement::While { condition, block, line } => {
                    self.exec_while(condition, block, *line)?
                },
                Statement::For { variable,
                                 from,
                                 to,
                                 step,
                                 block,
                                 line, } => {
                    self.exec_for(variable, from, to, step.as_ref(), block, *line)?
                },
                Statement::Function(def) => {
                    self.env.define_function(def.clone());
                    Signal::Normal
                },
                Statement::Call { name, arguments, line } => {
                    self.exec_call(name, arguments, *line)?
                },
                Statement::Return { value, line } => {
                    let value = match value {
                        Some(expr) => Some(self.eval(expr)?),
                        None => None,
                    };
                    Signal::Return { value, line: *line }
                },
                Statement::Break { line } => Signal::Break { line: *line },
                Statement::Continue { line } => Signal::Continue { line: *line },
                Statement::Sleep { duration, line } => self.exec_sleep(duration, *line)?,
                Statement::ClearPlot { .. } => {
                    self.plot.clear();
                    Signal::Normal
                },
                Statement::DrawLine { x1, y1, x2, y2, color, line } => {
                    let (x1, y1) = (self.eval(x1)?.as_real(*line)?, self.eval(y1)?.as_real(*line)?);
                    let (x2, y2) = (self.eval(x2)?.as_real(*line)?, self.eval(y2)?.as_real(*line)?);
                    let color = self.eval_color(color, *line)?;
                    self.plot.draw_line(x1, y1, x2, y2, &color);
                    Signal::Normal
                },
                Statement::DrawPoint { x, y, color, line } => {
                    let (x, y) = (self.eval(x)?.as_real(*line)?, self.eval(y)?.as_real(*line)?);
                    let color = self.eval_color(color, *line)?;
                    self.plot.draw_point(x, y, &color);
                    Signal::Normal
                },
                Statement::PlotFunction { variable,
                                          body,
                                          from,
                                          to,
                                          step,
                                          color,
                                          line, } => {
                    self.exec_plot_function(variable, body, from, to, step, color, *line)?
                },
                Statement::SetWindow { x_min,
                                       x_max,
                                       y_min,
                                       y_max,
                                       x_grad,
                                       y_grad,
                                       line, } => {
                    let x_min = self.eval(x_min)?.as_real(*line)?;
                    let x_max = self.eval(x_max)?.as_real(*line)?;
                    let y_min = self.eval(y_min)?.as_real(*line)?;
                    let y_max = self.eval(y_max)?.as_real(*line)?;
                    let x_grad = self.eval(x_grad)?.as_real(*line)?;
                    let y_grad = self.eval(y_grad)?.as_real(*line)?;
                    self.plot.set_window(x_min, x_max, y_min, y_max, x_grad, y_grad);
                    Signal::Normal
                },
                Statement::Comment { .. } => Signal::Normal,
            };

            if !matches!(signal, Signal::Normal) {
                return Ok(signal);
            }

            index += 1;
        }

        Ok(Signal::Normal)
    }

    /// Executes an assignment. The target must be a bare variable or an
    /// index chain rooted at one; anything else is `InvalidAssignmentTarget`.
    fn exec_define(&mut self, target: &Expr, value: &Expr) -> EvalResult<Signal> {
        let line = self.line;
        let value = self.eval(value)?;

        match target {
            Expr::Identifier { name, .. } => {
                self.env.assign_nearest(name, value);
            },
            Expr::Index { .. } => {
                let (root, index_exprs) = flatten_target(target, line)?;

                let mut indices = Vec::with_capacity(index_exprs.len());
                for expr in index_exprs {
                    indices.push(self.eval(expr)?);
                }

                let mut root_value = self.env
                                         .get_variable(root)
                                         .cloned()
                                         .ok_or_else(|| RuntimeError::UnknownVariable { name: root.to_string(),
                                                                                        line })?;

                store_indexed(&mut root_value, &indices, value, line)?;
                self.env.assign_nearest(root, root_value);
            },
            _ => return Err(RuntimeError::InvalidAssignmentTarget { line }),
        }

        Ok(Signal::Normal)
    }

    /// Executes an INPUT statement: optional prompt, blocking request,
    /// parse by prior type, write-through.
    fn exec_input(&mut self, variable: &str, prompt: Option<&Expr>) -> EvalResult<Signal> {
        let prompt_text = match prompt {
            Some(expr) => Some(self.eval(expr)?.to_string()),
            None => None,
        };

        let answer = self.io.request_line(prompt_text.as_deref());
        let value = parse_input_value(&answer, self.env.get_variable(variable));
        self.env.assign_nearest(variable, value);

        Ok(Signal::Normal)
    }

    /// Executes a WHILE loop. The condition is re-evaluated before every
    /// iteration; each iteration runs in its own scope.
    fn exec_while(&mut self,
                  condition: &Expr,
                  block: &[Statement],
                  line: usize)
                  -> EvalResult<Signal> {
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(RuntimeError::Interrupted { line });
            }

            self.line = line;
            if !self.eval(condition)?.as_bool(line)? {
                return Ok(Signal::Normal);
            }

            self.env.push_scope();
            let signal = self.exec_block(block);
            self.env.pop_scope();

            match signal? {
                Signal::Normal | Signal::Continue { .. } => {},
                Signal::Break { .. } => return Ok(Signal::Normal),
                signal @ Signal::Return { .. } => return Ok(signal),
            }
        }
    }

    /// Executes a FOR loop, inclusive of both bounds. The loop variable is
    /// bound in a fresh scope each iteration; the loop ends when stepping
    /// would cross the end bound, in the direction given by the step's sign.
    fn exec_for(&mut self,
                variable: &str,
                from: &Expr,
                to: &Expr,
                step: Option<&Expr>,
                block: &[Statement],
                line: usize)
                -> EvalResult<Signal> {
        let from = self.eval(from)?.as_real(line)?;
        let to = self.eval(to)?.as_real(line)?;
        let step = match step {
            Some(expr) => self.eval(expr)?.as_real(line)?,
            None => 1.0,
        };

        if step == 0.0 {
            return Err(RuntimeError::InvalidArgument { details: "FOR step must not be zero".to_string(),
                                                       line });
        }

        let mut current = from;

        loop {
            if (step > 0.0 && current > to) || (step < 0.0 && current < to) {
                return Ok(Signal::Normal);
            }

            if self.cancel.load(Ordering::Relaxed) {
                return Err(RuntimeError::Interrupted { line });
            }

            self.env.push_scope();
            self.env.define_local(variable, Value::Real(current));
            let signal = self.exec_block(block);
            self.env.pop_scope();

            match signal? {
                Signal::Normal | Signal::Continue { .. } => {},
                Signal::Break { .. } => return Ok(Signal::Normal),
                signal @ Signal::Return { .. } => return Ok(signal),
            }

            current += step;
        }
    }

    /// Executes a CALL statement. The result is discarded, so calling a
    /// function that produces no value is fine here.
    fn exec_call(&mut self, name: &str, arguments: &[Expr], line: usize) -> EvalResult<Signal> {
        use crate::interpreter::evaluator::function::core::builtin_name;

        let callable = match self.env.lookup(name) {
            Some(Value::Function(callable)) => callable,
            Some(other) => {
                return Err(RuntimeError::InvalidArgument { details: format!("{} is not callable",
                                                                            other.type_name()),
                                                           line });
            },
            None => match builtin_name(name) {
                Some(name) => FunctionValue::Builtin(name),
                None => {
                    return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                               line });
                },
            },
        };

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument)?);
        }

        self.invoke(&callable, args)?;
        Ok(Signal::Normal)
    }

    /// Suspends for the evaluated duration, sliced so an external stop
    /// request stays responsive.
    fn exec_sleep(&mut self, duration: &Expr, line: usize) -> EvalResult<Signal> {
        let seconds = self.eval(duration)?.as_real(line)?;

        // a year is already an absurd wait; anything above would overflow
        // the duration type
        if !seconds.is_finite() || seconds < 0.0 || seconds > 3.2e7 {
            return Err(RuntimeError::InvalidArgument { details: format!("cannot wait for {seconds} seconds"),
                                                       line });
        }

        let deadline = Instant::now() + Duration::from_secs_f64(seconds);

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(RuntimeError::Interrupted { line });
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(Signal::Normal);
            }

            std::thread::sleep(remaining.min(Duration::from_millis(50)));
        }
    }

    /// Emits a plot-function command. Sample points where the expression
    /// has no real value are reported as gaps (`None`).
    #[allow(clippy::too_many_arguments)]
    fn exec_plot_function(&mut self,
                          variable: &str,
                          body: &Expr,
                          from: &Expr,
                          to: &Expr,
                          step: &Expr,
                          color: &Expr,
                          line: usize)
                          -> EvalResult<Signal> {
        let from = self.eval(from)?.as_real(line)?;
        let to = self.eval(to)?.as_real(line)?;
        let step = self.eval(step)?.as_real(line)?;
        let color = self.eval_color(color, line)?;

        let Machine { env, plot, cancel, .. } = self;

        let mut sample = |x: f64| -> Option<f64> {
            let mut io = NullIo;
            let mut inner_plot = NullPlot;
            let mut inner = Machine { env: &mut **env,
                                      io: &mut io,
                                      plot: &mut inner_plot,
                                      cancel: *cancel,
                                      line };

            inner.env.push_scope();
            inner.env.define_local(variable, Value::Real(x));
            let result = inner.eval(body);
            inner.env.pop_scope();

            result.ok().and_then(|value| value.as_real(line).ok())
        };

        (**plot).plot_function(&mut sample, from, to, step, &color);
        Ok(Signal::Normal)
    }

    /// Evaluates a color argument down to its string form.
    fn eval_color(&mut self, color: &Expr, line: usize) -> EvalResult<String> {
        let value = self.eval(color)?;
        Ok(value.as_str(line)?.to_string())
    }
}

/// Decomposes an assignment target into its root variable name and the
/// index expressions applied to it, outermost first.
fn flatten_target<'e>(target: &'e Expr, line: usize) -> EvalResult<(&'e str, Vec<&'e Expr>)> {
    let mut indices = Vec::new();
    let mut current = target;

    loop {
        match current {
            Expr::Index { target, index, .. } => {
                indices.push(index.as_ref());
                current = target.as_ref();
            },
            Expr::Identifier { name, .. } => {
                indices.reverse();
                return Ok((name, indices));
            },
            _ => return Err(RuntimeError::InvalidAssignmentTarget { line }),
        }
    }
}

/// Stores `value` at the position named by `indices` inside `current`,
/// descending through nested lists. Shared list storage is copied on write.
fn store_indexed(current: &mut Value,
                 indices: &[Value],
                 value: Value,
                 line: usize)
                 -> EvalResult<()> {
    let Value::List(items) = current else {
        return Err(RuntimeError::ArrayAccessType { line });
    };

    let items = Rc::make_mut(items);
    let index = resolve_index(&indices[0], items.len(), line)?;

    if indices.len() == 1 {
        items[index] = value;
        Ok(())
    } else {
        store_indexed(&mut items[index], &indices[1..], value, line)
    }
}
