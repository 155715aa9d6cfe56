/// Builtin catalog and call dispatch.
///
/// Declares the builtin table (name, per-parameter type constraints,
/// optional defaults, function pointer), argument binding/validation, and
/// the `Machine` methods that dispatch a call to a user-defined function or
/// a builtin.
pub mod core;

/// Rounding, arithmetic, exponential and logarithmic builtins.
pub mod builtin;

/// Trigonometric, hyperbolic and versed families, with their inverses.
pub mod trig;

/// Statistics and combinatorics builtins.
pub mod stats;

/// Geometry formula builtins.
pub mod geometry;

/// Type-cast builtins.
pub mod casts;

/// Complex-number accessor builtins.
pub mod complex;

/// Calculus primitives (dispatched with evaluator access, since they call a
/// Function value).
pub mod calculus;
