use std::f64::consts::PI;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::exact_to_i64,
};

/// Returns the area of the circle with the specified radius.
pub fn circle_area(args: &[Value], line: usize) -> EvalResult<Value> {
    let r = args[0].as_real(line)?;
    Ok(Value::Real(PI * r * r))
}

/// Returns the perimeter of the circle with the specified radius.
pub fn circle_perimeter(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(2.0 * PI * args[0].as_real(line)?))
}

/// Returns the surface area of the sphere with the specified radius.
pub fn sphere_area(args: &[Value], line: usize) -> EvalResult<Value> {
    let r = args[0].as_real(line)?;
    Ok(Value::Real(4.0 * PI * r * r))
}

/// Returns the volume of the sphere with the specified radius.
pub fn sphere_volume(args: &[Value], line: usize) -> EvalResult<Value> {
    let r = args[0].as_real(line)?;
    Ok(Value::Real(4.0 / 3.0 * PI * r * r * r))
}

/// Returns the surface area of the cube with the specified side length.
pub fn cube_area(args: &[Value], line: usize) -> EvalResult<Value> {
    let side = args[0].as_real(line)?;
    Ok(Value::Real(6.0 * side * side))
}

/// Returns the volume of the cube with the specified side length.
pub fn cube_volume(args: &[Value], line: usize) -> EvalResult<Value> {
    let side = args[0].as_real(line)?;
    Ok(Value::Real(side * side * side))
}

/// Returns the surface area of the cylinder with the specified radius and
/// height.
pub fn cylinder_area(args: &[Value], line: usize) -> EvalResult<Value> {
    let r = args[0].as_real(line)?;
    let h = args[1].as_real(line)?;
    Ok(Value::Real(2.0 * PI * r * (r + h)))
}

/// Returns the volume of the cylinder with the specified radius and height.
pub fn cylinder_volume(args: &[Value], line: usize) -> EvalResult<Value> {
    let r = args[0].as_real(line)?;
    let h = args[1].as_real(line)?;
    Ok(Value::Real(PI * r * r * h))
}

/// Returns the surface area of the cuboid with side lengths `a`, `b`, `c`.
pub fn cuboid_area(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_real(line)?;
    let b = args[1].as_real(line)?;
    let c = args[2].as_real(line)?;
    Ok(Value::Real(2.0 * (a * b + b * c + c * a)))
}

/// Returns the volume of the cuboid with side lengths `a`, `b`, `c`.
pub fn cuboid_volume(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_real(line)?;
    let b = args[1].as_real(line)?;
    let c = args[2].as_real(line)?;
    Ok(Value::Real(a * b * c))
}

/// Returns the volume of the regular pyramid with the specified number of
/// base sides, base side length and height.
pub fn pyramid_volume(args: &[Value], line: usize) -> EvalResult<Value> {
    let sides = exact_to_i64(args[0].as_real(line)?, line)?;
    let length = args[1].as_real(line)?;
    let height = args[2].as_real(line)?;

    if sides < 3 {
        return Err(RuntimeError::InvalidArgument { details: "a pyramid base needs at least three sides".to_string(),
                                                   line });
    }

    #[allow(clippy::cast_precision_loss)]
    let n = sides as f64;
    let base_area = n * length * length / (4.0 * (PI / n).tan());
    Ok(Value::Real(base_area * height / 3.0))
}
