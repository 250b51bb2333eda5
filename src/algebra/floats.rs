use num_traits::FromPrimitive;

/// Main trait for floating point types accepted by the adapters.
///
/// This is the float trait of the `clarabel` solver, so that any `T`
/// accepted here can be handed to [`clarabel::solver::DefaultSolver`]
/// without further conversion.
pub use clarabel::algebra::FloatT;

/// Converts an `f64` constant or option value to `T`.
///
/// Values outside the range of `T` become NaN.
#[inline]
pub fn float_const<T: FloatT>(v: f64) -> T {
    <T as FromPrimitive>::from_f64(v).unwrap_or_else(T::nan)
}

#[test]
fn test_float_const() {
    let x: f32 = float_const(0.5);
    assert_eq!(x, 0.5);
    let y: f64 = float_const(1e-9);
    assert_eq!(y, 1e-9);
}
