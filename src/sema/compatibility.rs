// src/sema/compatibility.rs
//
// Type compatibility checking functions.
// These are pure functions that determine if types are equal or assignable.

use crate::sema::types::Type;

/// Structural type equality. `Error` equals nothing, including itself, so
/// one ill-typed sub-expression cannot trigger diagnostics in any enclosing
/// expression.
pub fn types_equal(a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Error, _) | (_, Type::Error) => false,
        (
            Type::Array {
                elem: a_elem,
                size: a_size,
            },
            Type::Array {
                elem: b_elem,
                size: b_size,
            },
        ) => types_equal(a_elem, b_elem) && a_size == b_size,
        _ => a == b,
    }
}

/// Check if a value of type `from` may appear where `to` is required.
///
/// Returns `true` on structural equality or on the single permitted
/// implicit widening, int into float. Nothing else coerces: no float to
/// int, and boolean, string and array types never convert.
pub fn assignable(from: &Type, to: &Type) -> bool {
    if types_equal(from, to) {
        return true;
    }
    matches!((from, to), (Type::Int, Type::Float))
}

/// True when `from` placed in an int-widening position of type `to` needs a
/// synthetic widen node.
pub fn needs_widening(from: &Type, to: &Type) -> bool {
    matches!((from, to), (Type::Int, Type::Float))
}
