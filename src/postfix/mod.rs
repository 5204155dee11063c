//! Infix preprocessing and infix-to-postfix conversion.

mod converter;
mod normalize;

pub use converter::to_postfix;
pub use normalize::{normalize_unary_minus, substitute_constants};
