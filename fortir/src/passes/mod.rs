//! The transformation passes, one module per pass.
//!
//! Each pass is a pure `&str -> Result<String>` transform over the whole
//! text. Passes re-derive the block/function/symbol information they need
//! from the current text; none consult a cache from a previous pass, which
//! is why the pipeline order in [`crate::pipeline`] is load-bearing.

pub mod braces;
pub mod casts;
pub mod comments;
pub mod conditionals;
pub mod continuations;
pub mod declarations;
pub mod identifiers;
pub mod implicit;
pub mod invocations;
pub mod objects;
pub mod parameters;
pub mod programs;
pub mod returns;
