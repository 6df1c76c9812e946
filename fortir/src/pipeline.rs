//! The pipeline driver: an explicit, statically ordered list of transform
//! stages.
//!
//! The order is semantically required — each stage assumes the normal form
//! produced by the stages before it (e.g. call-site annotation must see
//! hoisted declarations, brace removal must run after conditionals have
//! shed theirs). Reordering is a visible decision here, not an implicit
//! convention spread across modules.

use crate::error::TranslateError;
use crate::passes;

/// One stage of the pipeline: a named, pure whole-text transform.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    /// Stable name, used for diagnostics.
    pub name: &'static str,
    /// The transform itself.
    pub run: fn(&str) -> Result<String, TranslateError>,
}

/// The fixed transformation order.
pub const STAGES: &[Stage] = &[
    Stage {
        name: "strip_comments",
        run: passes::comments::strip_comments,
    },
    Stage {
        name: "hoist_parameter_declarations",
        run: passes::parameters::hoist_parameter_declarations,
    },
    Stage {
        name: "hoist_local_declarations",
        run: passes::declarations::hoist_local_declarations,
    },
    Stage {
        name: "declare_invoked_return_types",
        run: passes::invocations::declare_invoked_return_types,
    },
    Stage {
        name: "translate_returns",
        run: passes::returns::translate_returns,
    },
    Stage {
        name: "rejoin_split_statements",
        run: passes::continuations::rejoin_split_statements,
    },
    Stage {
        name: "add_implicit_none",
        run: passes::implicit::add_implicit_none,
    },
    Stage {
        name: "encode_case_sensitive_identifiers",
        run: passes::identifiers::encode_case_sensitive_identifiers,
    },
    Stage {
        name: "name_unnamed_programs",
        run: passes::programs::name_unnamed_programs,
    },
    Stage {
        name: "convert_conditionals",
        run: passes::conditionals::convert_conditionals,
    },
    Stage {
        name: "translate_object_declarations",
        run: passes::objects::translate_object_declarations,
    },
    Stage {
        name: "inline_pointer_casts",
        run: passes::casts::inline_pointer_casts,
    },
    Stage {
        name: "remove_braces",
        run: passes::braces::remove_braces,
    },
];

/// Run the full pipeline over one source buffer.
///
/// # Errors
/// Propagates the first stage failure; there is no partial output.
pub fn transpile(source: &str) -> Result<String, TranslateError> {
    let mut text = source.to_owned();
    for stage in STAGES {
        text = (stage.run)(&text)?;
    }
    Ok(text)
}
