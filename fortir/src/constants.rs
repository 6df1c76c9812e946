//! Shared keyword sets and cached regex patterns.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Keywords that introduce brace-delimited blocks, used to label closing
/// delimiters during brace removal. Closed and explicit; `if` is absent
/// because conditionals lose their braces before brace removal runs.
pub const BRACE_BLOCK_KEYWORDS: &[&str] = &["function", "subroutine", "module", "do", "program"];

/// Block kinds whose bodies hold variable declarations.
pub const DECLARING_BLOCK_KEYWORDS: &[&str] = &["function", "subroutine", "program"];

/// Line-comment marker of the source dialect.
pub const COMMENT_MARKER: char = '!';

/// Marker character of the case-encoding scheme.
pub const CASE_MARKER: char = '$';

/// Name given to `program` blocks that declare none.
pub const DEFAULT_PROGRAM_NAME: &str = "main";

/// Configuration file searched for upward from the working directory.
pub const CONFIG_FILENAME: &str = ".fortir.toml";

/// Call-position names that are never value-returning user functions.
pub fn get_reserved_call_names() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("if");
        s.insert("do");
        s.insert("while");
        s.insert("select");
        s.insert("case");
        s.insert("end");
        s.insert("return");
        s.insert("then");
        s.insert("else");
        s.insert("new");
        s.insert("call");
        // `cast` is the pointer-rebind pseudo-intrinsic handled by its own
        // pass; treating it as a call would fail resolution first.
        s.insert("cast");
        s.insert("function");
        s.insert("subroutine");
        s.insert("module");
        s.insert("program");
        s.insert("implicit");
        s
    })
}

/// Words preceding a call name that mark it as something other than a
/// value-returning invocation (object construction, subroutine call, or a
/// declaration header).
pub fn get_non_call_prefixes() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("new");
        s.insert("call");
        s.insert("function");
        s.insert("subroutine");
        s
    })
}

/// Regex for a typed function header up to its opening parenthesis:
/// `<type> function <name>(`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_typed_function_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*\S+[ \t]+function[ \t]+[\w$]+[ \t]*\(")
            .expect("Invalid function header regex pattern")
    })
}

/// Regex for a call expression's head: an identifier immediately followed
/// by `(`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"([A-Za-z_][\w$]*)\(").expect("Invalid call expression regex pattern")
    })
}

/// Regex for `return <expr>;` statements.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_return_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\breturn[ \t]+([^;\n]+);").expect("Invalid return statement regex pattern")
    })
}

/// Regex for an inline declaration-with-initializer statement line:
/// `<type-and-attrs>::<id> = <expr>`. The first `=` must come after the
/// `::` and must not be part of `==`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_inline_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"^([^=]+::[^=]*)=([^=].*)$").expect("Invalid inline declaration regex pattern")
    })
}

/// Regex for a pointer-cast call: `<dest> = cast(<src>)`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_cast_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"([\w$]+)[ \t]*=[ \t]*cast\(([\w$]+)\)")
            .expect("Invalid pointer cast regex pattern")
    })
}

/// Regex for an object-reference declaration: `<Type>, object :: <names>`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_object_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"([\w$]+)[ \t]*,[ \t]*object[ \t]*::[ \t]*([^\n]+)")
            .expect("Invalid object declaration regex pattern")
    })
}

/// Regex for an `if` conditional header's start: the keyword and its
/// opening parenthesis.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_if_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\bif[ \t]*\(").expect("Invalid if header regex pattern"))
}

/// Regex for a bare `else {` continuation (deliberately not matching
/// `else if`, whose brace belongs to the nested `if`).
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_else_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\belse[ \t\n]*\{").expect("Invalid else header regex pattern"))
}

/// Regex for an unnamed `program {` header. The leading alternative keeps
/// an identifier ending in `program` (or an encoded one ending in `$`)
/// from being misread as the keyword.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_unnamed_program_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?m)(?:^|[^\w$])(program[ \t\n]*\{)")
            .expect("Invalid program header regex pattern")
    })
}

/// Regex for word tokens considered for case encoding.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\w+").expect("Invalid word regex pattern"))
}

pub use get_call_re as CALL_RE;
pub use get_cast_re as CAST_RE;
pub use get_else_header_re as ELSE_HEADER_RE;
pub use get_if_header_re as IF_HEADER_RE;
pub use get_inline_decl_re as INLINE_DECL_RE;
pub use get_non_call_prefixes as NON_CALL_PREFIXES;
pub use get_object_decl_re as OBJECT_DECL_RE;
pub use get_reserved_call_names as RESERVED_CALL_NAMES;
pub use get_return_re as RETURN_RE;
pub use get_typed_function_header_re as TYPED_FUNCTION_HEADER_RE;
pub use get_unnamed_program_re as UNNAMED_PROGRAM_RE;
pub use get_word_re as WORD_RE;
