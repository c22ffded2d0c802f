//! Hand-built profiles shared by the unit tests.

use crate::{
    BlockComment, DefinitionKind, LanguageProfile, LiteralRule, Registry, RegistryBuilder,
};

/// A compact Rust profile with nesting block comments and char literals.
pub(crate) fn rust_profile() -> LanguageProfile {
    LanguageProfile::builder("rust")
        .precedence(10)
        .keywords([
            "fn", "let", "mut", "struct", "impl", "return", "if", "else", "match", "use", "pub",
            "self", "Self",
        ])
        .line_comment("//")
        .block_comment(BlockComment::new("/*", "*/").nested(true))
        .literal(LiteralRule::text("\"", "\"").with_escape('\\'))
        .literal(LiteralRule::text("r#\"", "\"#"))
        .literal(LiteralRule::character("'", "'").with_escape('\\'))
        .bracket('(', ')')
        .bracket('[', ']')
        .bracket('{', '}')
        .punctuation(":;,.&-<>!=+*/%^|@#?~'$")
        .forbid_adjacent("fn", "fn")
        .forbid_adjacent("let", "let")
        .definition("fn", DefinitionKind::Function)
        .definition("struct", DefinitionKind::Struct)
        .extension("rs")
        .signature("fn main()")
        .build()
        .expect("rust profile should be valid")
}

/// A compact Python profile with `#` comments and triple-quoted strings.
pub(crate) fn python_profile() -> LanguageProfile {
    LanguageProfile::builder("python")
        .precedence(20)
        .keywords([
            "def", "class", "return", "if", "else", "elif", "import", "from", "in", "for",
            "while", "pass", "None", "True", "False", "self",
        ])
        .line_comment("#")
        .literal(LiteralRule::text("\"\"\"", "\"\"\"").with_escape('\\'))
        .literal(LiteralRule::text("\"", "\"").with_escape('\\'))
        .literal(LiteralRule::text("'", "'").with_escape('\\'))
        .bracket('(', ')')
        .bracket('[', ']')
        .bracket('{', '}')
        .punctuation(":;,.-+*/%=<>!@")
        .forbid_adjacent("def", "def")
        .definition("def", DefinitionKind::Function)
        .definition("class", DefinitionKind::Class)
        .extension("py")
        .signature("def __init__(")
        .build()
        .expect("python profile should be valid")
}

/// A registry holding [`rust_profile`] and [`python_profile`].
pub(crate) fn two_language_registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder
        .register(python_profile())
        .expect("register python");
    builder.register(rust_profile()).expect("register rust");
    builder.build()
}
