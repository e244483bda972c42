/// Lexical rules for one language: enough to tell keywords, strings and
/// comments apart, nothing more.
#[derive(Debug)]
pub struct Language {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quotes: &'static [char],
    /// Quotes whose strings may span lines.
    pub multiline_quotes: &'static [char],
}

static RUST: Language = Language {
    name: "rust",
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    // Single quotes are lifetimes as often as chars.
    quotes: &['"'],
    multiline_quotes: &['"'],
};

static PYTHON: Language = Language {
    name: "python",
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "False", "finally", "for", "from", "global", "if", "import",
        "in", "is", "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return", "True",
        "try", "while", "with", "yield",
    ],
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    multiline_quotes: &[],
};

static JAVASCRIPT: Language = Language {
    name: "javascript",
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
        "function", "if", "import", "in", "instanceof", "interface", "let", "new", "null",
        "return", "switch", "this", "throw", "true", "try", "type", "typeof", "undefined", "var",
        "void", "while", "yield",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\'', '`'],
    multiline_quotes: &['`'],
};

static C_LIKE: Language = Language {
    name: "c",
    keywords: &[
        "auto", "bool", "break", "case", "char", "class", "const", "continue", "default", "do",
        "double", "else", "enum", "extern", "false", "final", "float", "for", "func", "go", "if",
        "import", "int", "interface", "long", "namespace", "new", "nullptr", "package", "private",
        "protected", "public", "return", "short", "signed", "sizeof", "static", "struct",
        "switch", "template", "this", "true", "typedef", "union", "unsigned", "var", "void",
        "volatile", "while",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    multiline_quotes: &[],
};

static SHELL: Language = Language {
    name: "shell",
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "exit", "export", "fi", "for", "function",
        "if", "in", "local", "readonly", "return", "select", "then", "until", "while",
    ],
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    multiline_quotes: &[],
};

static JSON: Language = Language {
    name: "json",
    keywords: &["true", "false", "null"],
    line_comment: None,
    block_comment: None,
    quotes: &['"'],
    multiline_quotes: &[],
};

static TOML: Language = Language {
    name: "toml",
    keywords: &["true", "false"],
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    multiline_quotes: &[],
};

/// Looks up a language by fence tag, case-insensitively.
pub fn lookup(tag: &str) -> Option<&'static Language> {
    let lang = match tag.to_ascii_lowercase().as_str() {
        "rust" | "rs" => &RUST,
        "python" | "py" => &PYTHON,
        "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => &JAVASCRIPT,
        "c" | "h" | "cpp" | "c++" | "cc" | "java" | "go" | "cs" | "csharp" | "kotlin" | "swift" => {
            &C_LIKE
        }
        "shell" | "sh" | "bash" | "zsh" | "console" => &SHELL,
        "json" => &JSON,
        "toml" => &TOML,
        _ => return None,
    };
    Some(lang)
}
