//! Markup Builder: low-level LaTeX command formatting.

/// Environment names. When one of these is an argument, the command is a
/// begin/end pair and its options go after the argument group.
pub const ENVIRONMENTS: &[&str] = &[
    "document", "table", "tabular", "tabularx", "itemize", "center", "rSection",
];

/// Formats `\name[options]{arg1}{arg2}…`.
///
/// `None` and empty arguments are dropped. With no surviving arguments and no
/// options the bare `\name` token is returned.
pub fn format_command<'a, I, A>(name: &str, args: I, options: Option<&str>) -> String
where
    I: IntoIterator<Item = A>,
    A: Into<Option<&'a str>>,
{
    let args: Vec<&'a str> = args
        .into_iter()
        .filter_map(|a| -> Option<&'a str> { a.into() })
        .filter(|a| !a.is_empty())
        .collect();

    let opt = options
        .filter(|o| !o.is_empty())
        .map(|o| format!("[{o}]"))
        .unwrap_or_default();

    let arg_str = if args.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", args.join("}{"))
    };

    if args.iter().any(|a| ENVIRONMENTS.iter().any(|env| env == a)) {
        format!("\\{name}{arg_str}{opt}")
    } else {
        format!("\\{name}{opt}{arg_str}")
    }
}

/// Formats a command that takes no arguments.
pub fn bare(name: &str) -> String {
    format_command(name, None::<&str>, None)
}

/// Formats a `\newcommand` macro definition.
/// A `default_value` takes the bracket slot over `num_args`.
pub fn format_new_command(
    name: &str,
    num_args: usize,
    body: &str,
    default_value: Option<&str>,
) -> String {
    let slot = match (default_value, num_args) {
        (Some(default), _) => format!("[{default}]"),
        (None, n) if n > 0 => format!("[{n}]"),
        (None, _) => String::new(),
    };
    format!("\\newcommand{{\\{name}}}{slot}{{{body}}}")
}
