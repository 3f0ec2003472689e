/// Indents all lines of a string with `n` spaces.
pub fn indent<T: Into<String>>(s: T, n: usize) -> String {
    let s: String = s.into();
    let indent = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", indent, l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercases `s` one char at a time, the way the resolver reads source text.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Whether `x` is a finite whole number.
pub fn is_integral(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.
}
