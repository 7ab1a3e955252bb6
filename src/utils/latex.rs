//! LaTeX 转纯文本
//!
//! 只覆盖数学解答里常见的写法：分数、根号、文本包装、间距和常用符号。
//! 无法识别的宏直接丢弃。

use std::sync::LazyLock;

use regex::{Captures, Regex};

static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$|\\\(|\\\)|\\\[|\\\]").expect("valid regex"));
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\\\").expect("valid regex"));
static WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:text|mathrm|textbf|textit|mathbf|mathit|emph|operatorname)\s*\{([^{}]*)\}")
        .expect("valid regex")
});
static SQRT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\sqrt\s*\{([^{}]*)\}").expect("valid regex"));
static FRAC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\[dt]?frac\s*\{([^{}]*)\}\s*\{([^{}]*)\}").expect("valid regex")
});
static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([_^])\{([^{}]*)\}").expect("valid regex"));
static SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:qquad|quad)\b|\\[,;: ]").expect("valid regex"));
static MACRO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\([A-Za-z]+|!)").expect("valid regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// 常用符号宏
fn symbol(name: &str) -> &'static str {
    match name {
        "times" => "×",
        "cdot" => "·",
        "div" => "÷",
        "pm" => "±",
        "mp" => "∓",
        "le" | "leq" => "≤",
        "ge" | "geq" => "≥",
        "ne" | "neq" => "≠",
        "approx" => "≈",
        "infty" => "∞",
        "pi" => "π",
        "theta" => "θ",
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "Delta" => "Δ",
        "lambda" => "λ",
        "mu" => "μ",
        "sigma" => "σ",
        "sum" => "∑",
        "int" => "∫",
        "to" | "rightarrow" => "→",
        "Rightarrow" | "implies" => "⇒",
        "ldots" | "dots" => "…",
        "cdots" => "⋯",
        "circ" => "∘",
        "degree" => "°",
        _ => "",
    }
}

/// 把 LaTeX 片段转换为可直接阅读的纯文本
///
/// ```
/// use question_reader::utils::latex::latex_to_text;
///
/// let text = latex_to_text(r"\frac{3}{2} \quad \text{or} \quad x = 1");
/// assert_eq!(text, "3/2 or x = 1");
/// ```
pub fn latex_to_text(latex: &str) -> String {
    let mut text = DELIMITERS.replace_all(latex, "").into_owned();
    text = LINE_BREAK.replace_all(&text, "\n").into_owned();

    // 由内向外展开嵌套结构，直到不再变化
    loop {
        let next = WRAPPER.replace_all(&text, "$1").into_owned();
        let next = SQRT.replace_all(&next, "√($1)").into_owned();
        let next = SCRIPT.replace_all(&next, "$1$2").into_owned();
        let next = FRAC.replace_all(&next, "$1/$2").into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    text = SPACING.replace_all(&text, " ").into_owned();
    text = MACRO
        .replace_all(&text, |caps: &Captures| symbol(&caps[1]).to_string())
        .into_owned();
    text = text.replace(['{', '}'], "");

    text.lines()
        .map(|line| SPACES.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_and_text() {
        assert_eq!(
            latex_to_text(r"\frac{3}{2} \quad \text{or} \quad x = 1"),
            "3/2 or x = 1"
        );
    }

    #[test]
    fn test_nested_structures() {
        assert_eq!(latex_to_text(r"\frac{\sqrt{2}}{2}"), "√(2)/2");
        assert_eq!(latex_to_text(r"\dfrac{\text{area}}{\pi r^{2}}"), "area/π r^2");
    }

    #[test]
    fn test_symbols_and_delimiters() {
        assert_eq!(latex_to_text(r"$x \neq 0$"), "x ≠ 0");
        assert_eq!(latex_to_text(r"\(a \times b \leq c\)"), "a × b ≤ c");
        assert_eq!(latex_to_text(r"x = \pm\sqrt{4}"), "x = ±√(4)");
    }

    #[test]
    fn test_unknown_macros_are_dropped() {
        assert_eq!(latex_to_text(r"\left( x \right)"), "( x )");
        assert_eq!(latex_to_text(r"\boxed{x = 1}"), "x = 1");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(latex_to_text(r"x = 1 \\ y = 2"), "x = 1\ny = 2");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(latex_to_text("2x + 3 = 5"), "2x + 3 = 5");
    }
}
