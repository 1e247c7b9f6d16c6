use serde::Serialize;

/// A rough complexity label for an editor hint. Pattern based and frequently
/// wrong; nothing may depend on it.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityHint {
    pub time: &'static str,
    pub space: &'static str,
    pub score: u8,
}

impl ComplexityHint {
    const fn new(time: &'static str, space: &'static str, score: u8) -> Self {
        Self { time, space, score }
    }
}

pub fn estimate(code: &str) -> ComplexityHint {
    let src = code.to_lowercase();

    let for_loops = count_calls(&src, "for");
    let while_loops = count_calls(&src, "while");
    let nested_loops = for_loops >= 2 || while_loops >= 2 || (for_loops >= 1 && while_loops >= 1);
    let has_hash_map = ["map", "set", "{}", "object"].iter().any(|p| src.contains(p));
    let has_recursion = recursive_function(&src) || (src.contains("return ") && src.contains("(n - 1)"));
    let has_sorting = src.contains(".sort");
    let has_binary_search = src.contains("mid") && (src.contains("left") || src.contains("low"));

    if nested_loops && !has_hash_map {
        ComplexityHint::new("O(n²)", "O(1)", 30)
    } else if has_sorting {
        ComplexityHint::new("O(n log n)", "O(n)", 60)
    } else if has_binary_search {
        ComplexityHint::new("O(log n)", "O(1)", 95)
    } else if has_hash_map || has_recursion {
        ComplexityHint::new("O(n)", "O(n)", 85)
    } else if src.contains("for") || src.contains("while") {
        ComplexityHint::new("O(n)", "O(1)", 90)
    } else {
        ComplexityHint::new("O(1)", "O(1)", 100)
    }
}

/// Occurrences of `keyword` followed by optional whitespace and `(`.
fn count_calls(src: &str, keyword: &str) -> usize {
    src.match_indices(keyword)
        .filter(|(i, _)| src[i + keyword.len()..].trim_start().starts_with('('))
        .count()
}

/// A `function name` whose name is called again later on the same line.
fn recursive_function(src: &str) -> bool {
    src.match_indices("function").any(|(i, kw)| {
        let rest = &src[i + kw.len()..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            return false;
        }
        let name: String = trimmed
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if name.is_empty() {
            return false;
        }
        let line = trimmed[name.len()..].split('\n').next().unwrap_or_default();
        line.match_indices(name.as_str()).any(|(j, _)| {
            line[j + name.len()..]
                .trim_start_matches(char::is_whitespace)
                .starts_with('(')
        })
    })
}
