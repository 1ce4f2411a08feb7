//! Source fixtures

/// Python module with classes, methods, nesting and existing docstrings
///
/// Declarations (name, start, end): Store 4-19, __init__ 10-11, get 13-15,
/// version 18-19, fetch 22-26, parse 24-25, main 29-31.
pub const PY_MODULE: &str = r#"import os


class Store:
    """Key-value store.

    Backed by a dict.
    """

    def __init__(self):
        self.data = {}

    def get(self, key):
        """Return the value for key."""
        return self.data.get(key)

    @staticmethod
    def version():
        return 1


async def fetch(url):
    '''Fetch a url.'''
    def parse(body):
        return body.strip()
    return parse(url)


def main():
    store = Store()
    print(store.get("a"))
"#;

pub const JS_MODULE: &str = "function add(a, b) {\n  return a + b;\n}\n\nconst mul = (a, b) => {\n  return a * b;\n};\n";

pub const JAVA_CLASS: &str =
    "public class Greeter {\n    public String greet(String name) {\n        return name;\n    }\n}\n";

/// Generate a Python file with N functions, each with `body_lines` statements
pub fn fixture_n_functions(n: usize, body_lines: usize) -> String {
    (0..n)
        .map(|i| {
            let body: String = (0..body_lines.max(1))
                .map(|j| format!("    y{j} = {i} + {j}\n"))
                .collect();
            format!("def func_{i}(x):\n{body}")
        })
        .collect()
}

/// Wrap Python source in a class body
pub fn fixture_in_class(class_name: &str, body: &str) -> String {
    let indented: String = body
        .lines()
        .map(|l| if l.is_empty() { "\n".to_string() } else { format!("    {l}\n") })
        .collect();
    format!("class {class_name}:\n{indented}")
}
