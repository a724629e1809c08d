//! Dot-style field references
//!
//! Templates may refer to the current value with a leading dot, as in
//! `{{ .user }}` or `{{#each .hosts}}{{ . }}{{/each}}`. Before compiling, every
//! such reference inside a `{{ }}` expression is rewritten to the equivalent
//! Handlebars path:
//!
//! - `.user` becomes `this.user`
//! - a bare `.` becomes `this`
//! - `$` and `$.user` become `@root` and `@root.user`
//!
//! String literals, numbers, comments, escaped `\{{` and `../` parent paths
//! are left alone.

use std::borrow::Cow;

/// Rewrite dot-style references in `template` into Handlebars paths
pub fn rewrite_dot_paths(template: &str) -> Cow<'_, str> {
    if !template.contains("{{") {
        return Cow::Borrowed(template);
    }
    let mut out = String::with_capacity(template.len() + 16);
    let mut changed = false;
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let (text, after) = rest.split_at(open);
        out.push_str(text);
        let body = &after[2..];
        out.push_str("{{");
        if text.ends_with('\\') {
            rest = body;
            continue;
        }
        let terminator = if body.starts_with("!--") { "--}}" } else { "}}" };
        let close = match body.find(terminator) {
            Some(i) => i + terminator.len() - 2,
            None => {
                // unclosed, left for the parser to report
                out.push_str(body);
                rest = "";
                break;
            }
        };
        let expression = &body[..close];
        if expression.starts_with('!') {
            out.push_str(expression);
        } else {
            changed |= rewrite_expression(expression, &mut out);
        }
        out.push_str("}}");
        rest = &body[close + 2..];
    }
    out.push_str(rest);
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(template)
    }
}

fn rewrite_expression(expression: &str, out: &mut String) -> bool {
    let mut changed = false;
    let mut quote = None;
    let mut prev = None;
    let mut chars = expression.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            out.push(c);
            prev = Some(c);
            continue;
        }
        let at_boundary = prev.map_or(true, is_boundary);
        let next = chars.peek().copied();
        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '.' if at_boundary => match next {
                Some(n) if is_ident(n) => {
                    out.push_str("this.");
                    changed = true;
                }
                Some('.') | Some('/') => out.push(c),
                _ => {
                    out.push_str("this");
                    changed = true;
                }
            },
            '$' if at_boundary && !next.map_or(false, is_ident) => {
                out.push_str("@root");
                changed = true;
            }
            _ => out.push(c),
        }
        prev = Some(c);
    }
    changed
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '(' | '=' | '~' | '#' | '^' | '>' | '&')
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod ut {
    use super::*;

    #[test]
    fn test_field() {
        assert_eq!("Hi {{ this.user }}!", rewrite_dot_paths("Hi {{ .user }}!"));
        assert_eq!("{{this.a.b}}", rewrite_dot_paths("{{.a.b}}"));
        assert_eq!("{{~ this.a ~}}", rewrite_dot_paths("{{~ .a ~}}"));
    }

    #[test]
    fn test_bare_dot_and_root() {
        assert_eq!(
            "{{#each this.hosts}}{{ this }}{{ @root.user }}{{/each}}",
            rewrite_dot_paths("{{#each .hosts}}{{ . }}{{ $.user }}{{/each}}")
        );
        assert_eq!("{{ @root }}", rewrite_dot_paths("{{ $ }}"));
    }

    #[test]
    fn test_helper_arguments() {
        assert_eq!(
            "{{#each (counter this.n)}}{{this}}{{/each}}",
            rewrite_dot_paths("{{#each (counter .n)}}{{this}}{{/each}}")
        );
        assert_eq!("{{ x k=this.v }}", rewrite_dot_paths("{{ x k=.v }}"));
    }

    #[test]
    fn test_untouched() {
        for template in [
            "no mustache . here",
            "{{ user }}",
            "{{ substitute \".user\" }}",
            "{{ substitute '.user' }}",
            "{{ f 1.5 }}",
            "{{#each items}}{{ ../title }}{{/each}}",
            "{{ ./user }}",
            "{{! .comment }}",
            "{{!-- {{ .user }} --}}",
            "\\{{ .user }}",
            "{{ .user",
        ] {
            let rewritten = rewrite_dot_paths(template);
            assert!(matches!(rewritten, Cow::Borrowed(_)), "{template}");
            assert_eq!(template, rewritten);
        }
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            "{{ this.a }} and {{ b }} and {{!-- .c --}} {{ this.d }}",
            rewrite_dot_paths("{{ .a }} and {{ b }} and {{!-- .c --}} {{ .d }}")
        );
    }
}
