//! Text export of schemas.
//!
//! ```text
//! {
//! 	name	:	'disc',
//! 	fill	:	{
//! 		mode	:	'rgb',
//! 		r	:	255,
//! 		...
//! 	},
//! }
//! ```
//!
//! Keys are bare, values follow `\t:\t`, every entry ends with a comma and
//! nested blocks indent one tab deeper. Colors are marked by their `mode`
//! entry and vectors by `type : 'vector'` around a `data` block, so neither
//! can be mistaken for a nested schema on import.

use vivaz_api_core::Value;

/// Render `entries` as a block at `indent`. `None` when there are no entries.
pub(crate) fn render_block<I>(entries: I, indent: &str) -> Option<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let inner = format!("{indent}\t");
    let mut out = String::from("{\n");
    let mut any = false;
    for (name, rendered) in entries {
        out.push_str(&inner);
        out.push_str(&name);
        out.push_str("\t:\t");
        out.push_str(&rendered);
        out.push_str(",\n");
        any = true;
    }
    out.push_str(indent);
    out.push('}');
    any.then_some(out)
}

/// Render one value. Compound values become blocks nested at `indent`.
pub(crate) fn render_value(value: &Value, indent: &str) -> Option<String> {
    match value {
        Value::Number(n) => Some(render_number(*n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Text(s) => Some(quote(s)),
        Value::Color(c) => render_block(
            [
                ("mode".to_string(), quote(c.mode.as_str())),
                ("r".to_string(), render_number(c.r)),
                ("g".to_string(), render_number(c.g)),
                ("b".to_string(), render_number(c.b)),
                ("a".to_string(), render_number(c.a)),
            ],
            indent,
        ),
        Value::Vector(v) => {
            let data = render_block(
                v.axes().map(|(axis, n)| (axis.to_string(), render_number(n))),
                &format!("{indent}\t"),
            )?;
            render_block(
                [
                    ("type".to_string(), quote("vector")),
                    ("data".to_string(), data),
                ],
                indent,
            )
        }
    }
}

pub(crate) fn render_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vivaz_api_core::{Color, Vector};

    #[test]
    fn scalars() {
        assert_eq!(render_value(&Value::Number(1.0), ""), Some("1".into()));
        assert_eq!(render_value(&Value::Number(0.25), ""), Some("0.25".into()));
        assert_eq!(render_value(&Value::Bool(false), ""), Some("false".into()));
        assert_eq!(render_value(&Value::Text("it's".into()), ""), Some("'it\\'s'".into()));
        assert_eq!(render_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn color_block() {
        let got = render_value(&Value::Color(Color::rgba(1.0, 2.0, 3.0, 4.0)), "\t").unwrap();
        assert_eq!(
            got,
            "{\n\t\tmode\t:\t'rgb',\n\t\tr\t:\t1,\n\t\tg\t:\t2,\n\t\tb\t:\t3,\n\t\ta\t:\t4,\n\t}"
        );
    }

    #[test]
    fn vector_block_skips_absent_axes() {
        let got = render_value(&Value::Vector(Vector::new(Some(1.5), None, Some(3.0))), "").unwrap();
        assert_eq!(
            got,
            "{\n\ttype\t:\t'vector',\n\tdata\t:\t{\n\t\tx\t:\t1.5,\n\t\tz\t:\t3,\n\t},\n}"
        );
        assert_eq!(render_value(&Value::Vector(Vector::default()), ""), None);
    }

    #[test]
    fn empty_block_is_none() {
        assert_eq!(render_block(Vec::new(), ""), None);
    }
}
