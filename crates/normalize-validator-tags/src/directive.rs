//! Tag directives and their textual form.

use std::fmt;

/// One entry of a validation tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Required,
    OmitEmpty,
    Gt(f64),
    Gte(f64),
    Lt(f64),
    Lte(f64),
    /// Named format validator, emitted bare (e.g. `email`, `uuid`).
    Format(String),
    OneOf(Vec<String>),
    Unique,
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Required => f.write_str("required"),
            Directive::OmitEmpty => f.write_str("omitempty"),
            Directive::Gt(v) => write!(f, "gt={}", format_general(*v)),
            Directive::Gte(v) => write!(f, "gte={}", format_general(*v)),
            Directive::Lt(v) => write!(f, "lt={}", format_general(*v)),
            Directive::Lte(v) => write!(f, "lte={}", format_general(*v)),
            Directive::Format(name) => f.write_str(name),
            Directive::OneOf(values) => {
                f.write_str("oneof=")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    if value.contains(' ') {
                        write!(f, "'{}'", value)?;
                    } else {
                        f.write_str(value)?;
                    }
                }
                Ok(())
            }
            Directive::Unique => f.write_str("unique"),
        }
    }
}

/// Ordered directive accumulator shared by the translation stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives(Vec<Directive>);

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, directive: Directive) {
        self.0.push(directive);
    }

    /// A lone `omitempty` carries no validation; drop it.
    pub fn collapse_lone_omitempty(&mut self) {
        if self.0 == [Directive::OmitEmpty] {
            self.0.clear();
        }
    }

    pub fn into_vec(self) -> Vec<Directive> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", directive)?;
        }
        Ok(())
    }
}

/// Shortest round-trip "general" notation.
///
/// Decimal for exponents in `[-4, 6)`, scientific otherwise with a signed
/// exponent of at least two digits (`1e+06`, `2.5e-07`).
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7".
    let sci = format!("{:e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.abs());
    }

    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let point = exp + 1;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        let point = point as usize;
        if point >= digits.len() {
            out.push_str(&digits);
            out.extend(std::iter::repeat_n('0', point - digits.len()));
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}
