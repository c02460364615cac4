//! Positional placeholder substitution
//!
//! printf-style conversions for formatted translations:
//! `%[argnum$][flags][width][.precision]conversion` with flags `-`, `+`,
//! space, `0` and `'c` (custom padding character), and conversions
//! `s d u f F e E x X o b c`. `%%` is a literal percent sign.

use thiserror::Error;

/// Why a template could not be formatted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Missing argument {0}")]
    MissingArgument(usize),

    #[error("Argument {index} is not numeric: {value:?}")]
    NotNumeric { index: usize, value: String },

    #[error("Unknown conversion '%{0}'")]
    UnknownConversion(char),

    #[error("Incomplete placeholder at end of template")]
    Incomplete,
}

#[derive(Debug, Default)]
struct Placeholder {
    left: bool,
    plus: bool,
    space: bool,
    pad: Option<char>,
    width: usize,
    precision: Option<usize>,
}

/// Substitute `args` into `template`.
pub fn format_positional<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, FormatError> {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        i += 1;
        if chars.get(i) == Some(&'%') {
            out.push('%');
            i += 1;
            continue;
        }

        // argnum$
        let mut index = None;
        let digits_end = scan_digits(&chars, i);
        if digits_end > i && chars.get(digits_end) == Some(&'$') {
            let n: usize = collect(&chars[i..digits_end]).parse().unwrap_or(0);
            if n == 0 {
                return Err(FormatError::MissingArgument(0));
            }
            index = Some(n - 1);
            i = digits_end + 1;
        }

        let mut placeholder = Placeholder::default();
        loop {
            match chars.get(i) {
                Some('-') => placeholder.left = true,
                Some('+') => placeholder.plus = true,
                Some(' ') => placeholder.space = true,
                Some('0') => placeholder.pad = Some('0'),
                Some('\'') => {
                    i += 1;
                    placeholder.pad = Some(*chars.get(i).ok_or(FormatError::Incomplete)?);
                }
                _ => break,
            }
            i += 1;
        }

        let width_end = scan_digits(&chars, i);
        placeholder.width = collect(&chars[i..width_end]).parse().unwrap_or(0);
        i = width_end;

        if chars.get(i) == Some(&'.') {
            let precision_end = scan_digits(&chars, i + 1);
            placeholder.precision = Some(collect(&chars[i + 1..precision_end]).parse().unwrap_or(0));
            i = precision_end;
        }

        let conversion = *chars.get(i).ok_or(FormatError::Incomplete)?;
        i += 1;

        let index = index.unwrap_or_else(|| {
            next_arg += 1;
            next_arg - 1
        });
        let arg = args
            .get(index)
            .map(AsRef::as_ref)
            .ok_or(FormatError::MissingArgument(index + 1))?;

        let converted = convert(conversion, arg, index, &placeholder)?;
        out.push_str(&pad(converted, &placeholder, conversion));
    }

    Ok(out)
}

fn scan_digits(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn convert(conversion: char, arg: &str, index: usize, placeholder: &Placeholder) -> Result<String, FormatError> {
    let not_numeric = || FormatError::NotNumeric { index: index + 1, value: arg.to_string() };

    let text = match conversion {
        's' => match placeholder.precision {
            Some(precision) => arg.chars().take(precision).collect(),
            None => arg.to_string(),
        },
        'd' => signed(integer(arg).ok_or_else(not_numeric)?.to_string(), placeholder),
        'u' => (integer(arg).ok_or_else(not_numeric)? as u64).to_string(),
        'f' | 'F' => {
            let value = float(arg).ok_or_else(not_numeric)?;
            signed(format!("{:.*}", placeholder.precision.unwrap_or(6), value), placeholder)
        }
        'e' | 'E' => {
            let value = float(arg).ok_or_else(not_numeric)?;
            let formatted = format!("{:.*e}", placeholder.precision.unwrap_or(6), value);
            let formatted = match formatted.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    format!("{}e+{}", mantissa, exponent)
                }
                _ => formatted,
            };
            let formatted = if conversion == 'E' { formatted.to_uppercase() } else { formatted };
            signed(formatted, placeholder)
        }
        'x' => format!("{:x}", integer(arg).ok_or_else(not_numeric)? as u64),
        'X' => format!("{:X}", integer(arg).ok_or_else(not_numeric)? as u64),
        'o' => format!("{:o}", integer(arg).ok_or_else(not_numeric)? as u64),
        'b' => format!("{:b}", integer(arg).ok_or_else(not_numeric)? as u64),
        'c' => {
            let code = integer(arg).ok_or_else(not_numeric)?;
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(not_numeric)?
                .to_string()
        }
        other => return Err(FormatError::UnknownConversion(other)),
    };
    Ok(text)
}

fn integer(arg: &str) -> Option<i64> {
    let arg = arg.trim();
    arg.parse::<i64>()
        .ok()
        .or_else(|| arg.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
}

fn float(arg: &str) -> Option<f64> {
    arg.trim().parse::<f64>().ok()
}

fn signed(number: String, placeholder: &Placeholder) -> String {
    if number.starts_with('-') {
        number
    } else if placeholder.plus {
        format!("+{}", number)
    } else if placeholder.space {
        format!(" {}", number)
    } else {
        number
    }
}

fn pad(text: String, placeholder: &Placeholder, conversion: char) -> String {
    let len = text.chars().count();
    if len >= placeholder.width || conversion == 'c' {
        return text;
    }
    let fill_char = placeholder.pad.unwrap_or(' ');
    let fill: String = std::iter::repeat(fill_char).take(placeholder.width - len).collect();

    if placeholder.left {
        return format!("{}{}", text, fill);
    }
    let numeric = !matches!(conversion, 's');
    if fill_char == '0' && numeric && (text.starts_with('-') || text.starts_with('+')) {
        let (sign, digits) = text.split_at(1);
        return format!("{}{}{}", sign, fill, digits);
    }
    format!("{}{}", fill, text)
}
