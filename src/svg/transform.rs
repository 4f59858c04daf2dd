//! Parsing of SVG `transform` attribute values

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::matrix::Matrix;

/// Error type for transform parsing
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// An argument is not a number
    #[error("{function}(): invalid number '{value}'")]
    InvalidNumber { function: String, value: String },
    /// Unsupported number of arguments
    #[error("{function}(): unexpected argument count {count}")]
    ArgumentCount { function: String, count: usize },
}

fn function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(translate|scale|rotate|matrix|skewX|skewY)\s*\(([^)]*)\)")
            .expect("valid transform regex literal")
    })
}

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s,]+").expect("valid separator regex literal"))
}

fn parse_args(function: &str, raw: &str) -> Result<Vec<f64>, TransformError> {
    separator_regex()
        .split(raw.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| TransformError::InvalidNumber {
                function: function.to_string(),
                value: s.to_string(),
            })
        })
        .collect()
}

/// Matrix for a single transform function, or `None` when it is ignored.
fn function_matrix(function: &str, args: &[f64]) -> Result<Option<Matrix>, TransformError> {
    let count_error = || TransformError::ArgumentCount {
        function: function.to_string(),
        count: args.len(),
    };

    let matrix = match (function, args) {
        ("translate", [tx]) => Matrix::translate(*tx, 0.0),
        ("translate", [tx, ty]) => Matrix::translate(*tx, *ty),
        ("scale", [s]) => Matrix::scale(*s, *s),
        ("scale", [sx, sy]) => Matrix::scale(*sx, *sy),
        ("rotate", [deg]) => Matrix::rotate(*deg),
        ("rotate", [deg, cx, cy]) => Matrix::rotate_about(*deg, *cx, *cy),
        ("skewX", [deg]) => Matrix::skew_x(*deg),
        ("skewY", [deg]) => Matrix::skew_y(*deg),
        ("matrix", [a, b, c, d, e, f]) => Matrix::new(*a, *b, *c, *d, *e, *f),
        ("matrix", _) => {
            log::warn!("ignoring matrix() with {} arguments", args.len());
            return Ok(None);
        }
        _ => return Err(count_error()),
    };
    Ok(Some(matrix))
}

/// Compose every transform function in `value` from left to right.
///
/// Text outside recognised functions is skipped; an empty value is the
/// identity.
///
/// # Examples
///
/// ```
/// use sprep::svg::{parse_transform, Matrix};
///
/// let m = parse_transform("translate(10, 20) scale(2)").unwrap();
/// assert_eq!(m, Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 20.0));
/// assert_eq!(parse_transform("").unwrap(), Matrix::IDENTITY);
/// ```
pub fn parse_transform(value: &str) -> Result<Matrix, TransformError> {
    let mut current = Matrix::IDENTITY;

    for caps in function_regex().captures_iter(value) {
        let function = &caps[1];
        let args = parse_args(function, &caps[2])?;
        if let Some(m) = function_matrix(function, &args)? {
            current = current * m;
        }
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_defaults_ty() {
        assert_eq!(parse_transform("translate(5)").unwrap(), Matrix::translate(5.0, 0.0));
    }

    #[test]
    fn test_whitespace_separated_args() {
        assert_eq!(
            parse_transform("translate( 3  4 )").unwrap(),
            Matrix::translate(3.0, 4.0)
        );
    }

    #[test]
    fn test_compose_left_to_right() {
        let m = parse_transform("scale(2) translate(1,1)").unwrap();
        assert_eq!(m.apply(0.0, 0.0), (2.0, 2.0));
    }

    #[test]
    fn test_rotate_with_center() {
        let m = parse_transform("rotate(90 10 0)").unwrap();
        let (x, y) = m.apply(10.0, 0.0);
        assert!((x - 10.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_matrix_wrong_arity_ignored() {
        let m = parse_transform("matrix(1 0 0 1) translate(2 3)").unwrap();
        assert_eq!(m, Matrix::translate(2.0, 3.0));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_transform("scale(big)").unwrap_err();
        assert!(matches!(err, TransformError::InvalidNumber { .. }));
        assert!(err.to_string().contains("big"));
    }

    #[test]
    fn test_rotate_two_args_rejected() {
        assert!(matches!(
            parse_transform("rotate(45, 3)"),
            Err(TransformError::ArgumentCount { count: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_text_skipped() {
        assert_eq!(parse_transform("perspective(3)").unwrap(), Matrix::IDENTITY);
        assert_eq!(parse_transform("   ").unwrap(), Matrix::IDENTITY);
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_transform("scale(1e1)").unwrap(), Matrix::scale(10.0, 10.0));
    }
}
