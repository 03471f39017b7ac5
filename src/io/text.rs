//! Two-column text format.
//!
//! One point per line, `x` and `y` separated by whitespace. Blank lines and
//! lines starting with `#` are skipped on read.

use std::io::{BufRead, Write};

use crate::{
    core::Point,
    errors::{FuncError, FuncResult},
    function::{ArbitrarilyDiscretizedFunc, DiscretizedFunc, FuncMetadata},
};

/// Reads every point in file order.
///
/// # Errors
/// [`FuncError::Parse`] with a 1-based line number for a line that is not
/// exactly two numbers, or [`FuncError::Io`] if reading fails.
pub fn read_xy<R: BufRead>(reader: R) -> FuncResult<Vec<Point>> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        points.push(parse_line(trimmed, index + 1)?);
    }
    Ok(points)
}

fn parse_line(line: &str, number: usize) -> FuncResult<Point> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[x, y] = fields.as_slice() else {
        return Err(FuncError::Parse {
            line: number,
            message: format!("expected 2 columns, found {}", fields.len()),
        });
    };
    let parse = |field: &str| {
        field.parse::<f64>().map_err(|err| FuncError::Parse {
            line: number,
            message: format!("invalid number '{}': {}", field, err),
        })
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

/// Reads points into an arbitrarily spaced function with the given tolerance.
pub fn read_xy_func<R: BufRead>(
    reader: R,
    tolerance: f64,
) -> FuncResult<ArbitrarilyDiscretizedFunc> {
    ArbitrarilyDiscretizedFunc::from_points(FuncMetadata::default(), tolerance, read_xy(reader)?)
}

/// Writes one `x y` line per point at full precision.
pub fn write_xy<W, F>(mut writer: W, func: &F) -> FuncResult<()>
where
    W: Write,
    F: DiscretizedFunc + ?Sized,
{
    for i in 0..func.size() {
        writeln!(writer, "{} {}", func.x(i), func.y(i))?;
    }
    writer.flush()?;
    Ok(())
}
