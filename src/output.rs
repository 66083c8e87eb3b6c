// Rendering simulated paths to a writer (stdout in the binary)

use serde::Serialize;
use std::io::{self, Write};

use crate::config::OutputFormat;
use crate::error::SimulationResult;
use crate::simulation::PricePath;

/// Significant digits in text output, the iostream default
const SIGNIFICANT_DIGITS: usize = 6;

#[derive(Serialize)]
struct JsonPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<usize>,
    time: f64,
    price: f64,
}

/// Write one path, one line per point
pub fn write_path<W: Write>(writer: &mut W, path: &PricePath, format: OutputFormat) -> SimulationResult<()> {
    write_path_lines(writer, path, format, None)?;
    Ok(())
}

/// Write several paths; with more than one, each is labelled with its 1-based index
pub fn write_paths<W: Write>(writer: &mut W, paths: &[PricePath], format: OutputFormat) -> SimulationResult<()> {
    if let [path] = paths {
        return write_path(writer, path, format);
    }

    for (i, path) in paths.iter().enumerate() {
        let label = i + 1;
        if format == OutputFormat::Text {
            writeln!(writer, "Path {}", label)?;
        }
        write_path_lines(writer, path, format, Some(label))?;
    }
    Ok(())
}

/// Format like printf's `%g` with 6 significant digits: fixed notation for
/// decimal exponents in `-4..6`, scientific otherwise, trailing zeros dropped.
///
/// Keeps grid times such as `35 * 0.01` printing as `0.35`.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Exponent after rounding to the requested digits
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

fn write_path_lines<W: Write>(
    writer: &mut W,
    path: &PricePath,
    format: OutputFormat,
    label: Option<usize>,
) -> io::Result<()> {
    for point in path.points() {
        match format {
            OutputFormat::Text => writeln!(
                writer,
                "Time {} : {}",
                format_general(point.time),
                format_general(point.price)
            )?,
            OutputFormat::Json => {
                let line = JsonPoint {
                    path: label,
                    time: point.time,
                    price: point.price,
                };
                serde_json::to_writer(&mut *writer, &line)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationParameters;
    use crate::noise::FixedNoise;
    use crate::simulation::simulate_path;

    fn flat_path() -> PricePath {
        let params = SimulationParameters::new(100.0, 0.0, 0.0, 0.02, 0.01);
        simulate_path(&params, &mut FixedNoise::default()).unwrap()
    }

    #[test]
    fn test_text_lines() {
        let mut out = Vec::new();
        write_path(&mut out, &flat_path(), OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Time 0 : 100\nTime 0.01 : 100\n");
    }

    #[test]
    fn test_grid_times_print_without_rounding_noise() {
        let params = SimulationParameters::new(100.0, 0.0, 0.0, 1.0, 0.01);
        let path = simulate_path(&params, &mut FixedNoise::default()).unwrap();
        assert_eq!(path.time_at(35), 0.35000000000000003);

        let mut out = Vec::new();
        write_path(&mut out, &path, OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[35], "Time 0.35 : 100");
        assert_eq!(lines[99], "Time 0.99 : 100");
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(100.0), "100");
        assert_eq!(format_general(0.35000000000000003), "0.35");
        assert_eq!(format_general(105.12345678), "105.123");
        assert_eq!(format_general(-2.5), "-2.5");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(f64::INFINITY), "inf");
        assert_eq!(format_general(f64::NAN), "nan");
    }

    #[test]
    fn test_json_lines() {
        let mut out = Vec::new();
        write_path(&mut out, &flat_path(), OutputFormat::Json).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["time"], 0.0);
        assert_eq!(first["price"], 100.0);
        assert!(first.get("path").is_none());
    }

    #[test]
    fn test_multiple_paths_are_labelled() {
        let paths = vec![flat_path(), flat_path()];
        let mut out = Vec::new();
        write_paths(&mut out, &paths, OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Path 1\nTime 0 : 100\n"));
        assert!(text.contains("Path 2\n"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_empty_path_writes_nothing() {
        let params = SimulationParameters::new(100.0, 0.05, 0.2, 1.0, 2.0);
        let path = simulate_path(&params, &mut FixedNoise::default()).unwrap();
        let mut out = Vec::new();
        write_path(&mut out, &path, OutputFormat::Text).unwrap();
        assert!(out.is_empty());
    }
}
