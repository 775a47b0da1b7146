//! Value parsers for geometry arguments.

use crate::geometry::{Point, Rect, Size};

fn parse_numbers(s: &str, expected: usize, what: &str) -> Result<Vec<f64>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(format!(
            "Invalid {} '{}'. Expected {} comma-separated numbers",
            what, s, expected
        ));
    }
    parts
        .iter()
        .map(|p| {
            p.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("'{}' is not a valid number in {}", p, what))
        })
        .collect()
}

/// Parse `x,y`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let v = parse_numbers(s, 2, "point")?;
    Ok(Point::new(v[0], v[1]))
}

/// Parse `x,y,width,height`; width and height must not be negative.
pub fn parse_rect(s: &str) -> Result<Rect, String> {
    let v = parse_numbers(s, 4, "box")?;
    if v[2] < 0.0 || v[3] < 0.0 {
        return Err("Box width and height must not be negative".to_string());
    }
    Ok(Rect::new(v[0], v[1], v[2], v[3]))
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_viewport(s: &str) -> Result<Size, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid viewport format '{}'. Use WIDTHxHEIGHT (e.g., 480x640)",
            s
        ));
    }
    let width: f64 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid width '{}' in viewport", parts[0]))?;
    let height: f64 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid height '{}' in viewport", parts[1]))?;
    if !(width > 0.0 && height > 0.0) {
        return Err("Viewport width and height must be greater than 0".to_string());
    }
    Ok(Size::new(width, height))
}

/// Parse a padding distance; must be finite and not negative.
pub fn parse_inset(s: &str) -> Result<f64, String> {
    let inset: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid inset '{}'", s))?;
    if !inset.is_finite() || inset < 0.0 {
        return Err(format!("Inset must not be negative (got {})", s));
    }
    Ok(inset)
}
