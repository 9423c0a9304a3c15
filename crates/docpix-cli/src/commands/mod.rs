pub mod compress;
pub mod config;
pub mod crop;
pub mod extract;
pub mod list;
pub mod order;
pub mod transform;

use docpix_core::geometry::{Point, Size};

/// Parse `X,Y` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    Ok(Point::new(parse_f64(x)?, parse_f64(y)?))
}

/// Parse `WxH` into a size.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    Ok(Size::new(parse_f64(w)?, parse_f64(h)?))
}

fn parse_f64(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s.trim()))
}
