use crate::domain::models::AppError;

/// Parses `#RRGGBB` or `#AARRGGBB` into a packed `0xRRGGBB` value. Alpha is dropped.
pub fn parse_rgb(value: &str) -> Result<u32, AppError> {
    let trimmed = value.trim();
    let Some(hex) = trimmed.strip_prefix('#') else {
        return Err(invalid_color(trimmed));
    };
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color(trimmed));
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| invalid_color(trimmed))?;
    Ok(packed & 0x00FF_FFFF)
}

fn invalid_color(value: &str) -> AppError {
    AppError::new(
        "INVALID_COLOR",
        format!("unsupported color string: {value:?}"),
        Some("use the #RRGGBB or #AARRGGBB form".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::parse_rgb;

    #[test]
    fn parse_six_digit_color() {
        assert_eq!(parse_rgb("#147AFF").unwrap(), 0x147AFF);
        assert_eq!(parse_rgb(" #00ff00 ").unwrap(), 0x00FF00);
    }

    #[test]
    fn parse_argb_drops_alpha() {
        assert_eq!(parse_rgb("#80FF0000").unwrap(), 0xFF0000);
    }

    #[test]
    fn reject_malformed_colors() {
        assert!(parse_rgb("147AFF").is_err());
        assert!(parse_rgb("#147AF").is_err());
        assert!(parse_rgb("#GG7AFF").is_err());
        assert_eq!(parse_rgb("").unwrap_err().code, "INVALID_COLOR");
    }
}
