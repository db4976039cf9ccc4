//! CSS color text input.

use super::{Color, ColorModel, Lch, Rgb};
use peniko::color::{ColorSpaceTag, DynamicColor, Lch as CieLch, Oklch, parse_color};

/// Parse CSS color text.
///
/// Accepts hex, the functional notations the color library knows
/// (`rgb()`, `hsl()`, `lab()`, `lch()`, `oklab()`, `oklch()`, `color()`),
/// the vendor-prefixed `color(--oklch ...)` / `color(--lch ...)` form, and
/// `property: <color>` pairs as copied from a stylesheet. A trailing
/// semicolon is ignored. Returns `None` for anything else.
pub fn parse(model: ColorModel, value: &str) -> Option<Color> {
    let value = value.trim();
    let value = value.strip_suffix(';').map_or(value, str::trim_end);
    let value = strip_property(value);
    let value = normalize_vendor_keyword(value);
    let parsed = parse_color(&value).ok()?;
    Some(from_dynamic(model, parsed))
}

/// `color(--oklch 50% 0.1 20)` -> `oklch(50% 0.1 20)`.
fn normalize_vendor_keyword(value: &str) -> String {
    for keyword in ["oklch", "lch"] {
        let prefix = format!("color(--{} ", keyword);
        if let Some(rest) = value.strip_prefix(prefix.as_str()) {
            return format!("{}({}", keyword, rest.trim_start());
        }
    }
    value.to_string()
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn is_hex_token(text: &str) -> bool {
    text.strip_prefix('#').is_some_and(is_word)
}

fn is_function_token(text: &str) -> bool {
    let Some((name, args)) = text.split_once('(') else {
        return false;
    };
    let Some(args) = args.strip_suffix(')') else {
        return false;
    };
    is_word(name) && !args.is_empty() && !args.contains(')')
}

/// Drop a leading `name:` when what follows is a single color token.
fn strip_property(value: &str) -> &str {
    let Some((name, rest)) = value.split_once(':') else {
        return value;
    };
    let is_property = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    let rest = rest.trim_start();
    if is_property && (is_hex_token(rest) || is_function_token(rest)) {
        rest
    } else {
        value
    }
}

fn from_dynamic(model: ColorModel, color: DynamicColor) -> Color {
    let [a, b, c, alpha] = color.components.map(f64::from);
    match (color.cs, model) {
        (ColorSpaceTag::Srgb, _) => Color::Rgb(Rgb::new(a, b, c, Some(alpha))),
        (ColorSpaceTag::Oklch, ColorModel::Oklch) | (ColorSpaceTag::Lch, ColorModel::Lch) => {
            model.wrap(Lch {
                l: a,
                c: b,
                h: c,
                alpha: Some(alpha),
            })
        }
        (_, ColorModel::Oklch) => wrap_components(model, color.to_alpha_color::<Oklch>().components),
        (_, ColorModel::Lch) => wrap_components(model, color.to_alpha_color::<CieLch>().components),
    }
}

fn wrap_components(model: ColorModel, [l, c, h, alpha]: [f32; 4]) -> Color {
    model.build_with_alpha(f64::from(l), f64::from(c), f64::from(h), f64::from(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{format_rgb, in_p3, in_rec2020, in_rgb};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} got {}",
            expected,
            actual
        );
    }

    fn rgb_of(color: Option<Color>) -> Rgb {
        match color {
            Some(Color::Rgb(rgb)) => rgb,
            other => panic!("expected rgb, got {:?}", other),
        }
    }

    fn lch_of(color: Option<Color>) -> Lch {
        match color {
            Some(Color::Oklch(lch)) | Some(Color::Lch(lch)) => lch,
            other => panic!("expected cylindrical color, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hex() {
        let rgb = rgb_of(parse(ColorModel::Oklch, "#ff8000"));
        assert_close(rgb.r, 1.0, 1e-6);
        assert_close(rgb.g, 128.0 / 255.0, 1e-6);
        assert_close(rgb.b, 0.0, 1e-6);

        let translucent = rgb_of(parse(ColorModel::Oklch, "#00000080"));
        assert_close(translucent.alpha.unwrap(), 128.0 / 255.0, 1e-6);
    }

    #[test]
    fn test_parse_rgb_functions() {
        let rgb = rgb_of(parse(ColorModel::Oklch, "rgb(255, 0, 0)"));
        assert_close(rgb.r, 1.0, 1e-6);
        let rgba = rgb_of(parse(ColorModel::Oklch, "rgba(0, 0, 255, 0.5)"));
        assert_close(rgba.b, 1.0, 1e-6);
        assert_close(rgba.alpha.unwrap(), 0.5, 1e-6);
    }

    #[test]
    fn test_parse_oklch_keeps_components() {
        let lch = lch_of(parse(ColorModel::Oklch, "oklch(70% 0.1 200)"));
        assert_close(lch.l, 0.7, 1e-6);
        assert_close(lch.c, 0.1, 1e-6);
        assert_close(lch.h, 200.0, 1e-4);
    }

    #[test]
    fn test_parse_vendor_keyword() {
        let lch = lch_of(parse(ColorModel::Oklch, "color(--oklch 70% 0.1 200)"));
        assert_close(lch.l, 0.7, 1e-6);
        assert_close(lch.h, 200.0, 1e-4);

        let cie = parse(ColorModel::Lch, "color(--lch 50% 30 120)");
        assert!(matches!(cie, Some(Color::Lch(_))));
    }

    #[test]
    fn test_parse_other_spaces_convert_to_model() {
        for text in ["hsl(120, 50%, 50%)", "lab(50% 20 -30)", "oklab(0.6 0.1 -0.1)"] {
            assert!(
                matches!(parse(ColorModel::Oklch, text), Some(Color::Oklch(_))),
                "{} should convert into oklch",
                text
            );
            assert!(
                matches!(parse(ColorModel::Lch, text), Some(Color::Lch(_))),
                "{} should convert into lch",
                text
            );
        }
    }

    #[test]
    fn test_parse_does_not_clamp() {
        let p3_green = parse(ColorModel::Oklch, "color(display-p3 0.1 0.9 0.1)").unwrap();
        assert!(!in_rgb(&p3_green));
        assert!(in_p3(&p3_green));

        let rec_green = parse(ColorModel::Oklch, "color(rec2020 0.05 0.9 0.05)").unwrap();
        assert!(!in_p3(&rec_green));
        assert!(in_rec2020(&rec_green));
    }

    #[test]
    fn test_parse_property_shorthand() {
        let rgb = rgb_of(parse(ColorModel::Oklch, "background-color: #00ff00;"));
        assert_close(rgb.g, 1.0, 1e-6);

        let lch = lch_of(parse(ColorModel::Oklch, "color: oklch(50% 0.05 10)"));
        assert_close(lch.l, 0.5, 1e-6);

        let vendor = lch_of(parse(ColorModel::Oklch, "--accent: color(--oklch 40% 0.2 300) ;"));
        assert_close(vendor.c, 0.2, 1e-6);
    }

    #[test]
    fn test_parse_trailing_semicolon() {
        assert!(parse(ColorModel::Oklch, "#fff;").is_some());
        assert!(parse(ColorModel::Oklch, "rgb(1, 2, 3) ;").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(ColorModel::Oklch, ""), None);
        assert_eq!(parse(ColorModel::Oklch, "not a color"), None);
        assert_eq!(parse(ColorModel::Oklch, "#zzzzzz"), None);
        assert_eq!(parse(ColorModel::Oklch, "color: rgb(1, 2, 3) rgb(4, 5, 6)"), None);
    }

    #[test]
    fn test_format_lch_round_trip() {
        for model in [ColorModel::Oklch, ColorModel::Lch] {
            let samples = [
                (0.25, 0.5, 10.0, None),
                (0.5, 0.25, 150.0, Some(0.5)),
                (0.9, 0.1, 300.5, Some(0.25)),
            ];
            for (l, c, h, alpha) in samples {
                let original = Lch {
                    l: l * model.l_max(),
                    c: c * model.c_max(),
                    h,
                    alpha,
                };
                let text = model.format_lch(&original);
                let parsed = lch_of(parse(model, &text));
                let tolerance = model.l_max() * 1e-4;
                assert_close(parsed.l, original.l, tolerance);
                assert_close(parsed.c, original.c, model.c_max() * 1e-4);
                assert_close(parsed.h, original.h, 1e-3);
                assert_close(parsed.alpha.unwrap_or(1.0), alpha.unwrap_or(1.0), 1e-4);
            }
        }
    }

    #[test]
    fn test_format_rgb_round_trip() {
        let samples = [
            Rgb::new(0.0, 0.0, 0.0, None),
            Rgb::new(0.2, 0.4, 0.6, None),
            Rgb::new(1.0, 0.5, 0.25, Some(0.75)),
        ];
        for original in samples {
            let parsed = rgb_of(parse(ColorModel::Oklch, &format_rgb(&original)));
            assert_close(parsed.r, original.r, 1e-4);
            assert_close(parsed.g, original.g, 1e-4);
            assert_close(parsed.b, original.b, 1e-4);
            assert_close(parsed.alpha.unwrap_or(1.0), original.alpha.unwrap_or(1.0), 1e-4);
        }
    }

    #[test]
    fn test_strip_property() {
        assert_eq!(strip_property("color: #fff"), "#fff");
        assert_eq!(strip_property("fill:rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(strip_property("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(strip_property("bad name: #fff"), "bad name: #fff");
    }
}
