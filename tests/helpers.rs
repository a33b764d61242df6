use cookie_manager::{clamp, parse_hex_color};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn clamp_keeps_inner_value() {
    assert_eq!(clamp(10.0, 0.0, 20.0), 10.0);
}

#[test]
fn clamp_limits_low_and_high() {
    assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
}

#[test]
fn parse_hex_rgb() {
    let (r, g, b, a) = parse_hex_color("#FF0080").expect("valid rgb hex");
    assert!(approx_eq(r, 1.0));
    assert!(approx_eq(g, 0.0));
    assert!(approx_eq(b, 128.0 / 255.0));
    assert!(approx_eq(a, 1.0));
}

#[test]
fn parse_hex_rgba() {
    let (r, g, b, a) = parse_hex_color("#1F1F24D9").expect("valid rgba hex");
    assert!(approx_eq(r, 31.0 / 255.0));
    assert!(approx_eq(g, 31.0 / 255.0));
    assert!(approx_eq(b, 36.0 / 255.0));
    assert!(approx_eq(a, 217.0 / 255.0));
}

#[test]
fn parse_hex_without_hash_and_padded() {
    let (r, _, b, a) = parse_hex_color("  ff00FF80  ").expect("valid with whitespace and mixed case");
    assert!(approx_eq(r, 1.0));
    assert!(approx_eq(b, 1.0));
    assert!(approx_eq(a, 128.0 / 255.0));
}

#[test]
fn parse_hex_invalid_lengths_return_none() {
    assert!(parse_hex_color("#FFF").is_none());
    assert!(parse_hex_color("#FF00").is_none());
    assert!(parse_hex_color("#FF00FF0000").is_none());
    assert!(parse_hex_color("").is_none());
}

#[test]
fn parse_hex_invalid_chars_return_none() {
    assert!(parse_hex_color("#GG0000").is_none());
    assert!(parse_hex_color("ZZZZZZZZ").is_none());
    // Multi-byte characters must not be sliced mid-codepoint.
    assert!(parse_hex_color("#ÿÿÿ").is_none());
}
