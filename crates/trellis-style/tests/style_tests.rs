//! Integration tests for style types.

use trellis_style::{
    Alignment, Axis, BoxSizing, Color, ComputedStyle, ParseUnitError, StackDirection, Unit,
};

#[test]
fn test_unit_parse_pixel_forms() {
    assert_eq!("12px".parse::<Unit>(), Ok(Unit::Pixel(12.0)));
    assert_eq!("12".parse::<Unit>(), Ok(Unit::Pixel(12.0)));
    assert_eq!(" 7.5px ".parse::<Unit>(), Ok(Unit::Pixel(7.5)));
}

#[test]
fn test_unit_parse_percentage_and_unset() {
    assert_eq!("50%".parse::<Unit>(), Ok(Unit::Percentage(50.0)));
    assert_eq!("auto".parse::<Unit>(), Ok(Unit::Unset));
    assert_eq!("".parse::<Unit>(), Ok(Unit::Unset));
}

#[test]
fn test_unit_parse_rejects_garbage() {
    assert_eq!(
        "12em".parse::<Unit>(),
        Err(ParseUnitError::Invalid("12em".to_string()))
    );
    assert_eq!(
        "infpx".parse::<Unit>(),
        Err(ParseUnitError::NotFinite("infpx".to_string()))
    );
}

#[test]
fn test_unit_display_round_trips() {
    for unit in [Unit::Pixel(3.0), Unit::Percentage(25.0), Unit::Unset] {
        assert_eq!(unit.to_string().parse::<Unit>(), Ok(unit));
    }
}

#[test]
fn test_color_from_hex_6() {
    assert_eq!(Color::from_hex("#ff0000"), Some(Color::rgb(255, 0, 0)));
}

#[test]
fn test_color_from_hex_3_and_8() {
    assert_eq!(Color::from_hex("#f00"), Some(Color::rgb(255, 0, 0)));
    assert_eq!(
        Color::from_hex("#00ff0080"),
        Some(Color {
            r: 0,
            g: 255,
            b: 0,
            a: 128
        })
    );
    assert_eq!(Color::from_hex("#12345"), None);
    assert_eq!(Color::from_hex("#zzz"), None);
}

#[test]
fn test_alignment_scalars() {
    let align = Alignment::RIGHT | Alignment::TOP;
    assert_eq!(align.scalar(Axis::Horizontal), Some(1.0));
    assert_eq!(align.scalar(Axis::Vertical), Some(-1.0));
    assert_eq!(align.horizontal(), Some(1.0));
    assert_eq!(Alignment::MIDDLE.vertical(), Some(0.0));
    assert_eq!(Alignment::CENTER.fraction(Axis::Horizontal), Some(0.5));
    assert_eq!(Alignment::CENTER.scalar(Axis::Vertical), None);
    assert!(!Alignment::empty().is_explicit(Axis::Horizontal));
}

#[test]
fn test_computed_style_from_json() {
    let style: ComputedStyle = serde_json::from_str(
        r##"{
            "size": { "width": "50%", "height": "20px" },
            "margin": { "left": "10%" },
            "stack": "horizontal",
            "box_sizing": "border",
            "alignment": "CENTER | BOTTOM",
            "background": "#336699"
        }"##,
    )
    .unwrap();

    assert_eq!(style.size.width, Unit::Percentage(50.0));
    assert_eq!(style.size.height, Unit::Pixel(20.0));
    assert_eq!(style.margin.left, Unit::Percentage(10.0));
    assert_eq!(style.margin.top, Unit::Unset);
    assert_eq!(style.stack, StackDirection::Horizontal);
    assert_eq!(style.box_sizing, BoxSizing::Border);
    assert_eq!(style.alignment, Alignment::CENTER | Alignment::BOTTOM);
    assert_eq!(style.background, Some(Color::rgb(0x33, 0x66, 0x99)));
    assert!(style.is_paintable());
}

#[test]
fn test_alignment_reads_names_and_bits() {
    let named: Alignment = serde_json::from_str(r#""CENTER | MIDDLE""#).unwrap();
    let bits: Alignment = serde_json::from_str("18").unwrap();

    assert_eq!(named, Alignment::CENTER | Alignment::MIDDLE);
    assert_eq!(bits, named);
    assert_eq!(serde_json::to_string(&named).unwrap(), r#""CENTER | MIDDLE""#);
    assert!(serde_json::from_str::<Alignment>("64").is_err());
    assert!(serde_json::from_str::<Alignment>(r#""SIDEWAYS""#).is_err());
}

#[test]
fn test_computed_style_rejects_bad_unit() {
    let result: Result<ComputedStyle, _> =
        serde_json::from_str(r#"{ "size": { "width": "wide" } }"#);
    assert!(result.is_err());
}

#[test]
fn test_stack_direction_display() {
    assert_eq!(StackDirection::Horizontal.to_string(), "horizontal");
    assert_eq!("vertical".parse::<StackDirection>(), Ok(StackDirection::Vertical));
}
