use crossterm::style::Color as Ct;
use mdrender::color::{Color, ColorDepth};
use mdrender::config::types::AppConfig;
use mdrender::theme::{Background, ResolvedTheme};

#[test]
fn parse_hex_6_digit() {
    let c = Color::parse("#c0caf5", "test_field").unwrap();
    assert_eq!(
        c,
        Color::Hex {
            r: 0xc0,
            g: 0xca,
            b: 0xf5
        }
    );
}

#[test]
fn parse_hex_3_digit() {
    let c = Color::parse("#f0a", "test_field").unwrap();
    // #f0a → r=0xff, g=0x00, b=0xaa
    assert_eq!(
        c,
        Color::Hex {
            r: 0xff,
            g: 0x00,
            b: 0xaa
        }
    );
}

#[test]
fn parse_ansi256_bounds() {
    assert_eq!(Color::parse("0", "f").unwrap(), Color::Ansi256(0));
    assert_eq!(Color::parse("255", "f").unwrap(), Color::Ansi256(255));
    assert_eq!(Color::parse("007", "f").unwrap(), Color::Ansi256(7));
}

#[test]
fn parse_errors_name_field_and_value() {
    for bad in ["256", "foobar", "#12", "#gggggg", "#ééé"] {
        let err = Color::parse(bad, "heading").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("heading"), "{msg}");
        assert!(msg.contains(bad), "{msg}");
    }
}

#[test]
fn from_str_matches_parse() {
    let c: Color = "#102030".parse().unwrap();
    assert_eq!(c.to_string(), "#102030");
    assert_eq!(Color::Ansi256(42).to_string(), "42");
}

#[test]
fn to_crossterm_truecolor_hex() {
    let c = Color::Hex {
        r: 0xc0,
        g: 0xca,
        b: 0xf5,
    };
    assert_eq!(
        c.to_crossterm_color(ColorDepth::TrueColor),
        Ct::Rgb {
            r: 0xc0,
            g: 0xca,
            b: 0xf5
        }
    );
}

#[test]
fn base_ansi_colors_use_named_variants() {
    assert_eq!(
        Color::Ansi256(1).to_crossterm_color(ColorDepth::TrueColor),
        Ct::DarkRed
    );
    assert_eq!(
        Color::Ansi256(12).to_crossterm_color(ColorDepth::Color16),
        Ct::Blue
    );
    assert_eq!(
        Color::Ansi256(42).to_crossterm_color(ColorDepth::Color256),
        Ct::AnsiValue(42)
    );
}

#[test]
fn to_crossterm_256_hex_approximated() {
    let c = Color::Hex { r: 255, g: 0, b: 0 };
    assert_eq!(c.to_crossterm_color(ColorDepth::Color256), Ct::AnsiValue(196));
}

fn is_basic(c: Ct) -> bool {
    !matches!(c, Ct::Rgb { .. } | Ct::AnsiValue(_))
}

#[test]
fn hex_degrades_to_16_color_reasonably() {
    let cases = [
        ((255, 0, 0), [Ct::DarkRed, Ct::Red]),
        ((0, 255, 0), [Ct::DarkGreen, Ct::Green]),
        ((0, 0, 255), [Ct::DarkBlue, Ct::Blue]),
        ((255, 255, 255), [Ct::Grey, Ct::White]),
    ];
    for ((r, g, b), expected) in cases {
        let ct = Color::Hex { r, g, b }.to_crossterm_color(ColorDepth::Color16);
        assert!(expected.contains(&ct), "#{r:02x}{g:02x}{b:02x} -> {ct:?}");
    }
}

#[test]
fn ansi256_degrades_to_16_color() {
    let red = Color::Ansi256(196).to_crossterm_color(ColorDepth::Color16);
    assert!(matches!(red, Ct::DarkRed | Ct::Red), "{red:?}");
    let green = Color::Ansi256(46).to_crossterm_color(ColorDepth::Color16);
    assert!(matches!(green, Ct::DarkGreen | Ct::Green), "{green:?}");
}

#[test]
fn invalid_color_in_config_produces_error() {
    let toml_str = r#"
[theme.colors.markdown]
strong = "foobar"
"#;
    let err = toml::from_str::<AppConfig>(toml_str).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("foobar"), "error should mention the value: {msg}");
}

#[test]
fn out_of_range_syntax_color_produces_error() {
    let toml_str = r#"
[theme.colors.markdown.syntax]
keyword = "999"
"#;
    let err = toml::from_str::<AppConfig>(toml_str).unwrap_err();
    assert!(err.to_string().contains("999"));
}

#[test]
fn full_theme_degrades_to_16_without_panic() {
    let toml_str = r##"
[theme.colors.markdown]
heading = "#7aa2f7"
heading_text = "231"
strong = "#ff9e64"
emph = "141"
code = "#f7768e"
code_block = "183"
link = "#565f89"
border = "240"

[theme.colors.markdown.syntax]
keyword = "#bb9af7"
string = "#9ece6a"
comment = "244"
"##;
    let config: AppConfig = toml::from_str(toml_str).unwrap();
    for bg in [Background::Dark, Background::Light] {
        let t = ResolvedTheme::resolve(&config.theme, bg);
        let all = [
            t.heading_marker,
            t.heading_text,
            t.strong,
            t.emph,
            t.code,
            t.code_block,
            t.link,
            t.image,
            t.list_marker,
            t.blockquote,
            t.horizontal_rule,
            t.border,
            t.table_header,
            t.syn_keyword,
            t.syn_string,
            t.syn_comment,
            t.syn_number,
            t.syn_function,
            t.syn_type,
        ];
        for color in all {
            let ct = color.to_crossterm_color(ColorDepth::Color16);
            assert!(is_basic(ct), "{color} -> {ct:?}");
        }
    }
}
