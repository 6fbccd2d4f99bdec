use std::io::Write;
use std::path::Path;

use mdrender::color::Color;
use mdrender::config::loader::{load_config, load_config_file};
use mdrender::config::types::AppConfig;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn default_config_has_sane_defaults() {
    let config = AppConfig::default();
    assert!(!config.render.syntax_highlight);
    assert!(config.theme.colors.markdown.heading.is_none());
}

#[test]
fn parse_empty_config() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert!(!config.render.syntax_highlight);
}

#[test]
fn parse_unknown_keys_ignored() {
    let toml = r#"
unknown_top_level = "should be ignored"

[render]
syntax_highlight = true
wrap = 80
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert!(config.render.syntax_highlight);
}

#[test]
fn parse_markdown_colors_mixed() {
    let toml = r##"
[theme.colors.markdown]
heading = "#c0caf5"
strong = "245"
border = "#abc"
"##;
    let config: AppConfig = toml::from_str(toml).unwrap();
    let md = &config.theme.colors.markdown;
    assert_eq!(
        md.heading,
        Some(Color::Hex {
            r: 0xc0,
            g: 0xca,
            b: 0xf5
        })
    );
    assert_eq!(md.strong, Some(Color::Ansi256(245)));
    assert_eq!(
        md.border,
        Some(Color::Hex {
            r: 0xaa,
            g: 0xbb,
            b: 0xcc
        })
    );
    assert!(md.emph.is_none());
}

#[test]
fn parse_syntax_colors() {
    let toml = r##"
[theme.colors.markdown.syntax]
keyword = "5"
string = "#00ff00"
"##;
    let config: AppConfig = toml::from_str(toml).unwrap();
    let syntax = &config.theme.colors.markdown.syntax;
    assert_eq!(syntax.keyword, Some(Color::Ansi256(5)));
    assert_eq!(syntax.string, Some(Color::Hex { r: 0, g: 255, b: 0 }));
}

#[test]
fn parse_invalid_color_fails() {
    let toml = r#"
[theme.colors.markdown]
link = "not_a_color"
"#;
    assert!(toml::from_str::<AppConfig>(toml).is_err());
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

#[test]
fn load_explicit_file() {
    let file = write_config(
        r#"
[render]
syntax_highlight = true

[theme.colors.markdown]
table_header = "11"
"#,
    );
    let config = load_config(Some(file.path())).unwrap();
    assert!(config.render.syntax_highlight);
    assert_eq!(
        config.theme.colors.markdown.table_header,
        Some(Color::Ansi256(11))
    );
}

#[test]
fn invalid_toml_error_names_the_file() {
    let file = write_config("[render\nsyntax_highlight = ");
    let err = load_config_file(file.path()).unwrap_err();
    let msg = format!("{err:#}");
    let name = file.path().file_name().unwrap().to_string_lossy();
    assert!(msg.contains(name.as_ref()), "error should mention file: {msg}");
}

#[test]
fn invalid_color_error_names_the_value() {
    let file = write_config("[theme.colors.markdown]\ncode = \"#12345\"\n");
    let err = load_config_file(file.path()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("#12345"), "{msg}");
}

#[test]
fn missing_config_file_produces_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonexistent.toml");
    assert!(load_config(Some(&path)).is_err());
}

#[test]
fn directory_is_not_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_file(Path::new(dir.path())).is_err());
}
