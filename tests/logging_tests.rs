use fleet::parse_level;
use log::LevelFilter;

#[test]
fn test_parse_level() {
    assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
    assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
    assert_eq!(parse_level(Some("off")), LevelFilter::Off);
    assert_eq!(parse_level(Some("chatty")), LevelFilter::Info);
    assert_eq!(parse_level(None), LevelFilter::Info);
}
