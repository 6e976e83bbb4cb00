#[test]
fn version_matches_cargo_pkg_version() {
    assert_eq!(stratum::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!stratum::VERSION.is_empty());
}
