#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hookgate_runtime::config::{self, AfterMode};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
dispatch:
  after_mode: inline
  fail_on_unknwn_kind: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn unknown_after_mode_fails() {
    let bad = r#"
version: 1
dispatch:
  after_mode: fire_and_forget
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn wrong_version_fails() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.dispatch.after_mode, AfterMode::Inline);
    assert!(!cfg.dispatch.fail_on_unknown_kind);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
dispatch:
  after_mode: detached
  fail_on_unknown_kind: true
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.dispatch.after_mode, AfterMode::Detached);
    assert!(cfg.dispatch.fail_on_unknown_kind);
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("does/not/exist/hookgate.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
