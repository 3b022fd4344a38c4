use modal_state::{ModalStatus, ParseStatusError};

#[test]
fn test_default_is_closed() {
    assert_eq!(ModalStatus::default(), ModalStatus::Closed);
}

#[test]
fn test_bool_conversions() {
    assert_eq!(ModalStatus::from(true), ModalStatus::Open);
    assert_eq!(ModalStatus::from(false), ModalStatus::Closed);
    assert!(bool::from(ModalStatus::Open));
    assert!(!bool::from(ModalStatus::Closed));
}

#[test]
fn test_toggled() {
    assert_eq!(ModalStatus::Open.toggled(), ModalStatus::Closed);
    assert_eq!(ModalStatus::Closed.toggled(), ModalStatus::Open);
    assert_eq!(ModalStatus::Open.toggled().toggled(), ModalStatus::Open);
}

#[test]
fn test_display() {
    assert_eq!(ModalStatus::Open.to_string(), "open");
    assert_eq!(ModalStatus::Closed.to_string(), "closed");
}

#[test]
fn test_parse_accepted() {
    for input in ["open", "Opened", " TRUE ", "1", "on"] {
        assert_eq!(input.parse::<ModalStatus>(), Ok(ModalStatus::Open), "{input}");
    }
    for input in ["closed", "Close", "false", "0", " off"] {
        assert_eq!(input.parse::<ModalStatus>(), Ok(ModalStatus::Closed), "{input}");
    }
}

#[test]
fn test_parse_display_round_trip() {
    for status in [ModalStatus::Open, ModalStatus::Closed] {
        assert_eq!(status.to_string().parse::<ModalStatus>(), Ok(status));
    }
}

#[test]
fn test_parse_rejected() {
    let err = " maybe ".parse::<ModalStatus>().unwrap_err();
    assert_eq!(
        err,
        ParseStatusError {
            input: "maybe".to_string()
        }
    );
    let display = err.to_string();
    assert!(display.contains("maybe"));
    assert!(display.contains("open"));
}

#[test]
fn test_parse_empty_rejected() {
    assert!("".parse::<ModalStatus>().is_err());
}
