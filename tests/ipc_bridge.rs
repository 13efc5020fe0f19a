use hud_overlay::bridge::parse_ipc_body;
use hud_overlay::relay::{MouseIgnoreOptions, RelayError, RelayMessage};

#[test]
fn decodes_set_ignore_with_hints() {
    let msg = parse_ipc_body(r#"{"channel":"set-ignore-mouse-events","args":[true,{"forward":true}]}"#)
        .unwrap();
    assert_eq!(
        msg,
        RelayMessage::SetIgnoreMouseEvents {
            ignore: true,
            options: MouseIgnoreOptions { forward: true },
        }
    );
}

#[test]
fn missing_or_null_hints_use_defaults() {
    for body in [
        r#"{"channel":"set-ignore-mouse-events","args":[false]}"#,
        r#"{"channel":"set-ignore-mouse-events","args":[false,null]}"#,
        r#"{"channel":"set-ignore-mouse-events","args":[false,{}]}"#,
    ] {
        assert_eq!(
            parse_ipc_body(body).unwrap(),
            RelayMessage::SetIgnoreMouseEvents {
                ignore: false,
                options: MouseIgnoreOptions::default(),
            },
            "body: {body}"
        );
    }
}

#[test]
fn unknown_hint_fields_are_ignored() {
    let msg = parse_ipc_body(
        r#"{"channel":"set-ignore-mouse-events","args":[true,{"forward":false,"region":[0,0,10,10]}]}"#,
    )
    .unwrap();
    assert_eq!(
        msg,
        RelayMessage::SetIgnoreMouseEvents {
            ignore: true,
            options: MouseIgnoreOptions { forward: false },
        }
    );
}

#[test]
fn decodes_app_close_with_or_without_args() {
    assert_eq!(parse_ipc_body(r#"{"channel":"app-close"}"#).unwrap(), RelayMessage::AppClose);
    assert_eq!(
        parse_ipc_body(r#"{"channel":"app-close","args":[]}"#).unwrap(),
        RelayMessage::AppClose
    );
}

#[test]
fn rejects_bad_bodies() {
    assert!(matches!(
        parse_ipc_body(r#"{"channel":"open-devtools","args":[]}"#),
        Err(RelayError::UnknownChannel(ch)) if ch == "open-devtools"
    ));
    assert!(matches!(
        parse_ipc_body(r#"{"channel":"set-ignore-mouse-events","args":[]}"#),
        Err(RelayError::InvalidArgument { .. })
    ));
    assert!(matches!(
        parse_ipc_body(r#"{"channel":"set-ignore-mouse-events","args":["yes"]}"#),
        Err(RelayError::InvalidArgument { .. })
    ));
    assert!(matches!(
        parse_ipc_body(r#"{"channel":"set-ignore-mouse-events","args":[true,{"forward":"yes"}]}"#),
        Err(RelayError::InvalidArgument { .. })
    ));
    assert!(matches!(parse_ipc_body("not json"), Err(RelayError::Malformed(_))));
    assert!(matches!(parse_ipc_body(r#"{"args":[true]}"#), Err(RelayError::Malformed(_))));
}
