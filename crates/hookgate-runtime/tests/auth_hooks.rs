//! Authentication hooks: kind derived from the credential, identity rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use serde_json::json;
use uuid::Uuid;

use hookgate_core::protocol::{
    AuthId, AuthenticateRequest, EmailCredentials, GameCenterCredentials, AUTH_KINDS,
};
use hookgate_core::{DynamicMap, HookgateError};
use hookgate_runtime::context::SessionIdentity;
use hookgate_runtime::registry::{after_fn, before_fn, CallbackFailure, HookRegistry};

mod common;
use common::{dispatcher, field_mut, Captured};

fn every_credential() -> Vec<AuthenticateRequest> {
    vec![
        AuthId::Email(EmailCredentials {
            email: "a@example.com".into(),
            password: "pw123456".into(),
        }),
        AuthId::Custom("custom-1".into()),
        AuthId::Device("device-1".into()),
        AuthId::Facebook("fb-token".into()),
        AuthId::Google("google-token".into()),
        AuthId::GameCenter(GameCenterCredentials {
            player_id: "G:1".into(),
            bundle_id: "com.example".into(),
            timestamp: 1_508_158_765,
            ..Default::default()
        }),
        AuthId::Steam("steam-token".into()),
    ]
    .into_iter()
    .map(AuthenticateRequest::new)
    .collect()
}

#[test]
fn kind_is_the_bare_variant_name() {
    let email = AuthenticateRequest::new(AuthId::Email(EmailCredentials::default()));
    assert_eq!(email.kind(), "Email");

    let kinds: Vec<&str> = every_credential().iter().map(AuthenticateRequest::kind).collect();
    assert_eq!(kinds, AUTH_KINDS);
}

#[tokio::test]
async fn each_variant_routes_to_its_own_hook() {
    let hits: Arc<Mutex<Vec<String>>> = Arc::default();
    let reg = Arc::new(HookRegistry::new());
    for kind in AUTH_KINDS {
        let hits = Arc::clone(&hits);
        let kind_name = kind.to_string();
        reg.register_before(
            *kind,
            Arc::new(before_fn(move |_, m| {
                hits.lock().unwrap().push(kind_name.clone());
                Ok(m)
            })),
        );
    }
    let (d, _) = dispatcher(reg);

    for req in every_credential() {
        let out = d.invoke_before_authentication(req.clone()).await.unwrap();
        assert_eq!(out, req);
    }
    assert_eq!(*hits.lock().unwrap(), AUTH_KINDS);
}

#[tokio::test]
async fn before_authentication_is_anonymous_and_can_rewrite() {
    let (logs, _guard) = Captured::install();
    let seen = Arc::new(Mutex::new(None));
    let reg = Arc::new(HookRegistry::new());
    {
        let seen = Arc::clone(&seen);
        reg.register_before(
            "Email",
            Arc::new(before_fn(move |id, mut m: DynamicMap| {
                *seen.lock().unwrap() = Some(id.clone());
                let email = field_mut(&mut m, "email", "email");
                let lowered = email.as_str().unwrap_or_default().to_lowercase();
                *email = json!(lowered);
                Ok(m)
            })),
        );
    }
    let (d, _) = dispatcher(reg);

    let req = AuthenticateRequest::new(AuthId::Email(EmailCredentials {
        email: "Player@Example.COM".into(),
        password: "pw123456".into(),
    }))
    .with_cid("2");
    let out = d.invoke_before_authentication(req).await.unwrap();

    assert_eq!(seen.lock().unwrap().clone(), Some(SessionIdentity::anonymous()));
    let applied: Vec<_> = logs
        .records()
        .into_iter()
        .filter(|r| r.field("message") == Some("before hook applied"))
        .collect();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].field("kind"), Some("Email"));
    assert_eq!(applied[0].field("anonymous"), Some("true"));
    assert_eq!(out.cid.as_deref(), Some("2"));
    match out.id {
        AuthId::Email(c) => {
            assert_eq!(c.email, "player@example.com");
            assert_eq!(c.password, "pw123456");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn before_authentication_rejection_is_fatal() {
    let reg = Arc::new(HookRegistry::new());
    reg.register_before(
        "Device",
        Arc::new(before_fn(|_, _| Err(CallbackFailure::Rejected("banned device".into())))),
    );
    let (d, _) = dispatcher(reg);

    let err = d
        .invoke_before_authentication(AuthenticateRequest::new(AuthId::Device("d1".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, HookgateError::Rejected(_)));

    // Other credential kinds are untouched.
    let steam = AuthenticateRequest::new(AuthId::Steam("s".into()));
    assert_eq!(d.invoke_before_authentication(steam.clone()).await.unwrap(), steam);
}

#[tokio::test]
async fn before_authentication_cannot_switch_credential_kind() {
    let reg = Arc::new(HookRegistry::new());
    reg.register_before(
        "Custom",
        Arc::new(before_fn(|_, _| {
            let mut m = DynamicMap::new();
            m.insert("device".into(), json!("spoofed"));
            Ok(m)
        })),
    );
    let (d, _) = dispatcher(reg);

    let err = d
        .invoke_before_authentication(AuthenticateRequest::new(AuthId::Custom("c".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, HookgateError::Decode(_)), "{err}");
}

#[tokio::test]
async fn after_authentication_receives_the_new_identity() {
    let seen = Arc::new(Mutex::new(None));
    let reg = Arc::new(HookRegistry::new());
    {
        let seen = Arc::clone(&seen);
        reg.register_after(
            "Google",
            Arc::new(after_fn(move |id, m| {
                *seen.lock().unwrap() = Some((id.clone(), m.clone()));
                Ok(())
            })),
        );
    }
    let (d, _) = dispatcher(reg);

    let user = Uuid::new_v4();
    let req = AuthenticateRequest::new(AuthId::Google("tok".into()));
    d.invoke_after_authentication(&req, user, "newbie", 1_900_000_000)
        .await;

    let (id, map) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(id, SessionIdentity::new(user, "newbie", 1_900_000_000));
    assert_eq!(map.get("google"), Some(&json!("tok")));
}

#[tokio::test]
async fn after_authentication_failure_is_logged_with_kind() {
    let (logs, _guard) = Captured::install();

    let reg = Arc::new(HookRegistry::new());
    reg.register_after(
        "Email",
        Arc::new(after_fn(|_, _| Err(CallbackFailure::Script("smtp timeout".into())))),
    );
    let (d, _) = dispatcher(reg);

    let req = AuthenticateRequest::new(AuthId::Email(EmailCredentials::default()));
    d.invoke_after_authentication(&req, Uuid::new_v4(), "h", 1).await;

    let errors = logs.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("message_kind"), Some("Email"));
    assert_eq!(errors[0].field("cause"), Some("smtp timeout"));
}
