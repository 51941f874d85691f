//! Secure store against a stand-in secret tool.
//!
//! The stand-in answers `secret-tool lookup` for the two credential keys
//! and fails for everything else, like the real tool with no entry.

#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use std::{fs, os::unix::fs::PermissionsExt};

use tubetoonie_media::{
    CommandSecureStore, Credentials, PASSWORD_KEY, SERVICE_NAME, SecretTool, SecureStore,
    USERNAME_KEY, resolve_credentials,
};

const SECRET_TOOL: &str = r#"#!/bin/sh
case "$*" in
  "lookup service tubetoonie username tonie_username") printf 'kid@example.com\n' ;;
  "lookup service tubetoonie username tonie_password") printf 'hunter2' ;;
  *) exit 1 ;;
esac
"#;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn credentials_from_stand_in_secret_tool() {
    let bin = tempfile::tempdir().unwrap();
    let tool = bin.path().join("secret-tool");
    fs::write(&tool, SECRET_TOOL).unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let store = CommandSecureStore::new(&tool, SecretTool::SecretService);
    assert_eq!(store.get_secret(SERVICE_NAME, USERNAME_KEY).as_deref(), Some("kid@example.com"));
    assert_eq!(store.get_secret(SERVICE_NAME, PASSWORD_KEY).as_deref(), Some("hunter2"));
    assert_eq!(store.get_secret("other-service", USERNAME_KEY), None);

    let creds = resolve_credentials(None, None, &no_env, &store);
    assert_eq!(creds, Credentials::new("kid@example.com", "hunter2"));
}
