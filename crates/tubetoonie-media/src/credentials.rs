//! Cloud account credentials.
//!
//! Resolution order: explicit values, then `TONIE_USERNAME` /
//! `TONIE_PASSWORD`, then the OS secure store. A source only counts when it
//! supplies both halves.

use std::{
    ffi::OsString,
    fmt,
    process::{Command, Stdio},
};

use crate::{EnvLookup, env::non_empty};

/// Secure-store service name the credentials live under.
pub const SERVICE_NAME: &str = "tubetoonie";
/// Secure-store key of the username.
pub const USERNAME_KEY: &str = "tonie_username";
/// Secure-store key of the password.
pub const PASSWORD_KEY: &str = "tonie_password";

const USERNAME_VAR: &str = "TONIE_USERNAME";
const PASSWORD_VAR: &str = "TONIE_PASSWORD";

/// Username and password for the cloud account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username, usually an e-mail address.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Both halves trimmed; `None` if either is blank.
    pub fn new(username: &str, password: &str) -> Option<Self> {
        let (username, password) = (username.trim(), password.trim());
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self { username: username.to_string(), password: password.to_string() })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// OS-native secret storage (Keychain, Credential Manager, Secret Service).
pub trait SecureStore {
    /// Secret stored under `service` / `key`, if any.
    fn get_secret(&self, service: &str, key: &str) -> Option<String>;
}

/// Store used when no platform backend is linked. Never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecureStore;

impl SecureStore for NoSecureStore {
    fn get_secret(&self, _service: &str, _key: &str) -> Option<String> {
        None
    }
}

/// Command-line front end of a host secret store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretTool {
    /// macOS `security`, reading generic passwords from the Keychain.
    Keychain,
    /// libsecret's `secret-tool`, reading the Secret Service.
    SecretService,
}

/// [`SecureStore`] read through the host's secret tool.
///
/// Entries are looked up by the `service` / account pair other keyring
/// clients write, so secrets saved by them are found. Anything but a
/// printed secret reads as absent.
#[derive(Debug, Clone)]
pub struct CommandSecureStore {
    program: OsString,
    tool: SecretTool,
}

impl CommandSecureStore {
    /// Store driving `program`, which speaks `tool`'s arguments.
    pub fn new(program: impl Into<OsString>, tool: SecretTool) -> Self {
        Self { program: program.into(), tool }
    }

    /// The host's secret tool, if it has one this store can drive.
    ///
    /// Windows Credential Manager has no command that prints a secret.
    pub fn for_host() -> Option<Self> {
        if cfg!(target_os = "macos") {
            Some(Self::new("security", SecretTool::Keychain))
        } else if cfg!(unix) {
            Some(Self::new("secret-tool", SecretTool::SecretService))
        } else {
            None
        }
    }

    /// Arguments printing the secret stored under `service` / `key`.
    pub fn args(&self, service: &str, key: &str) -> Vec<OsString> {
        let args = match self.tool {
            SecretTool::Keychain => {
                vec!["find-generic-password", "-s", service, "-a", key, "-w"]
            },
            SecretTool::SecretService => vec!["lookup", "service", service, "username", key],
        };
        args.into_iter().map(OsString::from).collect()
    }
}

impl SecureStore for CommandSecureStore {
    fn get_secret(&self, service: &str, key: &str) -> Option<String> {
        let output = Command::new(&self.program)
            .args(self.args(service, key))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(program = ?self.program, error = %e, "secret tool unavailable");
                return None;
            },
        };
        if !output.status.success() {
            tracing::debug!(%service, %key, status = %output.status, "no stored secret");
            return None;
        }

        let secret = String::from_utf8(output.stdout).ok()?;
        let secret = secret.trim_end_matches(['\r', '\n']);
        (!secret.is_empty()).then(|| secret.to_string())
    }
}

/// Resolve credentials from the first source that has both halves.
pub fn resolve_credentials(
    explicit_username: Option<&str>,
    explicit_password: Option<&str>,
    env: EnvLookup<'_>,
    store: &dyn SecureStore,
) -> Option<Credentials> {
    let explicit = explicit_username
        .zip(explicit_password)
        .and_then(|(user, pass)| Credentials::new(user, pass));
    if explicit.is_some() {
        tracing::debug!("using explicit credentials");
        return explicit;
    }

    let from_env = non_empty(env, USERNAME_VAR)
        .zip(non_empty(env, PASSWORD_VAR))
        .and_then(|(user, pass)| Credentials::new(&user, &pass));
    if from_env.is_some() {
        tracing::debug!("using credentials from environment");
        return from_env;
    }

    let stored = store
        .get_secret(SERVICE_NAME, USERNAME_KEY)
        .zip(store.get_secret(SERVICE_NAME, PASSWORD_KEY))
        .and_then(|(user, pass)| Credentials::new(&user, &pass));
    if stored.is_some() {
        tracing::debug!("using credentials from secure store");
    }
    stored
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapStore(HashMap<(&'static str, &'static str), &'static str>);

    impl SecureStore for MapStore {
        fn get_secret(&self, service: &str, key: &str) -> Option<String> {
            self.0
                .iter()
                .find(|((s, k), _)| *s == service && *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    fn keyring() -> MapStore {
        MapStore(HashMap::from([
            ((SERVICE_NAME, USERNAME_KEY), "key@example.com"),
            ((SERVICE_NAME, PASSWORD_KEY), "keypw"),
        ]))
    }

    fn env_with_user(name: &str) -> Option<String> {
        match name {
            USERNAME_VAR => Some("env@example.com".to_string()),
            PASSWORD_VAR => Some("envpw".to_string()),
            _ => None,
        }
    }

    fn empty_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn explicit_over_everything() {
        let creds = resolve_credentials(
            Some(" explicit@example.com "),
            Some("explicitpw"),
            &env_with_user,
            &keyring(),
        );
        assert_eq!(creds, Credentials::new("explicit@example.com", "explicitpw"));
    }

    #[test]
    fn env_over_secure_store() {
        let creds = resolve_credentials(None, None, &env_with_user, &keyring());
        assert_eq!(creds.map(|c| c.username), Some("env@example.com".to_string()));
    }

    #[test]
    fn half_explicit_falls_through() {
        let creds =
            resolve_credentials(Some("explicit@example.com"), None, &env_with_user, &keyring());
        assert_eq!(creds.map(|c| c.username), Some("env@example.com".to_string()));
    }

    #[test]
    fn secure_store_fallback() {
        let creds = resolve_credentials(None, None, &empty_env, &keyring());
        assert_eq!(creds, Credentials::new("key@example.com", "keypw"));
    }

    #[test]
    fn nothing_configured() {
        assert_eq!(resolve_credentials(Some(""), Some("pw"), &empty_env, &NoSecureStore), None);
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("user", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn keychain_and_secret_service_arguments() {
        let keychain = CommandSecureStore::new("security", SecretTool::Keychain);
        assert_eq!(keychain.args(SERVICE_NAME, USERNAME_KEY), [
            "find-generic-password",
            "-s",
            "tubetoonie",
            "-a",
            "tonie_username",
            "-w",
        ]);

        let secret_service = CommandSecureStore::new("secret-tool", SecretTool::SecretService);
        assert_eq!(secret_service.args(SERVICE_NAME, PASSWORD_KEY), [
            "lookup",
            "service",
            "tubetoonie",
            "username",
            "tonie_password",
        ]);
    }

    #[test]
    fn missing_tool_reads_as_absent() {
        let store = CommandSecureStore::new("tubetoonie-no-such-tool", SecretTool::SecretService);
        assert_eq!(store.get_secret(SERVICE_NAME, USERNAME_KEY), None);
    }
}
