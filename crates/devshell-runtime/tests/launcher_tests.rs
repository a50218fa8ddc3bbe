//! Tests for the session launcher against a real `/bin/sh`.

#![cfg(unix)]

use devshell_core::{SessionLauncherPort, SessionRequest};
use devshell_runtime::ShellLauncher;

#[tokio::test]
async fn test_exit_code_is_propagated() {
    let request = SessionRequest::new("/bin/sh").with_args(["-c", "exit 7"]);
    let outcome = ShellLauncher::new().launch(&request).await.unwrap();
    assert_eq!(outcome.exit_code, Some(7));
    assert_eq!(outcome.shell_status(), 7);
}

#[tokio::test]
async fn test_assignment_is_visible_to_session() {
    let request = SessionRequest::new("/bin/sh")
        .with_args([
            "-c",
            r#"test "$LD_LIBRARY_PATH" = "/usr/local/lib:/nix/store/aaa-libX11/lib""#,
        ])
        .with_env("LD_LIBRARY_PATH", "/usr/local/lib:/nix/store/aaa-libX11/lib");
    let outcome = ShellLauncher::new().launch(&request).await.unwrap();
    assert!(outcome.success());
}

#[tokio::test]
async fn test_signal_death_is_reported() {
    let request = SessionRequest::new("/bin/sh").with_args(["-c", "kill -KILL $$"]);
    let outcome = ShellLauncher::new().launch(&request).await.unwrap();
    assert_eq!(outcome.exit_code, None);
    assert_eq!(outcome.signal, Some(9));
    assert_eq!(outcome.shell_status(), 137);
}
