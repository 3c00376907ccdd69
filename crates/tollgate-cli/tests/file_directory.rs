//! CLI integration tests against the file-backed user directory.

mod common;

use common::Sandbox;

#[test]
fn register_login_whoami_logout() {
    let sandbox = Sandbox::new();

    let stdout = sandbox.run_success(&[
        "register",
        "alice",
        "--password",
        "pw",
        "--name",
        "Alice",
    ]);
    assert!(stdout.contains("Registered successfully"));
    assert!(stdout.contains("alice"));

    // Registration alone does not open a session.
    assert_eq!(sandbox.run_json(&["status", "--json"])["state"], "anonymous");

    let stdout = sandbox.run_success(&["login", "-u", "alice", "-p", "pw"]);
    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("/dashboard"));
    assert!(stdout.contains("present"));

    let status = sandbox.run_json(&["status", "--json"]);
    assert_eq!(status["state"], "authenticated");
    assert_eq!(status["username"], "alice");
    assert_eq!(status["origin"], common::ORIGIN);

    let stdout = sandbox.run_success(&["whoami"]);
    assert!(stdout.contains("alice"));
    assert!(stdout.contains("Alice"));

    let stdout = sandbox.run_success(&["logout"]);
    assert!(stdout.contains("Logged out"));
    assert!(stdout.contains("/login"));

    let status = sandbox.run_json(&["status", "--json"]);
    assert_eq!(status["state"], "anonymous");
    assert!(status["username"].is_null());

    let output = sandbox.run(&["whoami"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No active session"));
}

#[test]
fn stored_session_never_contains_password() {
    let sandbox = Sandbox::new();
    sandbox.register("alice", "hunter2-secret");
    sandbox.login("alice", "hunter2-secret");

    let stored = std::fs::read_to_string(sandbox.session_dir().join("user")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(value["username"], "alice");
    assert!(!stored.contains("hunter2-secret"));
    assert!(value.get("password").is_none());
}

#[test]
fn rejected_login_keeps_session_anonymous() {
    let sandbox = Sandbox::new();
    sandbox.register("bob", "right");

    let output = sandbox.run(&["login", "-u", "bob", "-p", "wrong"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid credentials"));

    let output = sandbox.run(&["login", "-u", "nobody", "-p", "right"]);
    assert!(!output.status.success());

    assert_eq!(sandbox.run_json(&["status", "--json"])["state"], "anonymous");
}

#[test]
fn duplicate_registration_fails() {
    let sandbox = Sandbox::new();
    sandbox.register("carol", "pw");

    let output = sandbox.run(&["register", "carol", "--password", "other"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already taken"));
}

#[test]
fn corrupted_session_is_anonymous() {
    let sandbox = Sandbox::new();
    let dir = sandbox.session_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("user"), "{not json").unwrap();

    assert_eq!(sandbox.run_json(&["status", "--json"])["state"], "anonymous");

    let decision = sandbox.run_json(&["navigate", "/dashboard", "--json"]);
    assert_eq!(decision["allowed"], false);
    assert_eq!(decision["redirect"], "/login");

    // Logout clears the bad record.
    sandbox.run_success(&["logout"]);
    assert!(!dir.join("user").exists());
}

#[test]
fn sessions_are_scoped_by_origin() {
    let sandbox = Sandbox::new();
    sandbox.register("dave", "pw");
    sandbox.login("dave", "pw");

    let other = sandbox.run_json(&["--origin", "https://other.example.com", "status", "--json"]);
    assert_eq!(other["state"], "anonymous");

    // Paths on the same origin share the session.
    let same = sandbox.run_json(&["--origin", "http://localhost:4200/profile", "status", "--json"]);
    assert_eq!(same["state"], "authenticated");
}
