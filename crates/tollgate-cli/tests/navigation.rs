//! Route guard behaviour through the CLI.

mod common;

use common::Sandbox;

fn navigate(sandbox: &Sandbox, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["navigate"];
    full.extend_from_slice(args);
    full.push("--json");
    sandbox.run_json(&full)
}

#[test]
fn anonymous_visitor() {
    let sandbox = Sandbox::new();

    for path in ["/dashboard", "/profile", "/weather", "/layout", "/layout/profile"] {
        let decision = navigate(&sandbox, &[path]);
        assert_eq!(decision["allowed"], false, "{path}");
        assert_eq!(decision["redirect"], "/login", "{path}");
        assert_eq!(decision["class"], "protected", "{path}");
    }

    for path in ["/login", "/register", "/", "/mainpage", "/unknown"] {
        let decision = navigate(&sandbox, &[path]);
        assert_eq!(decision["allowed"], true, "{path}");
        assert!(decision["redirect"].is_null(), "{path}");
    }
}

#[test]
fn signed_in_user() {
    let sandbox = Sandbox::new();
    sandbox.register("alice", "pw");
    sandbox.login("alice", "pw");

    let decision = navigate(&sandbox, &["/login", "--from", "/profile"]);
    assert_eq!(decision["allowed"], false);
    assert_eq!(decision["redirect"], "/dashboard");

    let decision = navigate(&sandbox, &["/register"]);
    assert_eq!(decision["redirect"], "/dashboard");

    for path in ["/profile", "/dashboard", "/layout/weather", "/", "/mainpage"] {
        let decision = navigate(&sandbox, &[path]);
        assert_eq!(decision["allowed"], true, "{path}");
    }
}

#[test]
fn paths_are_normalized() {
    let sandbox = Sandbox::new();

    let decision = navigate(&sandbox, &["/dashboard/?tab=1"]);
    assert_eq!(decision["target"], "/dashboard");
    assert_eq!(decision["allowed"], false);

    let output = sandbox.run(&["navigate", "dashboard"]);
    assert!(!output.status.success());
}

#[test]
fn text_output_shows_redirect() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_success(&["navigate", "/profile"]);
    assert!(stdout.contains("→ /login"));
    assert!(stdout.contains("protected"));

    let stdout = sandbox.run_success(&["navigate", "/mainpage"]);
    assert!(stdout.contains("Allowed /mainpage"));
}

#[test]
fn config_file_overrides_routes() {
    let sandbox = Sandbox::new();
    let config = sandbox.home.join("routes.json");
    std::fs::write(
        &config,
        r#"{
            "landing_route": "/home",
            "login_route": "/signin",
            "routes": [
                { "path": "/signin", "class": "public-unauthenticated-only" },
                { "path": "/admin*", "class": "protected" }
            ]
        }"#,
    )
    .unwrap();
    let config = config.to_str().unwrap();

    let decision = navigate(&sandbox, &["/admin/users", "--config", config]);
    assert_eq!(decision["redirect"], "/signin");

    // Not in the custom table, so public.
    let decision = navigate(&sandbox, &["/dashboard", "--config", config]);
    assert_eq!(decision["allowed"], true);

    let routes = sandbox.run_json(&["routes", "--json", "--config", config]);
    assert_eq!(routes["landing_route"], "/home");
    assert_eq!(routes["routes"][1]["path"], "/admin*");
}

#[test]
fn default_config_location_is_used() {
    let sandbox = Sandbox::new();
    let dir = sandbox.home.join("config").join("tollgate");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), r#"{ "login_route": "/signin" }"#).unwrap();

    let decision = navigate(&sandbox, &["/dashboard"]);
    assert_eq!(decision["redirect"], "/signin");
}

#[test]
fn missing_config_file_is_an_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["routes", "--config", "/definitely/not/here.json"]);
    assert!(!output.status.success());
}

#[test]
fn routes_lists_default_table() {
    let sandbox = Sandbox::new();
    let routes = sandbox.run_json(&["routes", "--json"]);
    assert_eq!(routes["landing_route"], "/dashboard");
    assert_eq!(routes["login_route"], "/login");

    let rules = routes["routes"].as_array().unwrap();
    assert_eq!(rules.len(), 8);
    assert!(rules.iter().any(|r| r["path"] == "/layout*" && r["class"] == "protected"));
}
