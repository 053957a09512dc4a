//! End-to-end tests for registration, login and logout.

use reqwest::StatusCode;
use stockroom_integration_tests::{TestError, TestServer, browser, expect_redirect_home};

#[tokio::test]
async fn test_fresh_start_shows_login() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    let resp = server.get("/").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await?;
    assert!(html.contains("<h2>Login</h2>"));
    assert!(html.contains("Register here"));
    Ok(())
}

#[tokio::test]
async fn test_health() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    let resp = server.get("/health").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await?, "ok");
    Ok(())
}

#[tokio::test]
async fn test_view_toggle() -> Result<(), TestError> {
    let server = TestServer::start().await?;

    expect_redirect_home(&server.get("/auth/register").await?)?;
    assert!(server.home().await?.contains("<h2>Register</h2>"));

    expect_redirect_home(&server.get("/auth/login").await?)?;
    assert!(server.home().await?.contains("<h2>Login</h2>"));
    Ok(())
}

#[tokio::test]
async fn test_register_returns_to_login_with_notice() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    server.get("/auth/register").await?;

    let resp = server
        .post("/auth/register", &[("username", "alice"), ("password", "pw1")])
        .await?;
    expect_redirect_home(&resp)?;

    let html = server.home().await?;
    assert!(html.contains("<h2>Login</h2>"));
    assert!(html.contains("Registration successful. Please log in."));

    // Shown once
    assert!(!server.home().await?.contains("Registration successful."));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_rejected() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    let creds = [("username", "alice"), ("password", "pw1")];
    expect_redirect_home(&server.post("/auth/register", &creds).await?)?;

    let resp = server
        .post("/auth/register", &[("username", "alice"), ("password", "other")])
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(resp.text().await?.contains("Username already exists."));

    let users = std::fs::read_to_string(server.data_dir().join("users.json"))?;
    assert_eq!(users.matches("\"username\"").count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_blank_registration_rejected() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    let resp = server
        .post("/auth/register", &[("username", ""), ("password", "pw")])
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!server.data_dir().join("users.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_login_shows_dashboard() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    server.sign_up("alice", "pw1").await?;

    let html = server.home().await?;
    assert!(html.contains("Inventory Dashboard"));
    assert!(html.contains("Login successful!"));
    assert!(html.contains("alice"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_credentials() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    expect_redirect_home(
        &server
            .post("/auth/register", &[("username", "alice"), ("password", "pw1")])
            .await?,
    )?;

    for (username, password) in [("alice", "wrong"), ("nobody", "pw1"), ("Alice", "pw1")] {
        let resp = server
            .post("/auth/login", &[("username", username), ("password", password)])
            .await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let html = resp.text().await?;
        assert!(html.contains("Invalid credentials"));
        assert!(html.contains(&format!("value=\"{username}\"")));
    }

    assert!(server.home().await?.contains("<h2>Login</h2>"));
    Ok(())
}

#[tokio::test]
async fn test_logout() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    server.sign_up("alice", "pw1").await?;

    expect_redirect_home(&server.post("/auth/logout", &[]).await?)?;
    assert!(server.home().await?.contains("<h2>Login</h2>"));

    let resp = server.add_product("Widget", "1", "1").await?;
    expect_redirect_home(&resp)?;
    assert!(!server.data_dir().join("inventory.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_users_survive_restart() -> Result<(), TestError> {
    let mut server = TestServer::start().await?;
    server.sign_up("alice", "pw1").await?;

    server.restart().await?;
    assert!(server.home().await?.contains("<h2>Login</h2>"));

    let resp = server
        .post("/auth/login", &[("username", "alice"), ("password", "pw1")])
        .await?;
    expect_redirect_home(&resp)?;
    Ok(())
}

#[tokio::test]
async fn test_sign_in_does_not_carry_to_other_browsers() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    server.sign_up("alice", "pw1").await?;
    assert!(server.home().await?.contains("Inventory Dashboard"));

    let stranger = browser()?;
    let html = stranger.get(server.url("/")).send().await?.text().await?;
    assert!(html.contains("<h2>Login</h2>"));
    assert!(!html.contains("Inventory Dashboard"));

    let resp = stranger
        .post(server.url("/products"))
        .form(&[
            ("name", "Sneaky"),
            ("description", "d"),
            ("category", "c"),
            ("price", "1"),
            ("quantity", "1"),
        ])
        .send()
        .await?;
    expect_redirect_home(&resp)?;
    assert!(!server.data_dir().join("inventory.json").exists());

    // The first browser is still signed in.
    assert!(server.home().await?.contains("Inventory Dashboard"));
    Ok(())
}

#[tokio::test]
async fn test_logout_only_affects_its_own_browser() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    server.sign_up("alice", "pw1").await?;

    let other = browser()?;
    let resp = other
        .post(server.url("/auth/login"))
        .form(&[("username", "alice"), ("password", "pw1")])
        .send()
        .await?;
    expect_redirect_home(&resp)?;

    expect_redirect_home(&server.post("/auth/logout", &[]).await?)?;
    assert!(server.home().await?.contains("<h2>Login</h2>"));

    let html = other.get(server.url("/")).send().await?.text().await?;
    assert!(html.contains("Inventory Dashboard"));
    Ok(())
}

#[tokio::test]
async fn test_register_while_signed_in_is_ignored() -> Result<(), TestError> {
    let server = TestServer::start().await?;
    server.sign_up("alice", "pw1").await?;

    let resp = server
        .post("/auth/register", &[("username", "bob"), ("password", "pw2")])
        .await?;
    expect_redirect_home(&resp)?;
    assert!(server.home().await?.contains("Inventory Dashboard"));

    let users = std::fs::read_to_string(server.data_dir().join("users.json"))?;
    assert!(!users.contains("bob"));
    Ok(())
}

#[tokio::test]
async fn test_existing_users_file_is_preserved() -> Result<(), TestError> {
    let mut server = TestServer::start().await?;
    std::fs::write(
        server.data_dir().join("users.json"),
        r#"[{"username":"alice","password":"pw"}]"#,
    )?;
    server.restart().await?;

    expect_redirect_home(
        &server
            .post("/auth/register", &[("username", "bob"), ("password", "pw2")])
            .await?,
    )?;

    let users = std::fs::read_to_string(server.data_dir().join("users.json"))?;
    assert!(users.contains(r#"{"username":"alice","password":"pw"}"#));
    assert!(users.contains(r#""username":"bob""#));
    Ok(())
}
