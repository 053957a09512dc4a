//! Integration tests for Stockroom.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockroom-integration-tests
//! ```
//!
//! Each test starts its own dashboard on an ephemeral loopback port, backed
//! by a fresh temporary data directory. The HTTP client keeps cookies like a
//! browser but does not follow redirects, so every view transition can be
//! asserted on.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use reqwest::{Client, Response, StatusCode, header};
use stockroom_admin::config::{ConfigError, StockroomConfig};
use stockroom_admin::db::FileStore;
use stockroom_admin::routes;
use stockroom_admin::state::AppState;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Boxed error for test helpers.
pub type TestError = Box<dyn std::error::Error + Send + Sync>;

/// A running dashboard and a client pointed at it.
pub struct TestServer {
    pub client: Client,
    base_url: String,
    data_dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a dashboard over an empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, listener, or client cannot be
    /// created.
    pub async fn start() -> Result<Self, TestError> {
        let data_dir = tempfile::tempdir()?;
        let (base_url, handle) = serve(data_dir.path()).await?;
        let client = browser()?;

        Ok(Self {
            client,
            base_url,
            data_dir,
            handle,
        })
    }

    /// Stop the server and start a new one over the same data directory.
    ///
    /// The new server begins signed out, like any fresh start.
    ///
    /// # Errors
    ///
    /// Returns an error if the new listener cannot be bound.
    pub async fn restart(&mut self) -> Result<(), TestError> {
        self.handle.abort();
        let (base_url, handle) = serve(self.data_dir.path()).await?;
        self.base_url = base_url;
        self.handle = handle;
        Ok(())
    }

    /// Directory holding the server's `users.json` and `inventory.json`.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> Result<Response, TestError> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// `POST path` with a URL-encoded form body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Response, TestError> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Render `/` and return the page body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn home(&self) -> Result<String, TestError> {
        Ok(self.get("/").await?.text().await?)
    }

    /// Register `username` and log in as them.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails or either step is rejected.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<(), TestError> {
        let creds = [("username", username), ("password", password)];

        let resp = self.post("/auth/register", &creds).await?;
        expect_redirect_home(&resp)?;
        let resp = self.post("/auth/login", &creds).await?;
        expect_redirect_home(&resp)?;
        Ok(())
    }

    /// Submit the add-product form.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_product(
        &self,
        name: &str,
        price: &str,
        quantity: &str,
    ) -> Result<Response, TestError> {
        let description = format!("{name} description");
        self.post(
            "/products",
            &[
                ("name", name),
                ("description", &description),
                ("category", "General"),
                ("price", price),
                ("quantity", quantity),
            ],
        )
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Fail unless `resp` is a `303 See Other` to `/`.
///
/// # Errors
///
/// Returns a description of the unexpected response.
pub fn expect_redirect_home(resp: &Response) -> Result<(), TestError> {
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok());
    if resp.status() == StatusCode::SEE_OTHER && location == Some("/") {
        Ok(())
    } else {
        Err(format!("expected redirect to /, got {} {location:?}", resp.status()).into())
    }
}

/// A client with its own, empty cookie jar that does not follow redirects.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn browser() -> Result<Client, TestError> {
    Ok(Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

fn test_config(data_dir: &Path) -> Result<StockroomConfig, ConfigError> {
    let data_dir = data_dir.to_string_lossy().into_owned();
    StockroomConfig::from_lookup(|key| match key {
        "STOCKROOM_PORT" => Some("0".to_owned()),
        "STOCKROOM_DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    })
}

async fn serve(data_dir: &Path) -> Result<(String, JoinHandle<()>), TestError> {
    let config = test_config(data_dir)?;
    let store = FileStore::open(&config.data_dir)?;
    let addr = config.socket_addr();
    let app = routes::app(AppState::new(config, Arc::new(store)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local: SocketAddr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            panic!("test server failed: {e}");
        }
    });

    Ok((format!("http://{local}"), handle))
}
