use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{info, spotify, types::PkceToken};

/// Authorizes playsort against the Spotify account in the browser.
///
/// The token lands in the cache read by `vibe` and `cultura`.
pub async fn auth() {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    info!("Authorizing playsort with your Spotify account...");
    spotify::auth::auth(shared_state).await;
}
