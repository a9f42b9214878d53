use crate::{config, management::TokenManager, types::CurrentUser};

use super::request::{SpotifyError, send_json};

/// Fetches the profile of the authenticated user.
pub async fn current_user(token_mgr: &mut TokenManager) -> Result<CurrentUser, SpotifyError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());
    send_json(token_mgr, |client, token| client.get(&api_url).bearer_auth(token)).await
}
