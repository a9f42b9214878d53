use crate::{
    config,
    management::TokenManager,
    types::{Track, TrackItem},
};

use super::request::{SpotifyError, collect_pages};

pub const PLAYLIST_PAGE_LIMIT: u32 = 100;
pub const SAVED_TRACKS_PAGE_LIMIT: u32 = 50;

/// Retrieves every track of a playlist, following pagination.
///
/// Items whose track is `null` (removed from the catalogue) are skipped.
/// `on_page` receives the running number of fetched items after each page.
pub async fn playlist_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    on_page: impl FnMut(usize),
) -> Result<Vec<Track>, SpotifyError> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks?limit={limit}",
        uri = &config::spotify_apiurl(),
        id = playlist_id,
        limit = PLAYLIST_PAGE_LIMIT
    );

    let items: Vec<TrackItem> = collect_pages(token_mgr, api_url, on_page).await?;
    Ok(valid_tracks(items))
}

/// Retrieves the user's liked songs, following pagination.
pub async fn saved_tracks(
    token_mgr: &mut TokenManager,
    on_page: impl FnMut(usize),
) -> Result<Vec<Track>, SpotifyError> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = SAVED_TRACKS_PAGE_LIMIT
    );

    let items: Vec<TrackItem> = collect_pages(token_mgr, api_url, on_page).await?;
    Ok(valid_tracks(items))
}

pub fn valid_tracks(items: Vec<TrackItem>) -> Vec<Track> {
    items.into_iter().filter_map(|item| item.track).collect()
}
