use crate::{
    config,
    management::TokenManager,
    types::{
        AddTracksToPlaylistRequest, CreatePlaylistRequest, Playlist,
        RemoveTracksFromPlaylistRequest, SnapshotResponse, TrackUri,
    },
    utils,
};

use super::{
    request::{SpotifyError, collect_pages, send_json},
    tracks,
};

pub const PLAYLISTS_PAGE_LIMIT: u32 = 50;

/// Maximum items per add/remove request.
pub const WRITE_CHUNK_SIZE: usize = 100;

/// Outcome of [`get_or_create`].
#[derive(Debug, Clone)]
pub enum PlaylistHandle {
    Existing(Playlist),
    Created(Playlist),
}

impl PlaylistHandle {
    pub fn playlist(&self) -> &Playlist {
        match self {
            PlaylistHandle::Existing(p) | PlaylistHandle::Created(p) => p,
        }
    }

    pub fn id(&self) -> &str {
        &self.playlist().id
    }
}

/// Lists every playlist owned or followed by the user.
pub async fn user_playlists(token_mgr: &mut TokenManager) -> Result<Vec<Playlist>, SpotifyError> {
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = PLAYLISTS_PAGE_LIMIT
    );

    let playlists: Vec<Option<Playlist>> = collect_pages(token_mgr, api_url, |_| {}).await?;
    Ok(playlists.into_iter().flatten().collect())
}

pub async fn find_by_name(
    token_mgr: &mut TokenManager,
    name: &str,
) -> Result<Option<Playlist>, SpotifyError> {
    let playlists = user_playlists(token_mgr).await?;
    Ok(playlists.into_iter().find(|p| p.name == name))
}

pub async fn create(
    token_mgr: &mut TokenManager,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<Playlist, SpotifyError> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    send_json(token_mgr, |client, token| {
        client.post(&api_url).bearer_auth(token).json(&body)
    })
    .await
}

/// Returns the playlist with the exact given name, creating it when missing.
pub async fn get_or_create(
    token_mgr: &mut TokenManager,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<PlaylistHandle, SpotifyError> {
    if let Some(existing) = find_by_name(token_mgr, name).await? {
        return Ok(PlaylistHandle::Existing(existing));
    }

    let created = create(token_mgr, user_id, name, description).await?;
    Ok(PlaylistHandle::Created(created))
}

/// Adds up to [`WRITE_CHUNK_SIZE`] track uris to a playlist.
pub async fn add_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, SpotifyError> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = AddTracksToPlaylistRequest {
        uris: uris.to_vec(),
    };

    send_json(token_mgr, |client, token| {
        client.post(&api_url).bearer_auth(token).json(&body)
    })
    .await
}

/// Removes all occurrences of up to [`WRITE_CHUNK_SIZE`] track uris from a playlist.
pub async fn remove_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, SpotifyError> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = RemoveTracksFromPlaylistRequest {
        tracks: uris
            .iter()
            .map(|uri| TrackUri { uri: uri.clone() })
            .collect(),
    };

    send_json(token_mgr, |client, token| {
        client.delete(&api_url).bearer_auth(token).json(&body)
    })
    .await
}

/// Empties a playlist and returns the number of removed tracks.
///
/// Local files cannot be removed through the API and stay in place.
pub async fn clear(token_mgr: &mut TokenManager, playlist_id: &str) -> Result<usize, SpotifyError> {
    let current = tracks::playlist_tracks(token_mgr, playlist_id, |_| {}).await?;
    let uris = utils::writable_uris(&current);

    for chunk in uris.chunks(WRITE_CHUNK_SIZE) {
        remove_tracks(token_mgr, playlist_id, chunk).await?;
    }

    Ok(uris.len())
}
