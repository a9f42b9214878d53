use std::collections::{HashMap, HashSet};

use crate::{
    config,
    management::TokenManager,
    types::{Artist, SeveralArtistsResponse},
    warning,
};

use super::request::send_json;

/// Maximum ids per `/artists` request.
pub const ARTISTS_BATCH_SIZE: usize = 50;

/// Fetches full artist objects (with genres), keyed by artist id.
///
/// Ids are de-duplicated preserving first occurrence before batching. A
/// failing batch is reported as a warning and skipped.
pub async fn several_artists(
    token_mgr: &mut TokenManager,
    artist_ids: &[String],
) -> HashMap<String, Artist> {
    let unique_ids = unique_in_order(artist_ids);
    let mut artists = HashMap::new();

    for batch in unique_ids.chunks(ARTISTS_BATCH_SIZE) {
        let api_url = format!(
            "{uri}/artists?ids={ids}",
            uri = &config::spotify_apiurl(),
            ids = batch.join(",")
        );

        match send_json::<SeveralArtistsResponse, _>(token_mgr, |client, token| {
            client.get(&api_url).bearer_auth(token)
        })
        .await
        {
            Ok(response) => {
                for artist in response.artists.into_iter().flatten() {
                    artists.insert(artist.id.clone(), artist);
                }
            }
            Err(e) => warning!("Could not fetch artist info for batch: {}", e),
        }
    }

    artists
}

pub fn unique_in_order(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
