use std::collections::HashMap;

use crate::{
    config,
    management::TokenManager,
    types::{AudioFeatures, AudioFeaturesResponse},
    warning,
};

use super::request::send_json;

/// Maximum ids per `/audio-features` request.
pub const FEATURES_BATCH_SIZE: usize = 100;

/// Fetches audio features for the given track ids, keyed by track id.
///
/// A failing batch is reported as a warning and skipped; tracks without
/// features are simply classified without that enrichment.
pub async fn audio_features(
    token_mgr: &mut TokenManager,
    track_ids: &[String],
) -> HashMap<String, AudioFeatures> {
    let mut features = HashMap::new();

    for batch in track_ids.chunks(FEATURES_BATCH_SIZE) {
        let api_url = format!(
            "{uri}/audio-features?ids={ids}",
            uri = &config::spotify_apiurl(),
            ids = batch.join(",")
        );

        match send_json::<AudioFeaturesResponse, _>(token_mgr, |client, token| {
            client.get(&api_url).bearer_auth(token)
        })
        .await
        {
            Ok(response) => {
                for feature in response.audio_features.into_iter().flatten() {
                    features.insert(feature.id.clone(), feature);
                }
            }
            Err(e) => warning!("Could not fetch audio features for batch: {}", e),
        }
    }

    features
}
