use crate::{
    info,
    management::TokenManager,
    spotify::{
        self,
        playlist::{PlaylistHandle, WRITE_CHUNK_SIZE},
    },
    success, utils, warning,
};

/// What to do with tracks already present in a target playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    Ask,
    Clear,
    Keep,
}

impl ClearMode {
    pub fn from_flags(clear: bool, keep: bool) -> Self {
        match (clear, keep) {
            (true, _) => ClearMode::Clear,
            (false, true) => ClearMode::Keep,
            (false, false) => ClearMode::Ask,
        }
    }

    fn should_clear(self) -> bool {
        match self {
            ClearMode::Clear => true,
            ClearMode::Keep => false,
            ClearMode::Ask => {
                utils::confirm("Do you want to clear existing playlists before adding?")
            }
        }
    }
}

/// A playlist to fill and the uris that go into it.
pub struct Target<'a> {
    pub name: &'a str,
    pub description: String,
    pub uris: Vec<String>,
}

/// Resolves every target playlist, optionally clears them, then adds the uris.
///
/// Failing to resolve a playlist is returned as an error; failures while
/// clearing or adding a chunk are reported as warnings and skipped.
pub async fn write_targets(
    token_mgr: &mut TokenManager,
    user_id: &str,
    targets: &[Target<'_>],
    mode: ClearMode,
) -> Result<(), spotify::SpotifyError> {
    info!("Setting up playlists...");
    let mut handles: Vec<PlaylistHandle> = Vec::new();
    for target in targets {
        let handle =
            spotify::playlist::get_or_create(token_mgr, user_id, target.name, &target.description)
                .await?;
        match &handle {
            PlaylistHandle::Existing(_) => info!("Found existing playlist: {}", target.name),
            PlaylistHandle::Created(_) => success!("Created new playlist: {}", target.name),
        }
        handles.push(handle);
    }

    let any_existing = handles
        .iter()
        .any(|h| matches!(h, PlaylistHandle::Existing(_)));
    if any_existing && mode.should_clear() {
        for (handle, target) in handles.iter().zip(targets) {
            match spotify::playlist::clear(token_mgr, handle.id()).await {
                Ok(0) => {}
                Ok(removed) => info!("Cleared {} existing tracks from {}", removed, target.name),
                Err(e) => warning!("Could not clear playlist {}: {}", target.name, e),
            }
        }
    }

    for (handle, target) in handles.iter().zip(targets) {
        add_in_chunks(token_mgr, handle.id(), target).await;
    }

    Ok(())
}

async fn add_in_chunks(token_mgr: &mut TokenManager, playlist_id: &str, target: &Target<'_>) {
    if target.uris.is_empty() {
        info!("No tracks to add to {}", target.name);
        return;
    }

    info!("Adding {} tracks to {}...", target.uris.len(), target.name);
    let total = utils::chunk_count(target.uris.len(), WRITE_CHUNK_SIZE);
    for (i, chunk) in target.uris.chunks(WRITE_CHUNK_SIZE).enumerate() {
        match spotify::playlist::add_tracks(token_mgr, playlist_id, chunk).await {
            Ok(_) => info!("Added chunk {}/{} ({} tracks)", i + 1, total, chunk.len()),
            Err(e) => warning!("Error adding chunk {}/{}: {}", i + 1, total, e),
        }
    }
}
