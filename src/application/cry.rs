//! Cry side-load: download the audio asset into a per-session temp directory
//! and hand it to the platform's default opener.

use crate::domain::error::PokedexError;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::sync::OnceLock;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

const CRY_DIR_NAME: &str = "pokedex_cries";

static SESSION_ID: OnceLock<String> = OnceLock::new();

/// `<tmp>/pokedex_cries/<session-uuid>`, fixed for the life of the process.
pub fn session_dir() -> PathBuf {
    let session = SESSION_ID.get_or_init(|| Uuid::new_v4().simple().to_string());
    std::env::temp_dir().join(CRY_DIR_NAME).join(session)
}

/// Lowercase, keep alphanumerics, `-` and `_`; `"pokemon"` if nothing is left.
pub fn sanitize_name(name: &str) -> String {
    let safe: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if safe.is_empty() {
        "pokemon".to_string()
    } else {
        safe
    }
}

pub fn cry_file_name(id: u32, name: &str) -> String {
    format!("{:03}_{}.ogg", id, sanitize_name(name))
}

/// Download and open the cry, returning the written path.
pub async fn play_cry(
    client: &Client,
    cry_url: &str,
    id: u32,
    name: &str,
) -> Result<PathBuf, PokedexError> {
    let path = download_cry(client, cry_url, id, name, &session_dir()).await?;
    open_file(&path)?;
    info!(path = %path.display(), "cry opened");
    Ok(path)
}

pub async fn download_cry(
    client: &Client,
    cry_url: &str,
    id: u32,
    name: &str,
    dir: &Path,
) -> Result<PathBuf, PokedexError> {
    if cry_url.is_empty() {
        return Err(PokedexError::Playback(
            "No cry URL is available for this Pokémon.".to_string(),
        ));
    }

    let res = client
        .get(cry_url)
        .send()
        .await
        .map_err(|e| PokedexError::Playback(format!("Network error while downloading cry: {}", e)))?;

    let status = res.status();
    if !status.is_success() {
        return Err(PokedexError::Playback(format!(
            "HTTP {} while downloading cry.",
            status.as_u16()
        )));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| PokedexError::Playback(format!("Could not create cry directory: {}", e)))?;

    let path = dir.join(cry_file_name(id, name));
    let written = save_stream(res.bytes_stream(), &path).await?;
    debug!(bytes = written, path = %path.display(), "cry downloaded");
    Ok(path)
}

/// Write every chunk of `stream` to `path`. On any error the partial file
/// is removed before the error is returned.
pub async fn save_stream<S, E>(stream: S, path: &Path) -> Result<usize, PokedexError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    let result = write_chunks(stream, path).await;
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(path).await {
            debug!(error = %e, path = %path.display(), "partial cry not removed");
        }
    }
    result
}

async fn write_chunks<S, E>(stream: S, path: &Path) -> Result<usize, PokedexError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    let write_err = |e: std::io::Error| PokedexError::Playback(format!("Could not write cry file: {}", e));

    let mut stream = std::pin::pin!(stream);
    let mut file = File::create(path).await.map_err(write_err)?;
    let mut written = 0usize;
    while let Some(item) = stream.next().await {
        let chunk = item
            .map_err(|e| PokedexError::Playback(format!("Network error while downloading cry: {}", e)))?;
        file.write_all(&chunk).await.map_err(write_err)?;
        written += chunk.len();
    }
    file.flush().await.map_err(write_err)?;
    Ok(written)
}

fn open_file(path: &Path) -> Result<(), PokedexError> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(path);
    spawn_reaped(cmd)?;
    Ok(())
}

/// Spawn `cmd` and wait for it on a blocking task so the child is reaped
/// once it exits.
fn spawn_reaped(mut cmd: Command) -> Result<JoinHandle<std::io::Result<ExitStatus>>, PokedexError> {
    let mut child = cmd
        .spawn()
        .map_err(|e| PokedexError::Playback(format!("Could not open audio player: {}", e)))?;
    Ok(tokio::task::spawn_blocking(move || child.wait()))
}
