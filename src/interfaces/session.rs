//! Background dispatch for the presentation loop.
//!
//! Each request runs on its own tokio task. Results come back as [`Event`]s
//! over an unbounded channel; the loop applies them in arrival order. Nothing
//! is cancelled, so a slow lookup for an earlier selection can still arrive
//! after a newer one.

use crate::application::cry::play_cry;
use crate::domain::error::PokedexError;
use crate::domain::model::{ImageBytes, RecordDetail, RosterEntry};
use crate::state::AppState;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A loaded record plus its sprite, if the sprite could be fetched.
#[derive(Debug, Clone)]
pub struct LoadedDetail {
    pub detail: Arc<RecordDetail>,
    pub image: Option<ImageBytes>,
}

#[derive(Debug)]
pub enum Event {
    Roster(Result<Arc<Vec<RosterEntry>>, PokedexError>),
    Detail {
        id: u32,
        result: Result<LoadedDetail, PokedexError>,
    },
    Cry {
        id: u32,
        result: Result<PathBuf, PokedexError>,
    },
}

#[derive(Clone)]
pub struct Dispatcher {
    state: AppState,
    tx: UnboundedSender<Event>,
}

impl Dispatcher {
    pub fn channel(state: AppState) -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        (Self { state, tx }, rx)
    }

    /// Run `work` on its own task and post its outcome. A panicking unit is
    /// reported as [`PokedexError::Task`] instead of taking the loop down.
    fn spawn_unit<T, F, W>(&self, work: F, wrap: W) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, PokedexError>> + Send + 'static,
        W: FnOnce(Result<T, PokedexError>) -> Event + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(work).await {
                Ok(result) => result,
                Err(e) => Err(PokedexError::Task(e.to_string())),
            };
            if tx.send(wrap(result)).is_err() {
                debug!("presentation loop gone, dropping result");
            }
        })
    }

    pub fn request_roster(&self) -> JoinHandle<()> {
        let client = self.state.client.clone();
        self.spawn_unit(async move { client.get_roster().await }, Event::Roster)
    }

    /// Resolve the record for `id`, then its sprite. A sprite failure is
    /// logged and leaves `image` empty; the record still loads.
    pub fn request_detail(&self, id: u32) -> JoinHandle<()> {
        let client = self.state.client.clone();
        self.spawn_unit(
            async move {
                let detail = client.get_detail(id).await?;
                let image = match detail.image_url.as_deref() {
                    Some(url) => match client.get_image_bytes(url).await {
                        Ok(bytes) => Some(bytes),
                        Err(e) => {
                            warn!(id, error = %e, "sprite unavailable");
                            None
                        }
                    },
                    None => None,
                };
                Ok(LoadedDetail { detail, image })
            },
            move |result| Event::Detail { id, result },
        )
    }

    pub fn request_cry(&self, detail: &RecordDetail) -> JoinHandle<()> {
        let http_client = self.state.http_client.clone();
        let id = detail.id;
        let name = detail.name.clone();
        let cry_url = detail.cry_url.clone().unwrap_or_default();
        self.spawn_unit(
            async move { play_cry(&http_client, &cry_url, id, &name).await },
            move |result| Event::Cry { id, result },
        )
    }
}
