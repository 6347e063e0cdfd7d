// Thumbnail provider capability and the default HTTP implementation

use std::io::Read;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use once_cell::sync::Lazy;

use castkit_core::ImageSource;

/// Refuse to buffer absurdly large artwork
const MAX_THUMBNAIL_BYTES: u64 = 10 * 1024 * 1024;

/// Outcome of a thumbnail request, marshalled back to the orchestrator
/// thread. `image` is `None` when the fetch failed; the surface then shows
/// its placeholder.
#[derive(Debug, Clone)]
pub struct ThumbnailResult {
    /// URL of the playable item the thumbnail belongs to, for identity
    /// checking against the current item
    pub item_url: String,
    pub image: Option<Vec<u8>>,
}

/// Reply handle a provider uses to deliver results from any thread.
#[derive(Clone, Debug)]
pub struct ThumbnailReply {
    sender: Sender<ThumbnailResult>,
}

impl ThumbnailReply {
    /// Deliver a result; silent if the orchestrator is gone.
    pub fn emit(&self, result: ThumbnailResult) {
        let _ = self.sender.send(result);
    }
}

/// Create the channel pair the orchestrator drains.
pub fn thumbnail_channel() -> (ThumbnailReply, Receiver<ThumbnailResult>) {
    let (sender, receiver) = unbounded();
    (ThumbnailReply { sender }, receiver)
}

/// Opaque image loading capability.
///
/// `request` must not block the calling thread; network fetches run on a
/// background thread and reply through the handle.
pub trait ThumbnailProvider: Send {
    fn request(&self, source: &ImageSource, item_url: &str, reply: ThumbnailReply);
}

static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(30))
        .user_agent("Mozilla/5.0 (compatible; CastkitPlayer/0.1)")
        .redirects(10)
        .build()
});

/// Default provider: in-memory sources resolve immediately, remote URLs
/// are fetched on a background thread with a shared agent.
#[derive(Debug, Default)]
pub struct HttpThumbnailProvider;

impl HttpThumbnailProvider {
    pub fn new() -> Self {
        Self
    }

    fn fetch(url: &str) -> Option<Vec<u8>> {
        let response = match HTTP_AGENT.get(url).call() {
            Ok(response) => response,
            Err(err) => {
                log::debug!("thumbnail fetch failed for {}: {}", url, err);
                return None;
            }
        };
        let mut bytes = Vec::new();
        match response
            .into_reader()
            .take(MAX_THUMBNAIL_BYTES)
            .read_to_end(&mut bytes)
        {
            Ok(_) => Some(bytes),
            Err(err) => {
                log::debug!("thumbnail read failed for {}: {}", url, err);
                None
            }
        }
    }
}

impl ThumbnailProvider for HttpThumbnailProvider {
    fn request(&self, source: &ImageSource, item_url: &str, reply: ThumbnailReply) {
        match source {
            ImageSource::Memory(bytes) => reply.emit(ThumbnailResult {
                item_url: item_url.to_string(),
                image: Some(bytes.clone()),
            }),
            ImageSource::Url(url) => {
                let url = url.clone();
                let item_url = item_url.to_string();
                thread::spawn(move || {
                    let image = Self::fetch(&url);
                    reply.emit(ThumbnailResult { item_url, image });
                });
            }
        }
    }
}
