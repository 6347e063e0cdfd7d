// Playable item model and thumbnail sources

/// Source of a thumbnail or icon image.
///
/// Items fetched from a feed usually carry a remote URL; hosts embedding
/// local artwork can hand over the encoded bytes directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image, fetched lazily by a thumbnail provider
    Url(String),
    /// Encoded image bytes already in memory
    Memory(Vec<u8>),
}

/// One playable media resource plus its display metadata.
///
/// Identity is the resource URL; two items with the same URL are treated as
/// the same resource by the look-ahead cache. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableItem {
    /// URL of the media resource
    pub url: String,
    /// Optional thumbnail to show while playing audio
    pub thumbnail: Option<ImageSource>,
    /// Optional album/show name
    pub album: Option<String>,
    /// Optional track/episode name
    pub track: Option<String>,
}

impl PlayableItem {
    pub fn new(
        url: impl Into<String>,
        thumbnail: Option<ImageSource>,
        album: Option<String>,
        track: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            thumbnail,
            album,
            track,
        }
    }

    /// Title shown in the surface's title label.
    ///
    /// Falls back to the last path component of the URL (without extension)
    /// when no album name is set.
    pub fn display_title(&self) -> String {
        match (&self.album, &self.track) {
            (Some(album), Some(_)) => album.clone(),
            _ => self.file_stem(),
        }
    }

    /// Description shown below the title, with the same URL fallback.
    pub fn display_description(&self) -> String {
        match (&self.album, &self.track) {
            (Some(_), Some(track)) => track.clone(),
            _ => self.file_stem(),
        }
    }

    /// Whether this item renders video frames rather than static artwork.
    pub fn is_video(&self) -> bool {
        self.url.ends_with(".mp4")
    }

    /// Last path component of the URL without query string or extension.
    fn file_stem(&self) -> String {
        let path = self.url.split(['?', '#']).next().unwrap_or(&self.url);
        let last = path.rsplit('/').next().unwrap_or(path);
        match last.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => last.to_string(),
        }
    }
}
