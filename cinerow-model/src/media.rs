use crate::error::ModelError;
use crate::ids::VideoId;
use crate::media_type::MediaType;

/// Reference to an image asset hosted by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Relationship between the signed-in profile and a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserFlags {
    pub liked: bool,
    pub disliked: bool,
    pub in_list: bool,
}

/// One piece of content (movie or show) as delivered by the data layer.
///
/// The catalog core never mutates items; rows and modal entries share them
/// behind `Arc`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    pub id: VideoId,
    pub media_type: MediaType,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop: Option<ImageRef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo: Option<ImageRef>,
    #[cfg_attr(feature = "serde", serde(default, flatten))]
    pub flags: UserFlags,
}

impl MediaItem {
    pub fn new(
        id: VideoId,
        media_type: MediaType,
        title: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModelError::InvalidMedia(format!(
                "title for {media_type} {id} cannot be empty"
            )));
        }
        Ok(Self {
            id,
            media_type,
            title,
            backdrop: None,
            logo: None,
            flags: UserFlags::default(),
        })
    }

    pub fn with_images(
        mut self,
        backdrop: Option<ImageRef>,
        logo: Option<ImageRef>,
    ) -> Self {
        self.backdrop = backdrop;
        self.logo = logo;
        self
    }

    pub fn with_flags(mut self, flags: UserFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Stable render key; unique within a row as long as ids are unique.
    pub fn key(&self) -> String {
        format!("{}-{}", self.media_type, self.id)
    }
}
