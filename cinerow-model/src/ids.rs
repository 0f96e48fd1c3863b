use crate::error::ModelError;

/// Identifier of a video title, as issued by the metadata provider.
///
/// Preview modal state is keyed by this id, so the same title shown in two
/// rows shares one modal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VideoId(pub u64);

impl VideoId {
    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidId(
                "Video ID cannot be empty".to_string(),
            ));
        }
        trimmed.parse::<u64>().map(VideoId).map_err(|err| {
            ModelError::InvalidId(format!("Video ID `{trimmed}`: {err}"))
        })
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VideoId {
    fn from(value: u64) -> Self {
        VideoId(value)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a slider row within a catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RowId(pub u32);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Identifier of a rendered title card element.
///
/// A card is one mounted item of one row, so the pair is unique even when the
/// same title appears in several rows or is spliced twice into a looping row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId {
    pub row: RowId,
    pub key: String,
}

impl ElementId {
    pub fn new(row: RowId, key: impl Into<String>) -> Self {
        Self {
            row,
            key: key.into(),
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.row, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_id_parses_trimmed_numbers() {
        assert_eq!(VideoId::from_string(" 42 ").unwrap(), VideoId(42));
        assert!(VideoId::from_string("").is_err());
        assert!(VideoId::from_string("abc").is_err());
    }

    #[test]
    fn element_id_display_joins_row_and_key() {
        let id = ElementId::new(RowId(3), "movie-42_appended");
        assert_eq!(id.to_string(), "row-3/movie-42_appended");
    }
}
