use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::ModelError;

/// Kind of title carried by a catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaType {
    /// Feature film
    Movie,
    /// Episodic show
    #[cfg_attr(feature = "serde", serde(alias = "tv"))]
    Show,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Show => "show",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            // TMDB reports shows as `tv`
            "show" | "tv" => Ok(MediaType::Show),
            other => Err(ModelError::InvalidMedia(format!(
                "unknown media type `{other}`"
            ))),
        }
    }
}
