use serde::Deserialize;

/// One side (`human` or `assistant`) of a turn pair
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub(crate) enum TurnSide {
    Text(String),
    Rich {
        #[serde(default)]
        text: String,
        #[serde(default)]
        images: Vec<ImageSource>,
    },
}

impl TurnSide {
    pub fn text(&self) -> &str {
        match self {
            TurnSide::Text(text) => text,
            TurnSide::Rich { text, .. } => text,
        }
    }

    pub fn images(&self) -> &[ImageSource] {
        match self {
            TurnSide::Text(_) => &[],
            TurnSide::Rich { images, .. } => images,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub(crate) enum ImageSource {
    Url(String),
    Object {
        #[serde(default, alias = "src")]
        url: Option<String>,
        #[serde(default, alias = "file_name")]
        name: Option<String>,
    },
}
