use std::sync::LazyLock;

use regex::Regex;

/// Pre-rendered resolutions offered by the image provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Thumbnail,
    Small,
    #[default]
    Medium,
    Large,
    Xl,
    Full,
}

impl ImageSize {
    pub fn token(self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "90x90",
            ImageSize::Small => "240x150",
            ImageSize::Medium => "312x231",
            ImageSize::Large => "480x360",
            ImageSize::Xl => "556x370",
            ImageSize::Full => "636x393",
        }
    }

    pub fn width(self) -> u32 {
        self.token()
            .split('x')
            .next()
            .and_then(|w| w.parse().ok())
            .unwrap_or(0)
    }
}

static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+x\d+").expect("size token pattern is valid"));

/// Swap the first `WIDTHxHEIGHT` token in `url` for `size_token`.
///
/// URLs without a token pass through unchanged; an absent or empty URL
/// yields `None`.
pub fn resolve_image_url(url: Option<&str>, size_token: &str) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    Some(SIZE_TOKEN.replace(url, regex::NoExpand(size_token)).into_owned())
}

/// Responsive `srcset` over the medium..full tiers. Empty for absent input.
pub fn image_srcset(url: Option<&str>) -> String {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return String::new();
    };
    [ImageSize::Medium, ImageSize::Large, ImageSize::Xl, ImageSize::Full]
        .into_iter()
        .filter_map(|size| {
            resolve_image_url(Some(url), size.token()).map(|u| format!("{u} {}w", size.width()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
