use serde::{Deserialize, Deserializer};
use url::Url;

/// Suffix requesting a 600px-wide poster from the image CDN.
const RESIZED_POSTER_SUFFIX: &str = "._V0_UX600_.jpg";

/// Response body of the Top-250 endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MostPopularMovies {
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    pub items: Vec<MovieRecord>,
}

/// One movie of the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    #[serde(rename = "imDbRating", alias = "rating", deserialize_with = "rating_from_string")]
    pub rating: f64,
    #[serde(rename = "image", alias = "posterURL")]
    pub poster_url: Url,
}

impl MovieRecord {
    /// Poster URL with the CDN size suffix replaced by a 600px variant.
    ///
    /// URLs without a `._` size marker are returned unchanged.
    pub fn resized_poster_url(&self) -> Url {
        let raw = self.poster_url.as_str();
        let Some((base, _)) = raw.split_once("._") else {
            return self.poster_url.clone();
        };
        Url::parse(&format!("{}{}", base, RESIZED_POSTER_SUFFIX)).unwrap_or_else(|_| self.poster_url.clone())
    }
}

/// Ratings arrive as numeric strings; an empty string means "not rated".
fn rating_from_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f64),
        Text(String),
    }

    let rating = match RawRating::deserialize(deserializer)? {
        RawRating::Number(value) => value,
        RawRating::Text(text) if text.trim().is_empty() => return Ok(0.0),
        RawRating::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid rating {:?}", text)))?,
    };
    if !rating.is_finite() {
        return Err(serde::de::Error::custom(format!("invalid rating {}", rating)));
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_top250_item() {
        let json = r#"{
            "id": "tt0111161",
            "rank": "1",
            "title": "The Shawshank Redemption",
            "year": "1994",
            "image": "https://m.media-amazon.com/images/M/MV5BMDFk._V1_UX128_CR0,3,128,176_AL_.jpg",
            "imDbRating": "9.2",
            "imDbRatingCount": "2600000"
        }"#;
        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(movie.title, "The Shawshank Redemption");
        assert_eq!(movie.rating, 9.2);
        assert_eq!(
            movie.resized_poster_url().as_str(),
            "https://m.media-amazon.com/images/M/MV5BMDFk._V0_UX600_.jpg"
        );
    }

    #[test]
    fn test_decode_alternate_field_names() {
        let json = r#"{"title": "Old", "rating": 5.8, "posterURL": "https://example.com/old.jpg"}"#;
        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(movie.rating, 5.8);
        assert_eq!(movie.resized_poster_url().as_str(), "https://example.com/old.jpg");
    }

    #[test]
    fn test_rating_strings() {
        let empty = r#"{"title": "T", "imDbRating": "", "image": "https://example.com/t.jpg"}"#;
        assert_eq!(serde_json::from_str::<MovieRecord>(empty).unwrap().rating, 0.0);

        let garbage = r#"{"title": "T", "imDbRating": "nine", "image": "https://example.com/t.jpg"}"#;
        assert!(serde_json::from_str::<MovieRecord>(garbage).is_err());
    }

    #[test]
    fn test_rating_must_be_finite() {
        for raw in ["NaN", "inf", "-infinity"] {
            let json = format!(
                r#"{{"title": "T", "imDbRating": "{}", "image": "https://example.com/t.jpg"}}"#,
                raw
            );
            assert!(serde_json::from_str::<MovieRecord>(&json).is_err(), "{} accepted", raw);
        }
    }
}
