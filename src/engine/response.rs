//! AI service response and result selection

use serde::Deserialize;

use super::error::SubmitError;
use super::payload::{EncodedImage, sniff};

/// A product the service placed into the room
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RecommendedProduct {
    #[serde(default)]
    pub simulated_image_base64: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// JSON body answered by the AI interior endpoint
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result_image_url: Option<String>,
    #[serde(default)]
    pub edited_image_base64: Option<String>,
    #[serde(default)]
    pub final_image_base64: Option<String>,
    #[serde(default, rename = "recommended_products")]
    pub recommended_products: Vec<RecommendedProduct>,
}

/// The generated room image
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultImage {
    /// Hosted by the service
    Url(String),
    Embedded(EncodedImage),
}

/// A successful generation, ready for display
#[derive(Clone, Debug)]
pub struct AiOutcome {
    /// The edited photo as the service saw it
    pub before: Option<EncodedImage>,
    pub after: ResultImage,
    pub response: AiResponse,
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.trim().is_empty())
}

impl AiResponse {
    /// The after-image: final image, then the first product simulation,
    /// then the hosted URL
    pub fn after_image(&self) -> Option<ResultImage> {
        if let Some(raw) = non_blank(&self.final_image_base64) {
            return Some(ResultImage::Embedded(sniff(raw)));
        }
        if let Some(raw) = self
            .recommended_products
            .first()
            .and_then(|p| non_blank(&p.simulated_image_base64))
        {
            return Some(ResultImage::Embedded(sniff(raw)));
        }
        non_blank(&self.result_image_url).map(|url| ResultImage::Url(url.to_string()))
    }

    pub fn before_image(&self) -> Option<EncodedImage> {
        non_blank(&self.edited_image_base64).map(sniff)
    }

    pub fn into_outcome(self) -> Result<AiOutcome, SubmitError> {
        if !self.success {
            return Err(SubmitError::Rejected {
                message: self.message,
            });
        }
        let Some(after) = self.after_image() else {
            return Err(SubmitError::Malformed(
                "response carries no result image".to_string(),
            ));
        };
        log::debug!(
            "AI result: {} recommended product(s)",
            self.recommended_products.len()
        );
        Ok(AiOutcome {
            before: self.before_image(),
            after,
            response: self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_final_image_wins() {
        let resp = parse(
            r#"{
                "success": true,
                "finalImageBase64": "iVBORw0KGgoFINAL",
                "resultImageUrl": "https://cdn.example/room.png",
                "recommended_products": [{"simulated_image_base64": "/9j/PRODUCT", "name": "Sofa"}]
            }"#,
        );
        let outcome = resp.into_outcome().unwrap();
        match outcome.after {
            ResultImage::Embedded(img) => {
                assert_eq!(img.data_url, "data:image/png;base64,iVBORw0KGgoFINAL")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_product_simulation_then_url() {
        let resp = parse(
            r#"{
                "success": true,
                "finalImageBase64": "",
                "resultImageUrl": "https://cdn.example/room.png",
                "recommended_products": [{"simulated_image_base64": "/9j/PRODUCT", "price": 120000}]
            }"#,
        );
        assert_eq!(
            resp.recommended_products[0].details.get("price"),
            Some(&serde_json::json!(120000))
        );
        match resp.after_image() {
            Some(ResultImage::Embedded(img)) => assert_eq!(img.mime(), "image/jpeg"),
            other => panic!("unexpected {other:?}"),
        }

        let resp = parse(r#"{"success": true, "resultImageUrl": "https://cdn.example/room.png"}"#);
        assert_eq!(
            resp.after_image(),
            Some(ResultImage::Url("https://cdn.example/room.png".to_string()))
        );
    }

    #[test]
    fn test_before_image_from_edited() {
        let resp = parse(
            r#"{"success": true, "editedImageBase64": "iVBORw0KGgoEDIT", "resultImageUrl": "u"}"#,
        );
        let outcome = resp.into_outcome().unwrap();
        assert_eq!(
            outcome.before.unwrap().data_url,
            "data:image/png;base64,iVBORw0KGgoEDIT"
        );
    }

    #[test]
    fn test_unsuccessful_is_rejected() {
        let resp = parse(r#"{"success": false, "message": "No room detected"}"#);
        match resp.into_outcome() {
            Err(SubmitError::Rejected { message }) => {
                assert_eq!(message.as_deref(), Some("No room detected"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_success_flag_is_rejected() {
        assert!(matches!(
            parse(r#"{"resultImageUrl": "u"}"#).into_outcome(),
            Err(SubmitError::Rejected { message: None })
        ));
    }

    #[test]
    fn test_no_after_image_is_malformed() {
        assert!(matches!(
            parse(r#"{"success": true}"#).into_outcome(),
            Err(SubmitError::Malformed(_))
        ));
    }
}
