//! Try-on API response types.

use serde::{Deserialize, Serialize};

/// Successful response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub data: Option<ApiData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData {
    #[serde(default)]
    pub result_img_url: Option<String>,
    #[serde(default)]
    pub mask_img_url: Option<String>,
}

/// Image URLs returned by a successful call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TryOnOutput {
    pub result_image_url: Option<String>,
    pub mask_image_url: Option<String>,
}

impl From<ApiResponse> for TryOnOutput {
    fn from(response: ApiResponse) -> Self {
        let data = response.data.unwrap_or_default();
        Self {
            result_image_url: data.result_img_url,
            mask_image_url: data.mask_img_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"data":{"resultImgUrl":"https://cdn/r.png","maskImgUrl":"https://cdn/m.png"}}"#,
        )
        .unwrap();
        let output = TryOnOutput::from(response);
        assert_eq!(output.result_image_url.as_deref(), Some("https://cdn/r.png"));
        assert_eq!(output.mask_image_url.as_deref(), Some("https://cdn/m.png"));
    }

    #[test]
    fn test_parse_missing_fields() {
        let output = TryOnOutput::from(serde_json::from_str::<ApiResponse>(r#"{"data":{}}"#).unwrap());
        assert_eq!(output, TryOnOutput::default());

        let output = TryOnOutput::from(serde_json::from_str::<ApiResponse>("{}").unwrap());
        assert_eq!(output, TryOnOutput::default());

        let output =
            TryOnOutput::from(serde_json::from_str::<ApiResponse>(r#"{"data":null}"#).unwrap());
        assert_eq!(output, TryOnOutput::default());
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"code":200,"msg":"ok","data":{"resultImgUrl":"X","taskId":"t1"}}"#,
        )
        .unwrap();
        assert_eq!(TryOnOutput::from(response).result_image_url.as_deref(), Some("X"));
    }
}
