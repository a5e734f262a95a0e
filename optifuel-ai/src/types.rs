use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.as_str().to_string()),
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn into_text(self) -> Result<String, AiError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            Err(AiError::EmptyResponse)
        } else {
            Ok(text)
        }
    }

    /// Base64 payload of the first inline-data part of the first candidate.
    pub fn into_inline_data(self) -> Result<String, AiError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.inline_data))
            .map(|d| d.data)
            .ok_or(AiError::EmptyResponse)
    }
}

/// Who authored a chat turn, in the service's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Decodes base64-encoded 16-bit little-endian PCM into samples. A
/// trailing odd byte is dropped.
pub fn decode_pcm16(data: &str) -> Result<Vec<i16>, AiError> {
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| AiError::Api(reqwest::StatusCode::OK, format!("invalid audio data: {e}")))?;
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "Hydrate "}, {"text": "well."}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "Hydrate well.");
    }

    #[test]
    fn empty_candidates_are_an_error() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(response.into_text(), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn pcm_decode_is_little_endian() {
        // [0x01, 0x02, 0xff, 0x7f] -> [0x0201, 0x7fff]
        let encoded = STANDARD.encode([0x01u8, 0x02, 0xff, 0x7f]);
        let samples = decode_pcm16(&encoded).unwrap();
        assert_eq!(samples, vec![0x0201, i16::MAX]);
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Role::User, "hi")],
            system_instruction: Some(Content::system("be brief")),
            generation_config: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"systemInstruction\""));
        assert!(!json.contains("\"generationConfig\""));
    }
}
