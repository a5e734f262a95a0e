mod error;
mod retry;
pub mod types;

pub use crate::error::AiError;
pub use crate::retry::with_retry;
use crate::types::{
    ChatMessage, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    PrebuiltVoiceConfig, Role, SpeechConfig, VoiceConfig, decode_pcm16,
};
use secrecy::{ExposeSecret, SecretString};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";

pub struct Client {
    http: reqwest::Client,
    api_key: SecretString,
}

impl Client {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Builds a client from `GEMINI_API_KEY`. `None` when the variable is
    /// unset, which callers treat as offline mode.
    pub fn from_env() -> Option<Self> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|key| Self::new(key.into()))
    }

    async fn send(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let url = format!("{BASE_URL}/models/{model}:generateContent");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error::classify_failure(status, &body))
        }
    }

    pub async fn generate_content(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Role::User, prompt)],
            system_instruction: system_instruction.map(Content::system),
            generation_config: None,
        };
        self.send(TEXT_MODEL, &request).await?.into_text()
    }

    /// Sends one chat turn with the full prior history. The reply is the
    /// model's text; the caller owns appending both sides to its history.
    pub async fn send_chat_message(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AiError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| Content::text(m.role, m.text.clone()))
            .collect();
        contents.push(Content::text(Role::User, message));
        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(system_instruction)),
            generation_config: None,
        };
        self.send(TEXT_MODEL, &request).await?.into_text()
    }

    /// Synthesizes `text` to 16-bit PCM samples at the service's native
    /// 24 kHz sample rate.
    pub async fn generate_speech(&self, text: &str, voice: &str) -> Result<Vec<i16>, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Role::User, text)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_string(),
                        },
                    },
                }),
            }),
        };
        let data = self.send(SPEECH_MODEL, &request).await?.into_inline_data()?;
        decode_pcm16(&data)
    }
}
