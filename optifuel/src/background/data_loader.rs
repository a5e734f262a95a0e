use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use optifuel_ai::types::ChatMessage;
use optifuel_ai::{AiError, Client, DEFAULT_VOICE, with_retry};
use tokio::sync::mpsc;

use crate::events::DataEvent;
use crate::fixtures;
use crate::models::UserProfile;
use crate::payments::{self, PREMIUM_PRICE_KES};

/// Pacing delays so the fixture-backed fetchers still exercise loading
/// indicators the way a real backend would.
const PLAN_DELAY: Duration = Duration::from_secs(3);
const DELIVERY_FETCH_DELAY: Duration = Duration::from_millis(1500);
/// Success screens dismiss themselves after this long.
const AUTO_CLOSE_DELAY: Duration = Duration::from_secs(3);

const ASSISTANT_SYSTEM_INSTRUCTION: &str = "You are OptiFuel, a friendly and knowledgeable \
    sports nutrition assistant for track-and-field athletes. Answer questions concisely and \
    accurately. If asked about supplements, advise consulting a certified doctor or \
    nutritionist before use.";

/// Runs the slow work off the UI loop and reports back over the data
/// channel. The AI client is absent when no API key is configured; every
/// AI-backed path then degrades to fixtures or an in-place error.
#[derive(Clone)]
pub struct DataLoader {
    pub ai_client: Option<Arc<Client>>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(ai_client: Option<Arc<Client>>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { ai_client, data_tx }
    }

    pub async fn load_nutrition_plan(&self, profile: UserProfile) {
        tracing::info!(sport = ?profile.sport, diet = ?profile.dietary_restrictions.diet, "loading nutrition plan");
        tokio::time::sleep(PLAN_DELAY).await;
        let plan = fixtures::plan_for(profile.sport, profile.dietary_restrictions.diet).clone();
        let _ = self.data_tx.send(DataEvent::PlanLoaded { plan });
    }

    /// Fetches delivery options for a meal. A failed lookup degrades to an
    /// empty list rather than an error surface.
    pub async fn load_delivery_options(&self, generation: u64, meal_name: String, area: String) {
        tracing::info!(meal_name, area, "loading delivery options");
        tokio::time::sleep(DELIVERY_FETCH_DELAY).await;
        let options = fixtures::delivery_options_for(&meal_name, &area);
        tracing::debug!(count = options.len(), "delivery options resolved");
        let _ = self.data_tx.send(DataEvent::DeliveryOptionsLoaded {
            generation,
            options,
        });
    }

    pub async fn submit_delivery_payment(&self, generation: u64, phone_number: String, amount: u32) {
        let response = payments::initiate_stk_push(&phone_number, amount).await;
        tracing::info!(success = response.success, "delivery payment completed");
        let _ = self.data_tx.send(DataEvent::DeliveryPaymentCompleted {
            generation,
            success: response.success,
        });
        if response.success {
            tokio::time::sleep(AUTO_CLOSE_DELAY).await;
            let _ = self.data_tx.send(DataEvent::DeliveryAutoClose { generation });
        }
    }

    pub async fn submit_upgrade_payment(&self, generation: u64, phone_number: String) {
        let response = payments::initiate_stk_push(&phone_number, PREMIUM_PRICE_KES).await;
        tracing::info!(success = response.success, "upgrade payment completed");
        let _ = self.data_tx.send(DataEvent::UpgradeCompleted {
            generation,
            success: response.success,
        });
        if response.success {
            tokio::time::sleep(AUTO_CLOSE_DELAY).await;
            let _ = self.data_tx.send(DataEvent::UpgradeAutoClose { generation });
        }
    }

    /// Event-day guidance: generated by the AI service for premium users
    /// with a configured client, otherwise served from fixtures.
    pub async fn load_event_recommendations(
        &self,
        profile: UserProfile,
        event_name: String,
        event_date: String,
        location: Option<(f64, f64)>,
    ) {
        let client = match &self.ai_client {
            Some(client) if profile.is_premium() => client.clone(),
            _ => {
                let categories = fixtures::event_recommendations().to_vec();
                let _ = self
                    .data_tx
                    .send(DataEvent::EventRecommendationsLoaded { categories });
                return;
            }
        };
        let location_line = match location {
            Some((lat, lon)) => format!("The athlete is currently near {lat:.4}, {lon:.4}."),
            None => "The athlete's location is unknown.".to_string(),
        };
        let prompt = format!(
            "An athlete competing in {} has the event \"{}\" on {}. {} They weigh {:.0} kg. \
             Give race-day nutrition, hydration and recovery guidance grouped under short \
             headed sections.",
            profile.sport.label(),
            event_name,
            event_date,
            location_line,
            profile.weight_kg,
        );

        let result = with_retry(|| client.generate_content(&prompt, None)).await;
        let event = match result {
            Ok(text) => DataEvent::EventGuidanceLoaded { text },
            Err(AiError::RateLimited) => DataEvent::EventRecommendationsFailed {
                error_key: "rateLimitError",
            },
            Err(e) => {
                tracing::error!("event guidance failed: {e}");
                DataEvent::EventRecommendationsFailed {
                    error_key: "aiError",
                }
            }
        };
        let _ = self.data_tx.send(event);
    }

    pub async fn send_chat_message(&self, history: Vec<ChatMessage>, message: String) {
        let Some(client) = self.ai_client.clone() else {
            let _ = self.data_tx.send(DataEvent::ChatFailed {
                error_key: "aiError",
            });
            return;
        };

        let result = with_retry(|| {
            client.send_chat_message(ASSISTANT_SYSTEM_INSTRUCTION, &history, &message)
        })
        .await;
        let event = match result {
            Ok(text) => DataEvent::ChatResponseReceived { text },
            Err(AiError::RateLimited) => DataEvent::ChatFailed {
                error_key: "rateLimitError",
            },
            Err(e) => {
                tracing::error!("chat message failed: {e}");
                DataEvent::ChatFailed {
                    error_key: "aiError",
                }
            }
        };
        let _ = self.data_tx.send(event);
    }

    /// Synthesizes the nutritionist tip and writes it out as a WAV file,
    /// since a terminal has nowhere to play audio.
    pub async fn speak_tip(&self, tip: String) {
        let Some(client) = self.ai_client.clone() else {
            let _ = self.data_tx.send(DataEvent::TipAudioFailed);
            return;
        };

        let text = format!("Say with a calm and encouraging tone: {tip}");
        let result = with_retry(|| client.generate_speech(&text, DEFAULT_VOICE)).await;
        let event = match result {
            Ok(samples) => match write_tip_wav(&samples) {
                Ok(path) => DataEvent::TipAudioSaved { path },
                Err(e) => {
                    tracing::error!("failed to write tip audio: {e}");
                    DataEvent::TipAudioFailed
                }
            },
            Err(e) => {
                tracing::error!("speech synthesis failed: {e}");
                DataEvent::TipAudioFailed
            }
        };
        let _ = self.data_tx.send(event);
    }
}

const SPEECH_SAMPLE_RATE: u32 = 24_000;

fn write_tip_wav(samples: &[i16]) -> std::io::Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("optifuel");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!(
        "tip-{}.wav",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));
    std::fs::write(&path, wav_bytes(samples, SPEECH_SAMPLE_RATE))?;
    Ok(path)
}

/// Minimal mono 16-bit PCM WAV container.
fn wav_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_describes_the_payload() {
        let bytes = wav_bytes(&[0, 1, -1], 24_000);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + 6);
        assert_eq!(u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]), 6);
    }
}
