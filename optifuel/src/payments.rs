//! Simulated M-PESA STK-push gateway. Deterministic: the push succeeds
//! exactly when the number has the sandbox shape (254 prefix, 12 digits).

use std::time::Duration;

pub const PREMIUM_PRICE_KES: u32 = 999;

const GATEWAY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResponse {
    pub success: bool,
    pub message: String,
}

pub async fn initiate_stk_push(phone_number: &str, amount: u32) -> PaymentResponse {
    tracing::info!(phone_number, amount, "initiating simulated STK push");
    tokio::time::sleep(GATEWAY_DELAY).await;

    if phone_number.starts_with("254") && phone_number.len() == 12 {
        PaymentResponse {
            success: true,
            message: "STK push sent successfully.".to_string(),
        }
    } else {
        PaymentResponse {
            success: false,
            message: "Invalid phone number for sandbox.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sandbox_number_succeeds() {
        let response = initiate_stk_push("254712345678", PREMIUM_PRICE_KES).await;
        assert!(response.success);
    }

    #[tokio::test(start_paused = true)]
    async fn local_format_number_fails() {
        let response = initiate_stk_push("0712345678", 650).await;
        assert!(!response.success);
    }
}
