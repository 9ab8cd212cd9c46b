use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::{
    config::IAPConfig,
    error::{ApiError, Result},
    models::{common::IAPPlatform, purchase::StorePurchase},
};

/// Platform store able to confirm that a purchase really happened.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Verify `receipt` and return the transaction for `product_id`
    async fn verify_purchase(
        &self,
        platform: IAPPlatform,
        receipt: &str,
        product_id: &str,
    ) -> Result<StorePurchase>;
}

/// Generate a stable fingerprint of a receipt for logs
pub fn hash_receipt(receipt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(receipt.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct AppleStoreClient {
    config: IAPConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AppleReceiptResponse {
    status: i32,
    latest_receipt_info: Option<Vec<AppleTransaction>>,
    receipt: Option<AppleReceipt>,
}

#[derive(Debug, Deserialize)]
struct AppleReceipt {
    #[serde(default)]
    in_app: Vec<AppleTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
struct AppleTransaction {
    transaction_id: String,
    original_transaction_id: Option<String>,
    product_id: String,
    purchase_date_ms: Option<String>,
    expires_date_ms: Option<String>,
    #[serde(default)]
    cancellation_date_ms: Option<String>,
}

impl AppleStoreClient {
    pub fn new(config: &IAPConfig) -> Self {
        Self {
            config: config.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> &'static str {
        match self.config.apple_environment.as_str() {
            "production" => "https://buy.itunes.apple.com/verifyReceipt",
            _ => "https://sandbox.itunes.apple.com/verifyReceipt",
        }
    }

    async fn verify_apple_receipt(&self, receipt: &str, product_id: &str) -> Result<StorePurchase> {
        let request_body = serde_json::json!({
            "receipt-data": receipt,
            "password": self.config.apple_shared_secret,
            "exclude-old-transactions": true,
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ApiError::Store(format!("Failed to reach App Store: {}", e)))?;

        let apple_response: AppleReceiptResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidReceipt(format!("Invalid response format: {}", e)))?;

        let purchase = purchase_from_response(apple_response, product_id)?;

        info!(
            "Verified Apple purchase: product_id={}, transaction_id={}",
            purchase.product_id, purchase.transaction_id
        );

        Ok(purchase)
    }
}

#[async_trait]
impl StoreClient for AppleStoreClient {
    #[instrument(skip(self, receipt))]
    async fn verify_purchase(
        &self,
        platform: IAPPlatform,
        receipt: &str,
        product_id: &str,
    ) -> Result<StorePurchase> {
        match platform {
            IAPPlatform::Apple => self.verify_apple_receipt(receipt, product_id).await,
            IAPPlatform::Google => {
                // TODO: verify through the Google Play Developer API (purchases.subscriptionsv2)
                warn!("Google IAP verification not yet implemented");
                Err(ApiError::InvalidReceipt(
                    "Google IAP verification not yet implemented".to_string(),
                ))
            }
        }
    }
}

fn purchase_from_response(response: AppleReceiptResponse, product_id: &str) -> Result<StorePurchase> {
    if response.status != 0 {
        return Err(ApiError::InvalidReceipt(format!(
            "Invalid receipt status: {}",
            response.status
        )));
    }

    // Subscriptions report in latest_receipt_info; fall back to the receipt body
    let transactions = response
        .latest_receipt_info
        .filter(|txns| !txns.is_empty())
        .or_else(|| response.receipt.map(|r| r.in_app))
        .unwrap_or_default();

    let transaction = latest_transaction(&transactions, product_id).ok_or_else(|| {
        ApiError::InvalidReceipt(format!("Receipt has no transaction for {}", product_id))
    })?;

    if transaction.cancellation_date_ms.is_some() {
        return Err(ApiError::InvalidReceipt(format!(
            "Transaction {} was cancelled",
            transaction.transaction_id
        )));
    }

    let purchased_at = transaction
        .purchase_date_ms
        .as_deref()
        .and_then(parse_ms)
        .ok_or_else(|| ApiError::InvalidReceipt("Missing purchase date".to_string()))?;

    Ok(StorePurchase {
        transaction_id: transaction.transaction_id.clone(),
        original_transaction_id: transaction.original_transaction_id.clone(),
        product_id: transaction.product_id.clone(),
        platform: IAPPlatform::Apple,
        purchased_at,
        expires_at: transaction.expires_date_ms.as_deref().and_then(parse_ms),
    })
}

/// Most recent transaction for `product_id`
fn latest_transaction<'a>(
    transactions: &'a [AppleTransaction],
    product_id: &str,
) -> Option<&'a AppleTransaction> {
    transactions
        .iter()
        .filter(|t| t.product_id == product_id)
        .max_by_key(|t| {
            t.purchase_date_ms
                .as_deref()
                .and_then(|ms| ms.parse::<i64>().ok())
                .unwrap_or_default()
        })
}

fn parse_ms(ms: &str) -> Option<time::OffsetDateTime> {
    ms.parse::<i64>()
        .ok()
        .and_then(|ts_ms| time::OffsetDateTime::from_unix_timestamp(ts_ms / 1000).ok())
}
