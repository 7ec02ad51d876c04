//! Text encoder client for the external embedding service.
//!
//! The encoder (a sentence-transformer model) runs as a separate gRPC
//! service; this crate provides the Rust client for it. It handles:
//! - Connection management to the encoder service
//! - Sending query text and receiving embedding vectors
//! - Response validation and error handling
//!
//! Encoder failures are systemic: there is no partial result to salvage,
//! so they propagate to the caller instead of degrading.

use anyhow::{Context, Result};
use thiserror::Error;
use tonic::transport::Channel;
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod encoder {
    tonic::include_proto!("encoder");
}

use encoder::{EncodeRequest, text_encoder_client::TextEncoderClient as GrpcTextEncoderClient};

/// Errors that can occur when interacting with the encoder service
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Failed to connect to encoder service: {0}")]
    ConnectionError(String),

    #[error("Failed to encode text: {0}")]
    EncodeError(String),

    #[error("Invalid response from encoder service: {0}")]
    InvalidResponse(String),
}

/// Client for the text encoder service.
///
/// Wraps the auto-generated gRPC client. Cloning is cheap (the underlying
/// channel is shared), so callers clone one connected instance per request.
#[derive(Clone)]
pub struct TextEncoderClient {
    client: GrpcTextEncoderClient<Channel>,
    service_addr: String,
}

impl TextEncoderClient {
    /// Connect to the encoder service.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        info!("Connecting to encoder service at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .context("Creating channel from address")?
            .connect()
            .await
            .context("Connecting to encoder service")?;

        let client = GrpcTextEncoderClient::new(channel);
        Ok(TextEncoderClient {
            client,
            service_addr: addr,
        })
    }

    /// Encode free text into an embedding vector.
    ///
    /// The result is deterministic for a given model version, and its
    /// length must match the catalog's embedding dimensionality.
    pub async fn encode(&mut self, text: &str) -> Result<Vec<f32>, EncoderError> {
        debug!("Encoding query text ({} chars)", text.len());

        let request = tonic::Request::new(EncodeRequest {
            text: text.to_string(),
        });

        let response = self.client.encode(request).await.map_err(|e| {
            error!("gRPC error while encoding text: {}", e);
            EncoderError::EncodeError(e.to_string())
        })?;

        let values = response.into_inner().values;

        if values.is_empty() {
            error!("Encoder returned an empty embedding");
            return Err(EncoderError::InvalidResponse(
                "Encoder returned an empty embedding".into(),
            ));
        }
        Ok(values)
    }

    /// Get the address of the encoder service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}
