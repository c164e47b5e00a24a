//! [`AI`] implementation backed by [`ai_client::AiClient`].

use async_trait::async_trait;

use crate::error::ClassifyResult;
use crate::traits::ai::AI;

#[async_trait]
impl AI for ai_client::AiClient {
    async fn complete(&self, prompt: &str) -> ClassifyResult<String> {
        Ok(ai_client::AiClient::complete(self, prompt).await?)
    }

    fn default_batch_size(&self) -> usize {
        self.format().default_batch_size()
    }
}
