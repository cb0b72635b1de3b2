use crate::capability::chat::{ChatCapability, Health, RequestError};
use crate::worker::Worker;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

impl ChatCapability for Worker {
    async fn check_health(&self) -> Result<Health, RequestError> {
        // The HTTP status is ignored here; only the body decides readiness.
        let body = self
            .reqwest_client
            .get(&self.endpoints.health)
            .send()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?
            .text()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        serde_json::from_str::<Health>(&body).map_err(|err| RequestError::Parse(err.to_string()))
    }

    async fn ask(&self, question: &str) -> Result<String, RequestError> {
        let res = self
            .reqwest_client
            .post(&self.endpoints.chat)
            .header("Content-Type", "application/json")
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let body = res
            .text()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        let answer = serde_json::from_str::<AskResponse>(&body)
            .map_err(|err| RequestError::Parse(err.to_string()))?
            .answer;

        Ok(answer)
    }
}
