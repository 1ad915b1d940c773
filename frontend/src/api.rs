use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{Error, PollInfo, Tally, VoteResponse};
use crate::config::CONFIG;

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response.json::<T>().await
            .map_err(|e| format!("Failed to parse response: {}", e));
    }

    let status = response.status();
    match response.json::<Error>().await {
        Ok(error) => Err(error.message),
        Err(_) => Err(format!("Request failed with status {}", status)),
    }
}

pub async fn fetch_poll() -> Result<PollInfo, String> {
    let response = Request::get(&format!("{}/items", CONFIG.api_base_url))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read(response).await
}

pub async fn fetch_results(refresh: bool) -> Result<Tally, String> {
    let url = if refresh {
        format!("{}/results?refresh=true", CONFIG.api_base_url)
    } else {
        format!("{}/results", CONFIG.api_base_url)
    };
    let response = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    read(response).await
}

pub async fn cast_vote(item: &str) -> Result<VoteResponse, String> {
    let response = Request::post(&format!("{}/items/{}/vote", CONFIG.api_base_url, item))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read(response).await
}
