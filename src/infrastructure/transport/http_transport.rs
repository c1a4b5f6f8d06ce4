use reqwest::Client;

use crate::domain::{PollRequest, Response, Transport};

/// GETs poll targets with a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = Client::new();
        Self { client }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    type Error = reqwest::Error;

    async fn get(&self, request: &PollRequest) -> Result<Response, Self::Error> {
        let PollRequest { url, data } = request;

        let mut builder = self.client.get(url.as_str());
        if let Some(data) = data {
            builder = builder.query(data);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(Response { status, body })
    }
}
