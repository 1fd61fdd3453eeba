/// Default Pinata endpoint for pinning a JSON document.
pub const DEFAULT_PIN_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinJSONToIPFS";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Bearer credential for the pinning service. Absence is a per-request
    /// error (uploads are rejected with 500), never a startup failure.
    pub pinata_jwt: Option<String>,
    /// Pinning endpoint. Overridable so tests can point the relay at a mock
    /// server.
    pub pin_endpoint: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let pinata_jwt = std::env::var("PINATA_JWT").ok().filter(|v| !v.is_empty());
    if pinata_jwt.is_none() {
        eprintln!("⚠️  PINATA_JWT is not set — uploads will be rejected until it is configured.");
    }

    Ok(Config {
        port: std::env::var("RELAY_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .unwrap_or(3000),
        pinata_jwt,
        pin_endpoint: std::env::var("PINATA_API_URL")
            .unwrap_or_else(|_| DEFAULT_PIN_ENDPOINT.into()),
    })
}
