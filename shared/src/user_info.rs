use serde::{Serialize, Deserialize};

/// Identifies a browsing session well enough to key its mirrored counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisitorInfo {
    pub session_key: String,
    pub ip: String,
}

pub fn generate_server_fingerprint(ip: &str, user_agent: Option<&str>) -> String {
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine;
    use sha2::{Sha256, Digest};

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    if let Some(ua) = user_agent {
        hasher.update(ua.as_bytes());
    }
    URL_SAFE.encode(hasher.finalize())
}

#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for VisitorInfo {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let ip = headers.get_one("X-Real-IP")
                .or_else(|| headers.get_one("X-Forwarded-For"))
                .map(str::to_string)
                .or_else(|| req.client_ip().map(|ip| ip.to_string()))
                .unwrap_or_else(|| "0.0.0.0".to_string());

            let user_agent = headers.get_one("User-Agent");
            let session_key = generate_server_fingerprint(&ip, user_agent);

            Outcome::Success(VisitorInfo { session_key, ip })
        }
    }
}
