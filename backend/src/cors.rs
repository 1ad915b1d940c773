use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};
use rocket::http::Header;

/// Lets a dev frontend on another port (trunk serve) call the API.
pub struct Cors {
    origin_prefix: String,
}

impl Cors {
    pub fn new(origin_prefix: impl Into<String>) -> Self {
        Self { origin_prefix: origin_prefix.into() }
    }

    fn allows(&self, origin: &str) -> bool {
        !self.origin_prefix.is_empty() && origin.starts_with(&self.origin_prefix)
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let Some(origin) = req.headers().get_one("Origin") else { return };

        if self.allows(origin) {
            res.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
            res.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
            res.set_header(Header::new("Access-Control-Max-Age", "86400"));
        }
    }
}
