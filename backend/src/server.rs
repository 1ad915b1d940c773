use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use rocket::figment::Figment;
use rocket::http::ContentType;
use rocket::{catchers, routes, Build, Rocket};

use crate::{
    catchers::{bad_request, internal_error, not_found, service_unavailable},
    config::AppConfig,
    cors::Cors,
    routes::{all_options, cast_vote, get_results, initialize, list_items, AppState},
};

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

fn static_asset(path: &Path) -> Option<(ContentType, &'static [u8])> {
    let file = STATIC_DIR.get_file(path)?;
    let content_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ContentType::from_extension)
        .unwrap_or(ContentType::Binary);
    Some((content_type, file.contents()))
}

/// Bundled page and images. Unknown paths fall back to `index.html` so the
/// frontend router can handle them.
#[rocket::get("/<path..>", rank = 20)]
pub async fn spa_handler(path: PathBuf) -> Option<(ContentType, &'static [u8])> {
    static_asset(&path).or_else(|| static_asset(Path::new("index.html")))
}

pub fn build(figment: Figment, config: &AppConfig, state: AppState) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors::new(config.cors_origin_prefix.clone()))
        .manage(state)
        .mount(
            "/api",
            routes![list_items, get_results, cast_vote, initialize, all_options],
        )
        .mount("/", routes![spa_handler])
        .register(
            "/",
            catchers![bad_request, not_found, internal_error, service_unavailable],
        )
}
