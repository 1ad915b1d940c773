use rocket::{State, get, post, http::Status, serde::json::Json};
use shared::{CountSource, Item, PollInfo, Tally, VisitorInfo, VoteResponse};
use tracing::{debug, instrument, warn};

use crate::{
    ballot_box::BallotBox,
    config::AppConfig,
    error::{ApiError, ConfigError},
    mirror::SessionMirror,
    store,
};

pub struct AppState {
    pub title: String,
    pub ballot_box: Result<BallotBox, ConfigError>,
    pub mirror: SessionMirror,
}

impl AppState {
    pub fn new(title: impl Into<String>, ballot_box: BallotBox, mirror: SessionMirror) -> Self {
        Self {
            title: title.into(),
            ballot_box: Ok(ballot_box),
            mirror,
        }
    }

    /// A state that answers every API call with the configuration error.
    pub fn misconfigured(title: impl Into<String>, error: ConfigError) -> Self {
        Self {
            title: title.into(),
            ballot_box: Err(error),
            mirror: SessionMirror::disabled(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mirror = if config.session_mirror {
            SessionMirror::new(config.mirror_ttl())
        } else {
            SessionMirror::disabled()
        };

        match store::from_config(config) {
            Ok(store) => Self {
                title: config.title.clone(),
                ballot_box: Ok(BallotBox::new(store, config.items.clone())
                    .with_retry_cooldown(config.connect_timeout())),
                mirror,
            },
            Err(e) => {
                warn!(error = %e, "vote store is not configured; API disabled");
                Self::misconfigured(config.title.clone(), e)
            }
        }
    }

    pub fn ballot_box(&self) -> Result<&BallotBox, ApiError> {
        self.ballot_box.as_ref().map_err(|e| ApiError::Config(e.clone()))
    }

    /// Seeds the store if it has not been seeded yet. A failure discards
    /// every mirrored session so the next read goes back to the store.
    async fn ready(&self) -> Result<&BallotBox, ApiError> {
        let ballot_box = self.ballot_box()?;
        if ballot_box.ensure_initialized().await.is_err() {
            self.mirror.invalidate_all();
        }
        Ok(ballot_box)
    }

    async fn fresh_tally(&self, ballot_box: &BallotBox, session: &str) -> Tally {
        let tally = ballot_box.tally().await;
        if !tally.is_fallback() {
            self.mirror.store(session, tally.counts());
        }
        tally
    }
}

#[get("/items")]
pub async fn list_items(state: &State<AppState>) -> Result<Json<PollInfo>, ApiError> {
    let items: Vec<Item> = state.ballot_box()?.items().to_vec();
    Ok(Json(PollInfo {
        title: state.title.clone(),
        items,
    }))
}

#[instrument(skip(state, visitor))]
#[get("/results?<refresh>")]
pub async fn get_results(
    state: &State<AppState>,
    refresh: Option<bool>,
    visitor: VisitorInfo,
) -> Result<Json<Tally>, ApiError> {
    let ballot_box = state.ready().await?;

    if !refresh.unwrap_or(false) {
        if let Some(counts) = state.mirror.get(&visitor.session_key) {
            debug!("serving mirrored counts");
            return Ok(Json(Tally::from_counts(ballot_box.items(), &counts, CountSource::Session)));
        }
    }

    Ok(Json(state.fresh_tally(ballot_box, &visitor.session_key).await))
}

#[instrument(skip(state, visitor), fields(item = %id, ip = %visitor.ip))]
#[post("/items/<id>/vote")]
pub async fn cast_vote(
    state: &State<AppState>,
    id: &str,
    visitor: VisitorInfo,
) -> Result<Json<VoteResponse>, ApiError> {
    let ballot_box = state.ready().await?;
    let votes = ballot_box.increment(id).await?;

    let tally = if state.mirror.record_vote(&visitor.session_key, id, votes) {
        match state.mirror.get(&visitor.session_key) {
            Some(counts) => Tally::from_counts(ballot_box.items(), &counts, CountSource::Session),
            None => state.fresh_tally(ballot_box, &visitor.session_key).await,
        }
    } else {
        state.fresh_tally(ballot_box, &visitor.session_key).await
    };

    Ok(Json(VoteResponse {
        item: id.to_string(),
        votes,
        tally,
    }))
}

/// Operator retry: re-seeds the store even if an earlier run succeeded.
#[instrument(skip(state))]
#[post("/init")]
pub async fn initialize(state: &State<AppState>) -> Result<Json<Tally>, ApiError> {
    let ballot_box = state.ballot_box()?;
    if let Err(e) = ballot_box.initialize().await {
        state.mirror.invalidate_all();
        return Err(e.into());
    }
    Ok(Json(ballot_box.tally().await))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
