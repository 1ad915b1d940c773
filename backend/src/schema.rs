/// Transaction-scoped advisory lock taken before any DDL.
pub const LOCK_SCHEMA: &str = "SELECT pg_advisory_xact_lock($1)";
pub const SCHEMA_LOCK_KEY: i64 = 0x766f_7465_735f_696e;

pub const CREATE_VOTES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS votes (
        id SERIAL PRIMARY KEY,
        item_name VARCHAR(50) UNIQUE NOT NULL,
        vote_count INTEGER DEFAULT 0
    )";

/// Inserts one zeroed row per id in `$1`, leaving existing rows untouched.
pub const SEED_VOTES: &str = "
    INSERT INTO votes (item_name)
    SELECT UNNEST($1::varchar[])
    ON CONFLICT (item_name) DO NOTHING";

pub const SELECT_VOTES: &str =
    "SELECT item_name, vote_count FROM votes WHERE item_name = ANY($1)";

pub const INCREMENT_VOTE: &str = "
    UPDATE votes SET vote_count = COALESCE(vote_count, 0) + 1
    WHERE item_name = $1
    RETURNING vote_count";
