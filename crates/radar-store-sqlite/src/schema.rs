//! SQL schema for the social-radar SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Long-form survey facts: one row per (respondent, archetype) pair.
-- Rewritten wholesale by every rebuild; never updated in place.
CREATE TABLE IF NOT EXISTS survey_facts (
    row_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp  TEXT NOT NULL,
    gender     TEXT NOT NULL,    -- 'female' | 'male' | 'unspecified'
    archetype  TEXT NOT NULL,    -- Archetype label
    traits     TEXT NOT NULL,    -- comma-separated descriptors
    habitats   TEXT NOT NULL     -- comma-separated place strings
);

CREATE TABLE IF NOT EXISTS time_rules (
    row_id          INTEGER PRIMARY KEY AUTOINCREMENT,
    day             TEXT NOT NULL,    -- lowercase day name
    start_hour      REAL NOT NULL,
    end_hour        REAL NOT NULL,
    phase_name      TEXT NOT NULL,
    social_status   TEXT NOT NULL,
    priority_places TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS geo_points (
    row_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    lat      REAL NOT NULL,
    lon      REAL NOT NULL,
    category TEXT NOT NULL
);

-- At most one row: the identity of the rebuild the tables came from.
-- Written in the same transaction as the table contents.
CREATE TABLE IF NOT EXISTS snapshots (
    snapshot_id TEXT PRIMARY KEY,
    rebuilt_at  TEXT NOT NULL,        -- ISO 8601 UTC
    survey_rows INTEGER NOT NULL,
    rule_rows   INTEGER NOT NULL,
    geo_rows    INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS survey_archetype_idx ON survey_facts(archetype);
CREATE INDEX IF NOT EXISTS rules_day_idx        ON time_rules(day);
CREATE INDEX IF NOT EXISTS geo_category_idx     ON geo_points(category);

PRAGMA user_version = 1;
";
