//! SQL schema for the muster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS identities (
    identity_id    TEXT PRIMARY KEY,
    display_name   TEXT NOT NULL,
    role           TEXT NOT NULL,   -- 'student' | 'faculty'
    enrollment_ref TEXT,            -- resolver-owned biometric reference
    created_at     TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One row per identity per attendance day.
-- punch_in_at is written once, at INSERT. punch_out_at is written at most
-- once, by the guarded UPDATE in punch_out_if_open. No DELETE is ever
-- issued against this table.
CREATE TABLE IF NOT EXISTS punches (
    identity_id  TEXT NOT NULL REFERENCES identities(identity_id),
    day          TEXT NOT NULL,    -- YYYY-MM-DD in the site's zone
    punch_in_at  TEXT NOT NULL,    -- ISO 8601 UTC
    punch_out_at TEXT,             -- ISO 8601 UTC; NULL while open
    display_name TEXT NOT NULL,    -- identity snapshot at punch-in
    display_role TEXT NOT NULL,
    PRIMARY KEY (identity_id, day)
);

CREATE INDEX IF NOT EXISTS punches_day_idx ON punches(day);

PRAGMA user_version = 1;
";
