/// Create the practice_sessions table. `config` holds the session mode as JSON.
pub fn migration() -> String {
    r#"
CREATE TABLE practice_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    score INTEGER NOT NULL DEFAULT 0,
    started_at INTEGER NOT NULL,
    ended_at INTEGER,
    status TEXT NOT NULL DEFAULT 'in_progress' CHECK (status IN ('in_progress', 'completed')),
    topic_id TEXT,
    level TEXT,
    language TEXT NOT NULL,
    config TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX idx_practice_sessions_user
    ON practice_sessions(user_id);
"#
    .to_string()
}
