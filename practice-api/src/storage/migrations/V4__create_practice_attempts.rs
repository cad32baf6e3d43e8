/// Create the practice_attempts table
pub fn migration() -> String {
    r#"
CREATE TABLE practice_attempts (
    id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL,
    question_id TEXT NOT NULL,
    user_answer TEXT NOT NULL,
    score INTEGER NOT NULL DEFAULT 0,
    feedback TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    FOREIGN KEY (session_id) REFERENCES practice_sessions (id) ON DELETE CASCADE
);

CREATE INDEX idx_practice_attempts_session
    ON practice_attempts(session_id, created_at);
"#
    .to_string()
}
