/// Create the question bank, including the cached sample answer columns
pub fn migration() -> String {
    r#"
CREATE TABLE questions (
    id TEXT PRIMARY KEY,
    topic_id TEXT,
    content TEXT NOT NULL,
    level TEXT NOT NULL DEFAULT 'Any',
    correct_answer TEXT,
    hint TEXT,
    language TEXT NOT NULL DEFAULT 'en',
    role TEXT NOT NULL DEFAULT 'Any',
    status TEXT NOT NULL DEFAULT 'published' CHECK (status IN ('draft', 'published')),
    sample_answer TEXT,
    sample_feedback TEXT,
    sample_suggestions TEXT,
    sample_source TEXT,
    created_at INTEGER NOT NULL,
    FOREIGN KEY (topic_id) REFERENCES topics (id) ON DELETE SET NULL
);

CREATE INDEX idx_questions_selection
    ON questions(status, language, role);

CREATE INDEX idx_questions_topic
    ON questions(topic_id);
"#
    .to_string()
}
