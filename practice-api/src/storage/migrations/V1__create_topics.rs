/// Create the topics table
pub fn migration() -> String {
    r#"
CREATE TABLE topics (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at INTEGER NOT NULL
);
"#
    .to_string()
}
