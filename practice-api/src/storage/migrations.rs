use refinery::embed_migrations;

embed_migrations!("src/storage/migrations");

/// Create or upgrade the practice schema (topics, questions, sessions, attempts)
pub fn run_migrations<C>(conn: &mut C) -> anyhow::Result<()>
where
    C: refinery::Migrate,
{
    migrations::runner().run(conn)?;
    Ok(())
}
