//! The SQL document applied to the database.
//!
//! The file is treated as an opaque batch: it is neither split nor validated
//! here, and its correctness is the database's call.

use std::path::{Path, PathBuf};
use tourdb_common::error::{TourdbError, TourdbResult};

#[derive(Debug, Clone)]
pub struct SchemaDocument {
    path: PathBuf,
    sql: String,
}

impl SchemaDocument {
    /// Read the whole file as UTF-8.
    pub async fn load(path: impl AsRef<Path>) -> TourdbResult<Self> {
        let path = path.as_ref().to_path_buf();
        let sql = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| TourdbError::FileAccess {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), bytes = sql.len(), "Schema file loaded");
        Ok(Self { path, sql })
    }

    pub fn from_sql(path: impl Into<PathBuf>, sql: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sql: sql.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reads_whole_file() {
        let path = std::env::temp_dir().join(format!("tourdb-schema-{}.sql", std::process::id()));
        let sql = "CREATE TABLE IF NOT EXISTS a (id int);\nCREATE TABLE IF NOT EXISTS b (id int);\n";
        tokio::fs::write(&path, sql).await.unwrap();

        let doc = SchemaDocument::load(&path).await.unwrap();
        assert_eq!(doc.sql(), sql);
        assert_eq!(doc.path(), path.as_path());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_file_access_error() {
        let err = SchemaDocument::load("definitely/not/here.sql").await.unwrap_err();
        match err {
            TourdbError::FileAccess { path, .. } => {
                assert_eq!(path, PathBuf::from("definitely/not/here.sql"))
            }
            other => panic!("expected FileAccess, got {other:?}"),
        }
    }
}
