//! Upload-folder management: filename sanitizing plus save, list, read,
//! and delete operations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Resolve a client-supplied file type to its folder. Anything other
/// than `survey` resolves to the source folder.
pub fn folder_for(config: &AppConfig, file_type: &str) -> PathBuf {
    if file_type == "survey" {
        config.survey_dir()
    } else {
        config.source_dir()
    }
}

/// Strip path components and unsafe characters from a client filename.
///
/// Keeps `[A-Za-z0-9_.-]`, replaces runs of anything else with a single
/// underscore, and trims leading/trailing dots and underscores so the
/// result can never walk out of its folder. Errors when nothing safe
/// remains.
pub fn sanitize_filename(name: &str) -> Result<String, AppError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let unsafe_chars =
        Regex::new(r"[^A-Za-z0-9_.-]+").map_err(|e| AppError::Internal(e.to_string()))?;
    let cleaned = unsafe_chars.replace_all(base.trim(), "_");
    let cleaned = cleaned
        .trim_matches(|c: char| c == '.' || c == '_')
        .to_string();
    if cleaned.is_empty() {
        return Err(AppError::Validation("Invalid file name".to_string()));
    }
    Ok(cleaned)
}

/// Write contents under `dir`, creating it if needed. Returns the
/// sanitized name the file was stored as.
pub async fn save(dir: &Path, name: &str, contents: &[u8]) -> Result<String, AppError> {
    let file_name = sanitize_filename(name)?;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&file_name), contents).await?;
    Ok(file_name)
}

/// Read a stored file, returning the sanitized name and its bytes.
pub async fn read(dir: &Path, name: &str) -> Result<(String, Vec<u8>), AppError> {
    let file_name = sanitize_filename(name)?;
    match tokio::fs::read(dir.join(&file_name)).await {
        Ok(bytes) => Ok((file_name, bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound("File not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a stored file.
pub async fn delete(dir: &Path, name: &str) -> Result<(), AppError> {
    let file_name = sanitize_filename(name)?;
    match tokio::fs::remove_file(dir.join(&file_name)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound("File not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// List stored files, sorted by name. A folder that does not exist yet
/// lists as empty.
pub async fn list(dir: &Path) -> Result<Vec<String>, AppError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("report.csv").unwrap(), "report.csv");
        assert_eq!(sanitize_filename("my-file_v2.py").unwrap(), "my-file_v2.py");
    }

    #[test]
    fn sanitize_strips_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini").unwrap(), "boot.ini");
        assert_eq!(sanitize_filename("/etc/shadow").unwrap(), "shadow");
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my file.csv").unwrap(), "my_file.csv");
        assert_eq!(
            sanitize_filename("naïve résumé.csv").unwrap(),
            "na_ve_r_sum_.csv"
        );
    }

    #[test]
    fn sanitize_rejects_names_with_nothing_safe() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("...").is_err());
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("///").is_err());
    }

    #[test]
    fn sanitize_trims_leading_dots() {
        assert_eq!(sanitize_filename("..hidden.csv").unwrap(), "hidden.csv");
    }

    #[tokio::test]
    async fn save_read_list_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let stored = save(dir.path(), "notes.txt", b"hello").await.unwrap();
        assert_eq!(stored, "notes.txt");

        let (name, bytes) = read(dir.path(), "notes.txt").await.unwrap();
        assert_eq!(name, "notes.txt");
        assert_eq!(bytes, b"hello");

        assert_eq!(list(dir.path()).await.unwrap(), vec!["notes.txt"]);

        delete(dir.path(), "notes.txt").await.unwrap();
        assert!(list(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = delete(dir.path(), "ghost.txt").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = read(dir.path(), "ghost.txt").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(list(&missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn traversal_names_stay_inside_the_folder() {
        let dir = tempfile::tempdir().unwrap();
        let stored = save(dir.path(), "../escape.txt", b"data").await.unwrap();
        assert_eq!(stored, "escape.txt");
        assert!(dir.path().join("escape.txt").exists());
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }
}
