use crate::error::{AppError, AppResult, FileError};
use crate::models::document::{DocumentBody, SourceDocument};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 加载单个文档
///
/// `.txt` 视为纯文本，`.json` 视为分题请求体；其他扩展名返回 `None`
pub async fn load_document(file_path: &Path) -> AppResult<Option<SourceDocument>> {
    let extension = file_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let wrap: fn(String) -> DocumentBody = match extension.as_deref() {
        Some("txt") => DocumentBody::PlainText,
        Some("json") => DocumentBody::Request,
        _ => return Ok(None),
    };

    let content = fs::read_to_string(file_path)
        .await
        .map_err(|e| AppError::file_read_failed(file_path.display().to_string(), e))?;

    let name = file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(Some(SourceDocument::new(name, file_path, wrap(content))))
}

/// 从文件夹中加载所有文档，按文件名排序
pub async fn load_all_documents(folder_path: &str) -> AppResult<Vec<SourceDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        paths.push(entry.path());
    }
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        match load_document(&path).await {
            Ok(Some(document)) => {
                tracing::info!(
                    "正在加载: {} ({} 字符)",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    document.char_len()
                );
                documents.push(document);
            }
            Ok(None) => {
                tracing::debug!("跳过不支持的文件: {}", path.display());
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(documents)
}
