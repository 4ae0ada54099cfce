// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 文件存储适配器
//!
//! 在服务目录下读写文件。文件名通过简单的路径拼接解析到根目录下，
//! 这里不拒绝 `..` 之类的越界路径，只记录警告；并发写同一文件名时不加锁，
//! 最后一次写入生效。

use crate::exception::Exception;

use bytes::Bytes;
use log::{debug, warn};
use tokio::fs;

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 确认服务目录存在且确实是目录，否则返回 `DirectoryNotFound`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, Exception> {
        let root = root.into();
        match fs::metadata(&root).await {
            Ok(meta) if meta.is_dir() => Ok(Self { root }),
            _ => Err(Exception::DirectoryNotFound),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 读取文件内容。无法获取元数据（不存在、父路径不是目录、文件名过长等）
    /// 或者不是普通文件时返回 `NotFound`。
    pub async fn read(&self, name: &str, id: u128) -> Result<Bytes, Exception> {
        let path = self.resolve(name, id);
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                debug!("[ID{}]无法获取{}的元数据: {}", id, path.display(), e);
                return Err(Exception::NotFound);
            }
        };
        if !meta.is_file() {
            debug!("[ID{}]{} 不是普通文件", id, path.display());
            return Err(Exception::NotFound);
        }
        let content = fs::read(&path).await?;
        debug!("[ID{}]读取文件 {}，{} bytes", id, path.display(), content.len());
        Ok(Bytes::from(content))
    }

    /// 创建或覆盖文件。写入失败一律视为 I/O 错误，包括父目录不存在的情况。
    pub async fn write(&self, name: &str, content: &[u8], id: u128) -> Result<(), Exception> {
        let path = self.resolve(name, id);
        fs::write(&path, content)
            .await
            .map_err(|e| Exception::Io(e.kind()))?;
        debug!("[ID{}]写入文件 {}，{} bytes", id, path.display(), content.len());
        Ok(())
    }

    fn resolve(&self, name: &str, id: u128) -> PathBuf {
        let relative = Path::new(name);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            warn!("[ID{}]文件名 {} 可能越出服务目录", id, name);
        }
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("new.txt", b"hello", 0).await.unwrap();
        let content = store.read("new.txt", 0).await.unwrap();

        assert_eq!(content.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("a.txt", b"first version", 0).await.unwrap();
        store.write("a.txt", b"second", 0).await.unwrap();

        assert_eq!(store.read("a.txt", 0).await.unwrap().as_ref(), b"second");
    }

    #[tokio::test]
    async fn test_read_missing() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.read("missing.txt", 0).await.unwrap_err(), Exception::NotFound);
    }

    #[tokio::test]
    async fn test_read_directory_is_not_found() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.read("sub", 0).await.unwrap_err(), Exception::NotFound);
    }

    /// 父路径是普通文件时同样视为不存在
    #[tokio::test]
    async fn test_read_under_regular_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write("a.txt", b"x", 0).await.unwrap();

        assert_eq!(store.read("a.txt/child", 0).await.unwrap_err(), Exception::NotFound);
    }

    #[tokio::test]
    async fn test_read_overlong_name_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let name = "n".repeat(300);

        assert_eq!(store.read(&name, 0).await.unwrap_err(), Exception::NotFound);
    }

    #[tokio::test]
    async fn test_read_name_with_nul_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.read("bad\0name", 0).await.unwrap_err(), Exception::NotFound);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.write("no/such/dir.txt", b"x", 0).await.unwrap_err();
        assert_eq!(err, Exception::Io(std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_open_checks_directory() {
        let dir = tempdir().unwrap();
        assert!(FileStore::open(dir.path()).await.is_ok());

        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();
        assert_eq!(
            FileStore::open(&file).await.unwrap_err(),
            Exception::DirectoryNotFound
        );
        assert_eq!(
            FileStore::open(dir.path().join("absent")).await.unwrap_err(),
            Exception::DirectoryNotFound
        );
    }
}
