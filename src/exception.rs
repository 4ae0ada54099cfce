// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 定义请求处理生命周期以及服务启动阶段可能出现的全部错误类型。
//!
//! 连接处理器依据这里的有限分类进行模式匹配，而不是捕获笼统的失败：
//! - `NotFound` 在路由层被转换为 `404 Not Found`。
//! - 其余任何到达连接处理器的错误都被转换为 `500 Internal Server Error`。
//! - `DirectoryNotFound`、`InvalidConfig`、`BindFailed` 只出现在启动阶段，属于致命错误。

use std::{fmt, io};

/// 服务器运行过程中发生的异常类型。
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exception {
    /// 请求报文无法解析：缺少头部与正文的分界、请求行不是恰好三段、
    /// 头部行缺少 `": "` 分隔符，或头部不是合法的 UTF-8。
    MalformedRequest,
    /// 请求的文件不存在，或者不是普通文件。对应 `404 Not Found`。
    NotFound,
    /// 文件读写时发生的其他 I/O 错误，保留原始的错误种类。
    Io(io::ErrorKind),
    /// 启动时指定的服务目录不存在或不是目录。
    DirectoryNotFound,
    /// 配置文件存在但无法解析。
    InvalidConfig,
    /// 无法创建或绑定监听 Socket。
    BindFailed,
}

use Exception::*;

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRequest => write!(f, "Malformed HTTP request"),
            NotFound => write!(f, "File not found (404)"),
            Io(kind) => write!(f, "I/O error: {}", kind),
            DirectoryNotFound => write!(f, "Served directory does not exist"),
            InvalidConfig => write!(f, "Invalid configuration file"),
            BindFailed => write!(f, "Couldn't bind the listening socket"),
        }
    }
}

impl std::error::Error for Exception {}

impl From<io::Error> for Exception {
    /// `NotFound` 类的 I/O 错误归入 `Exception::NotFound`，其余保留错误种类。
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => NotFound,
            kind => Io(kind),
        }
    }
}
