// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 协议参数与常量模块
//!
//! 该模块集中定义了 `minihttpd` 使用的 HTTP/1.1 协议常量：
//! - 报文分隔符（CRLF 以及头部与正文之间的空行）。
//! - 服务器会用到的状态码及其原因短语（Reason Phrase）。
//! - 常用的 `Content-Type` 取值与各项默认配置。

use std::collections::HashMap;
use lazy_static::lazy_static;

/// HTTP 协议规定的换行符（Carriage Return Line Feed）
pub const CRLF: &str = "\r\n";

/// 头部与正文之间的分界标记（连续两个 CRLF）
pub const HEAD_BODY_BOUNDARY: &[u8] = b"\r\n\r\n";

/// 头部字段名与值之间的分隔符
pub const HEADER_SEPARATOR: &str = ": ";

/// 响应行中使用的协议版本
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// 正文非空且未显式指定类型时使用的默认 `Content-Type`
pub const TEXT_PLAIN: &str = "text/plain";

/// 文件下载使用的 `Content-Type`
pub const OCTET_STREAM: &str = "application/octet-stream";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const USER_AGENT: &str = "User-Agent";

/// 默认监听地址（仅本地回环）
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 4221;

/// 每个连接唯一一次读取所用缓冲区的默认大小
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// 监听队列长度
pub const LISTEN_BACKLOG: u32 = 1024;

lazy_static! {
    /// 服务器会产生的状态码与其原因短语映射表。
    ///
    /// 路由层只会使用这四个状态码，表外的状态码属于编码错误。
    pub static ref STATUS_CODES: HashMap<u16, &'static str> = {
        let mut map = HashMap::new();
        map.insert(200, "OK");
        map.insert(201, "Created");
        map.insert(404, "Not Found");
        map.insert(500, "Internal Server Error");
        map
    };
}
