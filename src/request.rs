// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求处理模块
//!
//! 负责将一次 Socket 读取得到的原始字节解析为结构化的 `Request`：
//! 1. 以第一个空行（CRLF CRLF）为界切分头部与正文。
//! 2. 请求行必须恰好包含方法、路径、协议版本三段。
//! 3. 每个头部行按字面量 `": "` 切分一次，大小写敏感，后写覆盖。
//! 4. 分界之后的全部字节原样作为正文，可以为空，也可以是二进制数据。
//!
//! 解析器不对头部的值做语义校验，也不核对 `Content-Length` 与正文的实际长度。

use crate::{exception::Exception, header::Headers, param::*};

use bytes::Bytes;
use log::error;

/// 表示一个完整的 HTTP 请求。构造后不可变，随连接关闭而丢弃。
#[derive(Debug, Clone)]
pub struct Request {
    /// 请求方法，按收到的原样保存（GET、POST 等）
    method: String,
    /// 请求路径，不做解码
    path: String,
    /// 协议版本字符串，如 `HTTP/1.1`
    version: String,
    headers: Headers,
    body: Bytes,
}

impl Request {
    /// 从原始字节缓冲区尝试构建 `Request` 实例。
    ///
    /// # 参数
    /// * `buffer` - 本次读取得到的字节，调用方负责截掉缓冲区中未填充的部分。
    /// * `id` - 连接 ID，用于在并发环境下追踪日志。
    ///
    /// # 错误处理
    /// 任何结构上的问题都返回 `Exception::MalformedRequest`。
    pub fn try_from(buffer: &[u8], id: u128) -> Result<Self, Exception> {
        // 1. 寻找头部与正文的分界。空缓冲区或短于分界标记的缓冲区自然也找不到
        let boundary = match find_boundary(buffer) {
            Some(pos) => pos,
            None => {
                error!("[ID{}]HTTP请求缺少头部与正文之间的空行", id);
                return Err(Exception::MalformedRequest);
            }
        };

        let head = match std::str::from_utf8(&buffer[..boundary]) {
            Ok(head) => head,
            Err(_) => {
                error!("[ID{}]HTTP请求头部不是合法的UTF-8", id);
                return Err(Exception::MalformedRequest);
            }
        };
        let body = Bytes::copy_from_slice(&buffer[boundary + HEAD_BODY_BOUNDARY.len()..]);

        let mut lines = head.split(CRLF);

        // 2. 解析请求行 (e.g., "GET /index.html HTTP/1.1")
        let request_line = lines.next().unwrap_or_default();
        let parts: Vec<&str> = request_line.split_whitespace().collect();
        let (method, path, version) = match parts.as_slice() {
            [method, path, version] => (method.to_string(), path.to_string(), version.to_string()),
            _ => {
                error!("[ID{}]HTTP请求行格式不正确：{}", id, request_line);
                return Err(Exception::MalformedRequest);
            }
        };

        // 3. 逐行解析 Headers
        let mut headers = Headers::new();
        for line in lines {
            match line.split_once(HEADER_SEPARATOR) {
                Some((key, value)) => headers.insert(key, value),
                None => {
                    error!("[ID{}]HTTP头部行格式不正确：{}", id, line);
                    return Err(Exception::MalformedRequest);
                }
            }
        }

        Ok(Self {
            method,
            path,
            version,
            headers,
            body,
        })
    }
}

/// 返回第一个 CRLF CRLF 的起始下标
fn find_boundary(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEAD_BODY_BOUNDARY.len())
        .position(|window| window == HEAD_BODY_BOUNDARY)
}

// --- Getter 访问器实现 ---

impl Request {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 获取请求路径（含查询参数）
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// 按字段名（大小写敏感）查询头部
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// 获取用户代理字符串，缺失时为空串
    pub fn user_agent(&self) -> &str {
        self.header(USER_AGENT).unwrap_or("")
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
