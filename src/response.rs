// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 响应构建模块
//!
//! 将状态码、头部集合与正文序列化为精确的报文字节：
//! `HTTP/1.1 <code> <phrase>\r\n`，随后按插入顺序输出每个头部，
//! 再输出一个空行和原始正文，正文之后不追加换行。

use crate::{header::Headers, param::*};

use bytes::Bytes;
use log::error;

use std::fmt;

#[derive(Debug, Clone)]
pub struct Response {
    status_code: u16,
    information: &'static str,
    headers: Headers,
    content: Bytes,
}

impl Response {
    /// 构造响应。
    ///
    /// `headers` 按值传入，每个响应各自拥有一份，不会在请求之间共享。
    /// 正文非空时：
    /// - 未显式设置 `Content-Type` 则补充为 `text/plain`；
    /// - 未显式设置 `Content-Length` 则补充为正文的字节长度。
    ///
    /// # Panics
    /// 状态码不在 `STATUS_CODES` 表中时直接终止，这只可能是编码错误。
    pub fn new(status_code: u16, mut headers: Headers, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            if !headers.contains(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, TEXT_PLAIN);
            }
            if !headers.contains(CONTENT_LENGTH) {
                headers.insert(CONTENT_LENGTH, content.len().to_string());
            }
        }
        Self {
            status_code,
            information: reason_phrase(status_code),
            headers,
            content,
        }
    }

    /// 无正文、无头部的响应
    pub fn empty(status_code: u16) -> Self {
        Self::new(status_code, Headers::new(), Bytes::new())
    }

    /// 纯文本响应，`Content-Type` 与 `Content-Length` 由默认规则补全
    pub fn text(status_code: u16, text: impl Into<String>) -> Self {
        Self::new(status_code, Headers::new(), Bytes::from(text.into()))
    }

    /// 以 `application/octet-stream` 返回字节流
    pub fn octet_stream(status_code: u16, content: Bytes) -> Self {
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE, OCTET_STREAM);
        Self::new(status_code, headers, content)
    }

    pub fn response_404() -> Self {
        Self::empty(404)
    }

    pub fn response_500() -> Self {
        Self::empty(500)
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let status_code: &str = &self.status_code.to_string();
        let headers: &str = &self.headers.to_string();
        let head = [
            HTTP_VERSION,
            " ",
            status_code,
            " ",
            self.information,
            CRLF,
            headers,
            CRLF,
        ]
        .concat();
        [head.as_bytes(), &self.content[..]].concat()
    }
}

impl Response {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn information(&self) -> &str {
        self.information
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl fmt::Display for Response {
    /// 报文的文本形式，供调试输出使用
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.as_bytes()))
    }
}

fn reason_phrase(code: u16) -> &'static str {
    match STATUS_CODES.get(&code) {
        Some(&information) => information,
        None => {
            error!("非法的状态码：{}。这条错误说明代码编写出现了错误。", code);
            panic!("非法的状态码：{}", code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_response_has_no_length_header() {
        let response = Response::empty(200);
        assert_eq!(response.as_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_text_response_defaults() {
        let response = Response::text(200, "abc123");
        let bytes = response.as_bytes();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\nabc123"
        );
    }

    #[test]
    fn test_explicit_headers_are_not_overridden() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        headers.insert("Content-Length", "99");
        let response = Response::new(200, headers, "{}");

        assert_eq!(response.headers().get("Content-Type"), Some("application/json"));
        assert_eq!(response.headers().get("Content-Length"), Some("99"));
    }

    /// 显式设置的头部排在前面，默认补全的字段追加在后
    #[test]
    fn test_header_insertion_order() {
        let mut headers = Headers::new();
        headers.insert("X-First", "1");
        let response = Response::new(201, headers, "ok");
        let text = response.to_string();

        assert_eq!(
            text,
            "HTTP/1.1 201 Created\r\nX-First: 1\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nok"
        );
    }

    #[test]
    fn test_octet_stream() {
        let response = Response::octet_stream(200, Bytes::from_static(b"\x00\x01"));

        assert_eq!(response.headers().get("Content-Type"), Some(OCTET_STREAM));
        assert_eq!(response.headers().get("Content-Length"), Some("2"));
        assert!(response.as_bytes().ends_with(b"\r\n\r\n\x00\x01"));
    }

    #[test]
    fn test_response_status_code_various() {
        for (code, expected_info) in [
            (200, "OK"),
            (201, "Created"),
            (404, "Not Found"),
            (500, "Internal Server Error"),
        ] {
            let response = Response::empty(code);
            assert_eq!(response.status_code(), code);
            assert_eq!(response.information(), expected_info);
        }
    }

    #[test]
    #[should_panic(expected = "非法的状态码")]
    fn test_unknown_status_code_panics() {
        let _ = Response::empty(418);
    }

    /// 每个响应各自拥有头部，构造一个响应不会影响下一个
    #[test]
    fn test_headers_not_shared_between_responses() {
        let first = Response::octet_stream(200, Bytes::from_static(b"data"));
        let second = Response::empty(404);

        assert!(first.headers().contains("Content-Type"));
        assert!(second.headers().is_empty());
    }

    proptest! {
        #[test]
        fn prop_content_length_matches_body(body in proptest::collection::vec(any::<u8>(), 1..512)) {
            let response = Response::new(200, Headers::new(), body.clone());
            let expected = body.len().to_string();
            prop_assert_eq!(response.headers().get("Content-Length"), Some(expected.as_str()));
            prop_assert_eq!(response.headers().get("Content-Type"), Some("text/plain"));
            prop_assert!(response.as_bytes().ends_with(&body));
        }
    }
}
