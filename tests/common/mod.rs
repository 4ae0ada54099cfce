#![allow(dead_code)]

use minihttpd::{Config, Server};

use std::{net::SocketAddr, path::Path, time::Duration};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// 在随机端口上启动服务器，服务目录为 `root`
pub async fn start_server(root: &Path) -> SocketAddr {
    let config = Config::from_toml_str(&format!(
        "directory = '{}'\nport = 0\nworker_threads = 2\n",
        root.display()
    ))
    .unwrap();
    let server = Server::bind(&config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    addr
}

/// 发送原始请求并读取到连接关闭为止
pub async fn send_raw(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut buffer = Vec::new();
    // 设置硬超时限制，防止测试用例因服务器挂起而永久阻塞
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buffer))
        .await
        .unwrap()
        .unwrap();
    buffer
}

/// 将响应拆分为 (状态码, 头部, 正文)
pub fn parse_response(response: &[u8]) -> (u16, Vec<(String, String)>, Vec<u8>) {
    let boundary = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no head/body boundary");
    let head = String::from_utf8_lossy(&response[..boundary]).to_string();
    let body = response[boundary + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_code = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);
    let headers = lines
        .filter_map(|line| line.split_once(": "))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    (status_code, headers, body)
}

pub fn header<'a>(headers: &'a [(String, String)], key: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
