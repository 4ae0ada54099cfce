// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 连接处理器
//!
//! 负责单个连接的完整生命周期：
//! `ACCEPTED → READ → PARSED → ROUTED → RESPONDED → CLOSED`。
//! READ、PARSED、ROUTED 任一阶段失败都进入 `ERROR`，返回 500 后关闭。
//!
//! 每个连接只读一次、只写一次，不支持 keep-alive，也不设置读写超时。
//! 处理器拥有流的所有权，任何退出路径上流都会被 drop 从而关闭。

use crate::{
    exception::Exception, request::Request, response::Response, router, store::FileStore,
};

use log::{debug, error, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use std::{borrow::Cow, fmt, sync::Arc, time::Instant};

/// 连接处理的各个阶段，用于日志中标注失败发生的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Accepted,
    Read,
    Parsed,
    Routed,
    Responded,
    Closed,
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Accepted => "ACCEPTED",
            Stage::Read => "READ",
            Stage::Parsed => "PARSED",
            Stage::Routed => "ROUTED",
            Stage::Responded => "RESPONDED",
            Stage::Closed => "CLOSED",
            Stage::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}

/// 所有连接共享的只读上下文，进程启动后不再修改
#[derive(Debug)]
pub struct Context {
    pub store: FileStore,
    pub read_buffer_size: usize,
    pub debug: bool,
}

/// 处理单个连接，返回连接结束时所处的阶段
pub async fn handle_connection<S>(mut stream: S, id: u128, context: Arc<Context>) -> Stage
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut stage = Stage::Accepted;
    let mut buffer = vec![0; context.read_buffer_size];

    // 唯一一次读取
    let n = match stream.read(&mut buffer).await {
        Ok(0) => {
            debug!("[ID{}]客户端未发送任何数据即关闭连接", id);
            return Stage::Closed;
        }
        Ok(n) => n,
        Err(e) => {
            error!("[ID{}]读取TCPStream时遇到错误: {}", id, e);
            return Stage::Closed;
        }
    };
    advance(&mut stage, Stage::Read, id);
    let start_time = Instant::now();
    if context.debug {
        info!("[ID{}]请求报文:\n{}", id, wire_text(&buffer[..n]));
    }

    let response = match process(&buffer[..n], id, &context, &mut stage).await {
        Ok(response) => response,
        Err(e) => {
            error!("[ID{}]在{}阶段处理请求失败: {}，返回500", id, stage, e);
            advance(&mut stage, Stage::Error, id);
            Response::response_500()
        }
    };

    debug!(
        "[ID{}]HTTP响应构建完成，服务端用时{}ms。",
        id,
        start_time.elapsed().as_millis()
    );
    if context.debug {
        info!("[ID{}]响应报文:\n{}", id, response);
    }

    let response_bytes = response.as_bytes();
    debug!("[ID{}]发送响应，长度: {}", id, response_bytes.len());
    match stream.write_all(&response_bytes).await {
        Ok(()) => {
            if let Err(e) = stream.flush().await {
                debug!("[ID{}]刷新TCPStream失败: {}", id, e);
            }
            advance(&mut stage, Stage::Responded, id);
        }
        Err(e) => error!("[ID{}]发送响应失败: {}", id, e),
    }

    if let Err(e) = stream.shutdown().await {
        debug!("[ID{}]关闭TCPStream失败: {}", id, e);
    }
    advance(&mut stage, Stage::Closed, id);
    stage
}

/// 解析并路由一个请求。错误由调用方统一转换为 500。
async fn process(
    buffer: &[u8],
    id: u128,
    context: &Context,
    stage: &mut Stage,
) -> Result<Response, Exception> {
    let request = Request::try_from(buffer, id)?;
    advance(stage, Stage::Parsed, id);

    let response = router::route(&request, &context.store, id).await?;
    advance(stage, Stage::Routed, id);

    info!(
        "[ID{}] {}, {}, {}, {}, {}, {}",
        id,
        request.version(),
        request.path(),
        request.method(),
        response.status_code(),
        response.information(),
        request.user_agent(),
    );
    Ok(response)
}

/// 调试输出用的报文原文，非 UTF-8 字节以有损方式显示
fn wire_text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn advance(stage: &mut Stage, next: Stage, id: u128) {
    debug!("[ID{}]{} -> {}", id, stage, next);
    *stage = next;
}
