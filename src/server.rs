// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 监听器
//!
//! 绑定一个地址并循环接受连接，每个连接交给独立的 tokio 任务处理。
//! 没有连接数上限，也没有准入控制；单个连接的失败不会影响监听循环。

use crate::{
    config::Config,
    connection::{handle_connection, Context},
    exception::Exception,
    param::LISTEN_BACKLOG,
    store::FileStore,
};

use log::{debug, error, info};
use tokio::net::{TcpListener, TcpSocket};

use std::{net::SocketAddr, sync::Arc};

pub struct Server {
    listener: TcpListener,
    context: Arc<Context>,
}

impl Server {
    /// 校验服务目录并绑定监听 Socket。
    ///
    /// Socket 开启地址复用与端口复用，允许多个进程绑定同一端口。
    pub async fn bind(config: &Config) -> Result<Self, Exception> {
        let store = match FileStore::open(config.directory()).await {
            Ok(store) => store,
            Err(e) => {
                error!("服务目录 {} 不存在", config.directory());
                return Err(e);
            }
        };
        info!("Serving files from {}", store.root().display());

        let address: SocketAddr = match format!("{}:{}", config.host(), config.port()).parse() {
            Ok(address) => address,
            Err(e) => {
                error!("无法解析监听地址 {}:{}，错误：{}", config.host(), config.port(), e);
                return Err(Exception::InvalidConfig);
            }
        };

        let listener = match listen(address) {
            Ok(listener) => listener,
            Err(e) => {
                error!("无法绑定地址：{}，错误：{}", address, e);
                return Err(Exception::BindFailed);
            }
        };
        info!("地址{}绑定完成", address);

        Ok(Self {
            listener,
            context: Arc::new(Context {
                store,
                read_buffer_size: config.read_buffer_size(),
                debug: config.debug(),
            }),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Exception> {
        self.listener.local_addr().map_err(|_| Exception::BindFailed)
    }

    /// 主循环：持续接收新连接并将其分发到独立任务
    pub async fn run(self) {
        let mut id: u128 = 0;
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("接受连接失败：{}", e);
                    continue;
                }
            };
            debug!("[ID{}]新的连接：{}", id, addr);

            let context = Arc::clone(&self.context);
            tokio::spawn(async move {
                let stage = handle_connection(stream, id, context).await;
                debug!("[ID{}]连接结束于{}阶段", id, stage);
            });
            id += 1;
        }
    }
}

fn listen(address: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = match address {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    #[cfg(unix)]
    socket.set_reuseport(true)?;
    socket.bind(address)?;
    socket.listen(LISTEN_BACKLOG)
}
