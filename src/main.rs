// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # minihttpd
//!
//! 最小化的 HTTP/1.1 服务器，提供健康检查、User-Agent 回显、路径回显
//! 以及服务目录下的文件上传与下载。每个连接由独立的 tokio 任务处理，
//! 只读一次、只写一次，随后关闭。

use minihttpd::{Config, Server};

use log::{error, info, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config as LogConfig, Root},
    encode::pattern::PatternEncoder,
};
use tokio::runtime::Builder;

use std::{env, process};

const LOG_CONFIG: &str = "config/log4rs.yaml";
const DEFAULT_CONFIG: &str = "config/development.toml";

fn main() {
    // 1. 初始化日志系统：优先使用外部 YAML 配置，缺失时退回到控制台输出
    init_logging();

    // 2. 环境配置加载：配置文件路径可以通过环境变量覆盖
    let config_path = env::var("MINIHTTPD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    let config = match Config::from_toml(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("无法载入配置文件{}：{}", config_path, e);
            process::exit(1);
        }
    };
    info!("配置文件已载入");

    // 3. 按配置的工作线程数构建多线程运行时
    let runtime = match Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("无法构建tokio运行时：{}", e);
            process::exit(1);
        }
    };

    runtime.block_on(async {
        // 4. 服务目录不存在时不开始接受连接
        let server = match Server::bind(&config).await {
            Ok(server) => server,
            Err(e) => {
                error!("服务启动失败：{}", e);
                process::exit(1);
            }
        };
        server.run().await;
    });
}

fn init_logging() {
    if let Err(e) = log4rs::init_file(LOG_CONFIG, Default::default()) {
        eprintln!("无法载入日志配置{}：{}，使用控制台日志", LOG_CONFIG, e);
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {h({l})} - {m}{n}")))
            .build();
        let fallback = LogConfig::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info));
        match fallback {
            Ok(fallback) => {
                if let Err(e) = log4rs::init_config(fallback) {
                    eprintln!("无法初始化日志系统：{}", e);
                }
            }
            Err(e) => eprintln!("无法构建日志配置：{}", e),
        }
    }
}
