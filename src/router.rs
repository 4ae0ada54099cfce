// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 路由引擎
//!
//! 将 (方法, 路径) 映射到唯一的处理动作。路由表是静态的：
//!
//! | 路径             | 方法 | 动作                                  |
//! |------------------|------|---------------------------------------|
//! | `/`              | GET  | 200，空正文                           |
//! | `/user-agent`    | GET  | 200，正文为 `User-Agent` 头的值        |
//! | `/echo/<rest>`   | GET  | 200，正文为 `<rest>` 原文              |
//! | `/files/<name>`  | GET  | 读取文件，200 或 404                  |
//! | `/files/<name>`  | POST | 写入请求正文，201                     |
//! | 其他             | 任意 | 404                                   |
//!
//! 先匹配精确路径，再匹配前缀路径。匹配大小写敏感，
//! 不规范化末尾斜杠或 `..`，前缀之后的部分不做任何解码。

use crate::{
    exception::Exception, request::Request, response::Response, store::FileStore,
};

use log::{debug, warn};

/// 路径模式
#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

/// 路由匹配的结果。`Echo` 与文件类动作携带前缀之后的路径部分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    UserAgent,
    Echo(&'a str),
    ReadFile(&'a str),
    WriteFile(&'a str),
    NotFound,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Root,
    UserAgent,
    Echo,
    ReadFile,
    WriteFile,
}

/// 精确路径排在前面，保证先于前缀模式匹配
const ROUTES: [(&str, Pattern, Action); 5] = [
    ("GET", Pattern::Exact("/"), Action::Root),
    ("GET", Pattern::Exact("/user-agent"), Action::UserAgent),
    ("GET", Pattern::Prefix("/echo/"), Action::Echo),
    ("GET", Pattern::Prefix("/files/"), Action::ReadFile),
    ("POST", Pattern::Prefix("/files/"), Action::WriteFile),
];

impl<'a> Route<'a> {
    /// 在静态路由表中查找第一个匹配项
    pub fn resolve(method: &str, path: &'a str) -> Self {
        for (route_method, pattern, action) in ROUTES.iter() {
            if *route_method != method {
                continue;
            }
            let rest = match *pattern {
                Pattern::Exact(p) if p == path => "",
                Pattern::Prefix(p) => match path.strip_prefix(p) {
                    Some(rest) => rest,
                    None => continue,
                },
                _ => continue,
            };
            return match action {
                Action::Root => Route::Root,
                Action::UserAgent => Route::UserAgent,
                Action::Echo => Route::Echo(rest),
                Action::ReadFile => Route::ReadFile(rest),
                Action::WriteFile => Route::WriteFile(rest),
            };
        }
        Route::NotFound
    }
}

/// 为请求选择动作并生成响应。
///
/// 文件不存在在这里转换为 404；其他错误（如写入失败）原样返回给连接处理器。
pub async fn route(request: &Request, store: &FileStore, id: u128) -> Result<Response, Exception> {
    let route = Route::resolve(request.method(), request.path());
    debug!("[ID{}]路由匹配结果: {:?}", id, route);

    match route {
        Route::Root => Ok(Response::empty(200)),
        Route::UserAgent => Ok(Response::text(200, request.user_agent())),
        Route::Echo(rest) => Ok(Response::text(200, rest)),
        Route::ReadFile(name) => match store.read(name, id).await {
            Ok(content) => Ok(Response::octet_stream(200, content)),
            Err(Exception::NotFound) => {
                warn!("[ID{}]请求的文件：{} 不存在，返回404", id, name);
                Ok(Response::response_404())
            }
            Err(e) => Err(e),
        },
        Route::WriteFile(name) => {
            store.write(name, request.body(), id).await?;
            Ok(Response::empty(201))
        }
        Route::NotFound => {
            warn!("[ID{}]请求的路径：{} 没有匹配的路由，返回404", id, request.path());
            Ok(Response::response_404())
        }
    }
}
