// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 头部字段集合
//!
//! 请求与响应共用的头部容器：
//! - 字段名大小写敏感，按收到（或插入）时的原样保存。
//! - 重复的字段名采用"后写覆盖"，覆盖时保留字段首次出现的位置。
//! - 序列化时按插入顺序输出。

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// 构造一个空的头部集合。每个响应都必须各自调用，不存在共享的默认实例。
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 插入字段；同名字段已存在时覆盖其值。
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl fmt::Display for Headers {
    /// 以 `key: value\r\n` 的报文格式逐行输出
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.iter() {
            write!(f, "{}: {}\r\n", k, v)?;
        }
        Ok(())
    }
}
