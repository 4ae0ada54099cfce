use crate::{exception::Exception, param::*};

use serde_derive::Deserialize;

use log::{error, warn};
use std::fs;
use std::io;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    debug: bool,
    #[serde(default = "default_read_buffer_size")]
    read_buffer_size: usize,
    #[serde(default)]
    worker_threads: usize,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

impl Config {
    pub fn new() -> Self {
        Self {
            directory: default_directory(),
            host: default_host(),
            port: default_port(),
            debug: false,
            read_buffer_size: default_read_buffer_size(),
            worker_threads: num_cpus::get(),
        }
    }

    /// 读取配置文件。文件不存在时使用默认配置，内容非法时返回 `InvalidConfig`。
    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let str_val = match fs::read_to_string(filename) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("配置文件{}不存在，使用默认配置", filename);
                return Ok(Config::new());
            }
            Err(e) => {
                error!("读取配置文件{}失败：{}", filename, e);
                return Err(Exception::InvalidConfig);
            }
        };
        Self::from_toml_str(&str_val)
    }

    pub fn from_toml_str(str_val: &str) -> Result<Self, Exception> {
        let mut raw_config: Config = match toml::from_str(str_val) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象：{}", e);
                return Err(Exception::InvalidConfig);
            }
        };
        if raw_config.worker_threads == 0 {
            raw_config.worker_threads = num_cpus::get();
        }
        if raw_config.read_buffer_size == 0 {
            warn!(
                "read_buffer_size被设置为0，无法读取任何请求，因此该值将被改为{}。",
                DEFAULT_READ_BUFFER_SIZE
            );
            raw_config.read_buffer_size = DEFAULT_READ_BUFFER_SIZE;
        }
        Ok(raw_config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }
}
