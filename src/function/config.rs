// config.rs
use structopt::StructOpt;
use std::path::PathBuf;
use super::ScanError;

#[derive(Debug, StructOpt)]
#[structopt(name = "git_scan", about = "Git仓库泄露批量探测工具")]
pub struct Config {
    /// 域名列表文件路径 (每行一个域名)
    #[structopt(short, long)]
    pub file: PathBuf,

    /// 输出报告文件路径 (不指定则打印到终端)
    #[structopt(short, long)]
    pub output: Option<PathBuf>,

    /// 并发扫描的域名数量
    #[structopt(short, long, default_value = "5")]
    pub threads: usize,

    /// 每次请求之间的延迟 (秒)
    #[structopt(short, long, default_value = "1")]
    pub delay: f64,

    /// 请求超时时间 (秒)
    #[structopt(long, default_value = "10")]
    pub timeout: u64,

    /// 代理服务器 (例如: http://localhost:8080)
    #[structopt(long)]
    pub proxy: Option<String>,

    /// 校验TLS证书 (默认不校验, 自签名站点也能扫到)
    #[structopt(long)]
    pub verify_tls: bool,

    /// 显示详细输出
    #[structopt(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), ScanError> {
        // 验证并发合理性
        if self.threads == 0 || self.threads > 100 {
            return Err(ScanError::InvalidConfig("并发数区间为1~100。".to_string()));
        }

        // 验证延迟 (拒绝负数和NaN)
        if !(self.delay >= 0.0) || !self.delay.is_finite() {
            return Err(ScanError::InvalidConfig("延迟必须是非负数。".to_string()));
        }

        // 验证代理
        if let Some(proxy) = &self.proxy {
            if !proxy.starts_with("http://") && !proxy.starts_with("https://") {
                return Err(ScanError::InvalidConfig("代理URL必须以http://或https://开头".to_string()));
            }
        }

        Ok(())
    }
}
