// report.rs
use serde::Serialize;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use super::ScanError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub path: String,
    pub status_code: u16,
    pub content_length: u64,
}

#[derive(Debug, Serialize)]
pub struct DomainResult {
    pub domain: String,
    pub findings: Vec<Finding>,
}

impl DomainResult {
    pub fn is_vulnerable(&self) -> bool {
        !self.findings.is_empty()
    }
}

// 批次结束后的摘要
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub domains_scanned: usize,
    pub vulnerable_count: usize,
    pub scan_timestamp: String,
    pub scan_duration: u64,
}

pub struct Reporter {
    output: Option<PathBuf>,
}

impl Reporter {
    pub fn new(output: Option<PathBuf>) -> Self {
        Reporter { output }
    }

    /// 无发现的域名不产生任何输出, 也不触碰输出文件
    pub fn write(&self, result: &DomainResult) -> Result<(), ScanError> {
        if result.findings.is_empty() {
            return Ok(());
        }

        let block = format_block(result);

        match &self.output {
            Some(path) => {
                // 追加写入, 不覆盖已有报告
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ScanError::ReportError(format!("无法打开输出文件: {}", e)))?;
                file.write_all(block.as_bytes())
                    .map_err(|e| ScanError::ReportError(format!("写入报告失败: {}", e)))?;
            }
            None => print!("{}", block),
        }

        Ok(())
    }
}

pub fn format_block(result: &DomainResult) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut output = format!("\n[{}] Results for {}:\n", timestamp, result.domain);
    output += &"=".repeat(50);
    output += "\n";

    for item in &result.findings {
        output += &format!("Path: /.git/{}\n", item.path);
        output += &format!("Status: {}\n", item.status_code);
        output += &format!("Size: {} bytes\n", item.content_length);
        output += &"-".repeat(30);
        output += "\n";
    }

    output
}
