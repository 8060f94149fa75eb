use anyhow::Result;
use structopt::StructOpt;
use git_scan::function::scanner::run_scan;
use git_scan::function::config::Config;
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 解析命令行参数
    let config = Config::from_args();

    // 2. 读取域名列表 (空行忽略)
    let domains = match std::fs::read_to_string(&config.file) {
        Ok(content) => content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>(),
        Err(_) => {
            eprintln!("[-] 错误: 无法读取文件 {}", config.file.display());
            process::exit(1);
        }
    };

    // 3. 执行扫描
    let _summary = run_scan(config, domains).await?;

    println!("扫描完成！");
    Ok(())
}
