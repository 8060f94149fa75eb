// paths.rs
// Git仓库内部路径字典(编译期内置, 不可外部配置)

pub const GIT_PATHS: [&str; 21] = [
    "HEAD",
    "config",
    "index",
    "COMMIT_EDITMSG",
    "description",
    "info/refs",
    "objects/info/packs",
    "refs/heads/master",
    "refs/heads/main",
    "logs/HEAD",
    "refs/",
    "objects/",
    "packed-refs",
    "refs/remotes/origin/HEAD",
    "refs/stash",
    "logs/refs/heads/master",
    "logs/refs/heads/main",
    "hooks/",
    "info/exclude",
    "objects/info/",
    "info/",
];
