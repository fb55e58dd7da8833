//! Shared test utilities for integration tests.
//!
//! Provides a temporary portfolio with a data file, write-ups, and images
//! used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Portfolio data file used by the fixture.
pub const PORTFOLIO_TOML: &str = r##"
owner = "forrof"
github = "https://github.com/forrof"

[[challenge]]
id = 1
title = "SQL Injection in Login Portal"
platform = "HackTheBox"
category = "Web"
difficulty = "Medium"
date = "Nov 2024"
description = "Bypassed authentication with a UNION based injection."
content_path = "/writeups/sqli.md"

[[challenge]]
id = 2
title = "RSA Weak Exponent"
platform = "picoCTF"
category = "Crypto"
difficulty = "Easy"
date = "Oct 2024"
writeup_path = "#"

[[challenge]]
id = 3
title = "Stored XSS"
platform = "HackTheBox"
category = "Web"
difficulty = "Hard"
date = "Nov 2024"
content_path = "writeups/missing.md"

[[challenge]]
id = 4
title = "Escape Attempt"
platform = "TryHackMe"
category = "Pwn"
difficulty = "Insane"
date = "sometime"
content_path = "../outside.md"

[[project]]
name = "Network Scanner"
description = "Multi-threaded port scanner"
tech = ["Python", "Scapy"]
github_url = "https://github.com/forrof/scanner"
"##;

/// Write-up text for challenge 1.
pub const SQLI_WRITEUP: &str = "# Recon\n\
Found a login form. **Key idea**: the `username` field is injectable.\n\
\n\
![login page](img/login.png)\n\
\n\
```sql\n\
SELECT * FROM users WHERE name = '' OR 1=1 --';\n\
```\n\
\n\
```\n\
<script>alert(1)</script>\n\
```\n\
---\n\
1. Dump tables\n\
2. Crack hashes\n";

/// Creates temporary portfolio directory.
///
/// Layout:
///
/// ```text
/// portfolio.toml
/// writeups/sqli.md
/// writeups/img/login.png
/// ```
///
/// # Errors
///
/// Returns error if directory or file creation fails
pub fn create_portfolio() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let root = dir.path();

    fs::write(root.join("portfolio.toml"), PORTFOLIO_TOML)?;
    write_file(root, "writeups/sqli.md", SQLI_WRITEUP)?;
    write_file(root, "writeups/img/login.png", "not really a png")?;

    Ok(dir)
}

/// Writes file relative to a root, creating parent directories.
///
/// # Errors
///
/// Returns error if directory creation or write fails
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
