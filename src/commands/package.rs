//! Type-safe arguments for package fetch and install tools.
//!
//! - `CurlDownloadArgs` for `curl <url> -o <file>`
//! - `RpmInstallArgs` for `rpm -i <file>`
//! - `YumInstallArgs` for `yum install -y <packages...>`

use std::path::PathBuf;

use crate::command_args::CommandArgs;

// ============================================================================
// curl
// ============================================================================

/// Download `url` to `output`, overwriting whatever is there.
#[derive(Debug, Clone)]
pub struct CurlDownloadArgs {
    /// Remote location; not validated.
    pub url: String,
    /// Local file the body is written to.
    pub output: PathBuf,
}

impl CommandArgs for CurlDownloadArgs {
    fn program(&self) -> &str {
        "curl"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![
            self.url.clone(),
            "-o".to_string(),
            self.output.display().to_string(),
        ]
    }
}

// ============================================================================
// rpm
// ============================================================================

/// Install a local RPM archive into the system package database.
#[derive(Debug, Clone)]
pub struct RpmInstallArgs {
    pub package: PathBuf,
}

impl CommandArgs for RpmInstallArgs {
    fn program(&self) -> &str {
        "rpm"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["-i".to_string(), self.package.display().to_string()]
    }
}

// ============================================================================
// yum
// ============================================================================

/// Non-interactive `yum install` of named packages.
#[derive(Debug, Clone)]
pub struct YumInstallArgs {
    pub packages: Vec<String>,
}

impl CommandArgs for YumInstallArgs {
    fn program(&self) -> &str {
        "yum"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(self.packages.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curl_args_order() {
        let args = CurlDownloadArgs {
            url: "https://example.invalid/a.rpm".to_string(),
            output: PathBuf::from("t.rpm"),
        };
        assert_eq!(
            args.invocation().argv(),
            vec!["curl", "https://example.invalid/a.rpm", "-o", "t.rpm"]
        );
    }

    #[test]
    fn test_rpm_install_args() {
        let args = RpmInstallArgs {
            package: PathBuf::from("t.rpm"),
        };
        assert_eq!(args.invocation().argv(), vec!["rpm", "-i", "t.rpm"]);
        assert!(args.invocation().cwd.is_none());
    }

    #[test]
    fn test_yum_install_args() {
        let args = YumInstallArgs {
            packages: vec!["libxml2-devel".to_string(), "perl-devel".to_string()],
        };
        assert_eq!(
            args.to_cli_args(),
            vec!["install", "-y", "libxml2-devel", "perl-devel"]
        );
    }
}
