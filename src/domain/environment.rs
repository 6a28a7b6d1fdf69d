//! Environment handed to the build and coverage subprocesses.

use std::ffi::{OsStr, OsString};
use std::path::Path;

pub const RUSTFLAGS: &str = "RUSTFLAGS";
pub const LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

/// Variables set on every child process.
///
/// The runner's own environment is never modified; each invocation gets
/// these applied on top of what it inherits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageEnv {
    vars: Vec<(String, OsString)>,
}

impl CoverageEnv {
    /// Build the environment from an explicit prior library path
    pub fn new(rustflags: &str, sysroot: &Path, prior_library_path: Option<&OsStr>) -> Self {
        let mut library_path = prior_library_path.map(OsStr::to_os_string).unwrap_or_default();
        library_path.push(":");
        library_path.push(sysroot.join("lib"));

        Self {
            vars: vec![
                (RUSTFLAGS.to_string(), OsString::from(rustflags)),
                (LIBRARY_PATH.to_string(), library_path),
            ],
        }
    }

    /// Look up a variable by name
    pub fn get(&self, key: &str) -> Option<&OsString> {
        self.vars.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OsString)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_path_with_empty_prior() {
        let env = CoverageEnv::new("-C link-dead-code", Path::new("/usr/local/rust"), None);
        assert_eq!(
            env.get(LIBRARY_PATH),
            Some(&OsString::from(":/usr/local/rust/lib"))
        );

        let env = CoverageEnv::new("-C link-dead-code", Path::new("/usr/local/rust"), Some(OsStr::new("")));
        assert_eq!(
            env.get(LIBRARY_PATH),
            Some(&OsString::from(":/usr/local/rust/lib"))
        );
    }

    #[test]
    fn test_library_path_appends_to_prior() {
        let env = CoverageEnv::new(
            "-C link-dead-code",
            Path::new("/home/me/.rustup/toolchains/stable"),
            Some(OsStr::new("/opt/lib:/usr/lib")),
        );
        assert_eq!(
            env.get(LIBRARY_PATH),
            Some(&OsString::from(
                "/opt/lib:/usr/lib:/home/me/.rustup/toolchains/stable/lib"
            ))
        );
    }

    #[test]
    fn test_rustflags_is_fixed() {
        let env = CoverageEnv::new("-C link-dead-code", Path::new("/sysroot"), Some(OsStr::new("/x")));
        assert_eq!(env.get(RUSTFLAGS), Some(&OsString::from("-C link-dead-code")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_prior_library_path_is_kept() {
        use std::os::unix::ffi::OsStrExt;

        let prior = OsStr::from_bytes(b"/opt/\xfflib");
        let env = CoverageEnv::new("-C link-dead-code", Path::new("/usr/local/rust"), Some(prior));

        assert_eq!(
            env.get(LIBRARY_PATH).map(|v| v.as_bytes()),
            Some(&b"/opt/\xfflib:/usr/local/rust/lib"[..])
        );
    }

    #[test]
    fn test_iter_order() {
        let env = CoverageEnv::new("-C link-dead-code", Path::new("/s"), None);
        let keys: Vec<_> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![RUSTFLAGS, LIBRARY_PATH]);
        assert!(env.get("PATH").is_none());
    }
}
