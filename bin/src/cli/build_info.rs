//! ClubChain binary build info

/// Formatted clubchain binary build info
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// `Option::unwrap_or` usable in const context.
macro_rules! const_unwrap_or {
    ($opt:expr, $default:expr) => {
        match $opt {
            Some(v) => v,
            None => $default,
        }
    };
}

/// Version, commit, compiler and build time, shown by `--version`.
pub(crate) const BUILD_INFO: &str = const_format::formatcp!(
    "
        version: {}
        git info: {}
        compiler: {}
        build time: {}
    ",
    built_info::PKG_VERSION,
    const_unwrap_or!(built_info::GIT_COMMIT_HASH_SHORT, "unknown"),
    built_info::RUSTC_VERSION,
    built_info::BUILT_TIME_UTC
);
