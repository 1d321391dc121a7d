// Process Launcher - exact invocations for the supervised server and the JVM

use std::io;

use tokio::process::Command;
use tracing::info;

/// Build the nginx invocation.
///
/// The shell wrapper exists solely so the `exec` builtin replaces the
/// shell's process image in place: the pid we spawn is the pid nginx ends
/// up running under, and signals we deliver to it are not absorbed by an
/// intermediary.
pub fn prepare_for_run(config_path: &str) -> Command {
    let script = format!("exec nginx -g 'daemon off;' -c {}", config_path);
    info!(script = %script, "Prepared server invocation");
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

/// Exec-replace the current process with the JVM.
///
/// Returns only on failure; on success the entrypoint ceases to exist and
/// the JVM inherits its pid, so the orchestrator signals the application
/// directly.
#[cfg(unix)]
pub fn exec_java(jvm_args: &[String], app_jar: &str) -> io::Error {
    use std::os::unix::process::CommandExt;

    info!(jar = %app_jar, args = ?jvm_args, "Replacing entrypoint with the JVM");
    std::process::Command::new("java")
        .args(jvm_args)
        .arg("-jar")
        .arg(app_jar)
        .exec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_prepare_for_run_invocation_shape() {
        let cmd = prepare_for_run("/tmp/nginx/nginx.conf");
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), OsStr::new("sh"));
        let args: Vec<&OsStr> = std_cmd.get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("-c"),
                OsStr::new("exec nginx -g 'daemon off;' -c /tmp/nginx/nginx.conf"),
            ]
        );
    }
}
