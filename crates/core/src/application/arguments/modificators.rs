// Modificators - the individual derivation units
//
// Each unit is independent: none reads another's output, so the list in
// `default_modificators` can be reordered or tested in isolation.

use tracing::warn;

use super::{expansion, ArgumentsContext};

const DEFAULT_MAX_MEM_RATIO: u64 = 25;

/// `-Xmx`/`-Xms` from the memory limit and `JAVA_MAX_MEM_RATIO`
/// (integer percentage, default 25).
pub fn memory_options(ctx: &ArgumentsContext) -> Vec<String> {
    let ratio = match ctx.env("JAVA_MAX_MEM_RATIO") {
        None => DEFAULT_MAX_MEM_RATIO,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(r) if r > 0 && r <= 100 => r,
            _ => {
                warn!(
                    value = %raw,
                    default = DEFAULT_MAX_MEM_RATIO,
                    "Malformed JAVA_MAX_MEM_RATIO, using default"
                );
                DEFAULT_MAX_MEM_RATIO
            }
        },
    };

    let heap_mib = ctx.limits.memory_limit_mib() * ratio / 100;
    if heap_mib == 0 {
        warn!("Memory limit too small to derive a heap size, emitting no heap flags");
        return Vec::new();
    }
    vec![format!("-Xmx{}m", heap_mib), format!("-Xms{}m", heap_mib)]
}

/// GC and fork-join parallelism pinned to the estimated core count.
pub fn cpu_options(ctx: &ArgumentsContext) -> Vec<String> {
    let cores = ctx.limits.estimated_cores();
    vec![
        format!(
            "-Djava.util.concurrent.ForkJoinPool.common.parallelism={}",
            cores
        ),
        format!("-XX:ConcGCThreads={}", cores),
        format!("-XX:ParallelGCThreads={}", cores),
    ]
}

/// Jolokia agent, only when enabled and an agent jar path is present.
pub fn jolokia_options(ctx: &ArgumentsContext) -> Vec<String> {
    if !ctx.flag_enabled("ENABLE_JOLOKIA") {
        return Vec::new();
    }
    match ctx.env("JOLOKIA_PATH") {
        Some(path) => vec![format!(
            "-javaagent:{}=host=0.0.0.0,port=8778,protocol=https",
            path
        )],
        None => {
            warn!("ENABLE_JOLOKIA is set but JOLOKIA_PATH is not, skipping agent");
            Vec::new()
        }
    }
}

pub fn diagnostics_options(ctx: &ArgumentsContext) -> Vec<String> {
    if !ctx.flag_enabled("ENABLE_DIAGNOSTICS") {
        return Vec::new();
    }
    vec![
        "-XX:NativeMemoryTracking=summary".to_string(),
        "-XX:+PrintGC".to_string(),
        "-XX:+PrintGCDateStamps".to_string(),
        "-XX:+PrintGCTimeStamps".to_string(),
        "-XX:+UnlockDiagnosticVMOptions".to_string(),
    ]
}

pub fn remote_debug_options(ctx: &ArgumentsContext) -> Vec<String> {
    if !ctx.flag_enabled("ENABLE_REMOTE_DEBUG") {
        return Vec::new();
    }
    vec!["-agentlib:jdwp=transport=dt_socket,server=y,suspend=n,address=5005".to_string()]
}

/// AppDynamics agent plus pod-identity naming. Missing name variables
/// expand to the empty string rather than suppressing the flag.
pub fn appdynamics_options(ctx: &ArgumentsContext) -> Vec<String> {
    if !ctx.flag_enabled("ENABLE_APPDYNAMICS") {
        return Vec::new();
    }
    match ctx.env("APPDYNAMICS_AGENT_BASE_DIR") {
        Some(base_dir) => vec![
            format!("-javaagent:{}/javaagent.jar", base_dir),
            format!(
                "-Dappdynamics.agent.applicationName={}",
                ctx.env_or_empty("POD_NAMESPACE")
            ),
            format!(
                "-Dappdynamics.agent.tierName={}",
                ctx.env_or_empty("APP_NAME")
            ),
            format!(
                "-Dappdynamics.agent.nodeName={}",
                ctx.env_or_empty("POD_NAME")
            ),
        ],
        None => {
            warn!("ENABLE_APPDYNAMICS is set but APPDYNAMICS_AGENT_BASE_DIR is not, skipping agent");
            Vec::new()
        }
    }
}

pub fn exit_on_oom_options(ctx: &ArgumentsContext) -> Vec<String> {
    if !ctx.flag_enabled("ENABLE_EXIT_ON_OOM") {
        return Vec::new();
    }
    vec!["-XX:+ExitOnOutOfMemoryError".to_string()]
}

/// Baseline options from the descriptor followed by `JAVA_OPTIONS`,
/// variable-expanded and tokenized.
pub fn java_options(ctx: &ArgumentsContext) -> Vec<String> {
    let mut tokens = expansion::tokenize(&ctx.descriptor.java_options, |key| ctx.env(key));
    tokens.extend(expansion::tokenize(
        &ctx.env_or_empty("JAVA_OPTIONS"),
        |key| ctx.env(key),
    ));
    tokens
}
