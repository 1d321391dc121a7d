//! End-to-end argument derivation against a fixture environment

use std::sync::Arc;

use gantry_core::application::{apply_arguments, default_modificators, ArgumentsContext};
use gantry_core::domain::{Descriptor, ResourceLimits};
use gantry_core::port::env_lookup::mocks::MapEnv;

const GIB: u64 = 1024 * 1024 * 1024;

fn context(env: MapEnv, java_options: &str) -> ArgumentsContext {
    ArgumentsContext::new(
        ResourceLimits::new(8 * GIB, 4).unwrap(),
        Descriptor::new(java_options),
        Arc::new(env),
    )
}

#[test]
fn test_default_derivation_is_heap_cpu_and_baseline() {
    let ctx = context(MapEnv::empty(), "-Dbaseline=1");
    let args = apply_arguments(&default_modificators(), &ctx);

    assert_eq!(
        args,
        vec![
            "-Xmx2048m",
            "-Xms2048m",
            "-Djava.util.concurrent.ForkJoinPool.common.parallelism=4",
            "-XX:ConcGCThreads=4",
            "-XX:ParallelGCThreads=4",
            "-Dbaseline=1",
        ]
    );
}

#[test]
fn test_feature_flags_add_tokens_without_dropping_any() {
    let base = context(MapEnv::empty(), "");
    let base_args = apply_arguments(&default_modificators(), &base);

    let enabled = context(
        MapEnv::from([
            ("ENABLE_JOLOKIA", "true"),
            ("JOLOKIA_PATH", "/opt/jolokia/jolokia.jar"),
            ("ENABLE_EXIT_ON_OOM", "1"),
        ]),
        "",
    );
    let enabled_args = apply_arguments(&default_modificators(), &enabled);

    // Append-only: every baseline token survives, flag tokens are added
    for token in &base_args {
        assert!(enabled_args.contains(token));
    }
    assert!(enabled_args
        .contains(&"-javaagent:/opt/jolokia/jolokia.jar=host=0.0.0.0,port=8778,protocol=https".into()));
    assert!(enabled_args.contains(&"-XX:+ExitOnOutOfMemoryError".into()));
}

#[test]
fn test_quoted_and_unquoted_descriptor_values() {
    let quoted = context(MapEnv::empty(), "\"-Dtest.tull1 -Dtest2\"");
    let args = apply_arguments(&default_modificators(), &quoted);
    assert!(args.contains(&"-Dtest.tull1 -Dtest2".into()));

    let unquoted = context(MapEnv::empty(), "-Dtest.tull1 -Dtest2");
    let args = apply_arguments(&default_modificators(), &unquoted);
    assert!(args.contains(&"-Dtest.tull1".into()));
    assert!(args.contains(&"-Dtest2".into()));
}

#[test]
fn test_env_variable_expansion_in_java_options() {
    let ctx = context(
        MapEnv::from([
            ("JAVA_OPTIONS", "-Dnode=$POD_NAME -Dns=${POD_NAMESPACE}"),
            ("POD_NAME", "web-0"),
            ("POD_NAMESPACE", "prod"),
        ]),
        "",
    );
    let args = apply_arguments(&default_modificators(), &ctx);
    assert!(args.contains(&"-Dnode=web-0".into()));
    assert!(args.contains(&"-Dns=prod".into()));
}
