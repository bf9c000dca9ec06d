use std::io::Write;

use crate::backends::local::{register_builtins, DOUBLE, DOUBLE_NON_NEGATIVE};
use crate::config::{load_config, CallConv, EntryPointRegistry, ValueType};
use crate::engine::{Halt, LinkedListProcessor, OnError, StopRule};
use crate::list::{build, ListKind, Node};
use crate::traits::StatusCode;

/// End-to-end traversals through registry-resolved and module-resolved entry points
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeFailure;
    use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use std::sync::OnceLock;

    /// Builds `entry_modules/doubler` as a native library, once per test run.
    fn doubler_library() -> &'static Path {
        static LIBRARY: OnceLock<PathBuf> = OnceLock::new();
        LIBRARY.get_or_init(|| {
            let manifest = Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("entry_modules")
                .join("doubler")
                .join("Cargo.toml");
            let target_dir = std::env::temp_dir().join("linkwalker-doubler-target");

            let status = Command::new(env!("CARGO"))
                .args(["build", "--quiet", "--manifest-path"])
                .arg(&manifest)
                .arg("--target-dir")
                .arg(&target_dir)
                .env_remove("CARGO_BUILD_TARGET")
                .status()
                .expect("Failed to run cargo for the doubler library");
            assert!(status.success(), "Building the doubler library failed");

            target_dir
                .join("debug")
                .join(format!("{}doubler{}", DLL_PREFIX, DLL_SUFFIX))
        })
    }

    fn builtin_registry() -> EntryPointRegistry {
        let registry = EntryPointRegistry::new();
        register_builtins(&registry).expect("Failed to register built-ins");
        registry
    }

    fn processor(registry: &EntryPointRegistry, name: &str) -> LinkedListProcessor {
        LinkedListProcessor::from_registry(registry, name, ValueType::F64, ListKind::default())
            .expect("Failed to bind processor")
    }

    #[test]
    fn test_single_node_is_doubled() {
        let registry = builtin_registry();
        let processor = processor(&registry, DOUBLE);
        let mut list = build([2.0], ListKind::default());

        let result = processor
            .process_with_policy(list.head_mut(), "stop", None)
            .unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.fail, 0);
        assert_eq!(list.values(), vec![4.0]);
    }

    #[test]
    fn test_three_nodes_are_doubled_in_order() {
        let registry = builtin_registry();
        let processor = processor(&registry, DOUBLE);
        let mut list = build([1.0, 2.0, 3.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::default(), None)
            .unwrap();

        assert_eq!(result.success, 3);
        assert_eq!(result.fail, 0);

        let head = list.head().unwrap();
        assert_eq!(head.value, 2.0);
        assert_eq!(head.next().unwrap().value, 4.0);
        assert_eq!(head.next().unwrap().next().unwrap().value, 6.0);
    }

    #[test]
    fn test_skip_leaves_failing_node_unchanged() {
        let registry = builtin_registry();
        let processor = processor(&registry, DOUBLE_NON_NEGATIVE);
        let mut list = build([1.0, -2.0, 3.0], ListKind::default());

        let result = processor
            .process_with_policy(list.head_mut(), "skip", None)
            .unwrap();

        assert_eq!(result.success, 2);
        assert_eq!(result.fail, 1);
        assert_eq!(result.failures[0].index, 1);
        assert_eq!(list.values(), vec![2.0, -2.0, 6.0]);
    }

    #[test]
    fn test_stop_condition_on_output() {
        let registry = builtin_registry();
        let processor = processor(&registry, DOUBLE);
        let mut list = build([1.0, 2.0, 10.0], ListKind::default());
        let stop = |_: &Node, _: usize, _: f64, output: f64, _: StatusCode| output > 5.0;

        let result = processor
            .process(list.head_mut(), OnError::Stop, Some(&stop))
            .unwrap();

        assert!(result.success < 3);
        assert_eq!(result.halt, Some(Halt::StopCondition { index: 2 }));
        assert_eq!(list.values(), vec![2.0, 4.0, 10.0]);
    }

    #[test]
    fn test_stop_rule_matches_closure() {
        let registry = builtin_registry();
        let processor = processor(&registry, DOUBLE);
        let rule = StopRule {
            output_above: Some(5.0),
            ..StopRule::default()
        };
        let mut list = build([1.0, 2.0, 10.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::Stop, Some(&rule))
            .unwrap();

        assert_eq!(result.success, 2);
        assert_eq!(result.visited(), 2);
        assert!(result.visited() < list.len());
    }

    #[test]
    fn test_absent_head() {
        let registry = builtin_registry();
        let processor = processor(&registry, "dll1");

        let result = processor.process(None, OnError::Stop, None).unwrap();

        assert_eq!(result.success, 0);
        assert_eq!(result.fail, 0);
    }

    #[test]
    fn test_copy_builtins_leave_values_unchanged() {
        let registry = builtin_registry();

        for name in ["dll1", "dll2"] {
            let processor = processor(&registry, name);
            let mut list = build([1.5, -2.0, 0.0], ListKind::new("doubly"));

            let result = processor
                .process(list.head_mut(), OnError::Stop, None)
                .unwrap();

            assert_eq!(result.success, 3, "entry point {}", name);
            assert_eq!(list.values(), vec![1.5, -2.0, 0.0]);
        }
    }

    #[test]
    fn test_config_driven_registry_run() {
        let registry = builtin_registry();
        let mut config_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        config_file
            .write_all(
                br#"
entry_point:
  source: registry
  function: double_non_negative
on_error: skip
"#,
            )
            .unwrap();

        let config = load_config(config_file.path()).unwrap();
        let processor = config.build_processor(&registry).unwrap();
        let mut list = build([1.0, -2.0, 3.0], config.list_kind.clone());

        let result = processor
            .process(list.head_mut(), config.on_error().unwrap(), None)
            .unwrap();

        assert_eq!((result.success, result.fail), (2, 1));
        assert_eq!(list.values(), vec![2.0, -2.0, 6.0]);
    }

    #[test]
    fn test_wasm_module_skip_scenario() {
        let module = wat::parse_str(
            r#"
            (module
              (memory (export "memory") 1)
              (func (export "double_non_negative") (param $in i32) (param $out i32) (result i32)
                local.get $in
                f64.load
                f64.const 0
                f64.lt
                if (result i32)
                  i32.const 1
                else
                  local.get $out
                  local.get $in
                  f64.load
                  f64.const 2
                  f64.mul
                  f64.store
                  i32.const 0
                end))
            "#,
        )
        .unwrap();
        let mut module_file = tempfile::Builder::new().suffix(".wasm").tempfile().unwrap();
        module_file.write_all(&module).unwrap();

        let mut config_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            config_file,
            r#"
on_error = "skip"

[entry_point]
source = "library"
library = "{}"
function = "double_non_negative"
"#,
            module_file.path().display()
        )
        .unwrap();

        let config = load_config(config_file.path()).unwrap();
        let mut processor = config.build_processor(&EntryPointRegistry::new()).unwrap();
        let mut list = build([1.0, -2.0, 3.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), config.on_error().unwrap(), None)
            .unwrap();

        assert_eq!(result.success, 2);
        assert_eq!(result.fail, 1);
        assert_eq!(result.failures[0].status, 1);
        assert_eq!(list.values(), vec![2.0, -2.0, 6.0]);

        processor.dispose();
        assert!(processor.is_disposed());
    }

    #[test]
    fn test_native_library_skip_scenario() {
        let library = doubler_library().to_str().unwrap();
        let mut processor = LinkedListProcessor::new(
            library,
            DOUBLE_NON_NEGATIVE,
            CallConv::Cdecl,
            ValueType::F64,
            ListKind::default(),
        )
        .unwrap();
        let mut list = build([1.0, -2.0, 3.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::Skip, None)
            .unwrap();

        assert_eq!(result.success, 2);
        assert_eq!(result.fail, 1);
        assert_eq!(
            result.failures,
            vec![NodeFailure {
                index: 1,
                input: -2.0,
                output: 0.0,
                status: 1,
            }]
        );
        assert_eq!(result.halt, None);
        assert_eq!(list.values(), vec![2.0, -2.0, 6.0]);

        processor.dispose();
        assert!(processor.is_disposed());
    }

    #[test]
    fn test_native_library_i32_slots_stop_on_overflow() {
        let library = doubler_library().to_str().unwrap();
        let processor = LinkedListProcessor::new(
            library,
            "double_i32",
            CallConv::Cdecl,
            ValueType::I32,
            ListKind::default(),
        )
        .unwrap();
        let mut list = build([7.9, 2_000_000_000.0, 1.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::Stop, None)
            .unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.fail, 1);
        assert_eq!(result.failures[0].status, 2);
        assert_eq!(result.halt, Some(Halt::OnFailure { index: 1 }));
        assert_eq!(list.values(), vec![14.0, 2_000_000_000.0, 1.0]);
    }

    #[test]
    fn test_config_driven_native_run() {
        let mut config_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            config_file,
            r#"
entry_point:
  source: library
  library: '{}'
  function: double
  call_conv: c
value_type: double
"#,
            doubler_library().display()
        )
        .unwrap();

        let config = load_config(config_file.path()).unwrap();
        let processor = config.build_processor(&EntryPointRegistry::new()).unwrap();
        let mut list = build([1.0, 2.0, 3.0], config.list_kind.clone());

        let result = processor
            .process(list.head_mut(), config.on_error().unwrap(), None)
            .unwrap();

        assert_eq!((result.success, result.fail), (3, 0));
        assert_eq!(list.values(), vec![2.0, 4.0, 6.0]);
    }
}
