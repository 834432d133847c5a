use indoc::{formatdoc, indoc};
use once_cell::sync::Lazy;

/// A single-module forest holding `demo.Holder`, analysed for `platform`.
pub fn holder_module(platform: &str) -> String {
    formatdoc! {r#"
        [{{
            "info": {{"name": "app-{platform}", "symbol": {{"classes": "app-{platform}"}}}},
            "source_sets": [{{"id": "{platform}Main", "display_name": "{platform}", "platform": "{platform}"}}],
            "packages": [{{
                "info": {{"name": "demo", "symbol": {{"package": "demo"}}}},
                "classlikes": [{{"kind": "class", "decl": {{
                    "info": {{"name": "Holder", "symbol": {{"package": "demo", "classes": "Holder"}}}},
                    "functions": [{{
                        "info": {{"name": "first", "symbol": {{"package": "demo", "classes": "Holder", "callable": {{"name": "first"}}}}}},
                        "return_type": {{"Nullable": {{"Named": {{"reference": {{"package": "kotlin", "classes": "Int"}}}}}}}}
                    }}],
                    "properties": [{{
                        "info": {{"name": "values", "symbol": {{"package": "demo", "classes": "Holder", "callable": {{"name": "values"}}}}}},
                        "ty": {{"Named": {{
                            "reference": {{"package": "kotlin", "classes": "Array"}},
                            "args": [{{"Variant": ["Invariant", {{"Named": {{"reference": {{"package": "kotlin", "classes": "Int"}}}}}}]}}]
                        }}}}
                    }}]
                }}}}]
            }}]
        }}]
    "#, platform = platform}
}

pub static JVM_HOLDER: Lazy<String> = Lazy::new(|| holder_module("jvm"));
pub static JS_HOLDER: Lazy<String> = Lazy::new(|| holder_module("js"));

/// A package-level function whose parameter type could not be resolved.
pub const BROKEN: &str = indoc! {r#"
    [{
        "info": {"name": "broken", "symbol": {"classes": "broken"}},
        "source_sets": [{"id": "jvmMain", "display_name": "jvm", "platform": "jvm"}],
        "packages": [{
            "info": {"name": "demo", "symbol": {"package": "demo"}},
            "functions": [{
                "info": {"name": "use", "symbol": {"package": "demo", "callable": {"name": "use", "params": ["Missing"]}}},
                "parameters": [{
                    "info": {"name": "it", "symbol": {"package": "demo", "callable": {"name": "use", "params": ["Missing"]}, "target": {"CallableParameter": 0}}},
                    "ty": {"Unresolved": "Missing"}
                }],
                "return_type": "Dynamic"
            }]
        }]
    }]
"#};

/// Runs the given passes over a JSON forest and compares the outline.
macro_rules! test_case {
    ($name:ident, input: $input:expr, passes: $passes:expr, outline: $outline:expr $(,)?) => {
        #[test]
        fn $name() {
            let modules = docmodel::from_json(&$input).unwrap();
            let options = docmodel::PipelineOptions {
                passes: $passes.to_vec(),
                fail_on_unresolved: false,
            };
            let out = docmodel::Pipeline::from_options(&options)
                .run(&modules)
                .unwrap();
            pretty_assertions::assert_eq!(docmodel::outline::render(&out), $outline);
        }
    };
}
