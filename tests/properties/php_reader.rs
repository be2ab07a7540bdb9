//! Property tests for the legacy configuration reader.

use std::path::Path;

use proptest::prelude::*;

use asset_manager::domain::services::php_lexer::tokenize;
use asset_manager::domain::services::{evaluate_return, ConfigSafetyChecker, SafetyVerdict};

fn php_fragment() -> impl Strategy<Value = String> {
    proptest::string::string_regex(
        r#"(<\?php |return |\[|\]|\(|\)|'a'|"b\$c"|=> |, |; |\.|__DIR__|dirname|\$x|= |1|eval|exit|/\*|\*/|//|#|\n| )*"#,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the lexer and reader never panic on arbitrary text.
    #[test]
    fn property_reader_never_panics(source in any::<String>()) {
        let _ = tokenize(&source);
        let _ = evaluate_return(&source, Path::new("/pkg/config/module.config.php"));
    }

    /// PROPERTY: the reader never panics on PHP-shaped fragments either.
    #[test]
    fn property_reader_handles_php_fragments(source in php_fragment()) {
        let _ = evaluate_return(&source, Path::new("/pkg/config/module.config.php"));
    }

    /// PROPERTY: a file that calls eval() is never handed to the reader.
    #[test]
    fn property_eval_is_always_unsafe(name in "[a-z_]{1,10}") {
        let source = format!(
            "<?php\neval('${name} = 1;');\nreturn ['asset_manager' => ['resolver_configs' => ['paths' => []]]];\n"
        );
        let verdict = ConfigSafetyChecker::new()
            .check_source(Path::new("module.config.php"), &source)
            .unwrap();
        prop_assert_eq!(verdict, SafetyVerdict::Unsafe);
    }
}
