//! Test fixtures - module configuration sources.

/// Legacy PHP configuration declaring `../asset` through `__DIR__`
pub const PHP_ASSET_CONFIG: &str = r#"<?php
return [
    'asset_manager' => [
        'resolver_configs' => [
            'paths' => [
                __DIR__ . '/../asset',
            ],
        ],
    ],
];
"#;

/// TOML configuration declaring `../asset` relative to the config directory
pub const TOML_ASSET_CONFIG: &str = r#"[asset_manager.resolver_configs]
paths = ["../asset"]
"#;

/// Legacy configuration that must never be read
pub const PHP_EVAL_CONFIG: &str = r#"<?php
eval('$x = 1;');
return [
    'asset_manager' => [
        'resolver_configs' => [
            'paths' => [__DIR__ . '/../asset'],
        ],
    ],
];
"#;

/// Configuration of a package that ships no assets
pub const PHP_PLAIN_CONFIG: &str = r#"<?php
return [
    'service_manager' => [
        'factories' => [],
    ],
];
"#;
