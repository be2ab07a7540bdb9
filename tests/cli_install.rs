//! Integration tests for `asset-manager install`.

mod common;

use common::*;

#[test]
fn install_publishes_groups_and_records_them() {
    let env = TestEnv::new();
    env.add_package(
        "org/tools",
        &[
            ("api-tools/app.js", "console.log('app');"),
            ("api-tools/css/site.css", "body {}"),
            ("zf-apigility/logo.png", "png"),
        ],
    );

    let result = env.run(&["install", "org/tools"]);

    assert!(result.success, "install failed:\n{}", result.combined_output());
    assert_eq!(
        std::fs::read_to_string(env.public_path("api-tools/app.js")).unwrap(),
        "console.log('app');"
    );
    assert!(env.public_path("api-tools/css/site.css").is_file());
    assert!(env.public_path("zf-apigility/logo.png").is_file());
    assert_eq!(env.gitignore().unwrap(), "\napi-tools/\nzf-apigility/");
    assert!(result.stdout.contains("org/tools: published 2 group(s), 3 file(s)"));
}

#[test]
fn install_twice_keeps_one_entry_per_group() {
    let env = TestEnv::new();
    env.write_project_file("public/.gitignore", "node_modules/\n");
    env.add_package("org/tools", &[("api-tools/app.js", "v1")]);

    assert!(env.run(&["install", "org/tools"]).success);
    env.write_project_file("vendor/org/tools/asset/api-tools/app.js", "v2");
    let result = env.run(&["install", "org/tools"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.gitignore().unwrap(), "node_modules/\n\napi-tools/");
    assert_eq!(
        std::fs::read_to_string(env.public_path("api-tools/app.js")).unwrap(),
        "v2"
    );
}

#[test]
fn install_without_public_dir_changes_nothing() {
    let env = TestEnv::without_public();
    env.add_package("org/tools", &[("api-tools/app.js", "js")]);

    let result = env.run(&["install", "org/tools"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("nothing to publish (no public directory)"));
    assert!(!env.project_path("public").exists());
}

#[test]
fn install_with_eval_in_config_prints_diagnostic() {
    let env = TestEnv::new();
    env.add_package_with_config(
        "org/evil",
        "module.config.php",
        PHP_EVAL_CONFIG,
        &[("evil/x.js", "x")],
    );

    let result = env.run(&["install", "org/evil"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result
        .stderr
        .contains("Unable to check for asset configuration in"));
    assert!(result
        .stderr
        .contains("file uses one or more exit() or eval() statements."));
    assert!(!env.public_path("evil").exists());
    assert!(env.gitignore().is_none());
}

#[test]
fn install_package_without_assets_is_quiet() {
    let env = TestEnv::new();
    env.add_package_with_config("org/plain", "module.config.php", PHP_PLAIN_CONFIG, &[]);

    let result = env.run(&["install", "org/plain"]);

    assert!(result.success);
    assert!(!result.stderr.contains("Unable to check"));
    assert!(env.gitignore().is_none());
}

#[test]
fn install_reads_toml_module_config() {
    let env = TestEnv::new();
    env.add_package_with_config(
        "org/modern",
        "module.config.toml",
        TOML_ASSET_CONFIG,
        &[("modern/app.js", "js")],
    );

    let result = env.run(&["install", "org/modern"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.public_path("modern/app.js").is_file());
    assert_eq!(env.gitignore().unwrap(), "\nmodern/");
}

#[test]
fn install_path_flag_points_at_package() {
    let env = TestEnv::new();
    env.write_project_file("packages/local/config/module.config.php", PHP_ASSET_CONFIG);
    env.write_project_file("packages/local/asset/local-ui/index.html", "<html>");

    let result = env.run(&["install", "org/local", "--path", "packages/local"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.public_path("local-ui/index.html").is_file());
}

#[test]
fn path_flag_with_several_packages_is_rejected() {
    let env = TestEnv::new();

    let result = env.run(&["install", "org/a", "org/b", "--path", "packages/a"]);

    assert!(!result.success);
    assert!(result
        .stderr
        .contains("--path can only be used with a single package"));
}

#[test]
fn project_config_selects_public_dir() {
    let env = TestEnv::without_public();
    env.write_project_file("asset-manager.toml", "[project]\npublic_dir = \"web\"\n");
    std::fs::create_dir_all(env.project_path("web")).unwrap();
    env.add_package("org/tools", &[("api-tools/app.js", "js")]);

    let result = env.run(&["install", "org/tools"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.project_path("web/api-tools/app.js").is_file());
    assert_eq!(
        std::fs::read_to_string(env.project_path("web/.gitignore")).unwrap(),
        "\napi-tools/"
    );
}

#[test]
fn unknown_project_config_key_warns() {
    let env = TestEnv::new();
    env.write_project_file("asset-manager.toml", "[project]\npublik_dir = \"web\"\n");
    env.add_package("org/tools", &[("api-tools/app.js", "js")]);

    let result = env.run(&["install", "org/tools"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("unknown config key 'publik_dir'"));
    assert!(result.stderr.contains("did you mean 'public_dir'?"));
    assert!(env.public_path("api-tools/app.js").is_file());
}

#[test]
fn json_output_has_one_outcome_per_package() {
    let env = TestEnv::new();
    env.add_package("org/a", &[("a-assets/a.js", "a")]);
    env.add_package("org/b", &[("b-assets/b.js", "b")]);

    let result = env.run(&["install", "org/a", "org/b", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let lines = result.json_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["package"], "org/a");
    assert_eq!(lines[0]["action"], "install");
    assert_eq!(lines[0]["status"], "ok");
    assert_eq!(lines[0]["report"]["groups"][0], "a-assets");
    assert_eq!(lines[1]["report"]["entries_added"][0], "b-assets");
    assert_eq!(env.gitignore().unwrap(), "\na-assets/\nb-assets/");
}
