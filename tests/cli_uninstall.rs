//! Integration tests for `asset-manager uninstall` and `update`.

mod common;

use common::*;

#[test]
fn uninstall_removes_what_install_published() {
    let env = TestEnv::new();
    env.write_project_file("public/.gitignore", "node_modules/\n");
    env.add_package(
        "org/tools",
        &[("api-tools/app.js", "js"), ("zf-apigility/logo.png", "png")],
    );
    assert!(env.run(&["install", "org/tools"]).success);

    let result = env.run(&["uninstall", "org/tools"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(!env.public_path("api-tools").exists());
    assert!(!env.public_path("zf-apigility").exists());
    assert_eq!(env.gitignore().unwrap(), "node_modules/\n");
    assert!(result.stdout.contains("org/tools: removed 2 group(s)"));
}

#[test]
fn uninstall_leaves_untracked_folders_alone() {
    let env = TestEnv::new();
    env.write_project_file("public/.gitignore", "node_modules/\n");
    env.write_project_file("public/api-tools/custom.js", "mine");
    env.add_package("org/tools", &[("api-tools/app.js", "js")]);

    let result = env.run(&["uninstall", "org/tools", "-v"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.public_path("api-tools/custom.js").is_file());
    assert_eq!(env.gitignore().unwrap(), "node_modules/\n");
    assert!(result
        .stdout
        .contains("= api-tools (not tracked in .gitignore)"));
}

#[test]
fn uninstall_without_gitignore_is_a_noop() {
    let env = TestEnv::new();
    env.write_project_file("public/api-tools/app.js", "js");
    env.add_package("org/tools", &[("api-tools/app.js", "js")]);

    let result = env.run(&["uninstall", "org/tools"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result
        .stdout
        .contains("org/tools: nothing to remove (no public .gitignore)"));
    assert!(env.public_path("api-tools/app.js").is_file());
}

#[test]
fn update_swaps_old_groups_for_new_ones() {
    let env = TestEnv::new();
    env.add_package("org/tools-1.0", &[("tools-v1/app.js", "1")]);
    env.add_package("org/tools", &[("tools-v2/app.js", "2")]);
    assert!(env
        .run(&["install", "org/tools", "--path", "vendor/org/tools-1.0"])
        .success);
    assert_eq!(env.gitignore().unwrap(), "\ntools-v1/");

    let result = env.run(&[
        "update",
        "org/tools",
        "--from-path",
        "vendor/org/tools-1.0",
        "--json",
    ]);

    assert!(result.success, "{}", result.combined_output());
    let lines = result.json_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["action"], "uninstall");
    assert_eq!(lines[0]["report"]["removed"][0], "tools-v1");
    assert_eq!(lines[1]["action"], "install");
    assert_eq!(lines[1]["report"]["groups"][0], "tools-v2");

    assert!(!env.public_path("tools-v1").exists());
    assert_eq!(
        std::fs::read_to_string(env.public_path("tools-v2/app.js")).unwrap(),
        "2"
    );
    assert_eq!(env.gitignore().unwrap(), "\ntools-v2/");
}
