use assert_cmd::Command;

fn bookrec() -> Command {
    let mut cmd = Command::cargo_bin("bookrec").unwrap();
    // keep a developer's config and .env out of the picture
    cmd.env("BOOKREC_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"))
        .env_remove("BOOKREC_ENV");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = bookrec().arg("--help").assert().success().get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();

    for command in ["serve", "migrate", "routes"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[test]
fn routes_prints_every_resource() {
    let output = bookrec().arg("routes").assert().success().get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("/books/"));
    assert!(stdout.contains("/libraries/{id}"));
    assert!(stdout.contains("/recommendations/user/{user_id}"));
    assert!(stdout.contains("/user-interactions/user/{user_id}"));
    assert!(!stdout.contains("/books/user/"));
}

#[test]
fn unknown_subcommand_fails() {
    bookrec().arg("reindex").assert().failure();
}
