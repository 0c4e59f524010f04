mod common;

use sigil_core::AnyEmptyResult;

#[test]
fn init_creates_sample_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::sigil_cmd();
	cmd.current_dir(tmp.path())
		.arg("init")
		.assert()
		.success()
		.stdout(predicates::str::contains("Next steps"));

	assert!(tmp.path().join("tokens.toml").is_file());
	assert!(tmp.path().join("src/theme.sig").is_file());

	// The created pair builds cleanly as-is.
	let mut build = common::sigil_cmd();
	build
		.current_dir(tmp.path())
		.arg("build")
		.arg("--map")
		.arg("tokens.toml")
		.assert()
		.success();

	assert!(tmp.path().join("src/theme.css").is_file());

	Ok(())
}

#[test]
fn init_is_a_noop_when_files_exist() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("tokens.toml"), "color = \"blue\"\n")?;
	std::fs::create_dir_all(tmp.path().join("src"))?;
	std::fs::write(tmp.path().join("src/theme.sig"), "a { c: $color; }\n")?;

	let mut cmd = common::sigil_cmd();
	cmd.current_dir(tmp.path())
		.arg("init")
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("tokens.toml"))?,
		"color = \"blue\"\n"
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("src/theme.sig"))?,
		"a { c: $color; }\n"
	);

	Ok(())
}
